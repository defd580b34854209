//! MongoDB-backed store: one collection per aggregate root.

use crate::models::{BusinessAccount, Invoice, Quotation};
use crate::services::store::{
    AccountFilter, AccountStore, HealthProbe, InvoiceStore, QuotationStore,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneOptions, FindOptions, IndexOptions};
use mongodb::{
    bson::{doc, Document},
    Client as MongoClient, Collection, Database, IndexModel,
};
use crm_core::error::AppError;

#[derive(Clone)]
pub struct MongoStore {
    client: MongoClient,
    db: Database,
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref we)) if we.code == 11000
    )
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    /// Create the indexes the service relies on. The unique number indexes
    /// are what turns a sequence-generation race into a retryable
    /// duplicate-key conflict instead of a silent duplicate.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for crm-service");

        let unique_number = |field: &str| {
            IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(
                    IndexOptions::builder()
                        .name(format!("{}_unique", field))
                        .unique(true)
                        .build(),
                )
                .build()
        };

        self.invoices()
            .create_index(unique_number("invoice_number"), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create invoice_number index: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on invoices.invoice_number");

        self.quotations()
            .create_index(unique_number("quotation_number"), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create quotation_number index: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on quotations.quotation_number");

        let account_status_index = IndexModel::builder()
            .keys(doc! { "status": 1, "is_customer": 1 })
            .options(
                IndexOptions::builder()
                    .name("status_lookup".to_string())
                    .build(),
            )
            .build();

        self.accounts()
            .create_index(account_status_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create account status index: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on accounts.(status, is_customer)");

        let business_index = IndexModel::builder()
            .keys(doc! { "business_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("business_lookup".to_string())
                    .build(),
            )
            .build();

        self.quotations()
            .create_index(business_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create quotation business index: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on quotations.business_id");

        Ok(())
    }

    pub fn invoices(&self) -> Collection<Invoice> {
        self.db.collection("invoices")
    }

    pub fn quotations(&self) -> Collection<Quotation> {
        self.db.collection("quotations")
    }

    pub fn accounts(&self) -> Collection<BusinessAccount> {
        self.db.collection("business_accounts")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn newest_first() -> FindOptions {
        FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build()
    }

    fn latest_created() -> FindOneOptions {
        FindOneOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build()
    }
}

#[async_trait]
impl HealthProbe for MongoStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}

async fn collect<T>(mut cursor: mongodb::Cursor<T>) -> Result<Vec<T>, AppError>
where
    T: serde::de::DeserializeOwned + Unpin + Send + Sync,
{
    let mut out = Vec::new();
    while let Some(item) = cursor.try_next().await.map_err(AppError::from)? {
        out.push(item);
    }
    Ok(out)
}

/// Replace a document matching `_id` and the pre-bump version. No match
/// means either a concurrent writer got there first or the document is
/// gone; the two are distinguished with a second lookup.
async fn versioned_replace<T>(
    collection: &Collection<T>,
    id: &str,
    version: i64,
    document: &T,
) -> Result<(), AppError>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Unpin + Send + Sync,
{
    let result = collection
        .replace_one(doc! { "_id": id, "version": version - 1 }, document, None)
        .await
        .map_err(AppError::from)?;

    if result.matched_count == 0 {
        let exists = collection
            .count_documents(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?
            > 0;
        if exists {
            return Err(AppError::Conflict(anyhow::anyhow!(
                "document was modified concurrently; reload and retry"
            )));
        }
        return Err(AppError::NotFound(anyhow::anyhow!("document not found")));
    }

    Ok(())
}

#[async_trait]
impl InvoiceStore for MongoStore {
    async fn insert(&self, invoice: &Invoice) -> Result<(), AppError> {
        self.invoices().insert_one(invoice, None).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::Conflict(anyhow::anyhow!(
                    "invoice number already exists: {}",
                    invoice.invoice_number
                ))
            } else {
                AppError::from(e)
            }
        })?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        self.invoices()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        let cursor = self
            .invoices()
            .find(Document::new(), Self::newest_first())
            .await
            .map_err(AppError::from)?;
        collect(cursor).await
    }

    async fn last_number(&self) -> Result<Option<String>, AppError> {
        let latest = self
            .invoices()
            .find_one(Document::new(), Self::latest_created())
            .await
            .map_err(AppError::from)?;
        Ok(latest.map(|invoice| invoice.invoice_number))
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), AppError> {
        versioned_replace(&self.invoices(), &invoice.id, invoice.version, invoice).await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .invoices()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl QuotationStore for MongoStore {
    async fn insert(&self, quotation: &Quotation) -> Result<(), AppError> {
        self.quotations()
            .insert_one(quotation, None)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::Conflict(anyhow::anyhow!(
                        "quotation number already exists: {}",
                        quotation.quotation_number
                    ))
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Quotation>, AppError> {
        self.quotations()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self) -> Result<Vec<Quotation>, AppError> {
        let cursor = self
            .quotations()
            .find(Document::new(), Self::newest_first())
            .await
            .map_err(AppError::from)?;
        collect(cursor).await
    }

    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Quotation>, AppError> {
        let cursor = self
            .quotations()
            .find(doc! { "business_id": business_id }, Self::newest_first())
            .await
            .map_err(AppError::from)?;
        collect(cursor).await
    }

    async fn last_number(&self) -> Result<Option<String>, AppError> {
        let latest = self
            .quotations()
            .find_one(Document::new(), Self::latest_created())
            .await
            .map_err(AppError::from)?;
        Ok(latest.map(|quotation| quotation.quotation_number))
    }

    async fn update(&self, quotation: &Quotation) -> Result<(), AppError> {
        versioned_replace(&self.quotations(), &quotation.id, quotation.version, quotation).await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .quotations()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl AccountStore for MongoStore {
    async fn insert(&self, account: &BusinessAccount) -> Result<(), AppError> {
        self.accounts()
            .insert_one(account, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<BusinessAccount>, AppError> {
        self.accounts()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn list(&self, filter: AccountFilter) -> Result<Vec<BusinessAccount>, AppError> {
        let mut query = Document::new();
        if let Some(status) = filter.status {
            let status = mongodb::bson::to_bson(&status).map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("Failed to serialize status: {}", e))
            })?;
            query.insert("status", status);
        }
        if let Some(is_customer) = filter.is_customer {
            query.insert("is_customer", is_customer);
        }

        let cursor = self
            .accounts()
            .find(query, Self::newest_first())
            .await
            .map_err(AppError::from)?;
        collect(cursor).await
    }

    async fn update(&self, account: &BusinessAccount) -> Result<(), AppError> {
        versioned_replace(&self.accounts(), &account.id, account.version, account).await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self
            .accounts()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(result.deleted_count > 0)
    }
}
