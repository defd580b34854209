//! Repository interfaces over the persistent store.
//!
//! One trait per aggregate root, object-safe so services hold
//! `Arc<dyn ...Store>` and tests can substitute the in-memory
//! implementation. `update` uses optimistic concurrency: callers pass the
//! document with its version already bumped, the store matches on the
//! previous version, and a mismatch surfaces as `Conflict` so lost updates
//! on embedded lists stay detectable.

use crate::models::{AccountStatus, BusinessAccount, Invoice, Quotation};
use async_trait::async_trait;
use crm_core::error::AppError;

#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice. A duplicate invoice number is a `Conflict`.
    async fn insert(&self, invoice: &Invoice) -> Result<(), AppError>;
    async fn find(&self, id: &str) -> Result<Option<Invoice>, AppError>;
    /// All invoices, newest first.
    async fn list(&self) -> Result<Vec<Invoice>, AppError>;
    /// Number of the most recently created invoice, if any.
    async fn last_number(&self) -> Result<Option<String>, AppError>;
    async fn update(&self, invoice: &Invoice) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait QuotationStore: Send + Sync {
    /// Insert a new quotation. A duplicate quotation number is a `Conflict`.
    async fn insert(&self, quotation: &Quotation) -> Result<(), AppError>;
    async fn find(&self, id: &str) -> Result<Option<Quotation>, AppError>;
    async fn list(&self) -> Result<Vec<Quotation>, AppError>;
    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Quotation>, AppError>;
    async fn last_number(&self) -> Result<Option<String>, AppError>;
    async fn update(&self, quotation: &Quotation) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub status: Option<AccountStatus>,
    pub is_customer: Option<bool>,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: &BusinessAccount) -> Result<(), AppError>;
    async fn find(&self, id: &str) -> Result<Option<BusinessAccount>, AppError>;
    async fn list(&self, filter: AccountFilter) -> Result<Vec<BusinessAccount>, AppError>;
    async fn update(&self, account: &BusinessAccount) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
