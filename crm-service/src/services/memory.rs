//! In-memory store used by the test suite.
//!
//! Mirrors the MongoDB store's observable behavior: insertion order doubles
//! as creation order (newest-first listings, last-created number), duplicate
//! document numbers are rejected the way the unique index rejects them, and
//! versioned replaces conflict on stale writes.

use crate::models::{BusinessAccount, Invoice, Quotation};
use crate::services::store::{
    AccountFilter, AccountStore, HealthProbe, InvoiceStore, QuotationStore,
};
use async_trait::async_trait;
use crm_core::error::AppError;
use std::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    invoices: RwLock<Vec<Invoice>>,
    quotations: RwLock<Vec<Quotation>>,
    accounts: RwLock<Vec<BusinessAccount>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(number: &str) -> AppError {
    AppError::Conflict(anyhow::anyhow!("document number already exists: {}", number))
}

fn stale() -> AppError {
    AppError::Conflict(anyhow::anyhow!(
        "document was modified concurrently; reload and retry"
    ))
}

fn gone() -> AppError {
    AppError::NotFound(anyhow::anyhow!("document not found"))
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn insert(&self, invoice: &Invoice) -> Result<(), AppError> {
        let mut invoices = self.invoices.write().unwrap();
        if invoices
            .iter()
            .any(|i| i.invoice_number == invoice.invoice_number)
        {
            return Err(duplicate(&invoice.invoice_number));
        }
        invoices.push(invoice.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Invoice>, AppError> {
        Ok(self
            .invoices
            .read()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        Ok(self.invoices.read().unwrap().iter().rev().cloned().collect())
    }

    async fn last_number(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .invoices
            .read()
            .unwrap()
            .last()
            .map(|i| i.invoice_number.clone()))
    }

    async fn update(&self, invoice: &Invoice) -> Result<(), AppError> {
        let mut invoices = self.invoices.write().unwrap();
        let slot = invoices
            .iter_mut()
            .find(|i| i.id == invoice.id)
            .ok_or_else(gone)?;
        if slot.version != invoice.version - 1 {
            return Err(stale());
        }
        *slot = invoice.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut invoices = self.invoices.write().unwrap();
        let before = invoices.len();
        invoices.retain(|i| i.id != id);
        Ok(invoices.len() < before)
    }
}

#[async_trait]
impl QuotationStore for MemoryStore {
    async fn insert(&self, quotation: &Quotation) -> Result<(), AppError> {
        let mut quotations = self.quotations.write().unwrap();
        if quotations
            .iter()
            .any(|q| q.quotation_number == quotation.quotation_number)
        {
            return Err(duplicate(&quotation.quotation_number));
        }
        quotations.push(quotation.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Quotation>, AppError> {
        Ok(self
            .quotations
            .read()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Quotation>, AppError> {
        Ok(self
            .quotations
            .read()
            .unwrap()
            .iter()
            .rev()
            .cloned()
            .collect())
    }

    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Quotation>, AppError> {
        Ok(self
            .quotations
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|q| q.business_id == business_id)
            .cloned()
            .collect())
    }

    async fn last_number(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .quotations
            .read()
            .unwrap()
            .last()
            .map(|q| q.quotation_number.clone()))
    }

    async fn update(&self, quotation: &Quotation) -> Result<(), AppError> {
        let mut quotations = self.quotations.write().unwrap();
        let slot = quotations
            .iter_mut()
            .find(|q| q.id == quotation.id)
            .ok_or_else(gone)?;
        if slot.version != quotation.version - 1 {
            return Err(stale());
        }
        *slot = quotation.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut quotations = self.quotations.write().unwrap();
        let before = quotations.len();
        quotations.retain(|q| q.id != id);
        Ok(quotations.len() < before)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert(&self, account: &BusinessAccount) -> Result<(), AppError> {
        self.accounts.write().unwrap().push(account.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<BusinessAccount>, AppError> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list(&self, filter: AccountFilter) -> Result<Vec<BusinessAccount>, AppError> {
        Ok(self
            .accounts
            .read()
            .unwrap()
            .iter()
            .rev()
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .filter(|a| filter.is_customer.map_or(true, |c| a.is_customer == c))
            .cloned()
            .collect())
    }

    async fn update(&self, account: &BusinessAccount) -> Result<(), AppError> {
        let mut accounts = self.accounts.write().unwrap();
        let slot = accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or_else(gone)?;
        if slot.version != account.version - 1 {
            return Err(stale());
        }
        *slot = account.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut accounts = self.accounts.write().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        Ok(accounts.len() < before)
    }
}
