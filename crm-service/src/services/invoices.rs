//! Invoice orchestration: numbering, totals, lifecycle gating, payments,
//! and the embedded follow-up/note ledgers.

use crate::domain::follow_ups::{self, FollowUpPatch};
use crate::domain::lifecycle::{ensure_editable, LockPolicy, MutationKind};
use crate::domain::notes;
use crate::domain::sequence::{self, Series};
use crate::domain::tax;
use crate::dtos::{CreateInvoiceRequest, RecordPaymentRequest, UpdateInvoiceRequest};
use crate::models::{FollowUp, GstDetails, Invoice, Note, Payment, PaymentStatus};
use crate::services::store::{AccountStore, InvoiceStore};
use chrono::{NaiveDate, Utc};
use crm_core::error::AppError;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct InvoiceService {
    invoices: Arc<dyn InvoiceStore>,
    accounts: Arc<dyn AccountStore>,
    policy: LockPolicy,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoiceStore>,
        accounts: Arc<dyn AccountStore>,
        policy: LockPolicy,
    ) -> Self {
        Self {
            invoices,
            accounts,
            policy,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateInvoiceRequest) -> Result<Invoice, AppError> {
        input.validate()?;

        // The referenced account must exist; its display fields are frozen
        // onto the invoice so later account edits cannot rewrite history.
        let account = self
            .accounts
            .find(&input.business_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!(
                    "business account not found: {}",
                    input.business_id
                ))
            })?;

        let mut gst = GstDetails {
            gst_type: input.gst_type,
            manual_gst_amount: input.manual_gst_amount,
            manual_sgst_percentage: input.manual_sgst_percentage,
            manual_cgst_percentage: input.manual_cgst_percentage,
            ..GstDetails::default()
        };
        let totals = tax::compute(&input.items, &gst, input.discount_amount)?;
        tax::apply(&mut gst, &totals);

        let now = Utc::now();
        let mut invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number: String::new(),
            business_id: account.id.clone(),
            business_name: account.business_name.clone(),
            contact_name: account.contact_name.clone(),
            email: account.email.clone(),
            mobile_number: account.mobile_number.clone(),
            customer_name: input.customer_name.or_else(|| Some(account.contact_name.clone())),
            customer_address: input
                .customer_address
                .or_else(|| Some(account.address_line())),
            customer_gstin: account.gst_number.clone(),
            date: input.date,
            due_date: input.due_date,
            items: input.items,
            gst,
            discount_amount: input.discount_amount,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            payment_terms: input.payment_terms,
            payment_status: PaymentStatus::Pending,
            payments: Vec::new(),
            notes: Vec::new(),
            follow_ups: Vec::new(),
            is_closed: false,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        self.insert_with_fresh_number(&mut invoice).await?;

        metrics::counter!("invoices_created_total").increment(1);
        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            "Invoice created"
        );
        Ok(invoice)
    }

    /// Assign the next series number and insert. A duplicate-number
    /// conflict means a concurrent create won the race: regenerate from
    /// the winner's number and retry once, then surface the conflict.
    async fn insert_with_fresh_number(&self, invoice: &mut Invoice) -> Result<(), AppError> {
        let last = self.invoices.last_number().await?;
        invoice.invoice_number = sequence::next(Series::Invoice, last.as_deref())?;

        match self.invoices.insert(invoice).await {
            Err(AppError::Conflict(_)) => {
                let last = self.invoices.last_number().await?;
                invoice.invoice_number = sequence::next(Series::Invoice, last.as_deref())?;
                self.invoices.insert(invoice).await
            }
            other => other,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Invoice, AppError> {
        self.invoices
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("invoice not found: {}", id)))
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, AppError> {
        self.invoices.list().await
    }

    #[instrument(skip(self, input), fields(invoice_id = %id))]
    pub async fn update(&self, id: &str, input: UpdateInvoiceRequest) -> Result<Invoice, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::Fields, &self.policy)?;

        if let Some(items) = input.items {
            invoice.items = items;
        }
        if let Some(gst_type) = input.gst_type {
            invoice.gst.gst_type = gst_type;
        }
        if let Some(amount) = input.manual_gst_amount {
            invoice.gst.manual_gst_amount = Some(amount);
        }
        if let Some(pct) = input.manual_sgst_percentage {
            invoice.gst.manual_sgst_percentage = Some(pct);
        }
        if let Some(pct) = input.manual_cgst_percentage {
            invoice.gst.manual_cgst_percentage = Some(pct);
        }
        if let Some(discount) = input.discount_amount {
            invoice.discount_amount = discount;
        }
        if let Some(date) = input.date {
            invoice.date = Some(date);
        }
        if let Some(due) = input.due_date {
            invoice.due_date = Some(due);
        }
        if let Some(name) = input.customer_name {
            invoice.customer_name = Some(name);
        }
        if let Some(address) = input.customer_address {
            invoice.customer_address = Some(address);
        }
        if let Some(terms) = input.payment_terms {
            invoice.payment_terms = Some(terms);
        }

        // Recompute on every save so stored totals can never go stale.
        let totals = tax::compute(&invoice.items, &invoice.gst, invoice.discount_amount)?;
        tax::apply(&mut invoice.gst, &totals);
        invoice.sub_total = totals.sub_total;
        invoice.tax = totals.tax;
        invoice.total = totals.total;
        invoice.refresh_payment_status();

        self.save(invoice).await
    }

    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::Fields, &self.policy)?;
        self.invoices.delete(id).await?;
        info!(invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    /// Idempotent: closing an already-closed invoice returns it unchanged.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn close(&self, id: &str) -> Result<Invoice, AppError> {
        let mut invoice = self.get(id).await?;
        if invoice.is_closed {
            return Ok(invoice);
        }
        invoice.is_closed = true;
        let invoice = self.save(invoice).await?;
        info!(invoice_id = %id, "Invoice closed");
        Ok(invoice)
    }

    /// Idempotent: unlocking an open invoice returns it unchanged.
    #[instrument(skip(self), fields(invoice_id = %id))]
    pub async fn unlock(&self, id: &str) -> Result<Invoice, AppError> {
        let mut invoice = self.get(id).await?;
        if !invoice.is_closed {
            return Ok(invoice);
        }
        invoice.is_closed = false;
        let invoice = self.save(invoice).await?;
        info!(invoice_id = %id, "Invoice unlocked");
        Ok(invoice)
    }

    #[instrument(skip(self, input), fields(invoice_id = %id))]
    pub async fn record_payment(
        &self,
        id: &str,
        input: RecordPaymentRequest,
        added_by: String,
    ) -> Result<Invoice, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::Payment, &self.policy)?;

        if input.amount <= Decimal::ZERO {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "payment amount must be positive"
            )));
        }
        if invoice.amount_paid() + input.amount > invoice.total {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "payment exceeds outstanding balance"
            )));
        }

        invoice.payments.push(Payment {
            id: Uuid::new_v4().to_string(),
            amount: input.amount,
            date: input.date,
            method: input.method,
            reference: input.reference,
            added_by,
        });
        invoice.refresh_payment_status();

        let invoice = self.save(invoice).await?;
        metrics::counter!("invoice_payments_recorded_total").increment(1);
        Ok(invoice)
    }

    #[instrument(skip(self), fields(invoice_id = %id, payment_id = %payment_id))]
    pub async fn remove_payment(&self, id: &str, payment_id: &str) -> Result<Invoice, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::Payment, &self.policy)?;

        let position = invoice
            .payments
            .iter()
            .position(|p| p.id == payment_id)
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("payment not found: {}", payment_id))
            })?;
        invoice.payments.remove(position);
        invoice.refresh_payment_status();

        self.save(invoice).await
    }

    pub async fn follow_ups(&self, id: &str) -> Result<Vec<FollowUp>, AppError> {
        Ok(self.get(id).await?.follow_ups)
    }

    pub async fn add_follow_up(
        &self,
        id: &str,
        date: NaiveDate,
        note: String,
        added_by: String,
    ) -> Result<Vec<FollowUp>, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::FollowUp, &self.policy)?;
        follow_ups::add(&mut invoice.follow_ups, date, note, added_by);
        Ok(self.save(invoice).await?.follow_ups)
    }

    pub async fn update_follow_up(
        &self,
        id: &str,
        follow_up_id: &str,
        patch: FollowUpPatch,
    ) -> Result<Vec<FollowUp>, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::FollowUp, &self.policy)?;
        follow_ups::update(&mut invoice.follow_ups, follow_up_id, patch)?;
        Ok(self.save(invoice).await?.follow_ups)
    }

    pub async fn remove_follow_up(
        &self,
        id: &str,
        follow_up_id: &str,
    ) -> Result<Vec<FollowUp>, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::FollowUp, &self.policy)?;
        follow_ups::remove(&mut invoice.follow_ups, follow_up_id)?;
        Ok(self.save(invoice).await?.follow_ups)
    }

    pub async fn add_note(&self, id: &str, text: String, author: String) -> Result<Vec<Note>, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::Fields, &self.policy)?;
        notes::add(&mut invoice.notes, text, author);
        Ok(self.save(invoice).await?.notes)
    }

    pub async fn update_note(
        &self,
        id: &str,
        note_id: &str,
        text: String,
    ) -> Result<Vec<Note>, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::Fields, &self.policy)?;
        notes::update(&mut invoice.notes, note_id, text)?;
        Ok(self.save(invoice).await?.notes)
    }

    pub async fn remove_note(&self, id: &str, note_id: &str) -> Result<Vec<Note>, AppError> {
        let mut invoice = self.get(id).await?;
        ensure_editable(invoice.is_closed, MutationKind::Fields, &self.policy)?;
        notes::remove(&mut invoice.notes, note_id)?;
        Ok(self.save(invoice).await?.notes)
    }

    async fn save(&self, mut invoice: Invoice) -> Result<Invoice, AppError> {
        invoice.version += 1;
        invoice.updated_at = Utc::now();
        self.invoices.update(&invoice).await?;
        Ok(invoice)
    }
}
