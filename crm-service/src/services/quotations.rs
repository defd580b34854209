//! Quotation orchestration. Same numbering/totals/lifecycle shape as
//! invoices, minus discounts and payments.

use crate::domain::follow_ups::{self, FollowUpPatch};
use crate::domain::lifecycle::{ensure_editable, LockPolicy, MutationKind};
use crate::domain::sequence::{self, Series};
use crate::domain::tax;
use crate::dtos::{CreateQuotationRequest, UpdateQuotationRequest};
use crate::models::{FollowUp, GstDetails, Quotation};
use crate::services::store::{AccountStore, QuotationStore};
use chrono::{NaiveDate, Utc};
use crm_core::error::AppError;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct QuotationService {
    quotations: Arc<dyn QuotationStore>,
    accounts: Arc<dyn AccountStore>,
    policy: LockPolicy,
}

impl QuotationService {
    pub fn new(
        quotations: Arc<dyn QuotationStore>,
        accounts: Arc<dyn AccountStore>,
        policy: LockPolicy,
    ) -> Self {
        Self {
            quotations,
            accounts,
            policy,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateQuotationRequest) -> Result<Quotation, AppError> {
        input.validate()?;

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
        // No discount path for quotations.
        let totals = tax::compute(&input.items, &gst, Decimal::ZERO)?;
        tax::apply(&mut gst, &totals);

        let now = Utc::now();
        let mut quotation = Quotation {
            id: Uuid::new_v4().to_string(),
            quotation_number: String::new(),
            business_id: account.id.clone(),
            business_name: account.business_name.clone(),
            contact_name: account.contact_name.clone(),
            mobile_number: account.mobile_number.clone(),
            gstin: account.gst_number.clone(),
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            customer_address: input
                .customer_address
                .or_else(|| Some(account.address_line())),
            date: input.date,
            valid_until: input.valid_until,
            items: input.items,
            gst,
            sub_total: totals.sub_total,
            tax: totals.tax,
            total: totals.total,
            status: input.status,
            delivery: input.delivery,
            warranty: input.warranty,
            payment_terms: input.payment_terms,
            offer_validity: input.offer_validity,
            quotation_notes: input.quotation_notes,
            notes: Vec::new(),
            follow_ups: Vec::new(),
            is_closed: false,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        self.insert_with_fresh_number(&mut quotation).await?;

        metrics::counter!("quotations_created_total").increment(1);
        info!(
            quotation_id = %quotation.id,
            quotation_number = %quotation.quotation_number,
            "Quotation created"
        );
        Ok(quotation)
    }

    async fn insert_with_fresh_number(&self, quotation: &mut Quotation) -> Result<(), AppError> {
        let last = self.quotations.last_number().await?;
        quotation.quotation_number = sequence::next(Series::Quotation, last.as_deref())?;

        match self.quotations.insert(quotation).await {
            Err(AppError::Conflict(_)) => {
                let last = self.quotations.last_number().await?;
                quotation.quotation_number = sequence::next(Series::Quotation, last.as_deref())?;
                self.quotations.insert(quotation).await
            }
            other => other,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Quotation, AppError> {
        self.quotations
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("quotation not found: {}", id)))
    }

    pub async fn list(&self) -> Result<Vec<Quotation>, AppError> {
        self.quotations.list().await
    }

    pub async fn list_by_business(&self, business_id: &str) -> Result<Vec<Quotation>, AppError> {
        self.quotations.list_by_business(business_id).await
    }

    #[instrument(skip(self, input), fields(quotation_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateQuotationRequest,
    ) -> Result<Quotation, AppError> {
        let mut quotation = self.get(id).await?;
        ensure_editable(quotation.is_closed, MutationKind::Fields, &self.policy)?;

        if let Some(items) = input.items {
            quotation.items = items;
        }
        if let Some(gst_type) = input.gst_type {
            quotation.gst.gst_type = gst_type;
        }
        if let Some(amount) = input.manual_gst_amount {
            quotation.gst.manual_gst_amount = Some(amount);
        }
        if let Some(pct) = input.manual_sgst_percentage {
            quotation.gst.manual_sgst_percentage = Some(pct);
        }
        if let Some(pct) = input.manual_cgst_percentage {
            quotation.gst.manual_cgst_percentage = Some(pct);
        }
        if let Some(status) = input.status {
            quotation.status = status;
        }
        if let Some(date) = input.date {
            quotation.date = Some(date);
        }
        if let Some(valid_until) = input.valid_until {
            quotation.valid_until = Some(valid_until);
        }
        if let Some(name) = input.customer_name {
            quotation.customer_name = Some(name);
        }
        if let Some(email) = input.customer_email {
            quotation.customer_email = Some(email);
        }
        if let Some(address) = input.customer_address {
            quotation.customer_address = Some(address);
        }
        if let Some(delivery) = input.delivery {
            quotation.delivery = Some(delivery);
        }
        if let Some(warranty) = input.warranty {
            quotation.warranty = Some(warranty);
        }
        if let Some(terms) = input.payment_terms {
            quotation.payment_terms = Some(terms);
        }
        if let Some(validity) = input.offer_validity {
            quotation.offer_validity = Some(validity);
        }
        if let Some(notes) = input.quotation_notes {
            quotation.quotation_notes = Some(notes);
        }

        let totals = tax::compute(&quotation.items, &quotation.gst, Decimal::ZERO)?;
        tax::apply(&mut quotation.gst, &totals);
        quotation.sub_total = totals.sub_total;
        quotation.tax = totals.tax;
        quotation.total = totals.total;

        self.save(quotation).await
    }

    #[instrument(skip(self), fields(quotation_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let quotation = self.get(id).await?;
        ensure_editable(quotation.is_closed, MutationKind::Fields, &self.policy)?;
        self.quotations.delete(id).await?;
        info!(quotation_id = %id, "Quotation deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(quotation_id = %id))]
    pub async fn close(&self, id: &str) -> Result<Quotation, AppError> {
        let mut quotation = self.get(id).await?;
        if quotation.is_closed {
            return Ok(quotation);
        }
        quotation.is_closed = true;
        self.save(quotation).await
    }

    #[instrument(skip(self), fields(quotation_id = %id))]
    pub async fn unlock(&self, id: &str) -> Result<Quotation, AppError> {
        let mut quotation = self.get(id).await?;
        if !quotation.is_closed {
            return Ok(quotation);
        }
        quotation.is_closed = false;
        self.save(quotation).await
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
        let mut quotation = self.get(id).await?;
        ensure_editable(quotation.is_closed, MutationKind::FollowUp, &self.policy)?;
        follow_ups::add(&mut quotation.follow_ups, date, note, added_by);
        Ok(self.save(quotation).await?.follow_ups)
    }

    pub async fn update_follow_up(
        &self,
        id: &str,
        follow_up_id: &str,
        patch: FollowUpPatch,
    ) -> Result<Vec<FollowUp>, AppError> {
        let mut quotation = self.get(id).await?;
        ensure_editable(quotation.is_closed, MutationKind::FollowUp, &self.policy)?;
        follow_ups::update(&mut quotation.follow_ups, follow_up_id, patch)?;
        Ok(self.save(quotation).await?.follow_ups)
    }

    pub async fn remove_follow_up(
        &self,
        id: &str,
        follow_up_id: &str,
    ) -> Result<Vec<FollowUp>, AppError> {
        let mut quotation = self.get(id).await?;
        ensure_editable(quotation.is_closed, MutationKind::FollowUp, &self.policy)?;
        follow_ups::remove(&mut quotation.follow_ups, follow_up_id)?;
        Ok(self.save(quotation).await?.follow_ups)
    }

    async fn save(&self, mut quotation: Quotation) -> Result<Quotation, AppError> {
        quotation.version += 1;
        quotation.updated_at = Utc::now();
        self.quotations.update(&quotation).await?;
        Ok(quotation)
    }
}
