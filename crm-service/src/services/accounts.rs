//! Business account orchestration: CRUD, lead/customer listings, and the
//! embedded follow-up/note ledgers. Accounts have no lock state.

use crate::domain::follow_ups::{self, FollowUpPatch};
use crate::domain::notes;
use crate::dtos::{CreateAccountRequest, UpdateAccountRequest};
use crate::models::{AccountStatus, BusinessAccount, FollowUp, Note};
use crate::services::store::{AccountFilter, AccountStore};
use chrono::{NaiveDate, Utc};
use crm_core::error::AppError;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateAccountRequest) -> Result<BusinessAccount, AppError> {
        input.validate()?;

        let now = Utc::now();
        let account = BusinessAccount {
            id: Uuid::new_v4().to_string(),
            business_name: input.business_name,
            source_type: input.source_type,
            gst_number: input.gst_number,
            contact_name: input.contact_name,
            email: input.email,
            mobile_number: input.mobile_number,
            phone_number: input.phone_number,
            address_line1: input.address_line1,
            address_line2: input.address_line2,
            address_line3: input.address_line3,
            landmark: input.landmark,
            city: input.city,
            pincode: input.pincode,
            state: input.state,
            country: input.country,
            website: input.website,
            temperature: input.temperature,
            status: input.status,
            is_customer: input.status == AccountStatus::Customer,
            assigned_to: input.assigned_to,
            selected_product: input.selected_product,
            follow_ups: Vec::new(),
            notes: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        };

        self.accounts.insert(&account).await?;
        metrics::counter!("accounts_created_total").increment(1);
        info!(account_id = %account.id, "Business account created");
        Ok(account)
    }

    pub async fn get(&self, id: &str) -> Result<BusinessAccount, AppError> {
        self.accounts.find(id).await?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!("business account not found: {}", id))
        })
    }

    pub async fn list(&self) -> Result<Vec<BusinessAccount>, AppError> {
        self.accounts.list(AccountFilter::default()).await
    }

    /// Active leads: accounts still in the pipeline, not yet customers.
    pub async fn active_leads(&self) -> Result<Vec<BusinessAccount>, AppError> {
        self.accounts
            .list(AccountFilter {
                status: Some(AccountStatus::Active),
                is_customer: Some(false),
            })
            .await
    }

    pub async fn customers(&self) -> Result<Vec<BusinessAccount>, AppError> {
        self.accounts
            .list(AccountFilter {
                status: None,
                is_customer: Some(true),
            })
            .await
    }

    #[instrument(skip(self, input), fields(account_id = %id))]
    pub async fn update(
        &self,
        id: &str,
        input: UpdateAccountRequest,
    ) -> Result<BusinessAccount, AppError> {
        let mut account = self.get(id).await?;

        if let Some(name) = input.business_name {
            account.business_name = name;
        }
        if let Some(source) = input.source_type {
            account.source_type = source;
        }
        if let Some(gst) = input.gst_number {
            account.gst_number = Some(gst);
        }
        if let Some(contact) = input.contact_name {
            account.contact_name = contact;
        }
        if let Some(email) = input.email {
            account.email = email;
        }
        if let Some(mobile) = input.mobile_number {
            account.mobile_number = mobile;
        }
        if let Some(phone) = input.phone_number {
            account.phone_number = Some(phone);
        }
        if let Some(line1) = input.address_line1 {
            account.address_line1 = line1;
        }
        if let Some(line2) = input.address_line2 {
            account.address_line2 = Some(line2);
        }
        if let Some(line3) = input.address_line3 {
            account.address_line3 = Some(line3);
        }
        if let Some(landmark) = input.landmark {
            account.landmark = Some(landmark);
        }
        if let Some(city) = input.city {
            account.city = city;
        }
        if let Some(pincode) = input.pincode {
            account.pincode = pincode;
        }
        if let Some(state) = input.state {
            account.state = state;
        }
        if let Some(country) = input.country {
            account.country = country;
        }
        if let Some(website) = input.website {
            account.website = Some(website);
        }
        if let Some(temperature) = input.temperature {
            account.temperature = temperature;
        }
        if let Some(status) = input.status {
            account.status = status;
        }
        if let Some(assigned) = input.assigned_to {
            account.assigned_to = Some(assigned);
        }
        if let Some(product) = input.selected_product {
            account.selected_product = Some(product);
        }

        // Re-derived, never taken from input.
        account.is_customer = account.status == AccountStatus::Customer;

        self.save(account).await
    }

    #[instrument(skip(self), fields(account_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.accounts.delete(id).await? {
            return Err(AppError::NotFound(anyhow::anyhow!(
                "business account not found: {}",
                id
            )));
        }
        info!(account_id = %id, "Business account deleted");
        Ok(())
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
        let mut account = self.get(id).await?;
        follow_ups::add(&mut account.follow_ups, date, note, added_by);
        Ok(self.save(account).await?.follow_ups)
    }

    pub async fn update_follow_up(
        &self,
        id: &str,
        follow_up_id: &str,
        patch: FollowUpPatch,
    ) -> Result<Vec<FollowUp>, AppError> {
        let mut account = self.get(id).await?;
        follow_ups::update(&mut account.follow_ups, follow_up_id, patch)?;
        Ok(self.save(account).await?.follow_ups)
    }

    pub async fn remove_follow_up(
        &self,
        id: &str,
        follow_up_id: &str,
    ) -> Result<Vec<FollowUp>, AppError> {
        let mut account = self.get(id).await?;
        follow_ups::remove(&mut account.follow_ups, follow_up_id)?;
        Ok(self.save(account).await?.follow_ups)
    }

    pub async fn add_note(&self, id: &str, text: String, author: String) -> Result<Vec<Note>, AppError> {
        let mut account = self.get(id).await?;
        notes::add(&mut account.notes, text, author);
        Ok(self.save(account).await?.notes)
    }

    pub async fn update_note(
        &self,
        id: &str,
        note_id: &str,
        text: String,
    ) -> Result<Vec<Note>, AppError> {
        let mut account = self.get(id).await?;
        notes::update(&mut account.notes, note_id, text)?;
        Ok(self.save(account).await?.notes)
    }

    pub async fn remove_note(&self, id: &str, note_id: &str) -> Result<Vec<Note>, AppError> {
        let mut account = self.get(id).await?;
        notes::remove(&mut account.notes, note_id)?;
        Ok(self.save(account).await?.notes)
    }

    async fn save(&self, mut account: BusinessAccount) -> Result<BusinessAccount, AppError> {
        account.version += 1;
        account.updated_at = Utc::now();
        self.accounts.update(&account).await?;
        Ok(account)
    }
}
