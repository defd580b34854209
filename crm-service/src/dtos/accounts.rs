use crate::models::{
    AccountStatus, BusinessAccount, FollowUp, Note, SourceType, Temperature,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, message = "business_name is required"))]
    pub business_name: String,
    #[serde(default)]
    pub source_type: SourceType,
    pub gst_number: Option<String>,
    #[validate(length(min = 1, message = "contact_name is required"))]
    pub contact_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "mobile_number is required"))]
    pub mobile_number: String,
    pub phone_number: Option<String>,
    #[validate(length(min = 1, message = "address_line1 is required"))]
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub landmark: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    pub pincode: i64,
    #[validate(length(min = 1, message = "state is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
    pub website: Option<String>,
    pub temperature: Temperature,
    #[serde(default)]
    pub status: AccountStatus,
    pub assigned_to: Option<String>,
    pub selected_product: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAccountRequest {
    pub business_name: Option<String>,
    pub source_type: Option<SourceType>,
    pub gst_number: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub phone_number: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub landmark: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<i64>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub temperature: Option<Temperature>,
    pub status: Option<AccountStatus>,
    pub assigned_to: Option<String>,
    pub selected_product: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub business_name: String,
    pub source_type: SourceType,
    pub gst_number: Option<String>,
    pub contact_name: String,
    pub email: String,
    pub mobile_number: String,
    pub phone_number: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub address_line3: Option<String>,
    pub landmark: Option<String>,
    pub city: String,
    pub pincode: i64,
    pub state: String,
    pub country: String,
    pub website: Option<String>,
    pub temperature: Temperature,
    pub status: AccountStatus,
    pub is_customer: bool,
    pub assigned_to: Option<String>,
    pub selected_product: Option<String>,
    pub follow_ups: Vec<FollowUp>,
    pub notes: Vec<Note>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BusinessAccount> for AccountResponse {
    fn from(account: BusinessAccount) -> Self {
        Self {
            id: account.id,
            business_name: account.business_name,
            source_type: account.source_type,
            gst_number: account.gst_number,
            contact_name: account.contact_name,
            email: account.email,
            mobile_number: account.mobile_number,
            phone_number: account.phone_number,
            address_line1: account.address_line1,
            address_line2: account.address_line2,
            address_line3: account.address_line3,
            landmark: account.landmark,
            city: account.city,
            pincode: account.pincode,
            state: account.state,
            country: account.country,
            website: account.website,
            temperature: account.temperature,
            status: account.status,
            is_customer: account.is_customer,
            assigned_to: account.assigned_to,
            selected_product: account.selected_product,
            follow_ups: account.follow_ups,
            notes: account.notes,
            version: account.version,
            created_at: account.created_at.to_rfc3339(),
            updated_at: account.updated_at.to_rfc3339(),
        }
    }
}
