//! Business account aggregate root (leads and customers).

use super::{FollowUp, Note};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Direct,
    SocialMedia,
    Online,
    Client,
    TradeFair,
    Other,
}

impl Default for SourceType {
    fn default() -> Self {
        SourceType::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
    Pipeline,
    Closed,
    Customer,
    Quotations,
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessAccount {
    #[serde(rename = "_id")]
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
    /// Derived from status on every save: Customer accounts are customers.
    pub is_customer: bool,
    pub assigned_to: Option<String>,
    pub selected_product: Option<String>,

    pub follow_ups: Vec<FollowUp>,
    pub notes: Vec<Note>,

    pub version: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl BusinessAccount {
    /// Single postal-address line for snapshotting onto documents.
    pub fn address_line(&self) -> String {
        let mut parts = vec![self.address_line1.clone()];
        parts.extend(self.address_line2.clone());
        parts.extend(self.address_line3.clone());
        parts.push(self.city.clone());
        parts.push(format!("{} {}", self.state, self.pincode));
        parts.push(self.country.clone());
        parts.join(", ")
    }
}
