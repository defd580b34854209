//! Quotation aggregate root.

use super::{FollowUp, GstDetails, LineItem, Note};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Informational workflow status. Enum-validated on input, otherwise
/// unrestricted; independent of the lock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotationStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl Default for QuotationStatus {
    fn default() -> Self {
        QuotationStatus::Draft
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique within the quotation series; assigned at creation.
    pub quotation_number: String,

    pub business_id: String,
    // Snapshot of the referenced business account as of creation time.
    pub business_name: String,
    pub contact_name: String,
    pub mobile_number: String,
    pub gstin: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,

    pub date: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,

    pub items: Vec<LineItem>,
    pub gst: GstDetails,
    pub sub_total: Decimal,
    pub tax: Decimal,
    pub total: Decimal,

    pub status: QuotationStatus,

    // Commercial terms, free-form pass-through fields.
    pub delivery: Option<String>,
    pub warranty: Option<String>,
    pub payment_terms: Option<String>,
    pub offer_validity: Option<String>,
    pub quotation_notes: Option<String>,

    pub notes: Vec<Note>,
    pub follow_ups: Vec<FollowUp>,

    pub is_closed: bool,

    pub version: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}
