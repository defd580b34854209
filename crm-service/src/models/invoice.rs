//! Invoice aggregate root.

use super::{FollowUp, GstDetails, LineItem, Note};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived from the payment history against the invoice total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

/// A settlement entry. Append-only; carries a stable id so individual
/// payments can be removed without positional addressing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub added_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "_id")]
    pub id: String,
    /// Unique within the invoice series; assigned at creation.
    pub invoice_number: String,

    pub business_id: String,
    // Snapshot of the referenced business account as of creation time.
    // Deliberately never resynced: historical invoices must not change when
    // the account is edited later.
    pub business_name: String,
    pub contact_name: String,
    pub email: String,
    pub mobile_number: String,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub customer_gstin: Option<String>,

    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,

    pub items: Vec<LineItem>,
    pub gst: GstDetails,
    pub discount_amount: Decimal,
    pub sub_total: Decimal,
    pub tax: Decimal,
    pub total: Decimal,

    pub payment_terms: Option<String>,
    pub payment_status: PaymentStatus,
    pub payments: Vec<Payment>,

    pub notes: Vec<Note>,
    pub follow_ups: Vec<FollowUp>,

    pub is_closed: bool,

    /// Bumped on every save; writes check it so concurrent stale updates
    /// surface as conflicts instead of silently winning.
    pub version: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    pub fn amount_paid(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Recompute payment_status from the current payment history.
    pub fn refresh_payment_status(&mut self) {
        let paid = self.amount_paid();
        self.payment_status = if paid <= Decimal::ZERO {
            PaymentStatus::Pending
        } else if paid < self.total {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Paid
        };
    }
}
