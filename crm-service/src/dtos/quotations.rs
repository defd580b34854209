use crate::models::{
    FollowUp, GstDetails, GstType, LineItem, Note, Quotation, QuotationStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuotationRequest {
    #[validate(length(min = 1, message = "business_id is required"))]
    pub business_id: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub gst_type: GstType,
    pub manual_gst_amount: Option<Decimal>,
    pub manual_sgst_percentage: Option<Decimal>,
    pub manual_cgst_percentage: Option<Decimal>,
    #[serde(default)]
    pub status: QuotationStatus,
    pub date: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub delivery: Option<String>,
    pub warranty: Option<String>,
    pub payment_terms: Option<String>,
    pub offer_validity: Option<String>,
    pub quotation_notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuotationRequest {
    pub items: Option<Vec<LineItem>>,
    pub gst_type: Option<GstType>,
    pub manual_gst_amount: Option<Decimal>,
    pub manual_sgst_percentage: Option<Decimal>,
    pub manual_cgst_percentage: Option<Decimal>,
    pub status: Option<QuotationStatus>,
    pub date: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub delivery: Option<String>,
    pub warranty: Option<String>,
    pub payment_terms: Option<String>,
    pub offer_validity: Option<String>,
    pub quotation_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuotationResponse {
    pub id: String,
    pub quotation_number: String,
    pub business_id: String,
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
    pub delivery: Option<String>,
    pub warranty: Option<String>,
    pub payment_terms: Option<String>,
    pub offer_validity: Option<String>,
    pub quotation_notes: Option<String>,
    pub notes: Vec<Note>,
    pub follow_ups: Vec<FollowUp>,
    pub is_closed: bool,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Quotation> for QuotationResponse {
    fn from(quotation: Quotation) -> Self {
        Self {
            id: quotation.id,
            quotation_number: quotation.quotation_number,
            business_id: quotation.business_id,
            business_name: quotation.business_name,
            contact_name: quotation.contact_name,
            mobile_number: quotation.mobile_number,
            gstin: quotation.gstin,
            customer_name: quotation.customer_name,
            customer_email: quotation.customer_email,
            customer_address: quotation.customer_address,
            date: quotation.date,
            valid_until: quotation.valid_until,
            items: quotation.items,
            gst: quotation.gst,
            sub_total: quotation.sub_total,
            tax: quotation.tax,
            total: quotation.total,
            status: quotation.status,
            delivery: quotation.delivery,
            warranty: quotation.warranty,
            payment_terms: quotation.payment_terms,
            offer_validity: quotation.offer_validity,
            quotation_notes: quotation.quotation_notes,
            notes: quotation.notes,
            follow_ups: quotation.follow_ups,
            is_closed: quotation.is_closed,
            version: quotation.version,
            created_at: quotation.created_at.to_rfc3339(),
            updated_at: quotation.updated_at.to_rfc3339(),
        }
    }
}
