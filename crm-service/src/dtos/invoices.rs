use crate::models::{
    FollowUp, GstDetails, GstType, Invoice, LineItem, Note, Payment, PaymentStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
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
    pub discount_amount: Decimal,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub payment_terms: Option<String>,
}

/// Partial update; absent fields are left as stored. Account snapshot
/// fields are not updatable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub items: Option<Vec<LineItem>>,
    pub gst_type: Option<GstType>,
    pub manual_gst_amount: Option<Decimal>,
    pub manual_sgst_percentage: Option<Decimal>,
    pub manual_cgst_percentage: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_address: Option<String>,
    pub payment_terms: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub added_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub invoice_number: String,
    pub business_id: String,
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
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            business_id: invoice.business_id,
            business_name: invoice.business_name,
            contact_name: invoice.contact_name,
            email: invoice.email,
            mobile_number: invoice.mobile_number,
            customer_name: invoice.customer_name,
            customer_address: invoice.customer_address,
            customer_gstin: invoice.customer_gstin,
            date: invoice.date,
            due_date: invoice.due_date,
            items: invoice.items,
            gst: invoice.gst,
            discount_amount: invoice.discount_amount,
            sub_total: invoice.sub_total,
            tax: invoice.tax,
            total: invoice.total,
            payment_terms: invoice.payment_terms,
            payment_status: invoice.payment_status,
            payments: invoice.payments,
            notes: invoice.notes,
            follow_ups: invoice.follow_ups,
            is_closed: invoice.is_closed,
            version: invoice.version,
            created_at: invoice.created_at.to_rfc3339(),
            updated_at: invoice.updated_at.to_rfc3339(),
        }
    }
}
