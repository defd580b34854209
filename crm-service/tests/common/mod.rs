use crm_service::domain::lifecycle::LockPolicy;
use crm_service::dtos::{CreateAccountRequest, CreateInvoiceRequest, CreateQuotationRequest};
use crm_service::models::{
    AccountStatus, BusinessAccount, GstType, LineItem, SourceType, Temperature,
};
use crm_service::services::{
    AccountService, InvoiceService, MemoryStore, QuotationService,
};
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct TestCtx {
    pub store: Arc<MemoryStore>,
    pub invoices: InvoiceService,
    pub quotations: QuotationService,
    pub accounts: AccountService,
}

pub fn services() -> TestCtx {
    services_with_policy(LockPolicy::default())
}

pub fn services_with_policy(policy: LockPolicy) -> TestCtx {
    let store = Arc::new(MemoryStore::new());
    TestCtx {
        store: store.clone(),
        invoices: InvoiceService::new(store.clone(), store.clone(), policy.clone()),
        quotations: QuotationService::new(store.clone(), store.clone(), policy),
        accounts: AccountService::new(store),
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn account_request(business_name: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        business_name: business_name.to_string(),
        source_type: SourceType::Direct,
        gst_number: Some("27AAPFU0939F1ZV".to_string()),
        contact_name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        mobile_number: "9876543210".to_string(),
        phone_number: None,
        address_line1: "14 Industrial Estate".to_string(),
        address_line2: None,
        address_line3: None,
        landmark: None,
        city: "Pune".to_string(),
        pincode: 411001,
        state: "Maharashtra".to_string(),
        country: "India".to_string(),
        website: None,
        temperature: Temperature::Warm,
        status: AccountStatus::Active,
        assigned_to: None,
        selected_product: None,
    }
}

pub async fn seed_account(ctx: &TestCtx) -> BusinessAccount {
    ctx.accounts
        .create(account_request("Acme Industries"))
        .await
        .expect("Failed to seed account")
}

pub fn line_item(quantity: &str, rate: &str, gst_percentage: &str) -> LineItem {
    LineItem {
        product_id: None,
        product_name: Some("Widget".to_string()),
        description: None,
        hsn_sac: Some("8479".to_string()),
        quantity: Some(dec(quantity)),
        rate: Some(dec(rate)),
        gst_percentage: dec(gst_percentage),
        specifications: Vec::new(),
    }
}

pub fn invoice_request(business_id: &str, items: Vec<LineItem>) -> CreateInvoiceRequest {
    CreateInvoiceRequest {
        business_id: business_id.to_string(),
        items,
        gst_type: GstType::Intrastate,
        manual_gst_amount: None,
        manual_sgst_percentage: None,
        manual_cgst_percentage: None,
        discount_amount: Decimal::ZERO,
        date: None,
        due_date: None,
        customer_name: None,
        customer_address: None,
        payment_terms: None,
    }
}

pub fn quotation_request(business_id: &str, items: Vec<LineItem>) -> CreateQuotationRequest {
    CreateQuotationRequest {
        business_id: business_id.to_string(),
        items,
        gst_type: GstType::Intrastate,
        manual_gst_amount: None,
        manual_sgst_percentage: None,
        manual_cgst_percentage: None,
        status: Default::default(),
        date: None,
        valid_until: None,
        customer_name: None,
        customer_email: None,
        customer_address: None,
        delivery: None,
        warranty: None,
        payment_terms: None,
        offer_validity: None,
        quotation_notes: None,
    }
}
