//! Quotation service integration tests against the in-memory store.

mod common;

use common::{dec, line_item, quotation_request, seed_account, services};
use crm_service::dtos::UpdateQuotationRequest;
use crm_service::models::QuotationStatus;

#[tokio::test]
async fn create_quotation_assigns_seed_number_and_totals_without_discount() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let quotation = ctx
        .quotations
        .create(quotation_request(&account.id, vec![line_item("2", "100", "18")]))
        .await
        .unwrap();

    assert_eq!(quotation.quotation_number, "Q-0001");
    assert_eq!(quotation.sub_total, dec("200"));
    assert_eq!(quotation.tax, dec("36"));
    assert_eq!(quotation.total, dec("236"));
    assert_eq!(quotation.status, QuotationStatus::Draft);
    assert_eq!(quotation.gstin, account.gst_number);
    assert_eq!(quotation.business_name, account.business_name);
}

#[tokio::test]
async fn quotation_numbers_increment_independently_of_invoices() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    ctx.invoices
        .create(common::invoice_request(
            &account.id,
            vec![line_item("1", "10", "18")],
        ))
        .await
        .unwrap();

    let first = ctx
        .quotations
        .create(quotation_request(&account.id, vec![line_item("1", "10", "18")]))
        .await
        .unwrap();
    let second = ctx
        .quotations
        .create(quotation_request(&account.id, vec![line_item("1", "20", "18")]))
        .await
        .unwrap();

    assert_eq!(first.quotation_number, "Q-0001");
    assert_eq!(second.quotation_number, "Q-0002");
}

#[tokio::test]
async fn update_changes_status_and_recomputes_totals() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let quotation = ctx
        .quotations
        .create(quotation_request(&account.id, vec![line_item("2", "100", "18")]))
        .await
        .unwrap();

    let updated = ctx
        .quotations
        .update(
            &quotation.id,
            UpdateQuotationRequest {
                items: Some(vec![line_item("4", "100", "18")]),
                status: Some(QuotationStatus::Approved),
                ..UpdateQuotationRequest::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, QuotationStatus::Approved);
    assert_eq!(updated.sub_total, dec("400"));
    assert_eq!(updated.tax, dec("72"));
    assert_eq!(updated.total, dec("472"));
}

#[tokio::test]
async fn quotations_listed_by_business_account() {
    let ctx = services();
    let account = seed_account(&ctx).await;
    let other = ctx
        .accounts
        .create(common::account_request("Other Traders"))
        .await
        .unwrap();

    ctx.quotations
        .create(quotation_request(&account.id, vec![line_item("1", "10", "18")]))
        .await
        .unwrap();
    ctx.quotations
        .create(quotation_request(&other.id, vec![line_item("1", "20", "18")]))
        .await
        .unwrap();

    let for_account = ctx.quotations.list_by_business(&account.id).await.unwrap();
    assert_eq!(for_account.len(), 1);
    assert_eq!(for_account[0].business_id, account.id);
}
