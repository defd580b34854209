//! Lock lifecycle tests: close/unlock idempotence and edit gating.

mod common;

use common::{invoice_request, line_item, quotation_request, seed_account, services};
use crm_core::error::AppError;
use crm_service::dtos::{UpdateInvoiceRequest, UpdateQuotationRequest};

#[tokio::test]
async fn update_on_closed_invoice_fails_with_locked() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();
    ctx.invoices.close(&invoice.id).await.unwrap();

    let result = ctx
        .invoices
        .update(
            &invoice.id,
            UpdateInvoiceRequest {
                items: Some(vec![line_item("5", "100", "18")]),
                ..UpdateInvoiceRequest::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Locked(_))));
}

#[tokio::test]
async fn close_is_idempotent() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();

    let closed = ctx.invoices.close(&invoice.id).await.unwrap();
    let closed_again = ctx.invoices.close(&invoice.id).await.unwrap();

    assert!(closed.is_closed);
    assert!(closed_again.is_closed);
    // The no-op close does not rewrite the document.
    assert_eq!(closed.version, closed_again.version);
}

#[tokio::test]
async fn unlock_restores_editability() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();

    ctx.invoices.close(&invoice.id).await.unwrap();
    let unlocked = ctx.invoices.unlock(&invoice.id).await.unwrap();
    assert!(!unlocked.is_closed);

    let updated = ctx
        .invoices
        .update(
            &invoice.id,
            UpdateInvoiceRequest {
                items: Some(vec![line_item("2", "100", "18")]),
                ..UpdateInvoiceRequest::default()
            },
        )
        .await
        .expect("unlocked invoice must be editable");

    assert_eq!(updated.sub_total, common::dec("200"));
}

#[tokio::test]
async fn unlock_on_open_invoice_is_a_no_op() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();

    let unlocked = ctx.invoices.unlock(&invoice.id).await.unwrap();
    assert!(!unlocked.is_closed);
    assert_eq!(unlocked.version, invoice.version);
}

#[tokio::test]
async fn delete_blocked_while_closed() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();
    ctx.invoices.close(&invoice.id).await.unwrap();

    assert!(matches!(
        ctx.invoices.delete(&invoice.id).await,
        Err(AppError::Locked(_))
    ));

    ctx.invoices.unlock(&invoice.id).await.unwrap();
    ctx.invoices.delete(&invoice.id).await.unwrap();
}

#[tokio::test]
async fn closed_quotation_rejects_updates() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let quotation = ctx
        .quotations
        .create(quotation_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();
    ctx.quotations.close(&quotation.id).await.unwrap();

    let result = ctx
        .quotations
        .update(
            &quotation.id,
            UpdateQuotationRequest {
                items: Some(vec![line_item("2", "100", "18")]),
                ..UpdateQuotationRequest::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Locked(_))));
}
