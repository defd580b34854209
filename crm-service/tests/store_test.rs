//! Store contract tests: duplicate-number rejection and optimistic
//! concurrency on versioned saves.

mod common;

use common::{invoice_request, line_item, seed_account, services};
use crm_core::error::AppError;
use crm_service::services::{AccountStore, InvoiceStore};

#[tokio::test]
async fn duplicate_invoice_number_insert_conflicts() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "10", "18")]))
        .await
        .unwrap();

    let mut copy = invoice.clone();
    copy.id = "different-id".to_string();

    let result = InvoiceStore::insert(&*ctx.store, &copy).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn stale_version_write_is_detected() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    // Two writers load the same revision.
    let mut first = AccountStore::find(&*ctx.store, &account.id)
        .await
        .unwrap()
        .unwrap();
    let mut second = first.clone();

    first.business_name = "First Writer".to_string();
    first.version += 1;
    AccountStore::update(&*ctx.store, &first).await.unwrap();

    // The second writer's save is based on the overwritten revision.
    second.business_name = "Second Writer".to_string();
    second.version += 1;
    let result = AccountStore::update(&*ctx.store, &second).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let stored = AccountStore::find(&*ctx.store, &account.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.business_name, "First Writer");
}

#[tokio::test]
async fn updating_missing_document_is_not_found() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let mut ghost = AccountStore::find(&*ctx.store, &account.id)
        .await
        .unwrap()
        .unwrap();
    AccountStore::delete(&*ctx.store, &account.id).await.unwrap();

    ghost.version += 1;
    let result = AccountStore::update(&*ctx.store, &ghost).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn last_number_tracks_most_recent_create() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    assert_eq!(InvoiceStore::last_number(&*ctx.store).await.unwrap(), None);

    ctx.invoices
        .create(invoice_request(&account.id, vec![line_item("1", "10", "18")]))
        .await
        .unwrap();
    ctx.invoices
        .create(invoice_request(&account.id, vec![line_item("1", "20", "18")]))
        .await
        .unwrap();

    assert_eq!(
        InvoiceStore::last_number(&*ctx.store).await.unwrap(),
        Some("INV-0002".to_string())
    );
}
