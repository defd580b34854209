//! Follow-up ledger tests across aggregates, plus closed-document policy.

mod common;

use common::{invoice_request, line_item, seed_account, services, services_with_policy};
use chrono::NaiveDate;
use crm_core::error::AppError;
use crm_service::domain::follow_ups::FollowUpPatch;
use crm_service::domain::lifecycle::LockPolicy;
use crm_service::models::FollowUpStatus;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn account_follow_up_round_trip() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let list = ctx
        .accounts
        .add_follow_up(&account.id, date("2026-09-01"), "call back".into(), "u1".into())
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].status, FollowUpStatus::Pending);
    assert_eq!(list[0].added_by, "u1");

    let follow_up_id = list[0].id.clone();
    let list = ctx
        .accounts
        .update_follow_up(
            &account.id,
            &follow_up_id,
            FollowUpPatch {
                status: Some(FollowUpStatus::Completed),
                ..FollowUpPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(list[0].status, FollowUpStatus::Completed);

    let list = ctx
        .accounts
        .remove_follow_up(&account.id, &follow_up_id)
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn add_then_remove_last_restores_prior_list() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    ctx.accounts
        .add_follow_up(&account.id, date("2026-09-01"), "first".into(), "u1".into())
        .await
        .unwrap();
    let before = ctx.accounts.follow_ups(&account.id).await.unwrap();

    let list = ctx
        .accounts
        .add_follow_up(&account.id, date("2026-09-10"), "second".into(), "u1".into())
        .await
        .unwrap();
    let last_id = list.last().unwrap().id.clone();

    let after = ctx
        .accounts
        .remove_follow_up(&account.id, &last_id)
        .await
        .unwrap();

    let before_ids: Vec<&str> = before.iter().map(|f| f.id.as_str()).collect();
    let after_ids: Vec<&str> = after.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(before_ids, after_ids);
}

#[tokio::test]
async fn unknown_follow_up_id_is_not_found() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let result = ctx
        .accounts
        .update_follow_up(&account.id, "missing", FollowUpPatch::default())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = ctx.accounts.remove_follow_up(&account.id, "missing").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn closed_invoice_rejects_follow_ups_by_default() {
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
        .add_follow_up(&invoice.id, date("2026-09-01"), "check".into(), "u1".into())
        .await;
    assert!(matches!(result, Err(AppError::Locked(_))));
}

#[tokio::test]
async fn permissive_policy_allows_follow_ups_while_closed() {
    let ctx = services_with_policy(LockPolicy {
        payments_while_closed: true,
        follow_ups_while_closed: true,
    });
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();
    ctx.invoices.close(&invoice.id).await.unwrap();

    let list = ctx
        .invoices
        .add_follow_up(&invoice.id, date("2026-09-01"), "check".into(), "u1".into())
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn invoice_notes_round_trip() {
    let ctx = services();
    let account = seed_account(&ctx).await;

    let invoice = ctx
        .invoices
        .create(invoice_request(&account.id, vec![line_item("1", "100", "18")]))
        .await
        .unwrap();

    let notes = ctx
        .invoices
        .add_note(&invoice.id, "spoke to accounts team".into(), "u1".into())
        .await
        .unwrap();
    let note_id = notes[0].id.clone();

    let notes = ctx
        .invoices
        .update_note(&invoice.id, &note_id, "payment promised friday".into())
        .await
        .unwrap();
    assert_eq!(notes[0].text, "payment promised friday");

    let notes = ctx.invoices.remove_note(&invoice.id, &note_id).await.unwrap();
    assert!(notes.is_empty());
}
