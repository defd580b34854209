//! HTTP surface tests driving the axum router against the in-memory store.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use crm_service::config::{CrmConfig, MongoConfig};
use crm_service::domain::lifecycle::LockPolicy;
use crm_service::services::{
    AccountService, InvoiceService, MemoryStore, QuotationService,
};
use crm_service::startup::{router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let policy = LockPolicy::default();
    let config = CrmConfig {
        common: crm_core::config::Config { port: 0 },
        mongodb: MongoConfig {
            uri: "mongodb://unused".to_string(),
            database: "unused".to_string(),
        },
        lock_policy: policy.clone(),
    };

    router(AppState {
        config,
        health: store.clone(),
        invoices: InvoiceService::new(store.clone(), store.clone(), policy.clone()),
        quotations: QuotationService::new(store.clone(), store.clone(), policy),
        accounts: AccountService::new(store),
    })
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn patch(uri: &str) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn account_body() -> Value {
    json!({
        "business_name": "Acme Industries",
        "source_type": "direct",
        "gst_number": "27AAPFU0939F1ZV",
        "contact_name": "Asha Rao",
        "email": "asha@example.com",
        "mobile_number": "9876543210",
        "address_line1": "14 Industrial Estate",
        "city": "Pune",
        "pincode": 411001,
        "state": "Maharashtra",
        "country": "India",
        "temperature": "Warm"
    })
}

async fn create_account(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post("/accounts", account_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

fn invoice_body(account_id: &str) -> Value {
    json!({
        "business_id": account_id,
        "items": [{ "quantity": "2", "rate": "100", "gst_percentage": "18" }],
        "gst_type": "intrastate"
    })
}

async fn create_invoice(app: &Router, account_id: &str) -> Value {
    let response = app
        .clone()
        .oneshot(post("/invoices", invoice_body(account_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "crm-service");
}

#[tokio::test]
async fn create_invoice_returns_computed_document() {
    let app = test_app();
    let account_id = create_account(&app).await;

    let invoice = create_invoice(&app, &account_id).await;

    assert_eq!(invoice["invoice_number"], "INV-0001");
    assert_eq!(invoice["sub_total"], "200.00");
    assert_eq!(invoice["tax"], "36.00");
    assert_eq!(invoice["total"], "236.00");
    assert_eq!(invoice["gst"]["sgst"], "18.00");
    assert_eq!(invoice["gst"]["cgst"], "18.00");
    assert_eq!(invoice["business_name"], "Acme Industries");
    assert_eq!(invoice["payment_status"], "pending");
}

#[tokio::test]
async fn create_invoice_without_business_id_is_unprocessable() {
    let app = test_app();
    let response = app
        .oneshot(post(
            "/invoices",
            json!({ "business_id": "", "items": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_invoice_is_404() {
    let app = test_app();
    let response = app.oneshot(get("/invoices/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn closed_invoice_rejects_update_with_400() {
    let app = test_app();
    let account_id = create_account(&app).await;
    let invoice = create_invoice(&app, &account_id).await;
    let id = invoice["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(patch(&format!("/invoices/{}/close", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_closed"], true);

    let response = app
        .clone()
        .oneshot(put(
            &format!("/invoices/{}", id),
            json!({ "items": [{ "quantity": "5", "rate": "100" }] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(patch(&format!("/invoices/{}/unlock", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(put(
            &format!("/invoices/{}", id),
            json!({ "items": [{ "quantity": "5", "rate": "100", "gst_percentage": "18" }] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["total"], "590.00");
}

#[tokio::test]
async fn follow_up_requires_an_author() {
    let app = test_app();
    let account_id = create_account(&app).await;

    let body = json!({ "date": "2026-09-01", "note": "call back" });

    // No header, no added_by field: rejected.
    let response = app
        .clone()
        .oneshot(post(&format!("/accounts/{}/followups", account_id), body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Authenticated caller header resolves the author.
    let request = Request::builder()
        .method("POST")
        .uri(format!("/accounts/{}/followups", account_id))
        .header(header::CONTENT_TYPE, "application/json")
        .header("X-User-ID", "user-7")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let list = body_json(response).await;
    assert_eq!(list[0]["added_by"], "user-7");
    assert_eq!(list[0]["status"], "pending");
}

#[tokio::test]
async fn overdraft_payment_is_rejected() {
    let app = test_app();
    let account_id = create_account(&app).await;
    let invoice = create_invoice(&app, &account_id).await;
    let id = invoice["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(post(
            &format!("/invoices/{}/payments", id),
            json!({ "amount": "500", "added_by": "u1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post(
            &format!("/invoices/{}/payments", id),
            json!({ "amount": "236", "added_by": "u1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["payment_status"], "paid");
}

#[tokio::test]
async fn quotation_lifecycle_over_http() {
    let app = test_app();
    let account_id = create_account(&app).await;

    let response = app
        .clone()
        .oneshot(post(
            "/quotations",
            json!({
                "business_id": account_id,
                "items": [{ "quantity": "1", "rate": "1000", "gst_percentage": "18" }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let quotation = body_json(response).await;
    assert_eq!(quotation["quotation_number"], "Q-0001");
    assert_eq!(quotation["total"], "1180.00");
    assert_eq!(quotation["status"], "Draft");

    let id = quotation["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(put(
            &format!("/quotations/{}", id),
            json!({ "status": "Approved" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "Approved");

    let response = app
        .oneshot(get(&format!("/accounts/{}/quotations", account_id)))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}
