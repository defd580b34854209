use crate::domain::follow_ups::FollowUpPatch;
use crate::dtos::{
    AddFollowUpRequest, AddNoteRequest, CreateInvoiceRequest, InvoiceResponse,
    RecordPaymentRequest, UpdateFollowUpRequest, UpdateInvoiceRequest, UpdateNoteRequest,
};
use crate::handlers::resolve_author;
use crate::middleware::UserId;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crm_core::error::AppError;
use serde_json::json;
use validator::Validate;

pub async fn list_invoices(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let invoices = state.invoices.list().await?;
    Ok(Json(
        invoices
            .into_iter()
            .map(InvoiceResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.get(&id).await?;
    Ok(Json(InvoiceResponse::from(invoice)))
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Json(input): Json<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.create(input).await?;
    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(invoice))))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.update(&id, input).await?;
    Ok(Json(InvoiceResponse::from(invoice)))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.invoices.delete(&id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

pub async fn close_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.close(&id).await?;
    Ok(Json(InvoiceResponse::from(invoice)))
}

pub async fn unlock_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.unlock(&id).await?;
    Ok(Json(InvoiceResponse::from(invoice)))
}

pub async fn record_payment(
    State(state): State<AppState>,
    user_id: Option<UserId>,
    Path(id): Path<String>,
    Json(input): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let added_by = resolve_author(user_id, input.added_by.clone())?;
    let invoice = state.invoices.record_payment(&id, input, added_by).await?;
    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(invoice))))
}

pub async fn remove_payment(
    State(state): State<AppState>,
    Path((id, payment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.invoices.remove_payment(&id, &payment_id).await?;
    Ok(Json(InvoiceResponse::from(invoice)))
}

pub async fn list_follow_ups(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.invoices.follow_ups(&id).await?))
}

pub async fn add_follow_up(
    State(state): State<AppState>,
    user_id: Option<UserId>,
    Path(id): Path<String>,
    Json(input): Json<AddFollowUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    input.validate()?;
    let added_by = resolve_author(user_id, input.added_by)?;
    let follow_ups = state
        .invoices
        .add_follow_up(&id, input.date, input.note, added_by)
        .await?;
    Ok((StatusCode::CREATED, Json(follow_ups)))
}

pub async fn update_follow_up(
    State(state): State<AppState>,
    Path((id, follow_up_id)): Path<(String, String)>,
    Json(input): Json<UpdateFollowUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    let patch = FollowUpPatch {
        date: input.date,
        note: input.note,
        status: input.status,
    };
    let follow_ups = state
        .invoices
        .update_follow_up(&id, &follow_up_id, patch)
        .await?;
    Ok(Json(follow_ups))
}

pub async fn remove_follow_up(
    State(state): State<AppState>,
    Path((id, follow_up_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let follow_ups = state.invoices.remove_follow_up(&id, &follow_up_id).await?;
    Ok(Json(follow_ups))
}

pub async fn add_note(
    State(state): State<AppState>,
    user_id: Option<UserId>,
    Path(id): Path<String>,
    Json(input): Json<AddNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    input.validate()?;
    let author = resolve_author(user_id, input.author)?;
    let notes = state.invoices.add_note(&id, input.text, author).await?;
    Ok((StatusCode::CREATED, Json(notes)))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path((id, note_id)): Path<(String, String)>,
    Json(input): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    input.validate()?;
    let notes = state.invoices.update_note(&id, &note_id, input.text).await?;
    Ok(Json(notes))
}

pub async fn remove_note(
    State(state): State<AppState>,
    Path((id, note_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let notes = state.invoices.remove_note(&id, &note_id).await?;
    Ok(Json(notes))
}
