use crate::domain::follow_ups::FollowUpPatch;
use crate::dtos::{
    AddFollowUpRequest, CreateQuotationRequest, QuotationResponse, UpdateFollowUpRequest,
    UpdateQuotationRequest,
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

pub async fn list_quotations(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let quotations = state.quotations.list().await?;
    Ok(Json(
        quotations
            .into_iter()
            .map(QuotationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quotation = state.quotations.get(&id).await?;
    Ok(Json(QuotationResponse::from(quotation)))
}

pub async fn create_quotation(
    State(state): State<AppState>,
    Json(input): Json<CreateQuotationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quotation = state.quotations.create(input).await?;
    Ok((StatusCode::CREATED, Json(QuotationResponse::from(quotation))))
}

pub async fn update_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateQuotationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quotation = state.quotations.update(&id, input).await?;
    Ok(Json(QuotationResponse::from(quotation)))
}

pub async fn delete_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.quotations.delete(&id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}

pub async fn close_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quotation = state.quotations.close(&id).await?;
    Ok(Json(QuotationResponse::from(quotation)))
}

pub async fn unlock_quotation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quotation = state.quotations.unlock(&id).await?;
    Ok(Json(QuotationResponse::from(quotation)))
}

pub async fn list_follow_ups(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.quotations.follow_ups(&id).await?))
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
        .quotations
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
        .quotations
        .update_follow_up(&id, &follow_up_id, patch)
        .await?;
    Ok(Json(follow_ups))
}

pub async fn remove_follow_up(
    State(state): State<AppState>,
    Path((id, follow_up_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let follow_ups = state
        .quotations
        .remove_follow_up(&id, &follow_up_id)
        .await?;
    Ok(Json(follow_ups))
}
