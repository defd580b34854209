use crate::domain::follow_ups::FollowUpPatch;
use crate::dtos::{
    AccountResponse, AddFollowUpRequest, AddNoteRequest, CreateAccountRequest,
    QuotationResponse, UpdateAccountRequest, UpdateFollowUpRequest, UpdateNoteRequest,
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

pub async fn list_accounts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let accounts = state.accounts.list().await?;
    Ok(Json(
        accounts
            .into_iter()
            .map(AccountResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Active leads: not yet converted to customers.
pub async fn list_active_leads(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = state.accounts.active_leads().await?;
    Ok(Json(
        accounts
            .into_iter()
            .map(AccountResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let accounts = state.accounts.customers().await?;
    Ok(Json(
        accounts
            .into_iter()
            .map(AccountResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.get(&id).await?;
    Ok(Json(AccountResponse::from(account)))
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(input): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.create(input).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.update(&id, input).await?;
    Ok(Json(AccountResponse::from(account)))
}

pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.accounts.delete(&id).await?;
    Ok(Json(json!({ "message": "Deleted successfully" })))
}

pub async fn list_account_quotations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quotations = state.quotations.list_by_business(&id).await?;
    Ok(Json(
        quotations
            .into_iter()
            .map(QuotationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn list_follow_ups(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.accounts.follow_ups(&id).await?))
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
        .accounts
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
        .accounts
        .update_follow_up(&id, &follow_up_id, patch)
        .await?;
    Ok(Json(follow_ups))
}

pub async fn remove_follow_up(
    State(state): State<AppState>,
    Path((id, follow_up_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let follow_ups = state.accounts.remove_follow_up(&id, &follow_up_id).await?;
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
    let notes = state.accounts.add_note(&id, input.text, author).await?;
    Ok((StatusCode::CREATED, Json(notes)))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path((id, note_id)): Path<(String, String)>,
    Json(input): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    input.validate()?;
    let notes = state.accounts.update_note(&id, &note_id, input.text).await?;
    Ok(Json(notes))
}

pub async fn remove_note(
    State(state): State<AppState>,
    Path((id, note_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let notes = state.accounts.remove_note(&id, &note_id).await?;
    Ok(Json(notes))
}
