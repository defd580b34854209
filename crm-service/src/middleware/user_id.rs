use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use crm_core::error::AppError;

/// UserId extractor for crm-service.
///
/// Extracts the authenticated caller from the X-User-ID header set by the
/// trusted frontend. Used to attribute follow-ups, notes, and payments.
/// Handlers that accept an explicit `added_by` body field take this as an
/// `Option` and fall back to the body.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-ID")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(anyhow::anyhow!("Missing X-User-ID header"))
            })?;

        // Add to tracing span for observability
        tracing::Span::current().record("user_id", user_id);

        Ok(UserId(user_id.to_string()))
    }
}
