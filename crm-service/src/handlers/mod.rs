pub mod accounts;
pub mod health;
pub mod invoices;
pub mod quotations;

use crate::middleware::UserId;
use crm_core::error::AppError;

/// Resolve the author of a sub-document entry: the authenticated caller
/// wins, an explicit body field is the fallback, neither is an error.
pub(crate) fn resolve_author(
    user_id: Option<UserId>,
    added_by: Option<String>,
) -> Result<String, AppError> {
    user_id
        .map(|u| u.0)
        .or(added_by)
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("added_by is required")))
}
