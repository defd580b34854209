use crate::models::FollowUpStatus;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

/// Body for appending a follow-up. The author comes from the `X-User-ID`
/// header when present, else from `added_by`; a request with neither is
/// rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct AddFollowUpRequest {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "note is required"))]
    pub note: String,
    pub added_by: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFollowUpRequest {
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub status: Option<FollowUpStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddNoteRequest {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
    pub author: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}
