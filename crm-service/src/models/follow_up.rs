//! Embedded follow-up and note entries.
//!
//! Both live inside their parent document (account, invoice, or quotation)
//! and carry a stable generated id so entries can be addressed across
//! concurrent list edits.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowUpStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: String,
    pub date: NaiveDate,
    pub note: String,
    pub added_by: String,
    pub status: FollowUpStatus,
    pub created_at: DateTime<Utc>,
}

impl FollowUp {
    pub fn new(date: NaiveDate, note: String, added_by: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            note,
            added_by,
            status: FollowUpStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl Note {
    pub fn new(text: String, author: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            author,
            timestamp: Utc::now(),
        }
    }
}
