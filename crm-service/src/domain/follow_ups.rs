//! Operations on the embedded follow-up list.
//!
//! Entries keep their insertion order and are addressed by the stable id
//! generated at creation, so concurrent list edits cannot redirect an
//! update to the wrong entry. Every operation leaves the caller with the
//! full updated list, which is what clients re-render.

use crate::models::{FollowUp, FollowUpStatus};
use chrono::NaiveDate;
use crm_core::error::AppError;

/// Fields a caller may change on an existing entry. Unset fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct FollowUpPatch {
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
    pub status: Option<FollowUpStatus>,
}

/// Append a new entry. Date, note, and a resolved author are required;
/// the handler rejects requests missing any of them before calling this.
pub fn add(list: &mut Vec<FollowUp>, date: NaiveDate, note: String, added_by: String) -> &FollowUp {
    list.push(FollowUp::new(date, note, added_by));
    list.last().expect("just pushed")
}

/// Update an entry in place by id.
pub fn update(list: &mut [FollowUp], id: &str, patch: FollowUpPatch) -> Result<(), AppError> {
    let entry = list
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or_else(|| not_found(id))?;

    if let Some(date) = patch.date {
        entry.date = date;
    }
    if let Some(note) = patch.note {
        entry.note = note;
    }
    if let Some(status) = patch.status {
        entry.status = status;
    }
    Ok(())
}

/// Remove an entry by id, returning it.
pub fn remove(list: &mut Vec<FollowUp>, id: &str) -> Result<FollowUp, AppError> {
    let position = list
        .iter()
        .position(|f| f.id == id)
        .ok_or_else(|| not_found(id))?;
    Ok(list.remove(position))
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(anyhow::anyhow!("follow-up not found: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn add_defaults_to_pending_and_preserves_order() {
        let mut list = Vec::new();
        add(&mut list, date("2026-01-10"), "call back".into(), "u1".into());
        add(&mut list, date("2026-01-20"), "send quote".into(), "u1".into());

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].note, "call back");
        assert_eq!(list[1].note, "send quote");
        assert!(list.iter().all(|f| f.status == FollowUpStatus::Pending));
        assert_ne!(list[0].id, list[1].id);
    }

    #[test]
    fn add_then_remove_restores_prior_list() {
        let mut list = Vec::new();
        add(&mut list, date("2026-01-10"), "first".into(), "u1".into());
        let before: Vec<String> = list.iter().map(|f| f.id.clone()).collect();

        let added_id = add(&mut list, date("2026-01-20"), "second".into(), "u1".into())
            .id
            .clone();
        remove(&mut list, &added_id).unwrap();

        let after: Vec<String> = list.iter().map(|f| f.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn update_patches_only_given_fields() {
        let mut list = Vec::new();
        let id = add(&mut list, date("2026-01-10"), "call".into(), "u1".into())
            .id
            .clone();

        update(
            &mut list,
            &id,
            FollowUpPatch {
                status: Some(FollowUpStatus::Completed),
                ..FollowUpPatch::default()
            },
        )
        .unwrap();

        assert_eq!(list[0].status, FollowUpStatus::Completed);
        assert_eq!(list[0].note, "call");
        assert_eq!(list[0].date, date("2026-01-10"));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut list = Vec::new();
        add(&mut list, date("2026-01-10"), "call".into(), "u1".into());

        assert!(matches!(
            update(&mut list, "missing", FollowUpPatch::default()),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            remove(&mut list, "missing"),
            Err(AppError::NotFound(_))
        ));
    }
}
