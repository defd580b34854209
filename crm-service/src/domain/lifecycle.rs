//! Lock state gating for financial documents.
//!
//! A document is either open (editable) or closed (locked); `close` and
//! `unlock` are explicit, idempotent transitions. While closed, every
//! mutation is rejected except the carve-outs granted by [`LockPolicy`].

use crm_core::error::AppError;
use serde::Deserialize;

/// What a caller is trying to change on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Any field edit, item edit, or delete.
    Fields,
    /// Appending or removing a payment entry.
    Payment,
    /// Follow-up list operations.
    FollowUp,
}

/// Deployment policy for mutations on closed documents.
///
/// Defaults record post-close settlements but keep everything else frozen.
#[derive(Debug, Clone, Deserialize)]
pub struct LockPolicy {
    #[serde(default = "default_true")]
    pub payments_while_closed: bool,
    #[serde(default)]
    pub follow_ups_while_closed: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            payments_while_closed: true,
            follow_ups_while_closed: false,
        }
    }
}

/// Reject the mutation with `Locked` unless the document is open or the
/// policy carves this mutation kind out.
pub fn ensure_editable(
    is_closed: bool,
    kind: MutationKind,
    policy: &LockPolicy,
) -> Result<(), AppError> {
    if !is_closed {
        return Ok(());
    }

    let allowed = match kind {
        MutationKind::Fields => false,
        MutationKind::Payment => policy.payments_while_closed,
        MutationKind::FollowUp => policy.follow_ups_while_closed,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::Locked(anyhow::anyhow!(
            "document is closed; unlock it before editing"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_documents_accept_all_mutations() {
        let policy = LockPolicy::default();
        for kind in [
            MutationKind::Fields,
            MutationKind::Payment,
            MutationKind::FollowUp,
        ] {
            assert!(ensure_editable(false, kind, &policy).is_ok());
        }
    }

    #[test]
    fn closed_documents_reject_field_edits() {
        let policy = LockPolicy::default();
        assert!(matches!(
            ensure_editable(true, MutationKind::Fields, &policy),
            Err(AppError::Locked(_))
        ));
    }

    #[test]
    fn default_policy_allows_payments_but_not_follow_ups_while_closed() {
        let policy = LockPolicy::default();
        assert!(ensure_editable(true, MutationKind::Payment, &policy).is_ok());
        assert!(ensure_editable(true, MutationKind::FollowUp, &policy).is_err());
    }

    #[test]
    fn policy_switches_are_honored() {
        let policy = LockPolicy {
            payments_while_closed: false,
            follow_ups_while_closed: true,
        };
        assert!(ensure_editable(true, MutationKind::Payment, &policy).is_err());
        assert!(ensure_editable(true, MutationKind::FollowUp, &policy).is_ok());
    }
}
