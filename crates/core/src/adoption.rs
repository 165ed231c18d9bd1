//! Adoption request state machine.
//!
//! ```text
//! pending  --approve-->  approved  --complete-->  completed
//!    |--reject-->  rejected
//!    |--cancel-->  cancelled
//! ```
//!
//! `approve`, `reject` and `complete` belong to the listing owner; `cancel`
//! belongs to the requester. `complete` also moves the listing to
//! `adopted`; the db layer applies both writes in one transaction.

use crate::animal::ListingStatus;
use crate::enums::string_enum;
use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length for the owner's notes on a request.
pub const MAX_NOTES_LENGTH: usize = 2_000;

string_enum! {
    pub enum AdoptionStatus ("status") {
        Pending => ("pending", "Pending"),
        Approved => ("approved", "Approved"),
        Rejected => ("rejected", "Rejected"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

impl AdoptionStatus {
    /// Statuses that block a second request on the same listing.
    pub const ACTIVE: [AdoptionStatus; 2] = [AdoptionStatus::Pending, AdoptionStatus::Approved];

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AdoptionStatus::Rejected | AdoptionStatus::Completed | AdoptionStatus::Cancelled
        )
    }
}

impl Default for AdoptionStatus {
    fn default() -> Self {
        AdoptionStatus::Pending
    }
}

string_enum! {
    /// The `<action>` path segment of a transition request.
    pub enum AdoptionAction ("action") {
        Approve => ("approve", "Approve"),
        Reject => ("reject", "Reject"),
        Complete => ("complete", "Complete"),
        Cancel => ("cancel", "Cancel"),
    }
}

/// Who may perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    ListingOwner,
    Requester,
}

impl AdoptionAction {
    pub fn performed_by(&self) -> Party {
        match self {
            AdoptionAction::Cancel => Party::Requester,
            _ => Party::ListingOwner,
        }
    }

    /// Listing status written alongside this transition, if any.
    pub fn listing_effect(&self) -> Option<ListingStatus> {
        match self {
            AdoptionAction::Complete => Some(ListingStatus::Adopted),
            _ => None,
        }
    }
}

/// The status `action` moves a request to from `from`, or
/// [`CoreError::InvalidTransition`].
pub fn transition(from: AdoptionStatus, action: AdoptionAction) -> Result<AdoptionStatus, CoreError> {
    use AdoptionAction as A;
    use AdoptionStatus as S;

    match (from, action) {
        (S::Pending, A::Approve) => Ok(S::Approved),
        (S::Pending, A::Reject) => Ok(S::Rejected),
        (S::Pending, A::Cancel) => Ok(S::Cancelled),
        (S::Approved, A::Complete) => Ok(S::Completed),
        _ => Err(CoreError::InvalidTransition {
            from: from.as_str(),
            action: action.as_str(),
        }),
    }
}

/// Check that `user_id` is the party allowed to perform `action`.
pub fn authorize(
    action: AdoptionAction,
    user_id: DbId,
    listing_owner_id: DbId,
    requester_id: DbId,
) -> Result<(), CoreError> {
    let allowed = match action.performed_by() {
        Party::ListingOwner => user_id == listing_owner_id,
        Party::Requester => user_id == requester_id,
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(match action.performed_by() {
            Party::ListingOwner => "Only the listing owner can manage adoption requests".into(),
            Party::Requester => "Only the requester can cancel an adoption request".into(),
        }))
    }
}

/// Submission guard for a new request.
///
/// The listing must be available, the requester must not own it, and must
/// not already hold an active request on it.
pub fn ensure_can_request(
    listing_id: DbId,
    listing_status: ListingStatus,
    listing_owner_id: DbId,
    requester_id: DbId,
    has_active_request: bool,
) -> Result<(), CoreError> {
    if listing_status != ListingStatus::Available {
        return Err(CoreError::NotFound {
            entity: "Animal",
            id: listing_id,
        });
    }
    if listing_owner_id == requester_id {
        return Err(CoreError::Forbidden(
            "You cannot request adoption of your own listing".into(),
        ));
    }
    if has_active_request {
        return Err(CoreError::Conflict(
            "You already have an active adoption request for this animal".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn allowed_transitions() {
        use AdoptionAction as A;
        use AdoptionStatus as S;
        assert_eq!(transition(S::Pending, A::Approve).unwrap(), S::Approved);
        assert_eq!(transition(S::Pending, A::Reject).unwrap(), S::Rejected);
        assert_eq!(transition(S::Pending, A::Cancel).unwrap(), S::Cancelled);
        assert_eq!(transition(S::Approved, A::Complete).unwrap(), S::Completed);
    }

    #[test]
    fn complete_requires_approved() {
        let err = transition(AdoptionStatus::Pending, AdoptionAction::Complete).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidTransition { from: "pending", action: "complete" }
        );
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for from in AdoptionStatus::ALL.iter().filter(|s| s.is_terminal()) {
            for action in AdoptionAction::ALL {
                assert!(transition(*from, *action).is_err(), "{from} -> {action}");
            }
        }
    }

    #[test]
    fn approved_cannot_be_cancelled_or_rejected() {
        assert!(transition(AdoptionStatus::Approved, AdoptionAction::Cancel).is_err());
        assert!(transition(AdoptionStatus::Approved, AdoptionAction::Reject).is_err());
    }

    #[test]
    fn only_complete_touches_the_listing() {
        assert_eq!(
            AdoptionAction::Complete.listing_effect(),
            Some(ListingStatus::Adopted)
        );
        assert_eq!(AdoptionAction::Approve.listing_effect(), None);
    }

    #[test]
    fn owner_actions_reject_the_requester() {
        assert!(authorize(AdoptionAction::Approve, 1, 1, 2).is_ok());
        assert_matches!(
            authorize(AdoptionAction::Approve, 2, 1, 2),
            Err(CoreError::Forbidden(_))
        );
        assert!(authorize(AdoptionAction::Cancel, 2, 1, 2).is_ok());
        assert!(authorize(AdoptionAction::Cancel, 1, 1, 2).is_err());
    }

    #[test]
    fn request_guard() {
        assert!(ensure_can_request(5, ListingStatus::Available, 1, 2, false).is_ok());
        assert_matches!(
            ensure_can_request(5, ListingStatus::Adopted, 1, 2, false),
            Err(CoreError::NotFound { .. })
        );
        assert_matches!(
            ensure_can_request(5, ListingStatus::Available, 2, 2, false),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            ensure_can_request(5, ListingStatus::Available, 1, 2, true),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn active_statuses() {
        assert!(AdoptionStatus::Pending.is_active());
        assert!(AdoptionStatus::Approved.is_active());
        assert!(!AdoptionStatus::Completed.is_active());
    }
}
