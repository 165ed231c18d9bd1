//! Authorization decisions over an explicit [`Actor`].
//!
//! Handlers build an `Actor` from the authenticated user and pass it to
//! these checks; nothing here reads ambient request state.

use crate::error::CoreError;
use crate::roles::is_staff_role;
use crate::types::DbId;

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_staff(&self) -> bool {
        is_staff_role(&self.role)
    }

    pub fn is_owner_of(&self, owner_id: DbId) -> bool {
        self.user_id == owner_id
    }
}

/// Listings may be edited or deleted by their owner or by staff.
pub fn ensure_listing_manager(actor: &Actor, owner_id: DbId) -> Result<(), CoreError> {
    if actor.is_owner_of(owner_id) || actor.is_staff() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "You can only manage your own listings".into(),
        ))
    }
}

pub fn ensure_staff(actor: &Actor) -> Result<(), CoreError> {
    if actor.is_staff() {
        Ok(())
    } else {
        Err(CoreError::Forbidden("Staff access required".into()))
    }
}

/// A donation is visible to its donor, to staff, and to anyone when it was
/// made anonymously.
pub fn can_view_donation(actor: Option<&Actor>, donor_id: Option<DbId>, is_anonymous: bool) -> bool {
    if is_anonymous {
        return true;
    }
    match actor {
        Some(a) => a.is_staff() || donor_id.is_some_and(|id| a.is_owner_of(id)),
        None => false,
    }
}

/// Whether `actor` may see who made a donation. Anonymous donations hide
/// the donor from everyone but the donor and staff.
pub fn can_identify_donor(actor: Option<&Actor>, donor_id: Option<DbId>, is_anonymous: bool) -> bool {
    !is_anonymous || actor.is_some_and(|a| a.is_staff() || donor_id.is_some_and(|id| a.is_owner_of(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_MEMBER, ROLE_STAFF};

    #[test]
    fn owner_and_staff_manage_listings() {
        assert!(ensure_listing_manager(&Actor::new(1, ROLE_MEMBER), 1).is_ok());
        assert!(ensure_listing_manager(&Actor::new(2, ROLE_STAFF), 1).is_ok());
        assert!(ensure_listing_manager(&Actor::new(3, ROLE_ADMIN), 1).is_ok());
        assert!(ensure_listing_manager(&Actor::new(2, ROLE_MEMBER), 1).is_err());
    }

    #[test]
    fn donation_visibility() {
        let donor = Actor::new(7, ROLE_MEMBER);
        let stranger = Actor::new(8, ROLE_MEMBER);
        let staff = Actor::new(9, ROLE_STAFF);

        assert!(can_view_donation(Some(&donor), Some(7), false));
        assert!(can_view_donation(Some(&staff), Some(7), false));
        assert!(!can_view_donation(Some(&stranger), Some(7), false));
        assert!(!can_view_donation(None, Some(7), false));
        assert!(can_view_donation(None, Some(7), true));
        // donor account deleted
        assert!(!can_view_donation(Some(&stranger), None, false));
    }

    #[test]
    fn anonymous_donor_hidden_from_strangers() {
        let donor = Actor::new(7, ROLE_MEMBER);
        let stranger = Actor::new(8, ROLE_MEMBER);
        let staff = Actor::new(9, ROLE_STAFF);

        assert!(can_identify_donor(None, Some(7), false));
        assert!(!can_identify_donor(None, Some(7), true));
        assert!(!can_identify_donor(Some(&stranger), Some(7), true));
        assert!(can_identify_donor(Some(&donor), Some(7), true));
        assert!(can_identify_donor(Some(&staff), Some(7), true));
    }
}
