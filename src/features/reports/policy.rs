//! Authorization policy for report operations.
//!
//! Handlers consult these functions instead of embedding role checks, so
//! the visibility and triage rules live in one place.

use uuid::Uuid;

use crate::features::auth::model::AuthenticatedUser;

/// Visibility scope for listing: citizens see only their own reports,
/// staff and admins see everything.
pub fn list_scope(user: &AuthenticatedUser) -> Option<Uuid> {
    if user.has_staff_access() {
        None
    } else {
        Some(user.id)
    }
}

/// A report is readable by its reporter and by any staff or admin.
pub fn can_read(user: &AuthenticatedUser, reporter_id: Uuid) -> bool {
    user.has_staff_access() || reporter_id == user.id
}

/// Status updates are allowed for staff, admins, and the reporter on their
/// own report.
pub fn can_update_status(user: &AuthenticatedUser, reporter_id: Uuid) -> bool {
    user.has_staff_access() || reporter_id == user.id
}

/// Department assignment is admin only. Non-admin requests that carry a
/// department are not rejected; the field is ignored.
pub fn can_assign_department(user: &AuthenticatedUser) -> bool {
    user.is_admin()
}

pub fn can_delete(user: &AuthenticatedUser) -> bool {
    user.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::test_user;

    #[test]
    fn citizens_are_scoped_to_their_own_reports() {
        let citizen = test_user(UserRole::Citizen);
        assert_eq!(list_scope(&citizen), Some(citizen.id));
        assert_eq!(list_scope(&test_user(UserRole::Staff)), None);
        assert_eq!(list_scope(&test_user(UserRole::Admin)), None);
    }

    #[test]
    fn read_is_own_or_staff() {
        let citizen = test_user(UserRole::Citizen);
        let someone_else = Uuid::new_v4();

        assert!(can_read(&citizen, citizen.id));
        assert!(!can_read(&citizen, someone_else));
        assert!(can_read(&test_user(UserRole::Staff), someone_else));
        assert!(can_read(&test_user(UserRole::Admin), someone_else));
    }

    #[test]
    fn status_update_is_own_or_staff() {
        let citizen = test_user(UserRole::Citizen);
        let someone_else = Uuid::new_v4();

        assert!(can_update_status(&citizen, citizen.id));
        assert!(!can_update_status(&citizen, someone_else));
        assert!(can_update_status(&test_user(UserRole::Staff), someone_else));
        assert!(can_update_status(&test_user(UserRole::Admin), someone_else));
    }

    #[test]
    fn department_assignment_is_admin_only() {
        assert!(!can_assign_department(&test_user(UserRole::Citizen)));
        assert!(!can_assign_department(&test_user(UserRole::Staff)));
        assert!(can_assign_department(&test_user(UserRole::Admin)));
    }

    #[test]
    fn delete_is_admin_only() {
        assert!(!can_delete(&test_user(UserRole::Citizen)));
        assert!(!can_delete(&test_user(UserRole::Staff)));
        assert!(can_delete(&test_user(UserRole::Admin)));
    }
}
