use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::UserRole;

/// The identity resolved for the current request.
///
/// Populated by the auth middleware from a fresh credential-store lookup;
/// the role here is the stored role, not the one embedded in the token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub photo_url: Option<String>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Staff-level access: staff or admin
    pub fn has_staff_access(&self) -> bool {
        matches!(self.role, UserRole::Staff | UserRole::Admin)
    }
}
