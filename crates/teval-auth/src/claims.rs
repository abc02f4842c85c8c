//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::Role;

/// JWT claims for access tokens.
///
/// `sub` holds the numeric id of the account (a student id for students, an
/// admin id for administrators) and `role` the role display name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account id (subject claim)
    pub sub: String,
    pub email: String,
    /// Role name, e.g. "Student" or "Super Admin"
    pub role: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::from_claim(&self.role)
    }

    /// The subject claim as a numeric id, if it parses as one.
    pub fn subject_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}
