//! Role dispatch.
//!
//! Roles arrive as display-name strings in the token. Anything that is not one
//! of the known names maps to [`Role::Other`], which is never granted access.

use std::fmt;

pub const STUDENT: &str = "Student";
pub const ADMIN: &str = "Admin";
pub const SUPER_ADMIN: &str = "Super Admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    SuperAdmin,
    Student,
    Other,
}

impl Role {
    /// Maps a role claim to a variant. Matching is exact.
    pub fn from_claim(claim: &str) -> Self {
        match claim {
            ADMIN => Role::Admin,
            SUPER_ADMIN => Role::SuperAdmin,
            STUDENT => Role::Student,
            _ => Role::Other,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ADMIN,
            Role::SuperAdmin => SUPER_ADMIN,
            Role::Student => STUDENT,
            Role::Other => "Other",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_claim_known_roles() {
        assert_eq!(Role::from_claim("Admin"), Role::Admin);
        assert_eq!(Role::from_claim("Super Admin"), Role::SuperAdmin);
        assert_eq!(Role::from_claim("Student"), Role::Student);
    }

    #[test]
    fn test_from_claim_is_exact() {
        assert_eq!(Role::from_claim("admin"), Role::Other);
        assert_eq!(Role::from_claim("SuperAdmin"), Role::Other);
        assert_eq!(Role::from_claim(""), Role::Other);
        assert_eq!(Role::from_claim("Teacher"), Role::Other);
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(Role::SuperAdmin.is_admin());
        assert!(!Role::Student.is_admin());
        assert!(!Role::Other.is_admin());
    }

    #[test]
    fn test_round_trip_names() {
        for role in [Role::Admin, Role::SuperAdmin, Role::Student] {
            assert_eq!(Role::from_claim(role.as_str()), role);
        }
    }
}
