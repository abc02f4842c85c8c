//! Lookup entities referenced by name: levels, sections, and roles.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Well-known role ids (must match the seed rows in the initial migration).
pub mod system_roles {
    pub const STUDENT: i32 = 1;
    pub const ADMIN: i32 = 2;
    pub const SUPER_ADMIN: i32 = 3;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub level_id: i32,
    pub level_name: String,
}

impl Level {
    /// Whether students at this level carry a college year (1-4).
    pub fn is_college(&self) -> bool {
        self.level_name.to_lowercase().contains("college")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub section_id: i32,
    pub section_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub role_id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLevelDto {
    #[validate(length(min = 1, max = 100, message = "Level name is required"))]
    pub level_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionDto {
    #[validate(length(min = 1, max = 100, message = "Section name is required"))]
    pub section_name: String,
}
