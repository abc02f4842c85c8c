//! Teacher models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub teacher_id: i32,
    pub full_name: String,
    pub level_id: i32,
}

/// A teacher with the level name attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherWithLevel {
    pub teacher_id: i32,
    pub full_name: String,
    pub level_id: i32,
    pub level_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    #[serde(default)]
    pub teacher_id: i32,
    #[validate(length(min = 1, max = 150, message = "Full name is required"))]
    pub full_name: String,
    #[validate(range(min = 1, message = "Level is required"))]
    pub level_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub full_name: String,
    pub level_id: i32,
}
