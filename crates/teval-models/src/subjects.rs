//! Subject models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A subject and the teacher who owns it. Enrollments copy `teacher_id` from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_id: i32,
    pub subject_name: String,
    pub teacher_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDetails {
    pub subject_id: i32,
    pub subject_name: String,
    pub teacher_id: i32,
    pub teacher_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDto {
    #[serde(default)]
    pub subject_id: i32,
    #[validate(length(min = 1, max = 150, message = "Subject name is required"))]
    pub subject_name: String,
    #[validate(range(min = 1, message = "Teacher is required"))]
    pub teacher_id: i32,
}

#[derive(Debug, Clone)]
pub struct NewSubject {
    pub subject_name: String,
    pub teacher_id: i32,
}
