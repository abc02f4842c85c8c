//! Evaluation models. Scoring fields are not modelled; an evaluation records
//! that a student has evaluated a teacher, with optional comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub evaluation_id: i32,
    pub student_id: i32,
    pub teacher_id: i32,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetails {
    pub evaluation_id: i32,
    pub student_id: i32,
    pub student_name: Option<String>,
    pub teacher_id: i32,
    pub teacher_name: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEvaluationDto {
    #[validate(range(min = 1, message = "Teacher is required"))]
    pub teacher_id: i32,
    #[validate(length(max = 2000))]
    pub comments: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub student_id: i32,
    pub teacher_id: i32,
    pub comments: Option<String>,
}
