//! Enrollment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// An enrollment row. `(student_id, subject_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Enrollment {
    pub enrollment_id: i32,
    pub student_id: i32,
    pub subject_id: i32,
    pub teacher_id: i32,
}

/// An enrollment with student, subject, and teacher names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDetails {
    pub enrollment_id: i32,
    pub student_id: i32,
    pub student_name: Option<String>,
    pub subject_id: i32,
    pub subject_name: Option<String>,
    pub teacher_id: i32,
    pub teacher_name: Option<String>,
}

/// Bulk enrollment request: one student, many subjects.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentDto {
    #[validate(range(min = 1, message = "Student is required"))]
    pub student_id: i32,
    pub subject_ids: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentDto {
    pub enrollment_id: i32,
    #[validate(range(min = 1, message = "Student is required"))]
    pub student_id: i32,
    #[validate(range(min = 1, message = "Subject is required"))]
    pub subject_id: i32,
    #[validate(range(min = 1, message = "Teacher is required"))]
    pub teacher_id: i32,
}

/// A staged enrollment waiting for the batch insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub subject_id: i32,
    pub teacher_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dto_requires_student_id() {
        let result = serde_json::from_str::<CreateEnrollmentDto>(r#"{"subjectIds":[1,2]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_dto_rejects_zero_student() {
        let dto: CreateEnrollmentDto =
            serde_json::from_str(r#"{"studentId":0,"subjectIds":[1]}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_accepts_empty_subject_list() {
        let dto: CreateEnrollmentDto =
            serde_json::from_str(r#"{"studentId":4,"subjectIds":[]}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.subject_ids.is_empty());
    }
}
