//! Student models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A student row.
///
/// `password` is `None` for accounts created without a credential; such
/// accounts cannot log in.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub student_id: i32,
    pub full_name: String,
    pub email: String,
    pub password: Option<String>,
    pub level_id: i32,
    pub section_id: Option<i32>,
    pub college_year_level: i32,
    pub role_id: i32,
}

/// A student with its level, section, and role names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub student_id: i32,
    pub full_name: String,
    pub email: String,
    pub level_id: i32,
    pub level_name: Option<String>,
    pub section_id: Option<i32>,
    pub section_name: Option<String>,
    pub college_year_level: i32,
    pub role_id: i32,
    pub role_name: Option<String>,
}

/// Request body for creating and updating students.
///
/// `studentId` is ignored on create and must match the path id on update.
/// An absent or empty `password` keeps the stored credential on update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    #[serde(default)]
    pub student_id: i32,
    #[validate(length(min = 1, max = 150, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(max = 72, message = "Password must be at most 72 characters"))]
    pub password: Option<String>,
    #[validate(range(min = 1, message = "Level is required"))]
    pub level_id: i32,
    pub section_id: Option<i32>,
    pub college_year_level: Option<i32>,
}

/// Insert shape for a student.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub full_name: String,
    pub email: String,
    pub password: Option<String>,
    pub level_id: i32,
    pub section_id: Option<i32>,
    pub college_year_level: i32,
    pub role_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_deserialize_camel_case() {
        let dto: StudentDto = serde_json::from_str(
            r#"{"fullName":"Ana Cruz","email":"ana@gsc.edu","levelId":3,"collegeYearLevel":2}"#,
        )
        .unwrap();
        assert_eq!(dto.student_id, 0);
        assert_eq!(dto.full_name, "Ana Cruz");
        assert_eq!(dto.level_id, 3);
        assert_eq!(dto.section_id, None);
        assert_eq!(dto.college_year_level, Some(2));
        assert!(dto.password.is_none());
    }

    #[test]
    fn test_dto_validation() {
        let mut dto: StudentDto = serde_json::from_str(
            r#"{"fullName":"Ana Cruz","email":"ana@gsc.edu","levelId":3}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());

        dto.email = "not-an-email".to_string();
        assert!(dto.validate().is_err());

        dto.email = "ana@gsc.edu".to_string();
        dto.full_name = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_dto_rejects_password_past_bcrypt_limit() {
        let mut dto: StudentDto = serde_json::from_str(
            r#"{"fullName":"Ana Cruz","email":"ana@gsc.edu","levelId":3}"#,
        )
        .unwrap();

        dto.password = Some("a".repeat(72));
        assert!(dto.validate().is_ok());

        dto.password = Some("a".repeat(73));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_details_serialize_camel_case() {
        let details = StudentDetails {
            student_id: 1,
            full_name: "Ana Cruz".to_string(),
            email: "ana@gsc.edu".to_string(),
            level_id: 3,
            level_name: Some("College - 1st Year".to_string()),
            section_id: None,
            section_name: None,
            college_year_level: 1,
            role_id: 1,
            role_name: Some("Student".to_string()),
        };
        let json = serde_json::to_value(details).unwrap();
        assert_eq!(json["studentId"], 1);
        assert_eq!(json["levelName"], "College - 1st Year");
        assert_eq!(json["collegeYearLevel"], 1);
        assert!(json.get("password").is_none());
    }
}
