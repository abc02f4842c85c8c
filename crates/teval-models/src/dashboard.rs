//! Dashboard payloads. Which one a caller gets depends on their role.

use serde::Serialize;
use utoipa::ToSchema;

use crate::teachers::TeacherWithLevel;

/// Global counts shown to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub total_teachers: i64,
    pub total_students: i64,
    pub total_evaluations: i64,
}

/// Teachers a student is enrolled with and has not evaluated yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub student_id: i32,
    pub teachers_to_evaluate: Vec<TeacherWithLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Dashboard {
    Admin(AdminSummary),
    Student(StudentDashboard),
}
