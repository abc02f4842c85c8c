//! # Teval Models
//!
//! Domain models and DTOs for the Teval API: database rows (`sqlx::FromRow`),
//! request bodies (`validator::Validate`), and response views. All JSON field
//! names are camelCase.
//!
//! # Modules
//!
//! - [`admins`]: Administrator accounts
//! - [`auth`]: Login request/response
//! - [`dashboard`]: Role-specific dashboard payloads
//! - [`enrollments`]: Student/subject/teacher enrollments
//! - [`evaluations`]: Teacher evaluations submitted by students
//! - [`lookups`]: Levels, sections, and roles
//! - [`students`]: Students
//! - [`subjects`]: Subjects
//! - [`teachers`]: Teachers

pub mod admins;
pub mod auth;
pub mod dashboard;
pub mod enrollments;
pub mod evaluations;
pub mod lookups;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use admins::{AdminAccount, NewAdmin};
pub use auth::{LoginRequest, LoginResponse};
pub use dashboard::{AdminSummary, Dashboard, StudentDashboard};
pub use enrollments::{
    CreateEnrollmentDto, Enrollment, EnrollmentDetails, NewEnrollment, UpdateEnrollmentDto,
};
pub use evaluations::{Evaluation, EvaluationDetails, NewEvaluation, SubmitEvaluationDto};
pub use lookups::{CreateLevelDto, CreateSectionDto, Level, RoleRecord, Section, system_roles};
pub use students::{NewStudent, Student, StudentDetails, StudentDto};
pub use subjects::{NewSubject, Subject, SubjectDetails, SubjectDto};
pub use teachers::{NewTeacher, Teacher, TeacherDto, TeacherWithLevel};
