use teval_core::{ErrorResponse, MessageResponse};
use teval_models::{
    AdminSummary, CreateEnrollmentDto, CreateLevelDto, CreateSectionDto, Dashboard,
    EnrollmentDetails, Evaluation, EvaluationDetails, Level, LoginRequest, LoginResponse,
    RoleRecord, Section, StudentDashboard, StudentDetails, StudentDto, SubjectDetails, SubjectDto,
    SubmitEvaluationDto, TeacherDto, TeacherWithLevel, UpdateEnrollmentDto,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::dashboard::controller::get_dashboard,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::enrollments::controller::get_enrollments,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::create_enrollments,
        crate::modules::enrollments::controller::update_enrollment,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::lookups::controller::get_levels,
        crate::modules::lookups::controller::create_level,
        crate::modules::lookups::controller::get_sections,
        crate::modules::lookups::controller::create_section,
        crate::modules::lookups::controller::get_roles,
        crate::modules::evaluations::controller::get_evaluations,
        crate::modules::evaluations::controller::submit_evaluation,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            LoginRequest,
            LoginResponse,
            Dashboard,
            AdminSummary,
            StudentDashboard,
            StudentDetails,
            StudentDto,
            EnrollmentDetails,
            CreateEnrollmentDto,
            UpdateEnrollmentDto,
            TeacherWithLevel,
            TeacherDto,
            SubjectDetails,
            SubjectDto,
            Level,
            Section,
            RoleRecord,
            CreateLevelDto,
            CreateSectionDto,
            Evaluation,
            EvaluationDetails,
            SubmitEvaluationDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-in for administrators and students"),
        (name = "Dashboard", description = "Role-specific landing data"),
        (name = "Students", description = "Student records"),
        (name = "Enrollments", description = "Student enrollments in subjects"),
        (name = "Teachers", description = "Teacher records"),
        (name = "Subjects", description = "Subjects and their teachers"),
        (name = "Lookups", description = "Levels, sections, and roles"),
        (name = "Evaluations", description = "Teacher evaluations submitted by students")
    ),
    info(
        title = "Teval API",
        version = "0.1.0",
        description = "School administration and teacher evaluation API built with Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
