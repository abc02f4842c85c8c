use std::collections::HashSet;

use teval_auth::Role;
use teval_core::AppError;
use teval_db::Store;
use teval_models::{AdminSummary, Dashboard, StudentDashboard, TeacherWithLevel};
use tracing::{debug, instrument};

use crate::middleware::auth::Identity;

pub struct DashboardService;

impl DashboardService {
    /// Picks the dashboard for the caller's role.
    ///
    /// Anonymous callers get 401. Admin and Super Admin get aggregate counts,
    /// students get the teachers they still have to evaluate, and any other
    /// role (or a student token without a numeric subject) gets 403.
    #[instrument(skip(store, identity))]
    pub async fn get_dashboard(store: &Store, identity: &Identity) -> Result<Dashboard, AppError> {
        let claims = match identity {
            Identity::Anonymous => return Err(AppError::unauthorized("Not authenticated")),
            Identity::Authenticated(claims) => claims,
        };

        match claims.role() {
            Role::Admin | Role::SuperAdmin => {
                Ok(Dashboard::Admin(Self::admin_summary(store).await?))
            }
            Role::Student => match claims.subject_id() {
                Some(student_id) => Ok(Dashboard::Student(
                    Self::student_dashboard(store, student_id).await?,
                )),
                None => Err(AppError::forbidden("Access denied")),
            },
            Role::Other => Err(AppError::forbidden("Access denied")),
        }
    }

    #[instrument(skip(store))]
    pub async fn admin_summary(store: &Store) -> Result<AdminSummary, AppError> {
        let total_teachers = store.teachers.count().await.map_err(AppError::database)?;
        let total_students = store.students.count().await.map_err(AppError::database)?;
        let total_evaluations = store
            .evaluations
            .count()
            .await
            .map_err(AppError::database)?;

        Ok(AdminSummary {
            total_teachers,
            total_students,
            total_evaluations,
        })
    }

    #[instrument(skip(store))]
    pub async fn student_dashboard(
        store: &Store,
        student_id: i32,
    ) -> Result<StudentDashboard, AppError> {
        let teachers_to_evaluate = Self::pending_teachers(store, student_id).await?;
        Ok(StudentDashboard {
            student_id,
            teachers_to_evaluate,
        })
    }

    /// Teachers the student is enrolled with and has not evaluated yet.
    async fn pending_teachers(
        store: &Store,
        student_id: i32,
    ) -> Result<Vec<TeacherWithLevel>, AppError> {
        let enrolled = store
            .enrollments
            .teacher_ids_for_student(student_id)
            .await
            .map_err(AppError::database)?;
        let evaluated: HashSet<i32> = store
            .evaluations
            .teacher_ids_for_student(student_id)
            .await
            .map_err(AppError::database)?
            .into_iter()
            .collect();

        let pending = pending_teacher_ids(&enrolled, &evaluated);
        debug!(
            enrolled = enrolled.len(),
            evaluated = evaluated.len(),
            pending = pending.len(),
            "Computed pending evaluations"
        );

        store
            .teachers
            .find_many_with_level(&pending)
            .await
            .map_err(AppError::database)
    }
}

/// `enrolled` minus `evaluated`, without repeats, in first-seen order.
fn pending_teacher_ids(enrolled: &[i32], evaluated: &HashSet<i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    enrolled
        .iter()
        .copied()
        .filter(|id| !evaluated.contains(id) && seen.insert(*id))
        .collect()
}
