use anyhow::anyhow;
use teval_core::AppError;
use teval_db::{RepositoryError, Store};
use teval_models::{Evaluation, EvaluationDetails, NewEvaluation, SubmitEvaluationDto};
use teval_observability::track_evaluation_submitted;
use tracing::{info, instrument};

use crate::utils::store_errors::reference_error;

const ALREADY_EVALUATED: &str = "You have already evaluated this teacher";

pub struct EvaluationService;

impl EvaluationService {
    #[instrument(skip(store))]
    pub async fn get_evaluations(store: &Store) -> Result<Vec<EvaluationDetails>, AppError> {
        store
            .evaluations
            .list_details()
            .await
            .map_err(AppError::database)
    }

    /// Records the student's evaluation of one of their enrolled teachers.
    /// Each teacher can be evaluated once per student.
    #[instrument(skip(store, dto), fields(teacher_id = dto.teacher_id))]
    pub async fn submit_evaluation(
        store: &Store,
        student_id: i32,
        dto: SubmitEvaluationDto,
    ) -> Result<Evaluation, AppError> {
        let enrolled = store
            .enrollments
            .teacher_ids_for_student(student_id)
            .await
            .map_err(AppError::database)?;
        if !enrolled.contains(&dto.teacher_id) {
            return Err(AppError::bad_request(anyhow!(
                "You are not enrolled with this teacher"
            )));
        }

        let evaluated = store
            .evaluations
            .teacher_ids_for_student(student_id)
            .await
            .map_err(AppError::database)?;
        if evaluated.contains(&dto.teacher_id) {
            return Err(AppError::bad_request(anyhow!(ALREADY_EVALUATED)));
        }

        let comments = dto
            .comments
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let evaluation = store
            .evaluations
            .insert(NewEvaluation {
                student_id,
                teacher_id: dto.teacher_id,
                comments,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::UniqueViolation(_) => {
                    AppError::bad_request(anyhow!(ALREADY_EVALUATED))
                }
                other => reference_error(other, "Student or teacher does not exist"),
            })?;

        track_evaluation_submitted();
        info!(
            evaluation_id = evaluation.evaluation_id,
            student_id, "Evaluation submitted"
        );

        Ok(evaluation)
    }
}
