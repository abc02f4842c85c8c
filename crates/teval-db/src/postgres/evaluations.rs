use async_trait::async_trait;
use teval_models::{Evaluation, EvaluationDetails, NewEvaluation};
use tracing::instrument;

use super::PgStore;
use crate::error::RepositoryResult;
use crate::repository::EvaluationRepository;

#[async_trait]
impl EvaluationRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_details(&self) -> RepositoryResult<Vec<EvaluationDetails>> {
        let evaluations = sqlx::query_as::<_, EvaluationDetails>(
            r#"SELECT ev.evaluation_id,
                      ev.student_id, st.full_name AS student_name,
                      ev.teacher_id, t.full_name AS teacher_name,
                      ev.comments, ev.created_at
               FROM evaluations ev
               LEFT JOIN students st ON st.student_id = ev.student_id
               LEFT JOIN teachers t ON t.teacher_id = ev.teacher_id
               ORDER BY ev.created_at DESC, ev.evaluation_id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(evaluations)
    }

    #[instrument(
        skip(self, evaluation),
        fields(student_id = evaluation.student_id, teacher_id = evaluation.teacher_id)
    )]
    async fn insert(&self, evaluation: NewEvaluation) -> RepositoryResult<Evaluation> {
        let inserted = sqlx::query_as::<_, Evaluation>(
            r#"INSERT INTO evaluations (student_id, teacher_id, comments)
               VALUES ($1, $2, $3)
               RETURNING evaluation_id, student_id, teacher_id, comments, created_at"#,
        )
        .bind(evaluation.student_id)
        .bind(evaluation.teacher_id)
        .bind(&evaluation.comments)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM evaluations")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn teacher_ids_for_student(&self, student_id: i32) -> RepositoryResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            "SELECT teacher_id FROM evaluations WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }
}
