use async_trait::async_trait;
use teval_models::{NewSubject, Subject, SubjectDetails};
use tracing::instrument;

use super::PgStore;
use crate::error::RepositoryResult;
use crate::repository::SubjectRepository;

const DETAILS_QUERY: &str = r#"
    SELECT s.subject_id, s.subject_name, s.teacher_id, t.full_name AS teacher_name
    FROM subjects s
    LEFT JOIN teachers t ON t.teacher_id = s.teacher_id
"#;

#[async_trait]
impl SubjectRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_details(&self) -> RepositoryResult<Vec<SubjectDetails>> {
        let query = format!("{DETAILS_QUERY} ORDER BY s.subject_id");
        let subjects = sqlx::query_as::<_, SubjectDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(subjects)
    }

    #[instrument(skip(self))]
    async fn find(&self, subject_id: i32) -> RepositoryResult<Option<Subject>> {
        let subject = sqlx::query_as::<_, Subject>(
            "SELECT subject_id, subject_name, teacher_id FROM subjects WHERE subject_id = $1",
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(subject)
    }

    #[instrument(skip(self))]
    async fn find_details(&self, subject_id: i32) -> RepositoryResult<Option<SubjectDetails>> {
        let query = format!("{DETAILS_QUERY} WHERE s.subject_id = $1");
        let subject = sqlx::query_as::<_, SubjectDetails>(&query)
            .bind(subject_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subject)
    }

    #[instrument(skip(self))]
    async fn insert(&self, subject: NewSubject) -> RepositoryResult<Subject> {
        let inserted = sqlx::query_as::<_, Subject>(
            r#"INSERT INTO subjects (subject_name, teacher_id)
               VALUES ($1, $2)
               RETURNING subject_id, subject_name, teacher_id"#,
        )
        .bind(&subject.subject_name)
        .bind(subject.teacher_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn update(&self, subject: &Subject) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE subjects SET subject_name = $2, teacher_id = $3 WHERE subject_id = $1",
        )
        .bind(subject.subject_id)
        .bind(&subject.subject_name)
        .bind(subject.teacher_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, subject_id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM subjects WHERE subject_id = $1")
            .bind(subject_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
