use async_trait::async_trait;
use teval_models::{NewTeacher, Teacher, TeacherWithLevel};
use tracing::instrument;

use super::PgStore;
use crate::error::RepositoryResult;
use crate::repository::TeacherRepository;

const WITH_LEVEL_QUERY: &str = r#"
    SELECT t.teacher_id, t.full_name, t.level_id, l.level_name
    FROM teachers t
    LEFT JOIN levels l ON l.level_id = t.level_id
"#;

#[async_trait]
impl TeacherRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_with_level(&self) -> RepositoryResult<Vec<TeacherWithLevel>> {
        let query = format!("{WITH_LEVEL_QUERY} ORDER BY t.teacher_id");
        let teachers = sqlx::query_as::<_, TeacherWithLevel>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(teachers)
    }

    #[instrument(skip(self))]
    async fn find(&self, teacher_id: i32) -> RepositoryResult<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            "SELECT teacher_id, full_name, level_id FROM teachers WHERE teacher_id = $1",
        )
        .bind(teacher_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn find_with_level(&self, teacher_id: i32) -> RepositoryResult<Option<TeacherWithLevel>> {
        let query = format!("{WITH_LEVEL_QUERY} WHERE t.teacher_id = $1");
        let teacher = sqlx::query_as::<_, TeacherWithLevel>(&query)
            .bind(teacher_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(teacher)
    }

    #[instrument(skip(self))]
    async fn find_many_with_level(
        &self,
        teacher_ids: &[i32],
    ) -> RepositoryResult<Vec<TeacherWithLevel>> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query =
            format!("{WITH_LEVEL_QUERY} WHERE t.teacher_id = ANY($1) ORDER BY t.teacher_id");
        let teachers = sqlx::query_as::<_, TeacherWithLevel>(&query)
            .bind(teacher_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(teachers)
    }

    #[instrument(skip(self))]
    async fn insert(&self, teacher: NewTeacher) -> RepositoryResult<Teacher> {
        let inserted = sqlx::query_as::<_, Teacher>(
            r#"INSERT INTO teachers (full_name, level_id)
               VALUES ($1, $2)
               RETURNING teacher_id, full_name, level_id"#,
        )
        .bind(&teacher.full_name)
        .bind(teacher.level_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn update(&self, teacher: &Teacher) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE teachers SET full_name = $2, level_id = $3 WHERE teacher_id = $1",
        )
        .bind(teacher.teacher_id)
        .bind(&teacher.full_name)
        .bind(teacher.level_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, teacher_id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM teachers WHERE teacher_id = $1")
            .bind(teacher_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
