use async_trait::async_trait;
use teval_models::{Enrollment, EnrollmentDetails, NewEnrollment};
use tracing::instrument;

use super::PgStore;
use crate::error::RepositoryResult;
use crate::repository::EnrollmentRepository;

const DETAILS_QUERY: &str = r#"
    SELECT e.enrollment_id,
           e.student_id, st.full_name AS student_name,
           e.subject_id, su.subject_name,
           e.teacher_id, t.full_name AS teacher_name
    FROM enrollments e
    LEFT JOIN students st ON st.student_id = e.student_id
    LEFT JOIN subjects su ON su.subject_id = e.subject_id
    LEFT JOIN teachers t ON t.teacher_id = e.teacher_id
"#;

#[async_trait]
impl EnrollmentRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_details(&self) -> RepositoryResult<Vec<EnrollmentDetails>> {
        let query = format!("{DETAILS_QUERY} ORDER BY e.enrollment_id");
        let enrollments = sqlx::query_as::<_, EnrollmentDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(enrollments)
    }

    #[instrument(skip(self))]
    async fn find(&self, enrollment_id: i32) -> RepositoryResult<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"SELECT enrollment_id, student_id, subject_id, teacher_id
               FROM enrollments WHERE enrollment_id = $1"#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(enrollment)
    }

    #[instrument(skip(self))]
    async fn find_details(
        &self,
        enrollment_id: i32,
    ) -> RepositoryResult<Option<EnrollmentDetails>> {
        let query = format!("{DETAILS_QUERY} WHERE e.enrollment_id = $1");
        let enrollment = sqlx::query_as::<_, EnrollmentDetails>(&query)
            .bind(enrollment_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(enrollment)
    }

    #[instrument(skip(self))]
    async fn find_details_many(
        &self,
        enrollment_ids: &[i32],
    ) -> RepositoryResult<Vec<EnrollmentDetails>> {
        if enrollment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query =
            format!("{DETAILS_QUERY} WHERE e.enrollment_id = ANY($1) ORDER BY e.enrollment_id");
        let enrollments = sqlx::query_as::<_, EnrollmentDetails>(&query)
            .bind(enrollment_ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(enrollments)
    }

    #[instrument(skip(self))]
    async fn exists_for(&self, student_id: i32, subject_id: i32) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM enrollments WHERE student_id = $1 AND subject_id = $2
               )"#,
        )
        .bind(student_id)
        .bind(subject_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Single-statement batch insert: either every new row lands or none does.
    #[instrument(skip(self, enrollments), fields(count = enrollments.len()))]
    async fn insert_many(
        &self,
        enrollments: &[NewEnrollment],
    ) -> RepositoryResult<Vec<Enrollment>> {
        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i32> = enrollments.iter().map(|e| e.student_id).collect();
        let subject_ids: Vec<i32> = enrollments.iter().map(|e| e.subject_id).collect();
        let teacher_ids: Vec<i32> = enrollments.iter().map(|e| e.teacher_id).collect();

        let mut inserted = sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (student_id, subject_id, teacher_id)
               SELECT * FROM UNNEST($1::int4[], $2::int4[], $3::int4[])
               ON CONFLICT (student_id, subject_id) DO NOTHING
               RETURNING enrollment_id, student_id, subject_id, teacher_id"#,
        )
        .bind(&student_ids)
        .bind(&subject_ids)
        .bind(&teacher_ids)
        .fetch_all(&self.pool)
        .await?;

        inserted.sort_by_key(|e| e.enrollment_id);
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn update(&self, enrollment: &Enrollment) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"UPDATE enrollments
               SET student_id = $2, subject_id = $3, teacher_id = $4
               WHERE enrollment_id = $1"#,
        )
        .bind(enrollment.enrollment_id)
        .bind(enrollment.student_id)
        .bind(enrollment.subject_id)
        .bind(enrollment.teacher_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, enrollment_id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM enrollments WHERE enrollment_id = $1")
            .bind(enrollment_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn teacher_ids_for_student(&self, student_id: i32) -> RepositoryResult<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"SELECT teacher_id FROM enrollments
               WHERE student_id = $1
               ORDER BY enrollment_id"#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }
}
