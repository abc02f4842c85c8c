use async_trait::async_trait;
use teval_models::{NewStudent, Student, StudentDetails};
use tracing::instrument;

use super::PgStore;
use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::StudentRepository;

const STUDENT_COLUMNS: &str =
    "student_id, full_name, email, password, level_id, section_id, college_year_level, role_id";

const DETAILS_QUERY: &str = r#"
    SELECT s.student_id, s.full_name, s.email,
           s.level_id, l.level_name,
           s.section_id, sec.section_name,
           s.college_year_level,
           s.role_id, r.name AS role_name
    FROM students s
    LEFT JOIN levels l ON l.level_id = s.level_id
    LEFT JOIN sections sec ON sec.section_id = s.section_id
    LEFT JOIN roles r ON r.role_id = s.role_id
"#;

#[async_trait]
impl StudentRepository for PgStore {
    #[instrument(skip(self))]
    async fn list_details(&self) -> RepositoryResult<Vec<StudentDetails>> {
        let query = format!("{DETAILS_QUERY} ORDER BY s.student_id");
        let students = sqlx::query_as::<_, StudentDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }

    #[instrument(skip(self))]
    async fn find(&self, student_id: i32) -> RepositoryResult<Option<Student>> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = $1");
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    #[instrument(skip(self))]
    async fn find_details(&self, student_id: i32) -> RepositoryResult<Option<StudentDetails>> {
        let query = format!("{DETAILS_QUERY} WHERE s.student_id = $1");
        let student = sqlx::query_as::<_, StudentDetails>(&query)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Student>> {
        let query =
            format!("SELECT {STUDENT_COLUMNS} FROM students WHERE LOWER(email) = LOWER($1)");
        let student = sqlx::query_as::<_, Student>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(student)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str, excluding: Option<i32>) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM students
                   WHERE LOWER(email) = LOWER($1)
                     AND ($2::int4 IS NULL OR student_id <> $2)
               )"#,
        )
        .bind(email)
        .bind(excluding)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn exists(&self, student_id: i32) -> RepositoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    #[instrument(skip(self, student), fields(email = %student.email))]
    async fn insert(&self, student: NewStudent) -> RepositoryResult<Student> {
        let query = format!(
            r#"INSERT INTO students
                   (full_name, email, password, level_id, section_id, college_year_level, role_id)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {STUDENT_COLUMNS}"#
        );
        let inserted = sqlx::query_as::<_, Student>(&query)
            .bind(&student.full_name)
            .bind(&student.email)
            .bind(&student.password)
            .bind(student.level_id)
            .bind(student.section_id)
            .bind(student.college_year_level)
            .bind(student.role_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    #[instrument(skip(self, student), fields(student_id = student.student_id))]
    async fn update(&self, student: &Student) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"UPDATE students
               SET full_name = $2, email = $3, password = $4, level_id = $5,
                   section_id = $6, college_year_level = $7, role_id = $8
               WHERE student_id = $1"#,
        )
        .bind(student.student_id)
        .bind(&student.full_name)
        .bind(&student.email)
        .bind(&student.password)
        .bind(student.level_id)
        .bind(student.section_id)
        .bind(student.college_year_level)
        .bind(student.role_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::ConcurrencyConflict);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, student_id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
