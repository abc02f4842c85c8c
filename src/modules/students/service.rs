use anyhow::anyhow;
use teval_core::{AppError, hash_password};
use teval_db::{RepositoryError, Store};
use teval_models::{Level, NewStudent, Student, StudentDetails, StudentDto, system_roles};
use teval_observability::track_student_created;
use tracing::{info, instrument, warn};

use crate::utils::store_errors::write_error;

const EMAIL_TAKEN: &str = "Email already exists";
const INVALID_REFERENCE: &str = "Level or section does not exist";
const DELETE_BLOCKED: &str = "Cannot delete student. Student may have enrollments or evaluations.";

/// College year for a student at `level`.
///
/// College levels (name contains "college", any case) keep a requested year in
/// 1..=4 and fall back to 1 otherwise. Every other level forces 0.
pub fn derive_college_year_level(level: &Level, requested: Option<i32>) -> i32 {
    if !level.is_college() {
        return 0;
    }
    match requested {
        Some(year @ 1..=4) => year,
        _ => 1,
    }
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store))]
    pub async fn get_students(store: &Store) -> Result<Vec<StudentDetails>, AppError> {
        let students = store
            .students
            .list_details()
            .await
            .map_err(AppError::database)?;
        Ok(students)
    }

    #[instrument(skip(store))]
    pub async fn get_student(store: &Store, id: i32) -> Result<StudentDetails, AppError> {
        store
            .students
            .find_details(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_student(
        store: &Store,
        dto: StudentDto,
    ) -> Result<StudentDetails, AppError> {
        if store
            .students
            .email_exists(&dto.email, None)
            .await
            .map_err(AppError::database)?
        {
            return Err(AppError::bad_request(anyhow!(EMAIL_TAKEN)));
        }

        let level = Self::find_level(store, dto.level_id).await?;
        let password = match non_empty(dto.password.as_deref()) {
            Some(plain) => Some(hash_password(plain)?),
            None => None,
        };

        let student = store
            .students
            .insert(NewStudent {
                full_name: dto.full_name,
                email: dto.email,
                password,
                level_id: level.level_id,
                section_id: dto.section_id,
                college_year_level: derive_college_year_level(&level, dto.college_year_level),
                role_id: system_roles::STUDENT,
            })
            .await
            .map_err(|e| write_error(e, EMAIL_TAKEN, INVALID_REFERENCE))?;

        track_student_created();
        info!(student_id = student.student_id, "Student created");

        Self::reload(store, student.student_id).await
    }

    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn update_student(
        store: &Store,
        id: i32,
        dto: StudentDto,
    ) -> Result<StudentDetails, AppError> {
        if dto.student_id != id {
            return Err(AppError::bad_request(anyhow!("Student ID mismatch")));
        }

        let existing = store
            .students
            .find(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))?;

        if store
            .students
            .email_exists(&dto.email, Some(id))
            .await
            .map_err(AppError::database)?
        {
            return Err(AppError::bad_request(anyhow!(EMAIL_TAKEN)));
        }

        let level = Self::find_level(store, dto.level_id).await?;
        let password = match non_empty(dto.password.as_deref()) {
            Some(plain) => Some(hash_password(plain)?),
            None => existing.password,
        };

        let student = Student {
            student_id: id,
            full_name: dto.full_name,
            email: dto.email,
            password,
            level_id: level.level_id,
            section_id: dto.section_id,
            college_year_level: derive_college_year_level(&level, dto.college_year_level),
            role_id: system_roles::STUDENT,
        };

        match store.students.update(&student).await {
            Ok(()) => {}
            Err(RepositoryError::ConcurrencyConflict) => {
                let still_exists = store
                    .students
                    .exists(id)
                    .await
                    .map_err(AppError::database)?;
                if !still_exists {
                    return Err(AppError::not_found(anyhow!("Student not found")));
                }
                warn!(student_id = id, "Student update lost to a concurrent write");
                return Err(AppError::internal(RepositoryError::ConcurrencyConflict));
            }
            Err(e) => return Err(write_error(e, EMAIL_TAKEN, INVALID_REFERENCE)),
        }

        Self::reload(store, id).await
    }

    #[instrument(skip(store))]
    pub async fn delete_student(store: &Store, id: i32) -> Result<(), AppError> {
        if !store.students.exists(id).await.map_err(AppError::database)? {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        match store.students.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::not_found(anyhow!("Student not found"))),
            Err(RepositoryError::ForeignKeyViolation(constraint)) => {
                warn!(student_id = id, %constraint, "Student delete blocked by dependent rows");
                Err(AppError::bad_request(anyhow!(DELETE_BLOCKED)))
            }
            Err(e) => Err(AppError::database(e)),
        }
    }

    async fn find_level(store: &Store, level_id: i32) -> Result<Level, AppError> {
        store
            .lookups
            .find_level(level_id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::bad_request(anyhow!("Level does not exist")))
    }

    /// Re-reads a student with level, section, and role names after a write.
    async fn reload(store: &Store, id: i32) -> Result<StudentDetails, AppError> {
        store
            .students
            .find_details(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::internal(anyhow!("Student {} vanished after write", id)))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use teval_core::verify_password;

    use super::*;
    use crate::modules::test_support::{self, enroll, evaluate};

    fn dto(email: &str, level_id: i32) -> StudentDto {
        StudentDto {
            student_id: 0,
            full_name: "Ana Cruz".to_string(),
            email: email.to_string(),
            password: None,
            level_id,
            section_id: None,
            college_year_level: None,
        }
    }

    fn level(name: &str) -> Level {
        Level {
            level_id: 1,
            level_name: name.to_string(),
        }
    }

    #[test]
    fn test_college_year_level_clamps_out_of_range_to_one() {
        let college = level("College - 1st Year");
        assert_eq!(derive_college_year_level(&college, Some(7)), 1);
        assert_eq!(derive_college_year_level(&college, Some(0)), 1);
        assert_eq!(derive_college_year_level(&college, Some(-2)), 1);
        assert_eq!(derive_college_year_level(&college, None), 1);
        assert_eq!(derive_college_year_level(&college, Some(3)), 3);
        assert_eq!(derive_college_year_level(&college, Some(4)), 4);
    }

    #[test]
    fn test_college_year_level_forced_to_zero_outside_college() {
        let grade = level("Grade 10");
        assert_eq!(derive_college_year_level(&grade, Some(3)), 0);
        assert_eq!(derive_college_year_level(&grade, None), 0);
    }

    #[tokio::test]
    async fn test_create_student_derives_fields() {
        let store = test_support::store();
        let college = test_support::level(&store, "College - 1st Year").await;

        let mut input = dto("ana@gsc.edu", college.level_id);
        input.college_year_level = Some(7);
        input.password = Some("s3cret!".to_string());

        let created = StudentService::create_student(&store, input).await.unwrap();
        assert_eq!(created.college_year_level, 1);
        assert_eq!(created.role_id, system_roles::STUDENT);
        assert_eq!(created.role_name.as_deref(), Some("Student"));
        assert_eq!(created.level_name.as_deref(), Some("College - 1st Year"));

        let stored = store.students.find(created.student_id).await.unwrap().unwrap();
        let hash = stored.password.unwrap();
        assert_ne!(hash, "s3cret!");
        assert!(verify_password("s3cret!", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_student_without_password_stores_none() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;

        let mut input = dto("ana@gsc.edu", grade.level_id);
        input.password = Some(String::new());
        input.college_year_level = Some(2);

        let created = StudentService::create_student(&store, input).await.unwrap();
        assert_eq!(created.college_year_level, 0);
        let stored = store.students.find(created.student_id).await.unwrap().unwrap();
        assert_eq!(stored.password, None);
    }

    #[tokio::test]
    async fn test_create_student_duplicate_email_rejected() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        StudentService::create_student(&store, dto("ana@gsc.edu", grade.level_id))
            .await
            .unwrap();

        let err = StudentService::create_student(&store, dto("ANA@gsc.edu", grade.level_id))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), EMAIL_TAKEN);
        assert_eq!(store.students.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_student_unknown_level_rejected() {
        let store = test_support::store();
        let err = StudentService::create_student(&store, dto("ana@gsc.edu", 42))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_hash() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let mut input = dto("ana@gsc.edu", grade.level_id);
        input.password = Some("first".to_string());
        let created = StudentService::create_student(&store, input).await.unwrap();
        let before = store.students.find(created.student_id).await.unwrap().unwrap();

        let mut update = dto("ana.cruz@gsc.edu", grade.level_id);
        update.student_id = created.student_id;
        update.full_name = "Ana M. Cruz".to_string();
        let updated = StudentService::update_student(&store, created.student_id, update)
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Ana M. Cruz");
        assert_eq!(updated.email, "ana.cruz@gsc.edu");

        let after = store.students.find(created.student_id).await.unwrap().unwrap();
        assert_eq!(after.password, before.password);
    }

    #[tokio::test]
    async fn test_update_with_password_overwrites_hash() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let mut input = dto("ana@gsc.edu", grade.level_id);
        input.password = Some("first".to_string());
        let created = StudentService::create_student(&store, input).await.unwrap();

        let mut update = dto("ana@gsc.edu", grade.level_id);
        update.student_id = created.student_id;
        update.password = Some("second".to_string());
        StudentService::update_student(&store, created.student_id, update)
            .await
            .unwrap();

        let hash = store
            .students
            .find(created.student_id)
            .await
            .unwrap()
            .unwrap()
            .password
            .unwrap();
        assert!(verify_password("second", &hash).unwrap());
        assert!(!verify_password("first", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_reapplies_college_year_level() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 12").await;
        let college = test_support::level(&store, "College - 2nd Year").await;
        let created = StudentService::create_student(&store, dto("ana@gsc.edu", grade.level_id))
            .await
            .unwrap();

        let mut update = dto("ana@gsc.edu", college.level_id);
        update.student_id = created.student_id;
        update.college_year_level = Some(2);
        let updated = StudentService::update_student(&store, created.student_id, update)
            .await
            .unwrap();
        assert_eq!(updated.college_year_level, 2);
    }

    #[tokio::test]
    async fn test_update_clamps_out_of_range_college_year_level() {
        let store = test_support::store();
        let college = test_support::level(&store, "College - 1st Year").await;
        let mut input = dto("ana@gsc.edu", college.level_id);
        input.college_year_level = Some(3);
        let created = StudentService::create_student(&store, input).await.unwrap();
        assert_eq!(created.college_year_level, 3);

        let mut update = dto("ana@gsc.edu", college.level_id);
        update.student_id = created.student_id;
        update.college_year_level = Some(7);
        let updated = StudentService::update_student(&store, created.student_id, update)
            .await
            .unwrap();

        assert_eq!(updated.college_year_level, 1);
        let stored = store.students.find(created.student_id).await.unwrap().unwrap();
        assert_eq!(stored.college_year_level, 1);
    }

    #[tokio::test]
    async fn test_update_to_non_college_level_forces_zero() {
        let store = test_support::store();
        let college = test_support::level(&store, "College - 3rd Year").await;
        let grade = test_support::level(&store, "Grade 12").await;
        let mut input = dto("ana@gsc.edu", college.level_id);
        input.college_year_level = Some(3);
        let created = StudentService::create_student(&store, input).await.unwrap();

        let mut update = dto("ana@gsc.edu", grade.level_id);
        update.student_id = created.student_id;
        update.college_year_level = Some(3);
        let updated = StudentService::update_student(&store, created.student_id, update)
            .await
            .unwrap();

        assert_eq!(updated.level_id, grade.level_id);
        assert_eq!(updated.college_year_level, 0);
    }

    #[tokio::test]
    async fn test_create_student_rejects_password_past_bcrypt_limit() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 12").await;
        let mut input = dto("ana@gsc.edu", grade.level_id);
        // 40 characters pass the DTO rule but are 80 bytes
        input.password = Some("é".repeat(40));

        let err = StudentService::create_student(&store, input).await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(store.students.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_id_mismatch_rejected() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let created = StudentService::create_student(&store, dto("ana@gsc.edu", grade.level_id))
            .await
            .unwrap();

        let mut update = dto("ana@gsc.edu", grade.level_id);
        update.student_id = created.student_id + 1;
        let err = StudentService::update_student(&store, created.student_id, update)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), "Student ID mismatch");
    }

    #[tokio::test]
    async fn test_update_missing_student_not_found() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let mut update = dto("ana@gsc.edu", grade.level_id);
        update.student_id = 99;
        let err = StudentService::update_student(&store, 99, update)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_duplicate_email_excludes_self() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let ana = StudentService::create_student(&store, dto("ana@gsc.edu", grade.level_id))
            .await
            .unwrap();
        StudentService::create_student(&store, dto("ben@gsc.edu", grade.level_id))
            .await
            .unwrap();

        let mut same = dto("ana@gsc.edu", grade.level_id);
        same.student_id = ana.student_id;
        assert!(
            StudentService::update_student(&store, ana.student_id, same)
                .await
                .is_ok()
        );

        let mut taken = dto("ben@gsc.edu", grade.level_id);
        taken.student_id = ana.student_id;
        let err = StudentService::update_student(&store, ana.student_id, taken)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    mod conflicts {
        use teval_db::{MemoryStore, UpdateConflict};

        use super::*;

        async fn setup() -> (MemoryStore, Store, StudentDetails, StudentDto) {
            let memory = MemoryStore::new();
            let store = Store::memory(memory.clone());
            let grade = test_support::level(&store, "Grade 10").await;
            let created = StudentService::create_student(&store, dto("ana@gsc.edu", grade.level_id))
                .await
                .unwrap();
            let mut update = dto("ana@gsc.edu", grade.level_id);
            update.student_id = created.student_id;
            (memory, store, created, update)
        }

        #[tokio::test]
        async fn test_update_conflict_on_deleted_row_is_not_found() {
            let (memory, store, created, update) = setup().await;
            memory.inject_student_update_conflict(UpdateConflict::RowDeleted);

            let err = StudentService::update_student(&store, created.student_id, update)
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::NOT_FOUND);
        }

        #[tokio::test]
        async fn test_update_conflict_on_live_row_is_fatal() {
            let (memory, store, created, update) = setup().await;
            memory.inject_student_update_conflict(UpdateConflict::RowChanged);

            let err = StudentService::update_student(&store, created.student_id, update)
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(store.students.exists(created.student_id).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_delete_student_with_enrollment_is_blocked() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let teacher = test_support::teacher(&store, grade.level_id, "Maria Santos").await;
        let subject = test_support::subject(&store, teacher.teacher_id, "Algebra").await;
        let student = test_support::student(&store, grade.level_id, "ana@gsc.edu").await;
        enroll(&store, student.student_id, &subject).await;

        let err = StudentService::delete_student(&store, student.student_id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error.to_string(), DELETE_BLOCKED);
        assert!(store.students.exists(student.student_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_student_with_evaluation_is_blocked() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let teacher = test_support::teacher(&store, grade.level_id, "Maria Santos").await;
        let student = test_support::student(&store, grade.level_id, "ana@gsc.edu").await;
        evaluate(&store, student.student_id, teacher.teacher_id).await;

        let err = StudentService::delete_student(&store, student.student_id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_student() {
        let store = test_support::store();
        let grade = test_support::level(&store, "Grade 10").await;
        let student = test_support::student(&store, grade.level_id, "ana@gsc.edu").await;

        StudentService::delete_student(&store, student.student_id)
            .await
            .unwrap();
        assert!(!store.students.exists(student.student_id).await.unwrap());

        let err = StudentService::delete_student(&store, student.student_id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
