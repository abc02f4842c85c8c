use anyhow::anyhow;
use teval_core::AppError;
use teval_db::Store;
use teval_models::{NewSubject, Subject, SubjectDetails, SubjectDto};
use tracing::instrument;

use crate::utils::store_errors::reference_error;

const UNKNOWN_TEACHER: &str = "Teacher does not exist";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(store))]
    pub async fn get_subjects(store: &Store) -> Result<Vec<SubjectDetails>, AppError> {
        let subjects = store
            .subjects
            .list_details()
            .await
            .map_err(AppError::database)?;
        Ok(subjects)
    }

    #[instrument(skip(store))]
    pub async fn get_subject(store: &Store, id: i32) -> Result<SubjectDetails, AppError> {
        store
            .subjects
            .find_details(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Subject not found")))
    }

    #[instrument(skip(store))]
    pub async fn create_subject(
        store: &Store,
        dto: SubjectDto,
    ) -> Result<SubjectDetails, AppError> {
        let subject = store
            .subjects
            .insert(NewSubject {
                subject_name: dto.subject_name,
                teacher_id: dto.teacher_id,
            })
            .await
            .map_err(|e| reference_error(e, UNKNOWN_TEACHER))?;

        Self::get_subject(store, subject.subject_id).await
    }

    /// Changing the owning teacher does not touch existing enrollments; they
    /// keep the teacher recorded when they were created.
    #[instrument(skip(store))]
    pub async fn update_subject(
        store: &Store,
        id: i32,
        dto: SubjectDto,
    ) -> Result<SubjectDetails, AppError> {
        if dto.subject_id != id {
            return Err(AppError::bad_request(anyhow!("Subject ID mismatch")));
        }

        let updated = store
            .subjects
            .update(&Subject {
                subject_id: id,
                subject_name: dto.subject_name,
                teacher_id: dto.teacher_id,
            })
            .await
            .map_err(|e| reference_error(e, UNKNOWN_TEACHER))?;
        if !updated {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }

        Self::get_subject(store, id).await
    }

    #[instrument(skip(store))]
    pub async fn delete_subject(store: &Store, id: i32) -> Result<(), AppError> {
        let deleted = store.subjects.delete(id).await.map_err(|e| {
            reference_error(e, "Cannot delete subject. Subject may have enrollments.")
        })?;
        if !deleted {
            return Err(AppError::not_found(anyhow!("Subject not found")));
        }
        Ok(())
    }
}
