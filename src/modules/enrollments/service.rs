use std::collections::HashSet;

use anyhow::anyhow;
use teval_core::AppError;
use teval_db::Store;
use teval_models::{
    CreateEnrollmentDto, Enrollment, EnrollmentDetails, NewEnrollment, UpdateEnrollmentDto,
};
use teval_observability::track_enrollments_created;
use tracing::{debug, info, instrument};

use crate::utils::store_errors::{reference_error, write_error};

const INVALID_REFERENCE: &str = "Referenced student, subject or teacher does not exist";

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(store))]
    pub async fn get_enrollments(store: &Store) -> Result<Vec<EnrollmentDetails>, AppError> {
        let enrollments = store
            .enrollments
            .list_details()
            .await
            .map_err(AppError::database)?;
        Ok(enrollments)
    }

    #[instrument(skip(store))]
    pub async fn get_enrollment(store: &Store, id: i32) -> Result<EnrollmentDetails, AppError> {
        store
            .enrollments
            .find_details(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Enrollment not found")))
    }

    /// Enrolls one student in many subjects.
    ///
    /// Subjects that do not exist, pairs the student already holds, and ids
    /// repeated in the request are skipped. The teacher of each enrollment is
    /// the subject's owning teacher. Returns only the enrollments created by
    /// this call, which may be none.
    #[instrument(
        skip(store, dto),
        fields(student_id = dto.student_id, requested = dto.subject_ids.len())
    )]
    pub async fn create_enrollments(
        store: &Store,
        dto: CreateEnrollmentDto,
    ) -> Result<Vec<EnrollmentDetails>, AppError> {
        let student_exists = store
            .students
            .exists(dto.student_id)
            .await
            .map_err(AppError::database)?;
        if !student_exists {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        let mut seen = HashSet::new();
        let mut staged = Vec::new();

        for subject_id in dto.subject_ids {
            if !seen.insert(subject_id) {
                continue;
            }

            let Some(subject) = store
                .subjects
                .find(subject_id)
                .await
                .map_err(AppError::database)?
            else {
                debug!(subject_id, "Skipping unknown subject");
                continue;
            };

            let already_enrolled = store
                .enrollments
                .exists_for(dto.student_id, subject_id)
                .await
                .map_err(AppError::database)?;
            if already_enrolled {
                debug!(subject_id, "Skipping existing enrollment");
                continue;
            }

            staged.push(NewEnrollment {
                student_id: dto.student_id,
                subject_id: subject.subject_id,
                teacher_id: subject.teacher_id,
            });
        }

        if staged.is_empty() {
            return Ok(Vec::new());
        }

        let created = store
            .enrollments
            .insert_many(&staged)
            .await
            .map_err(|e| reference_error(e, INVALID_REFERENCE))?;

        track_enrollments_created(created.len());
        info!(created = created.len(), "Enrollments created");

        let ids: Vec<i32> = created.iter().map(|e| e.enrollment_id).collect();
        let details = store
            .enrollments
            .find_details_many(&ids)
            .await
            .map_err(AppError::database)?;
        Ok(details)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_enrollment(
        store: &Store,
        id: i32,
        dto: UpdateEnrollmentDto,
    ) -> Result<EnrollmentDetails, AppError> {
        if dto.enrollment_id != id {
            return Err(AppError::bad_request(anyhow!("Enrollment ID mismatch")));
        }

        let enrollment = Enrollment {
            enrollment_id: id,
            student_id: dto.student_id,
            subject_id: dto.subject_id,
            teacher_id: dto.teacher_id,
        };

        let updated = store.enrollments.update(&enrollment).await.map_err(|e| {
            write_error(
                e,
                "Student is already enrolled in this subject",
                INVALID_REFERENCE,
            )
        })?;
        if !updated {
            return Err(AppError::not_found(anyhow!("Enrollment not found")));
        }

        Self::get_enrollment(store, id).await
    }

    #[instrument(skip(store))]
    pub async fn delete_enrollment(store: &Store, id: i32) -> Result<(), AppError> {
        let deleted = store
            .enrollments
            .delete(id)
            .await
            .map_err(AppError::database)?;
        if !deleted {
            return Err(AppError::not_found(anyhow!("Enrollment not found")));
        }
        Ok(())
    }
}
