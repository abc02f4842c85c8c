use anyhow::anyhow;
use teval_core::AppError;
use teval_db::Store;
use teval_models::{NewTeacher, Teacher, TeacherDto, TeacherWithLevel};
use tracing::{info, instrument};

use crate::utils::store_errors::reference_error;

const UNKNOWN_LEVEL: &str = "Level does not exist";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(store))]
    pub async fn get_teachers(store: &Store) -> Result<Vec<TeacherWithLevel>, AppError> {
        let teachers = store
            .teachers
            .list_with_level()
            .await
            .map_err(AppError::database)?;
        Ok(teachers)
    }

    #[instrument(skip(store))]
    pub async fn get_teacher(store: &Store, id: i32) -> Result<TeacherWithLevel, AppError> {
        store
            .teachers
            .find_with_level(id)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))
    }

    #[instrument(skip(store))]
    pub async fn create_teacher(
        store: &Store,
        dto: TeacherDto,
    ) -> Result<TeacherWithLevel, AppError> {
        let teacher = store
            .teachers
            .insert(NewTeacher {
                full_name: dto.full_name,
                level_id: dto.level_id,
            })
            .await
            .map_err(|e| reference_error(e, UNKNOWN_LEVEL))?;

        info!(teacher_id = teacher.teacher_id, "Teacher created");
        Self::get_teacher(store, teacher.teacher_id).await
    }

    #[instrument(skip(store))]
    pub async fn update_teacher(
        store: &Store,
        id: i32,
        dto: TeacherDto,
    ) -> Result<TeacherWithLevel, AppError> {
        if dto.teacher_id != id {
            return Err(AppError::bad_request(anyhow!("Teacher ID mismatch")));
        }

        let updated = store
            .teachers
            .update(&Teacher {
                teacher_id: id,
                full_name: dto.full_name,
                level_id: dto.level_id,
            })
            .await
            .map_err(|e| reference_error(e, UNKNOWN_LEVEL))?;
        if !updated {
            return Err(AppError::not_found(anyhow!("Teacher not found")));
        }

        Self::get_teacher(store, id).await
    }

    #[instrument(skip(store))]
    pub async fn delete_teacher(store: &Store, id: i32) -> Result<(), AppError> {
        let deleted = store.teachers.delete(id).await.map_err(|e| {
            reference_error(
                e,
                "Cannot delete teacher. Teacher may have subjects, enrollments or evaluations.",
            )
        })?;
        if !deleted {
            return Err(AppError::not_found(anyhow!("Teacher not found")));
        }
        Ok(())
    }
}
