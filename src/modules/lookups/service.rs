use anyhow::anyhow;
use teval_core::AppError;
use teval_db::{RepositoryError, Store};
use teval_models::{CreateLevelDto, CreateSectionDto, Level, RoleRecord, Section};
use tracing::instrument;

fn duplicate_or_database(err: RepositoryError, message: &str) -> AppError {
    match err {
        RepositoryError::UniqueViolation(_) => AppError::bad_request(anyhow!(message.to_string())),
        other => AppError::database(other),
    }
}

fn required_name<'a>(name: &'a str, message: &str) -> Result<&'a str, AppError> {
    match name.trim() {
        "" => Err(AppError::bad_request(anyhow!(message.to_string()))),
        trimmed => Ok(trimmed),
    }
}

pub struct LookupService;

impl LookupService {
    #[instrument(skip(store))]
    pub async fn get_levels(store: &Store) -> Result<Vec<Level>, AppError> {
        store.lookups.levels().await.map_err(AppError::database)
    }

    #[instrument(skip(store))]
    pub async fn create_level(store: &Store, dto: CreateLevelDto) -> Result<Level, AppError> {
        let name = required_name(&dto.level_name, "Level name is required")?;
        store
            .lookups
            .insert_level(name)
            .await
            .map_err(|e| duplicate_or_database(e, "Level already exists"))
    }

    #[instrument(skip(store))]
    pub async fn get_sections(store: &Store) -> Result<Vec<Section>, AppError> {
        store.lookups.sections().await.map_err(AppError::database)
    }

    #[instrument(skip(store))]
    pub async fn create_section(store: &Store, dto: CreateSectionDto) -> Result<Section, AppError> {
        let name = required_name(&dto.section_name, "Section name is required")?;
        store
            .lookups
            .insert_section(name)
            .await
            .map_err(|e| duplicate_or_database(e, "Section already exists"))
    }

    #[instrument(skip(store))]
    pub async fn get_roles(store: &Store) -> Result<Vec<RoleRecord>, AppError> {
        store.lookups.roles().await.map_err(AppError::database)
    }
}
