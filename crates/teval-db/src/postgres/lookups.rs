use async_trait::async_trait;
use teval_models::{Level, RoleRecord, Section};
use tracing::instrument;

use super::PgStore;
use crate::error::RepositoryResult;
use crate::repository::LookupRepository;

#[async_trait]
impl LookupRepository for PgStore {
    #[instrument(skip(self))]
    async fn levels(&self) -> RepositoryResult<Vec<Level>> {
        let levels = sqlx::query_as::<_, Level>(
            "SELECT level_id, level_name FROM levels ORDER BY level_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(levels)
    }

    #[instrument(skip(self))]
    async fn find_level(&self, level_id: i32) -> RepositoryResult<Option<Level>> {
        let level = sqlx::query_as::<_, Level>(
            "SELECT level_id, level_name FROM levels WHERE level_id = $1",
        )
        .bind(level_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(level)
    }

    #[instrument(skip(self))]
    async fn insert_level(&self, level_name: &str) -> RepositoryResult<Level> {
        let level = sqlx::query_as::<_, Level>(
            "INSERT INTO levels (level_name) VALUES ($1) RETURNING level_id, level_name",
        )
        .bind(level_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(level)
    }

    #[instrument(skip(self))]
    async fn sections(&self) -> RepositoryResult<Vec<Section>> {
        let sections = sqlx::query_as::<_, Section>(
            "SELECT section_id, section_name FROM sections ORDER BY section_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(sections)
    }

    #[instrument(skip(self))]
    async fn insert_section(&self, section_name: &str) -> RepositoryResult<Section> {
        let section = sqlx::query_as::<_, Section>(
            "INSERT INTO sections (section_name) VALUES ($1) RETURNING section_id, section_name",
        )
        .bind(section_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(section)
    }

    #[instrument(skip(self))]
    async fn roles(&self) -> RepositoryResult<Vec<RoleRecord>> {
        let roles = sqlx::query_as::<_, RoleRecord>(
            "SELECT role_id, name FROM roles ORDER BY role_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }
}
