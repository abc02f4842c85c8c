use async_trait::async_trait;
use teval_models::{AdminAccount, NewAdmin};
use tracing::instrument;

use super::PgStore;
use crate::error::RepositoryResult;
use crate::repository::AdminRepository;

#[async_trait]
impl AdminRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<AdminAccount>> {
        let admin = sqlx::query_as::<_, AdminAccount>(
            r#"SELECT a.admin_id, a.full_name, a.email, a.password, a.role_id, r.name AS role_name
               FROM admins a
               JOIN roles r ON r.role_id = a.role_id
               WHERE LOWER(a.email) = LOWER($1)"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    #[instrument(skip(self, admin), fields(email = %admin.email))]
    async fn insert(&self, admin: NewAdmin) -> RepositoryResult<AdminAccount> {
        let inserted = sqlx::query_as::<_, AdminAccount>(
            r#"WITH inserted AS (
                   INSERT INTO admins (full_name, email, password, role_id)
                   VALUES ($1, $2, $3, $4)
                   RETURNING admin_id, full_name, email, password, role_id
               )
               SELECT i.admin_id, i.full_name, i.email, i.password, i.role_id, r.name AS role_name
               FROM inserted i
               JOIN roles r ON r.role_id = i.role_id"#,
        )
        .bind(&admin.full_name)
        .bind(&admin.email)
        .bind(&admin.password)
        .bind(admin.role_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }
}
