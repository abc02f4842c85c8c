//! # Teval DB
//!
//! The data-store gateway for the Teval API.
//!
//! Each aggregate has a repository trait in [`repository`]. Two backends
//! implement all of them:
//!
//! - [`postgres::PgStore`]: PostgreSQL through SQLx
//! - [`memory::MemoryStore`]: a volatile in-process store with the same
//!   constraint behaviour (unique keys, restrict-on-delete foreign keys)
//!
//! Handlers work against a [`Store`], which bundles one handle per repository.
//!
//! # Example
//!
//! ```ignore
//! use teval_db::{Store, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await;
//! run_migrations(&pool).await?;
//! let store = Store::postgres(pool);
//!
//! let student = store.students.find(42).await?;
//! ```

use std::env;
use std::sync::Arc;

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::MemoryStore;
#[cfg(feature = "test-utils")]
pub use memory::UpdateConflict;
pub use postgres::PgStore;
pub use repository::{
    AdminRepository, EnrollmentRepository, EvaluationRepository, LookupRepository,
    StudentRepository, SubjectRepository, TeacherRepository,
};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the database is unreachable.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}

/// Applies the embedded migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// One handle per repository.
///
/// Cloning is cheap; a clone is taken for every request and dropped when the
/// request finishes.
#[derive(Clone)]
pub struct Store {
    pub students: Arc<dyn StudentRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub subjects: Arc<dyn SubjectRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub evaluations: Arc<dyn EvaluationRepository>,
    pub lookups: Arc<dyn LookupRepository>,
    pub admins: Arc<dyn AdminRepository>,
}

impl Store {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_backend(Arc::new(PgStore::new(pool)))
    }

    pub fn memory(store: MemoryStore) -> Self {
        Self::from_backend(Arc::new(store))
    }

    fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: StudentRepository
            + TeacherRepository
            + SubjectRepository
            + EnrollmentRepository
            + EvaluationRepository
            + LookupRepository
            + AdminRepository
            + 'static,
    {
        Self {
            students: backend.clone(),
            teachers: backend.clone(),
            subjects: backend.clone(),
            enrollments: backend.clone(),
            evaluations: backend.clone(),
            lookups: backend.clone(),
            admins: backend,
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
