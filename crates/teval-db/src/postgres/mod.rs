//! PostgreSQL implementations of the repository traits.
//!
//! Queries are built at runtime (`query_as::<_, T>`) so the workspace compiles
//! without a live database.

use sqlx::PgPool;

mod admins;
mod enrollments;
mod evaluations;
#[cfg(test)]
mod fixtures;
mod lookups;
mod students;
mod subjects;
mod teachers;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
