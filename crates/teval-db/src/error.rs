use thiserror::Error;

/// Failure signals from the data store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// An update wrote no rows: the record changed or vanished after it was read.
    #[error("the record was modified or deleted by another request")]
    ConcurrencyConflict,

    #[error(transparent)]
    Database(sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            if db_err.is_unique_violation() {
                return RepositoryError::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return RepositoryError::ForeignKeyViolation(constraint);
            }
        }
        RepositoryError::Database(err)
    }
}
