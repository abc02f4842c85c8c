//! Translation of data-store failures into API errors.

use anyhow::anyhow;
use teval_core::AppError;
use teval_db::RepositoryError;
use tracing::debug;

/// Reports a foreign-key failure (unknown reference, or a delete blocked by
/// dependent rows) as 400 with `message`. Other failures become 500.
pub fn reference_error(err: RepositoryError, message: &str) -> AppError {
    match err {
        RepositoryError::ForeignKeyViolation(constraint) => {
            debug!(%constraint, "Foreign key constraint rejected the write");
            AppError::bad_request(anyhow!(message.to_string()))
        }
        other => AppError::database(other),
    }
}

/// Like [`reference_error`], additionally reporting a unique-key failure as 400
/// with `duplicate_message`.
pub fn write_error(
    err: RepositoryError,
    duplicate_message: &str,
    reference_message: &str,
) -> AppError {
    match err {
        RepositoryError::UniqueViolation(constraint) => {
            debug!(%constraint, "Unique constraint rejected the write");
            AppError::bad_request(anyhow!(duplicate_message.to_string()))
        }
        other => reference_error(other, reference_message),
    }
}
