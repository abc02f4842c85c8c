use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// bcrypt ignores everything past this many bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes with bcrypt. Passwords longer than [`MAX_PASSWORD_BYTES`] are
/// rejected with 400 instead of being silently truncated.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }

    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}
