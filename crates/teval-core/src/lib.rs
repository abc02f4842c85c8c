//! # Teval Core
//!
//! Core types, errors, and utilities for the Teval API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{ success, message, data }` envelope every endpoint returns
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use teval_core::{AppError, ApiResponse, hash_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Student not found"));
//! let body = ApiResponse::with_message("Student loaded successfully", student);
//! let hash = hash_password("secure_password")?;
//! ```

pub mod errors;
pub mod password;
pub mod response;

pub use errors::AppError;
pub use password::{MAX_PASSWORD_BYTES, hash_password, verify_password};
pub use response::{ApiResponse, ErrorResponse, MessageResponse};
