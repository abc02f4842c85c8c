//! Extractors and middleware for authentication and authorization.
//!
//! - [`auth`]: `AuthUser` (rejects without a valid bearer token) and
//!   `Identity` (never rejects; anonymous callers are a value, not an error)
//! - [`role`]: the `require_admin` route layer and role extractors
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::RequireStudent;
//!
//! async fn submit(RequireStudent(auth_user): RequireStudent) -> impl IntoResponse {
//!     let student_id = auth_user.subject_id()?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod role;
