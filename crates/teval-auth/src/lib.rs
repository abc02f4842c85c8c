//! # Teval Auth
//!
//! Authentication types and JWT utilities for the Teval API.
//!
//! - [`claims`]: Access token claim structure
//! - [`jwt`]: Token creation and verification
//! - [`role`]: The closed set of roles the API dispatches on
//!
//! # Example
//!
//! ```ignore
//! use teval_auth::{Role, create_access_token, verify_token};
//! use teval_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(42, "student@gsc.edu", "Student", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role(), Role::Student);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use role::Role;
