//! # Teval Config
//!
//! Configuration types for the Teval API, loaded from environment variables:
//!
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`cors`]: Allowed CORS origins
//! - [`server`]: Listen address, storage backend, and startup migrations
//!
//! # Example
//!
//! ```ignore
//! use teval_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::{ServerConfig, StorageBackend};
