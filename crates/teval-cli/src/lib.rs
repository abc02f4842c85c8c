//! # Teval CLI
//!
//! Administrative helpers behind the `teval-cli` binary: creating admin
//! accounts and seeding development data. Both work through the repository
//! layer, so they run against PostgreSQL or the in-memory store alike.
//!
//! ```ignore
//! use teval_cli::seeder::{seed_all, SeedConfig};
//!
//! let store = Store::postgres(pool);
//! seed_all(&store, &SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;

pub use admin::create_admin;
