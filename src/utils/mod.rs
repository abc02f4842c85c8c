//! Shared helpers for the feature services.

pub mod store_errors;
