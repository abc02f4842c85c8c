//! # Teval Observability
//!
//! Logging, distributed tracing, and Prometheus metrics for the Teval API.
//!
//! Everything heavier than console logging sits behind the `observability`
//! feature (on by default). At runtime, `OBSERVABILITY_ENABLED=false` turns the
//! exporters, the request middleware, and the business counters into no-ops
//! while keeping console logging.
//!
//! # Example
//!
//! ```no_run
//! use teval_observability::{init_logging, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() {
//!     init_logging();
//!     // ... serve ...
//!     shutdown_tracer().await;
//! }
//! ```

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    PrometheusHandle, init_metrics, is_observability_enabled, metrics_app, metrics_middleware,
    track_enrollments_created, track_evaluation_submitted, track_login_failure,
    track_login_success, track_student_created,
};

/// Installs the global subscriber: the full stack when observability is
/// compiled in and enabled, console output otherwise.
pub fn init_logging() {
    if is_observability_enabled() {
        init_tracing();
    } else {
        init_basic_console_logging();
    }
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub fn init_tracing() {}

    pub async fn shutdown_tracer() {}

    /// Stand-in for the Prometheus handle; never constructed.
    #[derive(Clone, Debug)]
    pub enum PrometheusHandle {}

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn metrics_app(handle: PrometheusHandle) -> Router {
        match handle {}
    }

    pub fn track_student_created() {}
    pub fn track_enrollments_created(_count: usize) {}
    pub fn track_evaluation_submitted() {}
    pub fn track_login_success(_role: &str) {}
    pub fn track_login_failure(_reason: &str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
