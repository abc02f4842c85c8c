use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console-only logging, used when observability is compiled out or switched off.
///
/// `RUST_LOG` wins when set. Otherwise the workspace crates log at `LOG_LEVEL`
/// (default `info`) and noisy dependencies at `warn`.
pub fn init_basic_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();

    eprintln!(
        "Observability disabled - console logging only (OBSERVABILITY_ENABLED=false or feature not compiled)"
    );
}

pub(crate) fn default_directives(log_level: &str) -> String {
    format!(
        "teval={log_level},teval_db={log_level},teval_auth={log_level},teval_core={log_level},\
         tower_http=warn,hyper=warn,tonic=warn,h2=warn,sqlx=warn"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        let directives = default_directives("debug");
        assert!(directives.starts_with("teval=debug"));
        assert!(directives.contains("sqlx=warn"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
