use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter {0:?}: {1}")]
    Filter(String, String),
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber described by `cfg`.
///
/// `RUST_LOG`, when set, wins over the configured level.
pub fn init_tracing(cfg: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.level)
            .map_err(|e| LoggingError::Filter(cfg.level.clone(), e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match cfg.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };
    installed.map_err(|e| LoggingError::Init(e.to_string()))
}
