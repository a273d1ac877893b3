//! Runtime configuration for the host.

/// Default number of image documents the panel is bound to.
const DEFAULT_DOCUMENTS: usize = 1;
/// Default tracing filter.
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration, read from `SPOTGRADE_*` environment variables.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Number of documents to open.
    pub documents: usize,
    /// Start in batch mode (every document bound).
    pub batch_mode: bool,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            documents: std::env::var("SPOTGRADE_DOCUMENTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_DOCUMENTS),
            batch_mode: std::env::var("SPOTGRADE_BATCH").is_ok(),
            log_filter: std::env::var("SPOTGRADE_LOG")
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
