//! Runtime settings for `draft-check`, loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_LOG_FILTER: &str = "info";

/// Logging settings read from `SPORTSYNC_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SPORTSYNC")]
pub struct Settings {
    /// Emit log lines as JSON instead of plain text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
    /// Tracing filter directive, for example `debug` or
    /// `sportsync_validation=debug`.
    pub log_filter: Option<String>,
}

impl Settings {
    /// Return the configured filter, falling back to `info`.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
