//! Startup configuration types.

use std::path::PathBuf;

use crate::debug::DEFAULT_DASHBOARD_PORT;

/// Default catalog API origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4300";

/// Default number of retained network log entries.
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// Configuration for startup.
///
/// Use the builder pattern to customize startup behavior.
///
/// # Example
///
/// ```ignore
/// use toolcat::startup::StartupConfig;
///
/// let config = StartupConfig::default()
///     .with_debug(true)
///     .with_dashboard_port(4040);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Catalog API origin that relative request targets resolve against
    pub base_url: String,
    /// Launch-time debug switch (request tagging on regardless of stored preference)
    pub debug: bool,
    /// Serve the browser dashboard
    pub enable_dashboard: bool,
    /// Dashboard port (default: 3031)
    pub dashboard_port: u16,
    /// Maximum retained log entries, 0 for unbounded
    pub log_capacity: usize,
    /// Where exported logs are written (default: current directory)
    pub export_dir: PathBuf,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debug: false,
            enable_dashboard: true,
            dashboard_port: DEFAULT_DASHBOARD_PORT,
            log_capacity: DEFAULT_LOG_CAPACITY,
            export_dir: PathBuf::from("."),
        }
    }
}

impl StartupConfig {
    /// Create a new StartupConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_enable_dashboard(mut self, enable: bool) -> Self {
        self.enable_dashboard = enable;
        self
    }

    pub fn with_dashboard_port(mut self, port: u16) -> Self {
        self.dashboard_port = port;
        self
    }

    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Create config from `TOOLCAT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup. Unparseable values
    /// keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("TOOLCAT_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        if let Some(flag) = lookup("TOOLCAT_DEBUG") {
            config.debug = flag == "1";
        }
        if let Some(port) = lookup("TOOLCAT_DASHBOARD_PORT") {
            match port.parse() {
                Ok(port) => config.dashboard_port = port,
                Err(_) => tracing::warn!("Ignoring invalid TOOLCAT_DASHBOARD_PORT: {}", port),
            }
        }
        if let Some(capacity) = lookup("TOOLCAT_LOG_CAPACITY") {
            match capacity.parse() {
                Ok(capacity) => config.log_capacity = capacity,
                Err(_) => tracing::warn!("Ignoring invalid TOOLCAT_LOG_CAPACITY: {}", capacity),
            }
        }
        if let Some(dir) = lookup("TOOLCAT_EXPORT_DIR").filter(|v| !v.trim().is_empty()) {
            config.export_dir = PathBuf::from(dir);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.base_url, "http://localhost:4300");
        assert!(!config.debug);
        assert!(config.enable_dashboard);
        assert_eq!(config.dashboard_port, 3031);
        assert_eq!(config.log_capacity, 1000);
    }

    #[test]
    fn test_startup_config_builder() {
        let config = StartupConfig::new()
            .with_base_url("http://catalog:8080")
            .with_debug(true)
            .with_enable_dashboard(false)
            .with_dashboard_port(4040)
            .with_log_capacity(50)
            .with_export_dir("/tmp/logs");

        assert_eq!(config.base_url, "http://catalog:8080");
        assert!(config.debug);
        assert!(!config.enable_dashboard);
        assert_eq!(config.dashboard_port, 4040);
        assert_eq!(config.log_capacity, 50);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/logs"));
    }

    #[test]
    fn test_from_lookup() {
        let config = StartupConfig::from_lookup(lookup(&[
            ("TOOLCAT_BASE_URL", "http://api:9000"),
            ("TOOLCAT_DEBUG", "1"),
            ("TOOLCAT_DASHBOARD_PORT", "5050"),
            ("TOOLCAT_LOG_CAPACITY", "0"),
        ]));
        assert_eq!(config.base_url, "http://api:9000");
        assert!(config.debug);
        assert_eq!(config.dashboard_port, 5050);
        assert_eq!(config.log_capacity, 0);
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let config = StartupConfig::from_lookup(lookup(&[
            ("TOOLCAT_DEBUG", "true"),
            ("TOOLCAT_DASHBOARD_PORT", "not-a-port"),
            ("TOOLCAT_BASE_URL", "  "),
        ]));
        assert_eq!(config, StartupConfig::default());
    }
}
