//! # Configuration
//!
//! Process configuration loaded once at start-up from environment variables.
//!
//! Every setting has a default; invalid values fall back to the default.
//! The reconciler, request builders and Better Stack client never read the
//! environment themselves; they receive what they need from here.

mod controller;
mod server;

pub use controller::ControllerConfig;
pub use server::ServerConfig;

/// Load configuration from environment variables with defaults
pub fn load_config() -> (ControllerConfig, ServerConfig) {
    (ControllerConfig::from_env(), ServerConfig::from_env())
}

/// Read environment variable or return default value
pub(crate) fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read an optional environment variable; unset, blank or unparsable is `None`
pub(crate) fn env_var_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_or_default() {
        std::env::set_var("BSO_TEST_PORT_SET", " 9090 ");
        std::env::set_var("BSO_TEST_PORT_BAD", "ninety");
        assert_eq!(env_var_or_default("BSO_TEST_PORT_SET", 8080_u16), 9090);
        assert_eq!(env_var_or_default("BSO_TEST_PORT_BAD", 8080_u16), 8080);
        assert_eq!(env_var_or_default("BSO_TEST_PORT_UNSET", 8080_u16), 8080);
    }

    #[test]
    fn test_env_var_optional() {
        std::env::set_var("BSO_TEST_NAMESPACE", "monitoring");
        std::env::set_var("BSO_TEST_BLANK", "  ");
        assert_eq!(
            env_var_optional::<String>("BSO_TEST_NAMESPACE").as_deref(),
            Some("monitoring")
        );
        assert_eq!(env_var_optional::<String>("BSO_TEST_BLANK"), None);
        assert_eq!(env_var_optional::<u64>("BSO_TEST_OPTIONAL_UNSET"), None);
    }

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.error_retry_interval, std::time::Duration::from_secs(30));
        assert_eq!(config.resync_interval, None);
        assert_eq!(config.http_timeout, std::time::Duration::from_secs(30));
        assert_eq!(ServerConfig::default().metrics_port, 8080);
    }
}
