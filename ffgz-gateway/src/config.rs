//! Gateway configuration, read from the environment.

use std::path::PathBuf;

/// Environment variable holding the listen address.
pub const LISTEN_ADDR_VAR: &str = "FFGZ_LISTEN_ADDR";
/// Environment variable holding the database file path.
pub const DB_PATH_VAR: &str = "FFGZ_DB_PATH";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DB_PATH: &str = "ffgz.db";

/// Runtime settings for the gateway binary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Socket address to bind, e.g. `127.0.0.1:5000`.
    pub listen_addr: String,
    /// SQLite database file.
    pub db_path: PathBuf,
}

impl GatewayConfig {
    /// Read settings from the process environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Unset or blank values use defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            listen_addr: read(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned()),
            db_path: read(DB_PATH_VAR).map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr, "127.0.0.1:5000");
        assert_eq!(config.db_path, PathBuf::from("ffgz.db"));
    }

    #[test]
    fn lookup_values_override_defaults() {
        let config = GatewayConfig::from_lookup(|key| match key {
            LISTEN_ADDR_VAR => Some("0.0.0.0:8080".to_owned()),
            DB_PATH_VAR => Some("/var/lib/ffgz/records.db".to_owned()),
            _ => None,
        });
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.db_path, PathBuf::from("/var/lib/ffgz/records.db"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = GatewayConfig::from_lookup(|_| Some("  ".to_owned()));
        assert_eq!(config, GatewayConfig::default());
    }
}
