//! Server configuration.
//!
//! Defaults are suitable for a container: listen on every interface, port
//! 5000. An optional JSON file (named by `PLANEACION_CONFIG`) overrides the
//! defaults, and the `PORT`, `HOST` and `PLANEACION_LOG_DIR` environment
//! variables override the file.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

pub const CONFIG_ENV: &str = "PLANEACION_CONFIG";
pub const PORT_ENV: &str = "PORT";
pub const HOST_ENV: &str = "HOST";
pub const LOG_DIR_ENV: &str = "PLANEACION_LOG_DIR";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Directory for daily-rotated log files. Console only when unset.
    pub log_dir: Option<PathBuf>,
    /// Upper bound on accepted request bodies.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            log_filter: "info,planeacion_server=debug,tower_http=debug".into(),
            log_dir: None,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        let base = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load_or_default(Path::new(&path)),
            _ => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `PORT` / `HOST` / `PLANEACION_LOG_DIR` overrides read through
    /// `lookup`. Unparseable values are ignored with a warning.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(PORT_ENV) {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(e) => warn!("Ignoring invalid {PORT_ENV}={raw:?}: {e}"),
            }
        }
        if let Some(raw) = lookup(HOST_ENV) {
            match raw.trim().parse::<IpAddr>() {
                Ok(host) => self.host = host,
                Err(e) => warn!("Ignoring invalid {HOST_ENV}={raw:?}: {e}"),
            }
        }
        if let Some(dir) = lookup(LOG_DIR_ENV).filter(|d| !d.is_empty()) {
            self.log_dir = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Load config from a JSON file, or return defaults if the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str::<ServerConfig>(&data) {
                    Ok(config) => return config,
                    Err(e) => warn!("Corrupt config file, using defaults: {e}"),
                },
                Err(e) => warn!("Cannot read config file, using defaults: {e}"),
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:5000");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_port_override() {
        let config = ServerConfig::default().with_overrides(env(&[("PORT", "8080")]));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_keeps_default() {
        let config = ServerConfig::default().with_overrides(env(&[("PORT", "not-a-port")]));
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_host_and_log_dir_override() {
        let config = ServerConfig::default().with_overrides(env(&[
            ("HOST", "127.0.0.1"),
            ("PLANEACION_LOG_DIR", "/var/log/planeacion"),
        ]));
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/planeacion")));
    }

    #[test]
    fn test_partial_file_uses_defaults_for_the_rest() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"port": 7000, "log_filter": "warn"}"#).unwrap();

        let loaded = ServerConfig::load_or_default(&path);
        assert_eq!(loaded.port, 7000);
        assert_eq!(loaded.log_filter, "warn");
    }

    #[test]
    fn test_corrupt_or_missing_file_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.json");
        assert_eq!(ServerConfig::load_or_default(&missing).port, 5000);

        let corrupt = tmp.path().join("corrupt.json");
        std::fs::write(&corrupt, "{not json").unwrap();
        assert_eq!(ServerConfig::load_or_default(&corrupt).port, 5000);
    }
}
