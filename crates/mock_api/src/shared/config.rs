use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: "/api".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FixturesConfig {
    /// Empty means the fixtures compiled into the binary
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub interval_ms: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: 3000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StaticFilesConfig {
    pub dir: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: "dist".to_string(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 8085

[api]
prefix = "/api"

[fixtures]
path = ""

[telemetry]
enabled = true
interval_ms = 3000

[static_files]
dir = "dist"
"#;

impl Config {
    /// Router prefix without the trailing slash; empty for the root.
    pub fn api_prefix(&self) -> String {
        let trimmed = self.api.prefix.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn fixtures_path(&self) -> Option<PathBuf> {
        let raw = self.fixtures.path.trim();
        if raw.is_empty() {
            None
        } else {
            Some(resolve_path(raw))
        }
    }

    pub fn static_dir(&self) -> PathBuf {
        resolve_path(&self.static_files.dir)
    }
}

pub fn default_config() -> anyhow::Result<Config> {
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    default_config()
}

/// Relative paths resolve against the executable directory.
fn resolve_path(raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = default_config().unwrap();
        assert_eq!(config.server.port, 8085);
        assert_eq!(config.api_prefix(), "/api");
        assert!(config.telemetry.enabled);
        assert!(config.fixtures_path().is_none());
    }

    #[test]
    fn test_sections_are_optional_and_prefix_is_normalized() {
        let config: Config = toml::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 9000

[api]
prefix = "v1/"
"#,
        )
        .unwrap();
        assert_eq!(config.api_prefix(), "/v1");
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.telemetry.interval_ms, 3000);
        assert_eq!(config.static_files.dir, "dist");

        let mut root = config.clone();
        root.api.prefix = "/".to_string();
        assert_eq!(root.api_prefix(), "");
    }
}
