use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub database_path: String,
    pub api_timeout_ms: u64,
    pub db_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: "127.0.0.1:8080".to_string(),
            database_path: "bids.db".to_string(),
            api_timeout_ms: 200,
            db_timeout_ms: 10,
        }
    }
}

impl ServerConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_millis(self.db_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AwesomeApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub awesome_api: Option<AwesomeApiConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            awesome_api: Some(AwesomeApiConfig {
                base_url: "https://economia.awesomeapi.com.br".to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub server_url: String,
    pub output_path: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: "http://localhost:8080".to_string(),
            output_path: "cotacao.txt".to_string(),
            timeout_ms: 300,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.as_path().display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("br", "cotacao", "cotacao")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn awesome_api_base_url(&self) -> &str {
        self.providers
            .awesome_api
            .as_ref()
            .map_or("https://economia.awesomeapi.com.br", |p| &p.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
server:
  address: "0.0.0.0:9090"
  database_path: "/tmp/bids.db"
  api_timeout_ms: 500
  db_timeout_ms: 25
providers:
  awesome_api:
    base_url: "http://example.com/awesome"
client:
  server_url: "http://example.com:9090"
  output_path: "/tmp/cotacao.txt"
  timeout_ms: 1000
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.server.address, "0.0.0.0:9090");
        assert_eq!(config.server.database_path, "/tmp/bids.db");
        assert_eq!(config.server.api_timeout(), Duration::from_millis(500));
        assert_eq!(config.server.db_timeout(), Duration::from_millis(25));
        assert_eq!(config.awesome_api_base_url(), "http://example.com/awesome");
        assert_eq!(config.client.server_url, "http://example.com:9090");
        assert_eq!(config.client.output_path, "/tmp/cotacao.txt");
        assert_eq!(config.client.timeout(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
server:
  db_timeout_ms: 50
client:
  output_path: "out.txt"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.server.address, "127.0.0.1:8080");
        assert_eq!(config.server.database_path, "bids.db");
        assert_eq!(config.server.api_timeout(), Duration::from_millis(200));
        assert_eq!(config.server.db_timeout(), Duration::from_millis(50));
        assert_eq!(
            config.awesome_api_base_url(),
            "https://economia.awesomeapi.com.br"
        );
        assert_eq!(config.client.server_url, "http://localhost:8080");
        assert_eq!(config.client.output_path, "out.txt");
        assert_eq!(config.client.timeout(), Duration::from_millis(300));
    }

    #[test]
    fn test_default_deadlines() {
        let config = AppConfig::default();
        assert_eq!(config.server.api_timeout(), Duration::from_millis(200));
        assert_eq!(config.server.db_timeout(), Duration::from_millis(10));
        assert_eq!(config.client.timeout(), Duration::from_millis(300));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
