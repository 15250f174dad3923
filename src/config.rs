use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, YieldError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub artifact_dir: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
    pub encoders_file: String,
}

impl Config {
    /// Snapshot the configuration from the process environment.
    pub fn from_env() -> Self {
        fn env_or(key: &str, default: &str) -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        }

        Self {
            listen_addr: env_or("LISTEN_ADDR", "0.0.0.0:8000"),
            artifact_dir: PathBuf::from(env_or("ARTIFACT_DIR", ".")),
            model_file: env_or("MODEL_FILE", "best_model.json"),
            scaler_file: env_or("SCALER_FILE", "scaler.json"),
            encoders_file: env_or("ENCODERS_FILE", "label_encoders.json"),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr.parse().map_err(|e| {
            YieldError::config(format!("invalid LISTEN_ADDR '{}': {}", self.listen_addr, e))
        })
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.scaler_file)
    }

    pub fn encoders_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.encoders_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> Config {
        Config {
            listen_addr: "127.0.0.1:9000".to_string(),
            artifact_dir: PathBuf::from("/srv/artifacts"),
            model_file: "best_model.json".to_string(),
            scaler_file: "scaler.json".to_string(),
            encoders_file: "label_encoders.json".to_string(),
        }
    }

    #[test]
    fn test_artifact_paths_join_dir() {
        let config = fixed();
        assert_eq!(
            config.model_path(),
            PathBuf::from("/srv/artifacts/best_model.json")
        );
        assert_eq!(config.scaler_path(), PathBuf::from("/srv/artifacts/scaler.json"));
        assert_eq!(
            config.encoders_path(),
            PathBuf::from("/srv/artifacts/label_encoders.json")
        );
    }

    #[test]
    fn test_socket_addr_parses() {
        let addr = fixed().socket_addr().unwrap();
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn test_invalid_listen_addr_is_config_error() {
        let mut config = fixed();
        config.listen_addr = "not-an-address".to_string();
        let err = config.socket_addr().unwrap_err();
        assert!(matches!(err, YieldError::Config(_)));
        assert!(err.to_string().contains("not-an-address"));
    }
}
