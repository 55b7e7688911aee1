use crate::error::SkillCompassError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// SkillCompass application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Question corpus file (CSV)
    pub corpus_path: PathBuf,

    /// Name of the CSV column holding question text
    pub question_column: String,

    /// Number of neighbors returned when a request does not specify one
    pub default_top_k: usize,

    /// Upper bound applied to requested neighbor counts
    pub max_top_k: usize,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("./database/questions.csv"),
            question_column: "question".to_string(),
            default_top_k: 20,
            max_top_k: 100,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, SkillCompassError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let config = Self::from_lookup(|key| std::env::var(key).ok());

        // Ensure required directories exist
        config.ensure_directories()?;

        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            corpus_path: lookup("CORPUS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.corpus_path),
            question_column: lookup("QUESTION_COLUMN").unwrap_or(defaults.question_column),
            default_top_k: lookup("DEFAULT_TOP_K")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.default_top_k),
            max_top_k: lookup("MAX_TOP_K")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_top_k),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: lookup("SERVER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            log_dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), SkillCompassError> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir).map_err(|e| {
                SkillCompassError::config(format!(
                    "Failed to create directory {}: {}",
                    self.log_dir.display(),
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Clamp a requested neighbor count into `1..=max_top_k`, defaulting when absent
    pub fn resolve_top_k(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_top_k)
            .clamp(1, self.max_top_k.max(1))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SkillCompassError> {
        if self.question_column.trim().is_empty() {
            return Err(SkillCompassError::config("Question column name cannot be empty"));
        }

        if self.default_top_k == 0 {
            return Err(SkillCompassError::config("DEFAULT_TOP_K must be at least 1"));
        }

        if self.default_top_k > self.max_top_k {
            return Err(SkillCompassError::config(format!(
                "DEFAULT_TOP_K ({}) cannot exceed MAX_TOP_K ({})",
                self.default_top_k, self.max_top_k
            )));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(SkillCompassError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_top_k, 20);
        assert_eq!(config.question_column, "question");
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CORPUS_PATH", "/data/questions.csv"),
            ("DEFAULT_TOP_K", "5"),
            ("SERVER_PORT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.corpus_path, PathBuf::from("/data/questions.csv"));
        assert_eq!(config.default_top_k, 5);
        // Unparseable values fall back to defaults
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_resolve_top_k() {
        let config = AppConfig::default();
        assert_eq!(config.resolve_top_k(None), 20);
        assert_eq!(config.resolve_top_k(Some(3)), 3);
        assert_eq!(config.resolve_top_k(Some(0)), 1);
        assert_eq!(config.resolve_top_k(Some(10_000)), 100);
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid_config = AppConfig::default();
        invalid_config.question_column = String::new();
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = AppConfig::default();
        invalid_config.default_top_k = 500;
        assert!(invalid_config.validate().is_err());
    }
}
