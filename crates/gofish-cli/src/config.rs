use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_SAVE_PATH: &str = "gofish.txt";

/// Terminal host configuration loaded from YAML. Every field is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CliConfig {
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Step through the opponent's states without waiting for input.
    #[serde(default = "default_autoplay")]
    pub autoplay_opponent: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            seed: None,
            logging: LoggingConfig::default(),
            autoplay_opponent: default_autoplay(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: CliConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.save_path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "save_path".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!("unknown level '{}'", self.logging.level),
            });
        }
        if let Some(path) = &self.logging.json_path {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "logging.json_path".to_string(),
                    message: "path must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn default_save_path() -> PathBuf {
    PathBuf::from(DEFAULT_SAVE_PATH)
}

fn default_autoplay() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub level: String,
    /// When set, events go to this file as JSON lines instead of stderr.
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_tracing_level(),
            json_path: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.level.trim().is_empty() {
            self.level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: CliConfig = serde_yaml::from_str("{}").expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg, CliConfig::default());
        assert_eq!(cfg.save_path, PathBuf::from("gofish.txt"));
        assert!(cfg.autoplay_opponent);
        assert_eq!(cfg.logging.level(), Some(Level::INFO));
    }

    #[test]
    fn loads_full_config() {
        let yaml = r#"
save_path: "saves/table.txt"
seed: 42
autoplay_opponent: false
logging:
  level: "DEBUG"
  json_path: "logs/gofish.jsonl"
"#;
        let mut cfg: CliConfig = serde_yaml::from_str(yaml).expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg.seed, Some(42));
        assert!(!cfg.autoplay_opponent);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(
            cfg.logging.json_path,
            Some(PathBuf::from("logs/gofish.jsonl"))
        );
    }

    #[test]
    fn rejects_unknown_level() {
        let mut cfg: CliConfig =
            serde_yaml::from_str("logging:\n  level: loud\n").expect("parse yaml");
        let err = cfg.validate().expect_err("should fail");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "logging.level"
        ));
    }

    #[test]
    fn blank_level_falls_back_to_info() {
        let mut cfg: CliConfig =
            serde_yaml::from_str("logging:\n  level: \"  \"\n").expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn from_path_reports_the_failing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.yaml");
        let err = CliConfig::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), missing.as_path());

        let broken = dir.path().join("broken.yaml");
        let mut file = File::create(&broken).expect("create");
        writeln!(file, "seed: [not, a, number]").expect("write");
        let err = CliConfig::from_path(&broken).expect_err("bad yaml");
        assert!(matches!(err, ConfigError::Parse { .. }));

        let good = dir.path().join("good.yaml");
        std::fs::write(&good, "seed: 7\n").expect("write");
        let cfg = CliConfig::from_path(&good).expect("loads");
        assert_eq!(cfg.seed, Some(7));
    }
}
