use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::digest;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("locate config dir: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("config io {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What the caller does with an artifact (or root check) whose state could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnreadablePolicy {
    /// Treat as untrusted.
    #[default]
    FailClosed,
    /// Report it, but do not fail the overall check.
    FailOpen,
}

/// An installed file and its known-good digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Absolute path, or a name resolved against `library_dir`.
    pub file_name: String,
    /// Hex SHA-256 (64 digits, either case).
    pub expected_sha256: String,
}

/// External root-detection program (prints `true` or `false`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Global configuration loaded from `~/.config/libguard/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Directory holding installed native libraries.
    #[serde(default)]
    pub library_dir: Option<PathBuf>,
    /// Read chunk size for hashing.
    #[serde(default = "default_read_buffer_bytes")]
    pub read_buffer_bytes: usize,
    #[serde(default)]
    pub on_unreadable: UnreadablePolicy,
    #[serde(default)]
    pub artifacts: Vec<ArtifactConfig>,
    #[serde(default)]
    pub root_detector: Option<DetectorConfig>,
}

fn default_read_buffer_bytes() -> usize {
    digest::BUF_SIZE
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            library_dir: None,
            read_buffer_bytes: default_read_buffer_bytes(),
            on_unreadable: UnreadablePolicy::default(),
            artifacts: Vec::new(),
            root_detector: None,
        }
    }
}

impl GuardConfig {
    /// Full path of an artifact: absolute names are used as-is, others join `library_dir`.
    pub fn artifact_path(&self, artifact: &ArtifactConfig) -> Option<PathBuf> {
        let name = Path::new(&artifact.file_name);
        if name.is_absolute() {
            return Some(name.to_path_buf());
        }
        self.library_dir.as_ref().map(|dir| dir.join(name))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_buffer_bytes == 0 || self.read_buffer_bytes > digest::MAX_BUF_SIZE {
            return Err(ConfigError::Invalid(format!(
                "read_buffer_bytes must be between 1 and {}",
                digest::MAX_BUF_SIZE
            )));
        }
        for a in &self.artifacts {
            if a.file_name.trim().is_empty() {
                return Err(ConfigError::Invalid("artifact file_name is empty".to_string()));
            }
            if !digest::is_sha256_hex(a.expected_sha256.trim()) {
                return Err(ConfigError::Invalid(format!(
                    "artifact {}: expected_sha256 must be 64 hex digits",
                    a.file_name
                )));
            }
            if self.artifact_path(a).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "artifact {} is relative but library_dir is not set",
                    a.file_name
                )));
            }
        }
        if let Some(d) = &self.root_detector {
            if d.program.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "root_detector.program is empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("libguard")?;
    xdg_dirs
        .place_config_file("config.toml")
        .map_err(|source| ConfigError::Io {
            path: xdg_dirs.get_config_home().join("config.toml"),
            source,
        })
}

/// Load and validate configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<GuardConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: GuardConfig = toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GuardConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GuardConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, toml).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
