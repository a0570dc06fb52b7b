use crate::core::error::{ChangesResult, ConfigError, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project-level settings for mvn-changes
/// Searched in order: mvn-changes.toml, .mvn-changes.toml, .config/mvn-changes.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangesConfig {
  /// File name that marks a directory as a module (default: "pom.xml")
  #[serde(default = "default_descriptor_file")]
  pub descriptor_file: String,

  /// Upper bound for every git invocation, in seconds (default: 300)
  #[serde(default = "default_command_timeout_secs")]
  pub command_timeout_secs: u64,

  /// `git log --format` placeholder used as a directory's last-modification marker (default: "%H")
  #[serde(default = "default_marker_format")]
  pub marker_format: String,
}

fn default_descriptor_file() -> String {
  "pom.xml".to_string()
}

fn default_command_timeout_secs() -> u64 {
  300
}

fn default_marker_format() -> String {
  "%H".to_string()
}

impl Default for ChangesConfig {
  fn default() -> Self {
    Self {
      descriptor_file: default_descriptor_file(),
      command_timeout_secs: default_command_timeout_secs(),
      marker_format: default_marker_format(),
    }
  }
}

impl ChangesConfig {
  /// Find config file in search order: mvn-changes.toml, .mvn-changes.toml, .config/mvn-changes.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("mvn-changes.toml"),
      path.join(".mvn-changes.toml"),
      path.join(".config").join("mvn-changes.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config next to the root descriptor, falling back to defaults when absent
  pub fn load_or_default(path: &Path) -> ChangesResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content, &config_path)?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }

  fn parse(content: &str, config_path: &Path) -> ChangesResult<Self> {
    let config: ChangesConfig = toml_edit::de::from_str(content).map_err(|e| ConfigError::Malformed {
      path: config_path.to_path_buf(),
      reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Validate field values
  pub fn validate(&self) -> ChangesResult<()> {
    let name = self.descriptor_file.trim();
    if name.is_empty() || name.contains('/') || name.contains('\\') {
      return Err(
        ConfigError::Invalid {
          field: "descriptor_file".to_string(),
          reason: format!("'{}' must be a bare file name such as pom.xml", self.descriptor_file),
        }
        .into(),
      );
    }

    if self.command_timeout_secs == 0 {
      return Err(
        ConfigError::Invalid {
          field: "command_timeout_secs".to_string(),
          reason: "must be greater than zero".to_string(),
        }
        .into(),
      );
    }

    if self.marker_format.trim().is_empty() {
      return Err(
        ConfigError::Invalid {
          field: "marker_format".to_string(),
          reason: "must not be empty".to_string(),
        }
        .into(),
      );
    }

    Ok(())
  }

  /// Timeout applied to each git invocation
  pub fn command_timeout(&self) -> Duration {
    Duration::from_secs(self.command_timeout_secs)
  }
}
