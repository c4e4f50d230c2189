// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Classification Service Configuration
//
// Kubernetes-style manifest (apiVersion/kind/metadata/spec) describing:
// - where the classification scheme JSON files live
// - where values persisted across boots are stored
// - which repository snapshot backs the node and person stores
// - logging defaults

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::repository::StorageBackend;

pub const API_VERSION: &str = "100monkeys.ai/v1";
pub const KIND: &str = "ClassificationConfig";

/// Top-level configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfigManifest {
    /// API version (must be "100monkeys.ai/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "ClassificationConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: ClassificationConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationConfigSpec {
    #[serde(default)]
    pub scheme: SchemeConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location of the scheme files (the "classpath" configuration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeConfig {
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    #[serde(default = "default_levels_file")]
    pub levels_file: String,

    #[serde(default = "default_reasons_file")]
    pub reasons_file: String,

    #[serde(default = "default_exemption_categories_file")]
    pub exemption_categories_file: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Attribute store file holding the scheme persisted by earlier boots.
    /// In-memory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,

    /// Repository snapshot backing nodes and people. In-memory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("./classification")
}

fn default_levels_file() -> String {
    "classification-levels.json".to_string()
}

fn default_reasons_file() -> String {
    "classification-reasons.json".to_string()
}

fn default_exemption_categories_file() -> String {
    "exemption-categories.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            levels_file: default_levels_file(),
            reasons_file: default_reasons_file(),
            exemption_categories_file: default_exemption_categories_file(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ClassificationConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "rm-classification".to_string(),
                labels: None,
            },
            spec: ClassificationConfigSpec::default(),
        }
    }
}

impl SchemeConfig {
    pub fn levels_path(&self) -> PathBuf {
        self.config_dir.join(&self.levels_file)
    }

    pub fn reasons_path(&self) -> PathBuf {
        self.config_dir.join(&self.reasons_file)
    }

    pub fn exemption_categories_path(&self) -> PathBuf {
        self.config_dir.join(&self.exemption_categories_file)
    }
}

impl LoggingConfig {
    /// Command-line values take precedence over the manifest.
    pub fn with_overrides(&self, level: Option<String>, format: Option<String>) -> Self {
        Self {
            level: level.unwrap_or_else(|| self.level.clone()),
            format: format.unwrap_or_else(|| self.format.clone()),
        }
    }
}

impl StorageConfig {
    pub fn repository_backend(&self) -> StorageBackend {
        match &self.snapshot_file {
            Some(path) => StorageBackend::Snapshot(path.clone()),
            None => StorageBackend::InMemory,
        }
    }
}

impl ClassificationConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. RMC_CONFIG_PATH environment variable
    /// 2. ./rmc-config.yaml (working directory)
    /// 3. ~/.rmc/config.yaml (user home)
    /// 4. /etc/rmc/config.yaml (system, Unix) or C:\ProgramData\Rmc\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("RMC_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./rmc-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".rmc").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/rmc/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Rmc\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must exist and parse
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Environment variables override file locations so container
    /// deployments can relocate them without editing the manifest.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RMC_CONFIG_DIR") {
            tracing::info!("Environment override: RMC_CONFIG_DIR={}", val);
            self.spec.scheme.config_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("RMC_STATE_FILE") {
            tracing::info!("Environment override: RMC_STATE_FILE={}", val);
            self.spec.storage.state_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("RMC_SNAPSHOT_FILE") {
            tracing::info!("Environment override: RMC_SNAPSHOT_FILE={}", val);
            self.spec.storage.snapshot_file = Some(PathBuf::from(val));
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!("Invalid apiVersion: '{}'. Must be '{}'", self.api_version, API_VERSION);
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let scheme = &self.spec.scheme;
        for (field, value) in [
            ("levels_file", &scheme.levels_file),
            ("reasons_file", &scheme.reasons_file),
            ("exemption_categories_file", &scheme.exemption_categories_file),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("spec.scheme.{} cannot be empty", field);
            }
        }

        if !matches!(self.spec.logging.format.as_str(), "json" | "text") {
            anyhow::bail!(
                "Invalid spec.logging.format: '{}'. Must be 'json' or 'text'",
                self.spec.logging.format
            );
        }

        Ok(())
    }
}
