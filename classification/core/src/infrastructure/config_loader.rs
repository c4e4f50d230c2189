// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Classification Scheme Configuration Loader
//!
//! Reads the JSON scheme files shipped with the deployment. Each file holds a
//! single array:
//!
//! ```json
//! [{ "name": "TS", "displayLabel": "rm.classification.topSecret" }]
//! ```
//!
//! Reasons and exemption categories use `id` instead of `name`. A missing file
//! yields an empty list; deciding whether that is acceptable is up to the
//! bootstrap. Unreadable or unparseable files are fatal.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Parse scheme configuration into domain entities

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::classification_level::ClassificationLevel;
use crate::domain::classification_reason::ClassificationReason;
use crate::domain::errors::{ClassificationError, ClassificationResult};
use crate::domain::exemption_category::ExemptionCategory;
use crate::domain::service_config::SchemeConfig;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LevelEntry {
    name: String,
    display_label: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdEntry {
    id: String,
    display_label: String,
}

/// Loads levels, reasons and exemption categories from the scheme directory.
#[derive(Debug, Clone)]
pub struct ClassificationConfigLoader {
    levels_path: PathBuf,
    reasons_path: PathBuf,
    exemption_categories_path: PathBuf,
}

impl ClassificationConfigLoader {
    pub fn new(
        levels_path: impl Into<PathBuf>,
        reasons_path: impl Into<PathBuf>,
        exemption_categories_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            levels_path: levels_path.into(),
            reasons_path: reasons_path.into(),
            exemption_categories_path: exemption_categories_path.into(),
        }
    }

    pub fn from_config(config: &SchemeConfig) -> Self {
        Self::new(
            config.levels_path(),
            config.reasons_path(),
            config.exemption_categories_path(),
        )
    }

    pub fn configured_levels(&self) -> ClassificationResult<Vec<ClassificationLevel>> {
        let entries: Vec<LevelEntry> = read_entries(&self.levels_path)?;
        Ok(entries
            .into_iter()
            .map(|e| ClassificationLevel::new(e.name, e.display_label))
            .collect())
    }

    pub fn configured_reasons(&self) -> ClassificationResult<Vec<ClassificationReason>> {
        let entries: Vec<IdEntry> = read_entries(&self.reasons_path)?;
        Ok(entries
            .into_iter()
            .map(|e| ClassificationReason::new(e.id, e.display_label))
            .collect())
    }

    pub fn configured_exemption_categories(&self) -> ClassificationResult<Vec<ExemptionCategory>> {
        let entries: Vec<IdEntry> = read_entries(&self.exemption_categories_path)?;
        Ok(entries
            .into_iter()
            .map(|e| ExemptionCategory::new(e.id, e.display_label))
            .collect())
    }
}

fn read_entries<T: DeserializeOwned>(path: &Path) -> ClassificationResult<Vec<T>> {
    if !path.exists() {
        debug!("Scheme configuration {:?} not found, using an empty list", path);
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| {
        ClassificationError::MalformedConfiguration(format!("Could not read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        ClassificationError::MalformedConfiguration(format!("Could not parse {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn loader_in(dir: &Path) -> ClassificationConfigLoader {
        ClassificationConfigLoader::new(
            dir.join("levels.json"),
            dir.join("reasons.json"),
            dir.join("exemptions.json"),
        )
    }

    #[test]
    fn test_reads_levels_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("levels.json"),
            r#"[{"name":"TS","displayLabel":"rm.classification.topSecret"},
                {"name":"S","displayLabel":"rm.classification.secret"}]"#,
        )
        .unwrap();

        let levels = loader_in(dir.path()).configured_levels().unwrap();
        let ids: Vec<&str> = levels.iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["TS", "S"]);
        assert_eq!(levels[1].display_label_key(), "rm.classification.secret");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = loader_in(dir.path());
        assert!(loader.configured_levels().unwrap().is_empty());
        assert!(loader.configured_reasons().unwrap().is_empty());
        assert!(loader.configured_exemption_categories().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("reasons.json"), "[{\"id\": ").unwrap();
        assert!(matches!(
            loader_in(dir.path()).configured_reasons(),
            Err(ClassificationError::MalformedConfiguration(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("levels.json"), r#"{"name":"TS"}"#).unwrap();
        assert!(matches!(
            loader_in(dir.path()).configured_levels(),
            Err(ClassificationError::MalformedConfiguration(_))
        ));
    }
}
