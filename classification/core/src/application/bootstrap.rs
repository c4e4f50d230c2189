// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Classification Bootstrap
//!
//! Builds the active [`ClassificationScheme`] at process start by merging the
//! configured scheme files with values persisted by earlier boots.
//!
//! | Entity | Persisted missing | Configured differs from persisted |
//! |--------|-------------------|-----------------------------------|
//! | Levels | configured levels validated, persisted, used | configured levels validated, persisted, used |
//! | Reasons | configured reasons validated (non-empty), persisted, used | warning; persisted reasons stay in force |
//! | Exemption categories | configured categories validated, persisted, used (also when the persisted list is empty) | warning; persisted categories stay in force |
//!
//! Level lists are compared with id-only equality, so a change to display
//! labels alone does not replace the persisted levels.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::scheme_service::ClassificationScheme;
use crate::domain::classification_level::ClassificationLevel;
use crate::domain::classification_reason::ClassificationReason;
use crate::domain::errors::{ClassificationError, ClassificationResult};
use crate::domain::events::ClassificationEvent;
use crate::domain::exemption_category::ExemptionCategory;
use crate::domain::repository::{AttributeStore, RepositoryError};
use crate::domain::validation::{ClassificationLevelValidation, SchemeEntityValidation};
use crate::infrastructure::config_loader::ClassificationConfigLoader;
use crate::infrastructure::event_bus::EventBus;

pub const LEVELS_ATTRIBUTE_KEY: &str = "rm.classification.levels";
pub const REASONS_ATTRIBUTE_KEY: &str = "rm.classification.reasons";
pub const EXEMPTION_CATEGORIES_ATTRIBUTE_KEY: &str = "rm.classification.exemptionCategories";

pub struct ClassificationServiceBootstrap {
    loader: ClassificationConfigLoader,
    attributes: Arc<dyn AttributeStore>,
    event_bus: EventBus,
    level_validation: ClassificationLevelValidation,
    entity_validation: SchemeEntityValidation,
}

impl ClassificationServiceBootstrap {
    pub fn new(loader: ClassificationConfigLoader, attributes: Arc<dyn AttributeStore>, event_bus: EventBus) -> Self {
        Self {
            loader,
            attributes,
            event_bus,
            level_validation: ClassificationLevelValidation::new(),
            entity_validation: SchemeEntityValidation,
        }
    }

    pub async fn initialise(&self) -> ClassificationResult<ClassificationScheme> {
        let levels = self.initialise_levels().await?;
        let reasons = self.initialise_reasons().await?;
        let exemption_categories = self.initialise_exemption_categories().await?;

        info!(
            "Classification scheme initialised with {} levels, {} reasons and {} exemption categories",
            levels.len(),
            reasons.len(),
            exemption_categories.len()
        );
        self.event_bus.publish(ClassificationEvent::SchemeBootstrapped {
            level_ids: levels.iter().map(|l| l.id().to_string()).collect(),
            reason_count: reasons.len(),
            exemption_category_count: exemption_categories.len(),
            bootstrapped_at: Utc::now(),
        });

        Ok(ClassificationScheme::new(levels, reasons, exemption_categories))
    }

    /// Configured levels win whenever they differ from the persisted ones.
    pub async fn initialise_levels(&self) -> ClassificationResult<Vec<ClassificationLevel>> {
        let configured = self.loader.configured_levels()?;
        let persisted: Option<Vec<ClassificationLevel>> = self.read(LEVELS_ATTRIBUTE_KEY).await?;

        match persisted {
            Some(persisted) if persisted == configured => Ok(persisted),
            persisted => {
                if persisted.is_some() {
                    info!("Classification levels changed in configuration, replacing persisted levels");
                }
                self.level_validation.validate_levels(&configured)?;
                self.write(LEVELS_ATTRIBUTE_KEY, &configured).await?;
                Ok(configured)
            }
        }
    }

    /// Persisted reasons win once present; the configuration only seeds them.
    pub async fn initialise_reasons(&self) -> ClassificationResult<Vec<ClassificationReason>> {
        let configured = self.loader.configured_reasons()?;
        let persisted: Option<Vec<ClassificationReason>> = self.read(REASONS_ATTRIBUTE_KEY).await?;

        match persisted {
            Some(persisted) if !persisted.is_empty() => {
                if persisted != configured {
                    warn!(
                        "Classification reasons configured in the scheme files do not match those stored in the \
                         repository. The stored values remain in use."
                    );
                }
                Ok(persisted)
            }
            _ => {
                self.entity_validation.validate_reasons(&configured)?;
                self.write(REASONS_ATTRIBUTE_KEY, &configured).await?;
                Ok(configured)
            }
        }
    }

    pub async fn initialise_exemption_categories(&self) -> ClassificationResult<Vec<ExemptionCategory>> {
        let configured = self.loader.configured_exemption_categories()?;
        let persisted: Option<Vec<ExemptionCategory>> = self.read(EXEMPTION_CATEGORIES_ATTRIBUTE_KEY).await?;

        match persisted {
            Some(persisted) if !persisted.is_empty() => {
                if persisted != configured {
                    warn!(
                        "Exemption categories configured in the scheme files do not match those stored in the \
                         repository. The stored values remain in use."
                    );
                }
                Ok(persisted)
            }
            _ => {
                self.entity_validation.validate_exemption_categories(&configured)?;
                self.write(EXEMPTION_CATEGORIES_ATTRIBUTE_KEY, &configured).await?;
                Ok(configured)
            }
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> ClassificationResult<Option<T>> {
        match self.attributes.get_attribute(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> ClassificationResult<()> {
        let value = serde_json::to_value(value).map_err(RepositoryError::from)?;
        self.attributes.set_attribute(key, value).await.map_err(ClassificationError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryAttributeStore;
    use std::fs;
    use std::path::Path;

    fn write_scheme(dir: &Path, levels: &str, reasons: &str, exemptions: Option<&str>) {
        fs::write(dir.join("levels.json"), levels).unwrap();
        fs::write(dir.join("reasons.json"), reasons).unwrap();
        if let Some(exemptions) = exemptions {
            fs::write(dir.join("exemptions.json"), exemptions).unwrap();
        }
    }

    fn bootstrap(dir: &Path, attributes: Arc<InMemoryAttributeStore>) -> ClassificationServiceBootstrap {
        let loader = ClassificationConfigLoader::new(
            dir.join("levels.json"),
            dir.join("reasons.json"),
            dir.join("exemptions.json"),
        );
        ClassificationServiceBootstrap::new(loader, attributes, EventBus::new(16))
    }

    const LEVELS: &str = r#"[{"name":"TS","displayLabel":"ts"},{"name":"S","displayLabel":"s"}]"#;
    const REASONS: &str = r#"[{"id":"1.4(a)","displayLabel":"a"},{"id":"1.4(b)","displayLabel":"b"}]"#;

    #[tokio::test]
    async fn test_first_boot_persists_configuration() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), LEVELS, REASONS, None);
        let attributes = Arc::new(InMemoryAttributeStore::new());

        let scheme = bootstrap(dir.path(), attributes.clone()).initialise().await.unwrap();
        let ids: Vec<&str> = scheme.levels.classification_levels().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["TS", "S", "U"]);
        assert_eq!(scheme.reasons.classification_reasons().len(), 2);
        assert!(scheme.exemption_categories.exemption_categories().is_empty());

        assert!(attributes.get_attribute(LEVELS_ATTRIBUTE_KEY).await.unwrap().is_some());
        assert!(attributes.get_attribute(REASONS_ATTRIBUTE_KEY).await.unwrap().is_some());
        assert!(attributes.get_attribute(EXEMPTION_CATEGORIES_ATTRIBUTE_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_changed_levels_replace_persisted() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), LEVELS, REASONS, None);
        let attributes = Arc::new(InMemoryAttributeStore::new());
        bootstrap(dir.path(), attributes.clone()).initialise().await.unwrap();

        write_scheme(
            dir.path(),
            r#"[{"name":"TS","displayLabel":"ts"},{"name":"S","displayLabel":"s"},{"name":"C","displayLabel":"c"}]"#,
            REASONS,
            None,
        );
        let levels = bootstrap(dir.path(), attributes.clone()).initialise_levels().await.unwrap();
        assert_eq!(levels.len(), 3);

        let stored: Vec<ClassificationLevel> =
            serde_json::from_value(attributes.get_attribute(LEVELS_ATTRIBUTE_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored, levels);
    }

    #[tokio::test]
    async fn test_label_only_change_keeps_persisted_levels() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), LEVELS, REASONS, None);
        let attributes = Arc::new(InMemoryAttributeStore::new());
        bootstrap(dir.path(), attributes.clone()).initialise().await.unwrap();

        write_scheme(
            dir.path(),
            r#"[{"name":"TS","displayLabel":"renamed"},{"name":"S","displayLabel":"s"}]"#,
            REASONS,
            None,
        );
        let levels = bootstrap(dir.path(), attributes).initialise_levels().await.unwrap();
        assert_eq!(levels[0].display_label_key(), "ts");
    }

    #[tokio::test]
    async fn test_invalid_configured_levels_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), r#"[{"name":"U","displayLabel":"u"}]"#, REASONS, None);
        let result = bootstrap(dir.path(), Arc::new(InMemoryAttributeStore::new()))
            .initialise()
            .await;
        assert!(matches!(result, Err(ClassificationError::IllegalConfiguration(_))));
    }

    #[tokio::test]
    async fn test_missing_levels_file_is_missing_configuration() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("reasons.json"), REASONS).unwrap();
        let result = bootstrap(dir.path(), Arc::new(InMemoryAttributeStore::new()))
            .initialise()
            .await;
        assert!(matches!(result, Err(ClassificationError::MissingConfiguration(_))));
    }

    #[tokio::test]
    async fn test_persisted_reasons_win() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), LEVELS, REASONS, None);
        let attributes = Arc::new(InMemoryAttributeStore::new());
        bootstrap(dir.path(), attributes.clone()).initialise().await.unwrap();

        write_scheme(dir.path(), LEVELS, r#"[{"id":"1.4(c)","displayLabel":"c"}]"#, None);
        let reasons = bootstrap(dir.path(), attributes).initialise_reasons().await.unwrap();
        let ids: Vec<&str> = reasons.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["1.4(a)", "1.4(b)"]);
    }

    #[tokio::test]
    async fn test_empty_persisted_categories_reseeded_from_configuration() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), LEVELS, REASONS, None);
        let attributes = Arc::new(InMemoryAttributeStore::new());
        let first = bootstrap(dir.path(), attributes.clone()).initialise().await.unwrap();
        assert!(first.exemption_categories.exemption_categories().is_empty());

        write_scheme(dir.path(), LEVELS, REASONS, Some(r#"[{"id":"25X1","displayLabel":"x1"}]"#));
        let categories = bootstrap(dir.path(), attributes.clone())
            .initialise_exemption_categories()
            .await
            .unwrap();
        let ids: Vec<&str> = categories.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["25X1"]);

        let stored: Vec<ExemptionCategory> = serde_json::from_value(
            attributes
                .get_attribute(EXEMPTION_CATEGORIES_ATTRIBUTE_KEY)
                .await
                .unwrap()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(stored, categories);
    }

    #[tokio::test]
    async fn test_persisted_categories_win_once_present() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), LEVELS, REASONS, Some(r#"[{"id":"25X1","displayLabel":"x1"}]"#));
        let attributes = Arc::new(InMemoryAttributeStore::new());
        bootstrap(dir.path(), attributes.clone()).initialise().await.unwrap();

        write_scheme(dir.path(), LEVELS, REASONS, Some(r#"[{"id":"25X2","displayLabel":"x2"}]"#));
        let categories = bootstrap(dir.path(), attributes).initialise_exemption_categories().await.unwrap();
        let ids: Vec<&str> = categories.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["25X1"]);
    }

    #[tokio::test]
    async fn test_no_reasons_anywhere_is_missing_configuration() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), LEVELS, "[]", None);
        let result = bootstrap(dir.path(), Arc::new(InMemoryAttributeStore::new()))
            .initialise_reasons()
            .await;
        assert!(matches!(result, Err(ClassificationError::MissingConfiguration(_))));
    }

    #[tokio::test]
    async fn test_malformed_scheme_file() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(dir.path(), "[", REASONS, None);
        let result = bootstrap(dir.path(), Arc::new(InMemoryAttributeStore::new()))
            .initialise()
            .await;
        assert!(matches!(result, Err(ClassificationError::MalformedConfiguration(_))));
    }

    #[tokio::test]
    async fn test_bootstrap_publishes_event() {
        let dir = tempfile::tempdir().unwrap();
        write_scheme(
            dir.path(),
            LEVELS,
            REASONS,
            Some(r#"[{"id":"25X1","displayLabel":"x1"}]"#),
        );
        let loader = ClassificationConfigLoader::new(
            dir.path().join("levels.json"),
            dir.path().join("reasons.json"),
            dir.path().join("exemptions.json"),
        );
        let event_bus = EventBus::new(16);
        let mut receiver = event_bus.subscribe();
        ClassificationServiceBootstrap::new(loader, Arc::new(InMemoryAttributeStore::new()), event_bus)
            .initialise()
            .await
            .unwrap();

        match receiver.recv().await.unwrap() {
            ClassificationEvent::SchemeBootstrapped { level_ids, exemption_category_count, .. } => {
                assert_eq!(level_ids, vec!["TS".to_string(), "S".to_string()]);
                assert_eq!(exemption_category_count, 1);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
