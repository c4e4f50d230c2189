// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Embedded service wiring
//!
//! Builds the classification services in-process from the configuration
//! manifest: bootstrap the scheme, load the repository snapshot, construct
//! the services and register them with the process-wide providers.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use rm_classification_core::{
    application::{
        bootstrap::ClassificationServiceBootstrap,
        content_classification::ContentClassificationService,
        provider::CLASSIFICATION_SCHEME_SERVICE,
        scheme_service::ClassificationSchemeService,
        security_clearance::SecurityClearanceService,
    },
    domain::{
        repository::{AttributeStore, StorageBackend},
        service_config::{ClassificationConfigManifest, LoggingConfig},
    },
    infrastructure::{
        config_loader::ClassificationConfigLoader,
        event_bus::EventBus,
        repositories::{FileAttributeStore, InMemoryAttributeStore, RepositorySnapshot, SnapshotRepositories},
    },
};

/// Logging settings from the manifest, with command-line values on top. A
/// manifest that fails to load falls back to the defaults; the command itself
/// reports the load error once logging is up.
pub fn resolve_logging(config_path: Option<PathBuf>, level: Option<String>, format: Option<String>) -> LoggingConfig {
    ClassificationConfigManifest::load_or_default(config_path)
        .map(|config| config.spec.logging)
        .unwrap_or_default()
        .with_overrides(level, format)
}

pub struct EmbeddedServices {
    pub config: ClassificationConfigManifest,
    pub scheme: Arc<ClassificationSchemeService>,
    pub clearance: Arc<SecurityClearanceService>,
    pub content: Arc<ContentClassificationService>,
    pub repositories: SnapshotRepositories,
    pub event_bus: EventBus,
}

impl EmbeddedServices {
    pub async fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = ClassificationConfigManifest::load_or_default(config_path)
            .context("Failed to load configuration")?;
        config.validate().context("Configuration validation failed")?;
        Self::from_config(config).await
    }

    pub async fn from_config(config: ClassificationConfigManifest) -> Result<Self> {
        let event_bus = EventBus::with_default_capacity();

        let attributes: Arc<dyn AttributeStore> = match &config.spec.storage.state_file {
            Some(path) => Arc::new(FileAttributeStore::new(path)),
            None => Arc::new(InMemoryAttributeStore::new()),
        };
        let loader = ClassificationConfigLoader::from_config(&config.spec.scheme);
        let scheme = ClassificationServiceBootstrap::new(loader, attributes, event_bus.clone())
            .initialise()
            .await
            .context("Failed to initialise classification scheme")?;
        let scheme = Arc::new(ClassificationSchemeService::new(scheme));

        let repositories = match config.spec.storage.repository_backend() {
            StorageBackend::Snapshot(path) => SnapshotRepositories::load(&path)
                .await
                .with_context(|| format!("Failed to load repository snapshot {:?}", path))?,
            StorageBackend::InMemory => {
                debug!("No snapshot file configured, starting with an empty repository");
                SnapshotRepositories::from_snapshot(RepositorySnapshot::default()).await?
            }
        };

        let clearance = Arc::new(SecurityClearanceService::new(
            scheme.clone(),
            repositories.people.clone(),
            event_bus.clone(),
        ));
        let content = Arc::new(ContentClassificationService::new(
            scheme.clone(),
            clearance.clone(),
            repositories.nodes.clone(),
            repositories.freeze.clone(),
            repositories.referred_metadata.clone(),
            event_bus.clone(),
        ));

        CLASSIFICATION_SCHEME_SERVICE.set(scheme.clone());

        Ok(Self {
            config,
            scheme,
            clearance,
            content,
            repositories,
            event_bus,
        })
    }

    /// Write the repository state back to the snapshot file, if one is configured.
    pub async fn persist(&self) -> Result<()> {
        match self.config.spec.storage.repository_backend() {
            StorageBackend::Snapshot(path) => {
                self.repositories
                    .save(&path)
                    .await
                    .with_context(|| format!("Failed to write repository snapshot {:?}", path))?;
                info!("Repository snapshot written to {:?}", path);
            }
            StorageBackend::InMemory => {
                debug!("In-memory repository, nothing to persist");
            }
        }
        Ok(())
    }
}
