// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! JSON repository snapshot
//!
//! A snapshot file holds the nodes, people, holds and metadata references the
//! classification services operate on. [`SnapshotRepositories`] loads it into
//! the in-memory repositories and writes the current state back on request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::{InMemoryFreezeService, InMemoryNodeRepository, InMemoryPersonRepository, InMemoryReferredMetadataService};
use crate::domain::clearance::Person;
use crate::domain::content::{Node, NodeRef};
use crate::domain::repository::{NodeRepository, PersonRepository, RepositoryError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferredMetadataLink {
    pub node_ref: NodeRef,
    pub aspect: String,
    pub referred_node: NodeRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub frozen: BTreeSet<NodeRef>,
    #[serde(default)]
    pub referred_metadata: Vec<ReferredMetadataLink>,
}

impl RepositorySnapshot {
    /// Read a snapshot; a missing file is an empty repository.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        match tokio::fs::read_to_string(path.as_ref()).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the snapshot file via a temporary sibling and a rename, so an
    /// interrupted write leaves the previous snapshot intact.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), RepositoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(self)?).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!("Repository snapshot written to {:?}", path);
        Ok(())
    }
}

/// In-memory repositories seeded from a snapshot.
#[derive(Clone, Default)]
pub struct SnapshotRepositories {
    pub nodes: Arc<InMemoryNodeRepository>,
    pub people: Arc<InMemoryPersonRepository>,
    pub freeze: Arc<InMemoryFreezeService>,
    pub referred_metadata: Arc<InMemoryReferredMetadataService>,
}

impl SnapshotRepositories {
    pub async fn from_snapshot(snapshot: RepositorySnapshot) -> Result<Self, RepositoryError> {
        let repositories = Self::default();
        for node in &snapshot.nodes {
            repositories.nodes.save(node).await?;
        }
        for person in &snapshot.people {
            repositories.people.save(person).await?;
        }
        for node_ref in snapshot.frozen {
            repositories.freeze.freeze(node_ref).await;
        }
        for link in snapshot.referred_metadata {
            repositories
                .referred_metadata
                .refer(link.node_ref, &link.aspect, link.referred_node)
                .await;
        }
        info!(
            "Loaded repository snapshot with {} nodes and {} people",
            snapshot.nodes.len(),
            snapshot.people.len()
        );
        Ok(repositories)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        Self::from_snapshot(RepositorySnapshot::load(path).await?).await
    }

    pub async fn snapshot(&self) -> RepositorySnapshot {
        RepositorySnapshot {
            nodes: self.nodes.all().await,
            people: self.people.all().await,
            frozen: self.freeze.frozen_nodes().await,
            referred_metadata: self
                .referred_metadata
                .links()
                .await
                .into_iter()
                .map(|(node_ref, aspect, referred_node)| ReferredMetadataLink {
                    node_ref,
                    aspect,
                    referred_node,
                })
                .collect(),
        }
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), RepositoryError> {
        self.snapshot().await.save(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clearance::PersonInfo;
    use crate::domain::content::NodeKind;
    use crate::domain::repository::FreezeService;

    #[tokio::test]
    async fn test_snapshot_reload_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository.json");

        let repositories = SnapshotRepositories::load(&path).await.unwrap();
        let node = Node::new(NodeKind::Content);
        let source = Node::new(NodeKind::Content);
        repositories.nodes.save(&node).await.unwrap();
        repositories.nodes.save(&source).await.unwrap();
        repositories
            .people
            .save(&Person::new(PersonInfo::new("jdoe", "Jane", "Doe")))
            .await
            .unwrap();
        repositories.freeze.freeze(node.node_ref).await;
        repositories
            .referred_metadata
            .refer(node.node_ref, "clf:classified", source.node_ref)
            .await;
        repositories.save(&path).await.unwrap();

        let reloaded = SnapshotRepositories::load(&path).await.unwrap();
        assert_eq!(reloaded.snapshot().await, repositories.snapshot().await);
        assert!(reloaded.freeze.is_frozen(&node.node_ref).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("repository.json");

        let mut snapshot = RepositorySnapshot::default();
        snapshot.save(&path).await.unwrap();
        snapshot.nodes.push(Node::new(NodeKind::Content));
        snapshot.save(&path).await.unwrap();

        assert_eq!(RepositorySnapshot::load(&path).await.unwrap(), snapshot);
        assert!(!path.with_extension("json.tmp").exists());
        let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repository.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            RepositorySnapshot::load(&path).await,
            Err(RepositoryError::Serialization(_))
        ));
        assert_eq!(
            RepositorySnapshot::load(dir.path().join("missing.json")).await.unwrap(),
            RepositorySnapshot::default()
        );
    }
}
