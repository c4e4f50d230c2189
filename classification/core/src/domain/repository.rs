// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Contracts for the repository collaborators the classification services
//! depend on. Implementations live in `crate::infrastructure::repositories`.
//!
//! | Trait | Collaborator | Implementations |
//! |-------|--------------|-----------------|
//! | `NodeRepository` | node/property store | `InMemoryNodeRepository` |
//! | `PersonRepository` | user directory | `InMemoryPersonRepository` |
//! | `FreezeService` | legal-hold lookup | `InMemoryFreezeService` |
//! | `ReferredMetadataService` | metadata indirection | `InMemoryReferredMetadataService` |
//! | `AttributeStore` | values persisted across boots | `InMemoryAttributeStore`, `FileAttributeStore` |
//!
//! None of these open transactions. Callers needing atomic multi-property
//! writes must wrap service calls in their own transaction boundary.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::clearance::{PagingResults, Person, PersonInfo, UserQueryParams};
use crate::domain::content::{Node, NodeRef};

/// Storage backend selection for the repository collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    /// JSON snapshot loaded at startup and written back on demand.
    Snapshot(PathBuf),
}

#[async_trait]
pub trait NodeRepository: Send + Sync {
    async fn find_by_ref(&self, node_ref: &NodeRef) -> Result<Option<Node>, RepositoryError>;

    /// Save node (create or update)
    async fn save(&self, node: &Node) -> Result<(), RepositoryError>;

    async fn exists(&self, node_ref: &NodeRef) -> Result<bool, RepositoryError> {
        Ok(self.find_by_ref(node_ref).await?.is_some())
    }
}

#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Person>, RepositoryError>;

    async fn save(&self, person: &Person) -> Result<(), RepositoryError>;

    /// Filter, sort and page the directory. Paging metadata is owned by the
    /// directory and passed through by callers as-is.
    async fn query(&self, params: &UserQueryParams) -> Result<PagingResults<PersonInfo>, RepositoryError>;
}

#[async_trait]
pub trait FreezeService: Send + Sync {
    /// Whether the node is held. Answered as a system-level query, without
    /// regard to what the current caller may read.
    async fn is_frozen(&self, node_ref: &NodeRef) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ReferredMetadataService: Send + Sync {
    /// The node whose `aspect` metadata `node_ref` refers to, if any.
    async fn referred_node(&self, node_ref: &NodeRef, aspect: &str) -> Result<Option<NodeRef>, RepositoryError>;
}

/// Key-value store for values that must survive restarts.
#[async_trait]
pub trait AttributeStore: Send + Sync {
    async fn get_attribute(&self, key: &str) -> Result<Option<Value>, RepositoryError>;

    async fn set_attribute(&self, key: &str, value: Value) -> Result<(), RepositoryError>;
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
