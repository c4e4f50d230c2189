// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the collaborator traits defined in
//! `crate::domain::repository`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve nodes, people and boot-time attributes
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! - **InMemory\*** - `tokio::sync::RwLock`-guarded maps for tests and the CLI
//! - **FileAttributeStore** - JSON file keeping scheme values across boots
//! - **SnapshotRepositories** - in-memory stores loaded from and written back
//!   to a JSON repository snapshot

pub mod file_attribute_store;
pub mod snapshot;

pub use file_attribute_store::FileAttributeStore;
pub use snapshot::{RepositorySnapshot, SnapshotRepositories};

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::clearance::{PagingResults, Person, PersonInfo, PersonSortField, UserQueryParams};
use crate::domain::content::{Node, NodeRef};
use crate::domain::repository::{
    AttributeStore, FreezeService, NodeRepository, PersonRepository, ReferredMetadataService, RepositoryError,
};

#[derive(Clone, Default)]
pub struct InMemoryNodeRepository {
    nodes: Arc<RwLock<HashMap<NodeRef, Node>>>,
}

impl InMemoryNodeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self.nodes.read().await.values().cloned().collect();
        nodes.sort_by_key(|n| n.node_ref);
        nodes
    }

    pub async fn delete(&self, node_ref: &NodeRef) {
        self.nodes.write().await.remove(node_ref);
    }
}

#[async_trait]
impl NodeRepository for InMemoryNodeRepository {
    async fn find_by_ref(&self, node_ref: &NodeRef) -> Result<Option<Node>, RepositoryError> {
        let guard = self.nodes.read().await;
        Ok(guard.get(node_ref).cloned())
    }

    async fn save(&self, node: &Node) -> Result<(), RepositoryError> {
        let mut guard = self.nodes.write().await;
        guard.insert(node.node_ref, node.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPersonRepository {
    people: Arc<RwLock<HashMap<String, Person>>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Person> {
        let mut people: Vec<Person> = self.people.read().await.values().cloned().collect();
        people.sort_by(|a, b| a.info.user_name.cmp(&b.info.user_name));
        people
    }
}

fn matches_term(info: &PersonInfo, term: &str) -> bool {
    let term = term.to_lowercase();
    [&info.user_name, &info.first_name, &info.last_name]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

fn compare_people(a: &PersonInfo, b: &PersonInfo, params: &UserQueryParams) -> Ordering {
    for order in &params.sort {
        let (x, y) = match order.field {
            PersonSortField::UserName => (&a.user_name, &b.user_name),
            PersonSortField::FirstName => (&a.first_name, &b.first_name),
            PersonSortField::LastName => (&a.last_name, &b.last_name),
        };
        let ordering = if order.ascending { x.cmp(y) } else { y.cmp(x) };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.user_name.cmp(&b.user_name)
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<Person>, RepositoryError> {
        let guard = self.people.read().await;
        Ok(guard.get(user_name).cloned())
    }

    async fn save(&self, person: &Person) -> Result<(), RepositoryError> {
        let mut guard = self.people.write().await;
        guard.insert(person.info.user_name.clone(), person.clone());
        Ok(())
    }

    async fn query(&self, params: &UserQueryParams) -> Result<PagingResults<PersonInfo>, RepositoryError> {
        let guard = self.people.read().await;
        let mut hits: Vec<PersonInfo> = guard
            .values()
            .map(|p| p.info.clone())
            .filter(|info| match params.search_term.as_deref() {
                Some(term) if !term.trim().is_empty() => matches_term(info, term.trim()),
                _ => true,
            })
            .collect();
        hits.sort_by(|a, b| compare_people(a, b, params));

        let total = hits.len();
        let paging = &params.paging;
        let page: Vec<PersonInfo> = hits.into_iter().skip(paging.skip_count).take(paging.max_items).collect();
        let has_more_items = paging.skip_count.saturating_add(page.len()) < total;

        Ok(PagingResults {
            page,
            has_more_items,
            total_result_count: Some((total, total)),
            query_execution_id: Some(
                paging
                    .query_execution_id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            ),
        })
    }
}

#[derive(Clone, Default)]
pub struct InMemoryFreezeService {
    frozen: Arc<RwLock<BTreeSet<NodeRef>>>,
}

impl InMemoryFreezeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn freeze(&self, node_ref: NodeRef) {
        self.frozen.write().await.insert(node_ref);
    }

    pub async fn unfreeze(&self, node_ref: &NodeRef) {
        self.frozen.write().await.remove(node_ref);
    }

    pub async fn frozen_nodes(&self) -> BTreeSet<NodeRef> {
        self.frozen.read().await.clone()
    }
}

#[async_trait]
impl FreezeService for InMemoryFreezeService {
    async fn is_frozen(&self, node_ref: &NodeRef) -> Result<bool, RepositoryError> {
        Ok(self.frozen.read().await.contains(node_ref))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryReferredMetadataService {
    links: Arc<RwLock<HashMap<(NodeRef, String), NodeRef>>>,
}

impl InMemoryReferredMetadataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `node_ref` take its `aspect` metadata from `referred`.
    pub async fn refer(&self, node_ref: NodeRef, aspect: &str, referred: NodeRef) {
        self.links.write().await.insert((node_ref, aspect.to_string()), referred);
    }

    pub async fn links(&self) -> Vec<(NodeRef, String, NodeRef)> {
        let mut links: Vec<_> = self
            .links
            .read()
            .await
            .iter()
            .map(|((node, aspect), referred)| (*node, aspect.clone(), *referred))
            .collect();
        links.sort();
        links
    }
}

#[async_trait]
impl ReferredMetadataService for InMemoryReferredMetadataService {
    async fn referred_node(&self, node_ref: &NodeRef, aspect: &str) -> Result<Option<NodeRef>, RepositoryError> {
        let guard = self.links.read().await;
        Ok(guard.get(&(*node_ref, aspect.to_string())).copied())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAttributeStore {
    attributes: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttributeStore for InMemoryAttributeStore {
    async fn get_attribute(&self, key: &str) -> Result<Option<Value>, RepositoryError> {
        Ok(self.attributes.read().await.get(key).cloned())
    }

    async fn set_attribute(&self, key: &str, value: Value) -> Result<(), RepositoryError> {
        self.attributes.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
