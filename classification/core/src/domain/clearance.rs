// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Security Clearance
//!
//! People, their clearance, and the paging types used when listing many
//! users' clearances through the person directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::classification_level::ClearanceLevel;
use crate::domain::content::PropertyValue;
use crate::domain::content_model::PROP_CLEARANCE_LEVEL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInfo {
    pub user_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl PersonInfo {
    pub fn new(user_name: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A person node in the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub info: PersonInfo,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Person {
    pub fn new(info: PersonInfo) -> Self {
        Self {
            info,
            properties: BTreeMap::new(),
        }
    }

    /// Classification level id stored as this person's clearance, if any.
    pub fn clearance_level_id(&self) -> Option<&str> {
        self.properties.get(PROP_CLEARANCE_LEVEL).and_then(PropertyValue::as_text)
    }

    pub fn set_clearance_level_id(&mut self, level_id: impl Into<String>) {
        self.properties
            .insert(PROP_CLEARANCE_LEVEL.to_string(), PropertyValue::Text(level_id.into()));
    }
}

/// One user's maximum accessible classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityClearance {
    pub person_info: PersonInfo,
    pub clearance_level: ClearanceLevel,
}

impl SecurityClearance {
    pub fn new(person_info: PersonInfo, clearance_level: ClearanceLevel) -> Self {
        Self {
            person_info,
            clearance_level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonSortField {
    UserName,
    FirstName,
    LastName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: PersonSortField,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingRequest {
    pub skip_count: usize,
    pub max_items: usize,
    #[serde(default)]
    pub query_execution_id: Option<String>,
}

impl PagingRequest {
    pub fn new(skip_count: usize, max_items: usize) -> Self {
        Self {
            skip_count,
            max_items,
            query_execution_id: None,
        }
    }
}

impl Default for PagingRequest {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

/// Query for a page of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQueryParams {
    /// Matched against user name, first and last name. `None` lists everyone.
    pub search_term: Option<String>,
    #[serde(default)]
    pub sort: Vec<SortOrder>,
    #[serde(default)]
    pub paging: PagingRequest,
}

impl UserQueryParams {
    pub fn new(search_term: Option<String>) -> Self {
        Self {
            search_term,
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, field: PersonSortField, ascending: bool) -> Self {
        self.sort.push(SortOrder { field, ascending });
        self
    }

    pub fn with_paging(mut self, paging: PagingRequest) -> Self {
        self.paging = paging;
        self
    }
}

/// A page of results plus the directory's own hit-count metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingResults<T> {
    pub page: Vec<T>,
    pub has_more_items: bool,
    /// Lower and upper bound of the total hit count, when known.
    pub total_result_count: Option<(usize, usize)>,
    pub query_execution_id: Option<String>,
}

impl<T> PagingResults<T> {
    /// Replace the page contents, keeping the directory's metadata untouched.
    pub fn with_page<U>(self, page: Vec<U>) -> PagingResults<U> {
        PagingResults {
            page,
            has_more_items: self.has_more_items,
            total_result_count: self.total_result_count,
            query_execution_id: self.query_execution_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_clearance_property() {
        let mut person = Person::new(PersonInfo::new("jdoe", "Jane", "Doe"));
        assert!(person.clearance_level_id().is_none());
        person.set_clearance_level_id("S");
        assert_eq!(person.clearance_level_id(), Some("S"));
    }

    #[test]
    fn test_with_page_keeps_metadata() {
        let results = PagingResults {
            page: vec![1, 2, 3],
            has_more_items: true,
            total_result_count: Some((10, 12)),
            query_execution_id: Some("q-1".to_string()),
        };
        let mapped = results.with_page(vec!["a", "b", "c"]);
        assert_eq!(mapped.page, vec!["a", "b", "c"]);
        assert!(mapped.has_more_items);
        assert_eq!(mapped.total_result_count, Some((10, 12)));
        assert_eq!(mapped.query_execution_id.as_deref(), Some("q-1"));
    }
}
