// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Content Nodes
//!
//! A repository node is a typed property bag with a set of aspects. The
//! classification state of a content item lives entirely in that bag: there
//! is no explicit state enum, only the `clf:classified` aspect and the
//! current-classification property.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::content_model::{TYPE_CONTENT, TYPE_FOLDER};

const STORE_PREFIX: &str = "workspace://SpacesStore/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef(pub Uuid);

impl NodeRef {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", STORE_PREFIX, self.0)
    }
}

impl FromStr for NodeRef {
    type Err = uuid::Error;

    /// Accepts either a bare UUID or a `workspace://SpacesStore/` reference.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(STORE_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(raw)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Content,
    Folder,
    Other(String),
}

impl NodeKind {
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Content => TYPE_CONTENT,
            NodeKind::Folder => TYPE_FOLDER,
            NodeKind::Other(name) => name,
        }
    }

    pub fn is_content(&self) -> bool {
        matches!(self, NodeKind::Content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Text(String),
    TextList(Vec<String>),
    Date(DateTime<Utc>),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::TextList(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            PropertyValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_ref: NodeRef,
    pub kind: NodeKind,
    #[serde(default)]
    pub aspects: BTreeSet<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            node_ref: NodeRef::new(),
            kind,
            aspects: BTreeSet::new(),
            properties: BTreeMap::new(),
        }
    }

    pub fn has_aspect(&self, aspect: &str) -> bool {
        self.aspects.contains(aspect)
    }

    pub fn add_aspect(&mut self, aspect: &str) {
        self.aspects.insert(aspect.to_string());
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn text_property(&self, name: &str) -> Option<&str> {
        self.property(name).and_then(PropertyValue::as_text)
    }

    pub fn set_property(&mut self, name: &str, value: PropertyValue) {
        self.properties.insert(name.to_string(), value);
    }

    /// Set or clear an optional property.
    pub fn set_optional_property(&mut self, name: &str, value: Option<PropertyValue>) {
        match value {
            Some(value) => self.set_property(name, value),
            None => {
                self.properties.remove(name);
            }
        }
    }
}

/// Properties supplied when classifying or reclassifying content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationAspectProperties {
    pub classification_level_id: String,
    pub classified_by: String,
    #[serde(default)]
    pub classification_agency: Option<String>,
    #[serde(default)]
    pub classification_reason_ids: BTreeSet<String>,
    #[serde(default)]
    pub downgrade_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub downgrade_event: Option<String>,
    #[serde(default)]
    pub downgrade_instructions: Option<String>,
    #[serde(default)]
    pub declassification_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub declassification_event: Option<String>,
    #[serde(default)]
    pub exemption_category_ids: BTreeSet<String>,
    #[serde(default)]
    pub last_reclassify_by: Option<String>,
    #[serde(default)]
    pub last_reclassify_reason: Option<String>,
}

impl ClassificationAspectProperties {
    pub fn new(
        classification_level_id: impl Into<String>,
        classified_by: impl Into<String>,
        reason_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            classification_level_id: classification_level_id.into(),
            classified_by: classified_by.into(),
            classification_reason_ids: reason_ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}
