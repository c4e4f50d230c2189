// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A reason content may be classified for (e.g. "1.4(a)").
///
/// Equality and hashing consider only the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationReason {
    id: String,
    display_label_key: String,
}

impl ClassificationReason {
    pub fn new(id: impl Into<String>, display_label_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_label_key: display_label_key.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_label_key(&self) -> &str {
        &self.display_label_key
    }
}

impl PartialEq for ClassificationReason {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassificationReason {}

impl Hash for ClassificationReason {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ClassificationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassificationReason{{id='{}', displayLabelKey='{}'}}", self.id, self.display_label_key)
    }
}
