// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A category exempting classified content from automatic declassification.
///
/// Equality and hashing consider only the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExemptionCategory {
    id: String,
    display_label_key: String,
}

impl ExemptionCategory {
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

impl PartialEq for ExemptionCategory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ExemptionCategory {}

impl Hash for ExemptionCategory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ExemptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExemptionCategory{{id='{}', displayLabelKey='{}'}}", self.id, self.display_label_key)
    }
}
