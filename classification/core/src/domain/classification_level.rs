// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Classification Levels
//!
//! A [`ClassificationLevel`] is an immutable `(id, display label key)` pair.
//! Two levels are equal when their ids are equal; the label is ignored by
//! `PartialEq` and `Hash`. This means a set keyed by levels deduplicates
//! entries that differ only by label, and a reconfigured label alone does not
//! make two level lists unequal.
//!
//! [`ClearanceLevel`] wraps the most secure level a user may access, with its
//! own label so that "no clearance" and "unclassified" read differently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Id of the sentinel level appended to every level list.
pub const UNCLASSIFIED_ID: &str = "U";

pub const UNCLASSIFIED_DISPLAY_LABEL_KEY: &str = "rm.classification.unclassified";

pub const NO_CLEARANCE_DISPLAY_LABEL_KEY: &str = "rm.classification.noClearance";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationLevel {
    id: String,
    display_label_key: String,
}

impl ClassificationLevel {
    pub fn new(id: impl Into<String>, display_label_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_label_key: display_label_key.into(),
        }
    }

    /// The least secure level, always last in a level manager.
    pub fn unclassified() -> Self {
        Self::new(UNCLASSIFIED_ID, UNCLASSIFIED_DISPLAY_LABEL_KEY)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_label_key(&self) -> &str {
        &self.display_label_key
    }

    pub fn is_unclassified(&self) -> bool {
        self.id == UNCLASSIFIED_ID
    }
}

impl PartialEq for ClassificationLevel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClassificationLevel {}

impl Hash for ClassificationLevel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ClassificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassificationLevel{{id='{}', displayLabelKey='{}'}}", self.id, self.display_label_key)
    }
}

/// The highest classification level a user is cleared to see.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceLevel {
    highest_classification_level: ClassificationLevel,
    display_label_key: String,
}

impl ClearanceLevel {
    pub fn new(highest_classification_level: ClassificationLevel, display_label_key: impl Into<String>) -> Self {
        Self {
            highest_classification_level,
            display_label_key: display_label_key.into(),
        }
    }

    /// Clearance for nothing above `UNCLASSIFIED`.
    pub fn no_clearance() -> Self {
        Self::new(ClassificationLevel::unclassified(), NO_CLEARANCE_DISPLAY_LABEL_KEY)
    }

    pub fn highest_classification_level(&self) -> &ClassificationLevel {
        &self.highest_classification_level
    }

    pub fn display_label_key(&self) -> &str {
        &self.display_label_key
    }
}
