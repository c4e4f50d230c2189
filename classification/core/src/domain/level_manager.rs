// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Level Managers
//!
//! [`ClassificationLevelManager`] and [`ClearanceLevelManager`] are built once
//! at bootstrap from the validated level list and never change afterwards.
//! Reconfiguration needs a fresh bootstrap.

use crate::domain::classification_level::{ClassificationLevel, ClearanceLevel};
use crate::domain::errors::{ClassificationError, ClassificationResult};

/// Ordered classification levels, most secure first, `UNCLASSIFIED` last.
#[derive(Debug, Clone)]
pub struct ClassificationLevelManager {
    levels: Vec<ClassificationLevel>,
}

impl ClassificationLevelManager {
    /// Build from configured levels (most to least secure). The sentinel is
    /// appended here, so callers must not include it.
    pub fn new(levels: Vec<ClassificationLevel>) -> Self {
        let mut levels = levels;
        levels.push(ClassificationLevel::unclassified());
        Self { levels }
    }

    pub fn most_secure_level(&self) -> &ClassificationLevel {
        &self.levels[0]
    }

    pub fn find_level_by_id(&self, id: &str) -> ClassificationResult<&ClassificationLevel> {
        self.levels
            .iter()
            .find(|level| level.id() == id)
            .ok_or_else(|| ClassificationError::LevelIdNotFound(id.to_string()))
    }

    pub fn classification_levels(&self) -> &[ClassificationLevel] {
        &self.levels
    }

    /// Position in the ordered list, if present.
    pub fn index_of(&self, level: &ClassificationLevel) -> Option<usize> {
        self.levels.iter().position(|l| l == level)
    }
}

/// Clearance levels mirroring the classification levels, ending with the
/// "no clearance" level.
#[derive(Debug, Clone)]
pub struct ClearanceLevelManager {
    levels: Vec<ClearanceLevel>,
}

impl ClearanceLevelManager {
    pub fn new(levels: Vec<ClearanceLevel>) -> Self {
        Self { levels }
    }

    /// One clearance level per configured classification level, labelled like
    /// the level itself, with `UNCLASSIFIED` mapped to "no clearance".
    pub fn from_classification_levels(manager: &ClassificationLevelManager) -> Self {
        let levels = manager
            .classification_levels()
            .iter()
            .map(|level| {
                if level.is_unclassified() {
                    ClearanceLevel::no_clearance()
                } else {
                    ClearanceLevel::new(level.clone(), level.display_label_key())
                }
            })
            .collect();
        Self { levels }
    }

    pub fn most_secure_level(&self) -> &ClearanceLevel {
        &self.levels[0]
    }

    pub fn find_level_by_classification_level_id(&self, id: &str) -> ClassificationResult<&ClearanceLevel> {
        self.levels
            .iter()
            .find(|level| level.highest_classification_level().id() == id)
            .ok_or_else(|| ClassificationError::LevelIdNotFound(id.to_string()))
    }

    /// Clearance granted to users with no explicit clearance.
    pub fn default_clearance_level(&self) -> ClearanceLevel {
        ClearanceLevel::no_clearance()
    }

    pub fn clearance_levels(&self) -> &[ClearanceLevel] {
        &self.levels
    }
}
