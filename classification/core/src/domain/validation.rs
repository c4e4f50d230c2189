// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Scheme Validation
//!
//! Candidate level, reason and exemption-category lists are validated before
//! they become the active configuration. Checks run in a fixed order so the
//! same bad input always yields the same error:
//!
//! - list: emptiness, duplicates, then each item;
//! - level: id presence, reserved id, length, illegal characters.

use std::collections::HashSet;
use std::hash::Hash;

use crate::domain::classification_level::{ClassificationLevel, UNCLASSIFIED_ID};
use crate::domain::classification_reason::ClassificationReason;
use crate::domain::errors::{ClassificationError, ClassificationResult};
use crate::domain::exemption_category::ExemptionCategory;

/// Maximum length of a level id.
pub const MAX_LEVEL_ID_LENGTH: usize = 10;

/// Characters that are reserved in file names and may not appear in level ids.
pub const ILLEGAL_ID_CHARACTERS: [char; 9] = ['"', '*', '\\', '>', '<', '?', '/', ':', '|'];

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassificationLevelValidation;

impl ClassificationLevelValidation {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_levels(&self, levels: &[ClassificationLevel]) -> ClassificationResult<()> {
        if levels.is_empty() {
            return Err(ClassificationError::MissingConfiguration(
                "Classification level configuration is missing.".to_string(),
            ));
        }
        if let Some(duplicate) = first_duplicate(levels) {
            return Err(ClassificationError::IllegalConfiguration(format!(
                "Illegal classification level configuration. Duplicate level id: {}",
                duplicate.id()
            )));
        }
        levels.iter().try_for_each(|level| self.validate_level(level))
    }

    pub fn validate_level(&self, level: &ClassificationLevel) -> ClassificationResult<()> {
        let id = level.id();
        if id.trim().is_empty() {
            return Err(ClassificationError::MissingConfiguration(
                "Classification level ID is missing.".to_string(),
            ));
        }
        if id == UNCLASSIFIED_ID {
            return Err(ClassificationError::IllegalConfiguration(format!(
                "The Unclassified ID abbreviation '{}' is reserved for system use.",
                UNCLASSIFIED_ID
            )));
        }
        if id.chars().count() > MAX_LEVEL_ID_LENGTH {
            return Err(ClassificationError::IllegalConfiguration(format!(
                "Classification level ID '{}' has a length of {}. The maximum length is {}.",
                id,
                id.chars().count(),
                MAX_LEVEL_ID_LENGTH
            )));
        }
        if let Some(c) = id.chars().find(|c| ILLEGAL_ID_CHARACTERS.contains(c)) {
            return Err(ClassificationError::IllegalCharacters(format!(
                "Classification level ID '{}' contains the illegal character '{}'.",
                id, c
            )));
        }
        Ok(())
    }
}

/// Validation for reasons and exemption categories: ids present and unique.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemeEntityValidation;

impl SchemeEntityValidation {
    pub fn validate_reasons(&self, reasons: &[ClassificationReason]) -> ClassificationResult<()> {
        if reasons.is_empty() {
            return Err(ClassificationError::MissingConfiguration(
                "Classification reason configuration is missing.".to_string(),
            ));
        }
        if let Some(duplicate) = first_duplicate(reasons) {
            return Err(ClassificationError::IllegalConfiguration(format!(
                "Duplicate classification reason id: {}",
                duplicate.id()
            )));
        }
        if reasons.iter().any(|r| r.id().trim().is_empty()) {
            return Err(ClassificationError::MissingConfiguration(
                "Classification reason ID is missing.".to_string(),
            ));
        }
        Ok(())
    }

    /// An empty category list is allowed.
    pub fn validate_exemption_categories(&self, categories: &[ExemptionCategory]) -> ClassificationResult<()> {
        if let Some(duplicate) = first_duplicate(categories) {
            return Err(ClassificationError::IllegalConfiguration(format!(
                "Duplicate exemption category id: {}",
                duplicate.id()
            )));
        }
        if categories.iter().any(|c| c.id().trim().is_empty()) {
            return Err(ClassificationError::MissingConfiguration(
                "Exemption category ID is missing.".to_string(),
            ));
        }
        Ok(())
    }
}

fn first_duplicate<T: Eq + Hash>(items: &[T]) -> Option<&T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(*item))
}
