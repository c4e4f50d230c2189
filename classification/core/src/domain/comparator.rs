// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Classification Level Ordering
//!
//! Levels are ordered by their position in the level manager: a lower index is
//! more secure. `compare(a, b) > 0` iff `a` is strictly more secure than `b`.
//!
//! A level that is not in the manager's list is given index `-1`. With the
//! `index(b) - index(a)` formula such a level compares as more secure than
//! every configured level. Level lookups go through
//! [`ClassificationLevelManager::find_level_by_id`] so untracked levels should
//! not reach the comparator in practice.

use std::cmp::Ordering;

use crate::domain::classification_level::ClassificationLevel;
use crate::domain::level_manager::ClassificationLevelManager;

pub struct ClassificationLevelComparator<'a> {
    manager: &'a ClassificationLevelManager,
}

impl<'a> ClassificationLevelComparator<'a> {
    pub fn new(manager: &'a ClassificationLevelManager) -> Self {
        Self { manager }
    }

    fn index_of(&self, level: &ClassificationLevel) -> i64 {
        self.manager.index_of(level).map(|i| i as i64).unwrap_or(-1)
    }

    /// Positive when `one` is more secure than `other`, zero when equal.
    pub fn compare(&self, one: &ClassificationLevel, other: &ClassificationLevel) -> i64 {
        self.index_of(other) - self.index_of(one)
    }

    /// `compare` as an [`Ordering`], `Greater` meaning more secure.
    pub fn ordering(&self, one: &ClassificationLevel, other: &ClassificationLevel) -> Ordering {
        self.compare(one, other).cmp(&0)
    }

    /// True when `cleared` is at least as secure as `required`.
    pub fn dominates(&self, cleared: &ClassificationLevel, required: &ClassificationLevel) -> bool {
        self.compare(cleared, required) >= 0
    }
}
