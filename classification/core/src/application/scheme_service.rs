// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Classification Scheme Service
//!
//! Read-only access to the active scheme: levels, reasons, exemption
//! categories and reclassification values. The scheme is swapped as a whole
//! when a new bootstrap completes, so readers always see one consistent
//! snapshot.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::domain::classification_level::{ClassificationLevel, ClearanceLevel};
use crate::domain::classification_reason::ClassificationReason;
use crate::domain::comparator::ClassificationLevelComparator;
use crate::domain::errors::ClassificationResult;
use crate::domain::exemption_category::ExemptionCategory;
use crate::domain::level_manager::{ClassificationLevelManager, ClearanceLevelManager};
use crate::domain::reason_manager::{ClassificationReasonManager, ExemptionCategoryManager};
use crate::domain::reclassification::ReclassificationValue;

/// The managers produced by one bootstrap.
#[derive(Debug, Clone)]
pub struct ClassificationScheme {
    pub levels: ClassificationLevelManager,
    pub clearance_levels: ClearanceLevelManager,
    pub reasons: ClassificationReasonManager,
    pub exemption_categories: ExemptionCategoryManager,
}

impl ClassificationScheme {
    /// `levels` are the configured levels without the `UNCLASSIFIED` sentinel.
    pub fn new(
        levels: Vec<ClassificationLevel>,
        reasons: Vec<ClassificationReason>,
        exemption_categories: Vec<ExemptionCategory>,
    ) -> Self {
        let levels = ClassificationLevelManager::new(levels);
        let clearance_levels = ClearanceLevelManager::from_classification_levels(&levels);
        Self {
            levels,
            clearance_levels,
            reasons: ClassificationReasonManager::new(reasons),
            exemption_categories: ExemptionCategoryManager::new(exemption_categories),
        }
    }

    pub fn comparator(&self) -> ClassificationLevelComparator<'_> {
        ClassificationLevelComparator::new(&self.levels)
    }
}

pub struct ClassificationSchemeService {
    scheme: RwLock<Arc<ClassificationScheme>>,
}

impl ClassificationSchemeService {
    pub fn new(scheme: ClassificationScheme) -> Self {
        Self {
            scheme: RwLock::new(Arc::new(scheme)),
        }
    }

    /// Replace the active scheme after a fresh bootstrap.
    pub fn install(&self, scheme: ClassificationScheme) {
        *self.scheme.write() = Arc::new(scheme);
    }

    pub fn scheme(&self) -> Arc<ClassificationScheme> {
        self.scheme.read().clone()
    }

    /// All levels, most secure first, `UNCLASSIFIED` last.
    pub fn classification_levels(&self) -> Vec<ClassificationLevel> {
        self.scheme().levels.classification_levels().to_vec()
    }

    /// The levels a holder of `clearance` may see: from the clearance's
    /// highest level down to `UNCLASSIFIED`.
    pub fn classification_levels_within(&self, clearance: &ClearanceLevel) -> Vec<ClassificationLevel> {
        let scheme = self.scheme();
        let levels = scheme.levels.classification_levels();
        match scheme.levels.index_of(clearance.highest_classification_level()) {
            Some(index) => levels[index..].to_vec(),
            None => Vec::new(),
        }
    }

    pub fn classification_reasons(&self) -> Vec<ClassificationReason> {
        self.scheme().reasons.classification_reasons().to_vec()
    }

    pub fn exemption_categories(&self) -> Vec<ExemptionCategory> {
        self.scheme().exemption_categories.exemption_categories().to_vec()
    }

    pub fn reclassification_values(&self) -> Vec<ReclassificationValue> {
        ReclassificationValue::ALL.to_vec()
    }

    pub fn clearance_levels(&self) -> Vec<ClearanceLevel> {
        self.scheme().clearance_levels.clearance_levels().to_vec()
    }

    pub fn classification_level_by_id(&self, id: &str) -> ClassificationResult<ClassificationLevel> {
        self.scheme().levels.find_level_by_id(id).cloned()
    }

    pub fn classification_reason_by_id(&self, id: &str) -> ClassificationResult<ClassificationReason> {
        self.scheme().reasons.find_reason_by_id(id).cloned()
    }

    pub fn exemption_category_by_id(&self, id: &str) -> ClassificationResult<ExemptionCategory> {
        self.scheme().exemption_categories.find_category_by_id(id).cloned()
    }

    pub fn unclassified_level(&self) -> ClassificationLevel {
        ClassificationLevel::unclassified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ClassificationError;

    fn scheme(level_ids: &[&str]) -> ClassificationScheme {
        ClassificationScheme::new(
            level_ids.iter().map(|id| ClassificationLevel::new(*id, *id)).collect(),
            vec![ClassificationReason::new("1.4(a)", "a")],
            vec![ExemptionCategory::new("25X1", "x1")],
        )
    }

    #[test]
    fn test_lookups() {
        let service = ClassificationSchemeService::new(scheme(&["TS", "S"]));
        assert_eq!(service.classification_levels().len(), 3);
        assert_eq!(service.classification_level_by_id("S").unwrap().id(), "S");
        assert!(matches!(
            service.classification_level_by_id("X"),
            Err(ClassificationError::LevelIdNotFound(_))
        ));
        assert_eq!(service.classification_reason_by_id("1.4(a)").unwrap().id(), "1.4(a)");
        assert!(service.exemption_category_by_id("25X1").is_ok());
        assert_eq!(service.reclassification_values().len(), 3);
        assert!(service.unclassified_level().is_unclassified());
    }

    #[test]
    fn test_levels_within_clearance() {
        let service = ClassificationSchemeService::new(scheme(&["TS", "S", "C"]));
        let scheme = service.scheme();
        let secret = scheme.clearance_levels.find_level_by_classification_level_id("S").unwrap();

        let ids: Vec<String> = service
            .classification_levels_within(secret)
            .iter()
            .map(|l| l.id().to_string())
            .collect();
        assert_eq!(ids, vec!["S", "C", "U"]);

        let none = ClearanceLevel::no_clearance();
        let ids: Vec<String> = service
            .classification_levels_within(&none)
            .iter()
            .map(|l| l.id().to_string())
            .collect();
        assert_eq!(ids, vec!["U"]);
    }

    #[test]
    fn test_install_replaces_scheme() {
        let service = ClassificationSchemeService::new(scheme(&["TS"]));
        let before = service.scheme();
        service.install(scheme(&["TS", "S"]));

        assert_eq!(before.levels.classification_levels().len(), 2);
        assert_eq!(service.classification_levels().len(), 3);
    }
}
