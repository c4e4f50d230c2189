// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::classification_reason::ClassificationReason;
use crate::domain::errors::{ClassificationError, ClassificationResult};
use crate::domain::exemption_category::ExemptionCategory;

/// Immutable list of configured classification reasons.
#[derive(Debug, Clone, Default)]
pub struct ClassificationReasonManager {
    reasons: Vec<ClassificationReason>,
}

impl ClassificationReasonManager {
    pub fn new(reasons: Vec<ClassificationReason>) -> Self {
        Self { reasons }
    }

    pub fn classification_reasons(&self) -> &[ClassificationReason] {
        &self.reasons
    }

    pub fn find_reason_by_id(&self, id: &str) -> ClassificationResult<&ClassificationReason> {
        self.reasons
            .iter()
            .find(|reason| reason.id() == id)
            .ok_or_else(|| ClassificationError::ReasonIdNotFound(id.to_string()))
    }
}

/// Immutable list of configured exemption categories.
#[derive(Debug, Clone, Default)]
pub struct ExemptionCategoryManager {
    categories: Vec<ExemptionCategory>,
}

impl ExemptionCategoryManager {
    pub fn new(categories: Vec<ExemptionCategory>) -> Self {
        Self { categories }
    }

    pub fn exemption_categories(&self) -> &[ExemptionCategory] {
        &self.categories
    }

    pub fn find_category_by_id(&self, id: &str) -> ClassificationResult<&ExemptionCategory> {
        self.categories
            .iter()
            .find(|category| category.id() == id)
            .ok_or_else(|| ClassificationError::ExemptionCategoryIdNotFound(id.to_string()))
    }
}
