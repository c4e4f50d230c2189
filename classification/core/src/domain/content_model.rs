// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Qualified names written to and read from the repository.
//!
//! These names are a stable contract with every other consumer of the
//! content model and must not change.

pub const ASPECT_CLASSIFIED: &str = "clf:classified";
pub const PROP_INITIAL_CLASSIFICATION: &str = "clf:initialClassification";
pub const PROP_CURRENT_CLASSIFICATION: &str = "clf:currentClassification";
pub const PROP_CLASSIFICATION_AGENCY: &str = "clf:classificationAgency";
pub const PROP_CLASSIFIED_BY: &str = "clf:classifiedBy";
pub const PROP_CLASSIFICATION_REASONS: &str = "clf:classificationReasons";
pub const PROP_DOWNGRADE_DATE: &str = "clf:downgradeDate";
pub const PROP_DOWNGRADE_EVENT: &str = "clf:downgradeEvent";
pub const PROP_DOWNGRADE_INSTRUCTIONS: &str = "clf:downgradeInstructions";
pub const PROP_DECLASSIFICATION_DATE: &str = "clf:declassificationDate";
pub const PROP_DECLASSIFICATION_EVENT: &str = "clf:declassificationEvent";
pub const PROP_DECLASSIFICATION_EXEMPTIONS: &str = "clf:declassificationExemptions";
pub const PROP_LAST_RECLASSIFY_BY: &str = "clf:lastReclassifyBy";
pub const PROP_LAST_RECLASSIFY_REASON: &str = "clf:lastReclassifyReason";

pub const ASPECT_SECURITY_CLEARANCE: &str = "clf:securityClearance";
pub const PROP_CLEARANCE_LEVEL: &str = "clf:clearanceLevel";

/// Quick-share aspect; shared content may not be classified.
pub const ASPECT_SHARED: &str = "qshare:shared";

pub const TYPE_CONTENT: &str = "cm:content";
pub const TYPE_FOLDER: &str = "cm:folder";
