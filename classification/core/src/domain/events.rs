// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::NodeRef;

/// Events published by the classification services after a change has been
/// written. They are notifications only; no classification history is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClassificationEvent {
    SchemeBootstrapped {
        level_ids: Vec<String>,
        reason_count: usize,
        exemption_category_count: usize,
        bootstrapped_at: DateTime<Utc>,
    },
    ContentClassified {
        node_ref: NodeRef,
        classification_level_id: String,
        /// Level the content carried before this call, if it was classified.
        previous_level_id: Option<String>,
        classified_by: String,
        classified_at: DateTime<Utc>,
    },
    ClearanceGranted {
        user_name: String,
        classification_level_id: String,
        granted_by: String,
        granted_at: DateTime<Utc>,
    },
}

impl ClassificationEvent {
    pub fn node_ref(&self) -> Option<&NodeRef> {
        match self {
            ClassificationEvent::ContentClassified { node_ref, .. } => Some(node_ref),
            _ => None,
        }
    }
}
