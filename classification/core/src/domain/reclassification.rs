// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

/// The kind of change applied when classified content is reclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReclassificationValue {
    Upgrade,
    Downgrade,
    Declassify,
}

impl ReclassificationValue {
    pub const ALL: [ReclassificationValue; 3] = [
        ReclassificationValue::Upgrade,
        ReclassificationValue::Downgrade,
        ReclassificationValue::Declassify,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ReclassificationValue::Upgrade => "Upgrade",
            ReclassificationValue::Downgrade => "Downgrade",
            ReclassificationValue::Declassify => "Declassify",
        }
    }

    pub fn display_label_key(&self) -> &'static str {
        match self {
            ReclassificationValue::Upgrade => "rm.classification.reclassification.upgrade",
            ReclassificationValue::Downgrade => "rm.classification.reclassification.downgrade",
            ReclassificationValue::Declassify => "rm.classification.reclassification.declassify",
        }
    }
}
