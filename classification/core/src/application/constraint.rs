// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Classification Property Constraints
//!
//! List-of-values constraints for the classification properties. The allowed
//! values are read from the live scheme service on every evaluation, so a
//! re-bootstrapped scheme takes effect without rebuilding the constraint.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::application::provider::CLASSIFICATION_SCHEME_SERVICE;
use crate::application::scheme_service::ClassificationSchemeService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Level,
    Reason,
    ExemptionCategory,
    InitialLevel,
    ReclassificationValue,
}

impl ConstraintKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Level => "clf:classificationLevelConstraint",
            ConstraintKind::Reason => "clf:classificationReasonConstraint",
            ConstraintKind::ExemptionCategory => "clf:exemptionCategoryConstraint",
            ConstraintKind::InitialLevel => "clf:initialClassificationConstraint",
            ConstraintKind::ReclassificationValue => "clf:reclassificationValueConstraint",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("{constraint}: value is not a string: {value}")]
    NonString { constraint: &'static str, value: String },

    #[error("{constraint}: '{value}' is not one of the allowed values {allowed:?}")]
    InvalidValue {
        constraint: &'static str,
        value: String,
        allowed: Vec<String>,
    },
}

pub struct ClassificationConstraint {
    kind: ConstraintKind,
    scheme: Arc<ClassificationSchemeService>,
}

impl ClassificationConstraint {
    pub fn new(kind: ConstraintKind, scheme: Arc<ClassificationSchemeService>) -> Self {
        Self { kind, scheme }
    }

    /// Build against the registered scheme service. `None` until the
    /// services have been wired.
    pub fn registered(kind: ConstraintKind) -> Option<Self> {
        CLASSIFICATION_SCHEME_SERVICE.get().map(|scheme| Self::new(kind, scheme))
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn allowed_values(&self) -> Vec<String> {
        match self.kind {
            ConstraintKind::Level | ConstraintKind::InitialLevel => self
                .scheme
                .classification_levels()
                .iter()
                .map(|l| l.id().to_string())
                .collect(),
            ConstraintKind::Reason => self
                .scheme
                .classification_reasons()
                .iter()
                .map(|r| r.id().to_string())
                .collect(),
            ConstraintKind::ExemptionCategory => self
                .scheme
                .exemption_categories()
                .iter()
                .map(|c| c.id().to_string())
                .collect(),
            ConstraintKind::ReclassificationValue => self
                .scheme
                .reclassification_values()
                .iter()
                .map(|v| v.id().to_string())
                .collect(),
        }
    }

    /// Null passes; arrays are checked element by element.
    pub fn evaluate(&self, value: &Value) -> Result<(), ConstraintViolation> {
        match value {
            Value::Null => Ok(()),
            Value::Array(values) => values.iter().try_for_each(|v| self.evaluate_single(v)),
            other => self.evaluate_single(other),
        }
    }

    fn evaluate_single(&self, value: &Value) -> Result<(), ConstraintViolation> {
        let candidate = match value {
            Value::Null => return Ok(()),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(ConstraintViolation::NonString {
                    constraint: self.kind.name(),
                    value: value.to_string(),
                })
            }
        };

        let allowed = self.allowed_values();
        if allowed.contains(&candidate) {
            Ok(())
        } else {
            Err(ConstraintViolation::InvalidValue {
                constraint: self.kind.name(),
                value: candidate,
                allowed,
            })
        }
    }
}
