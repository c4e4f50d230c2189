// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Classification error taxonomy
//!
//! Every failure of the classification subsystem is terminal for the
//! operation that raised it. Nothing here is retried; callers receive the
//! error untouched.

use thiserror::Error;

use crate::domain::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum ClassificationError {
    /// Required configuration is absent (no levels, no reasons, blank id).
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// Configuration was understood but rejected.
    #[error("Illegal configuration: {0}")]
    IllegalConfiguration(String),

    #[error("Illegal characters in configuration: {0}")]
    IllegalCharacters(String),

    /// Configuration could not be read or parsed at all.
    #[error("Malformed configuration: {0}")]
    MalformedConfiguration(String),

    #[error("Classification level not found: {0}")]
    LevelIdNotFound(String),

    #[error("Classification reason not found: {0}")]
    ReasonIdNotFound(String),

    #[error("Exemption category not found: {0}")]
    ExemptionCategoryIdNotFound(String),

    #[error("Invalid node {node_ref}: {reason}")]
    InvalidNode { node_ref: String, reason: String },

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ClassificationError {
    pub fn invalid_node(node_ref: impl ToString, reason: impl Into<String>) -> Self {
        ClassificationError::InvalidNode {
            node_ref: node_ref.to_string(),
            reason: reason.into(),
        }
    }
}

pub type ClassificationResult<T> = Result<T, ClassificationError>;
