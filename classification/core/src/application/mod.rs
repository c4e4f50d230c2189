// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application services
//!
//! Use cases over the classification domain: scheme accessors, bootstrap,
//! property constraints, security clearance and content classification.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrates domain objects and repository collaborators

pub mod scheme_service;
pub mod bootstrap;
pub mod constraint;
pub mod security_clearance;
pub mod content_classification;
pub mod provider;
