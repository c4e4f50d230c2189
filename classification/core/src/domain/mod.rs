// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Classification scheme entities, their managers and validation, the
//! content property model and the persistence contracts the application
//! services depend on.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Implements the classification and clearance model

pub mod errors;
pub mod classification_level;
pub mod classification_reason;
pub mod exemption_category;
pub mod reclassification;
pub mod level_manager;
pub mod reason_manager;
pub mod comparator;
pub mod validation;
pub mod content_model;
pub mod content;
pub mod clearance;
pub mod repository;
pub mod events;
pub mod service_config;
