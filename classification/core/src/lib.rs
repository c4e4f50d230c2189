// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Records-management classification core
//!
//! Classification schemes, content classification and security clearance.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Domain model, application services and infrastructure adapters

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
