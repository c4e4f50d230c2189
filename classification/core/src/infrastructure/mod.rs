// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure
//!
//! Adapters behind the domain repository traits, the scheme configuration
//! loader and the in-process event bus.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Implements persistence, configuration loading and eventing

pub mod config_loader;
pub mod event_bus;
pub mod repositories;
