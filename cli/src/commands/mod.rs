// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the classification CLI

pub mod clearance;
pub mod config;
pub mod content;
pub mod scheme;

pub use self::clearance::ClearanceCommand;
pub use self::config::ConfigCommand;
pub use self::content::ContentCommand;
pub use self::scheme::SchemeCommand;
