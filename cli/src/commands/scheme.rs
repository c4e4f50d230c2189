// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Classification scheme inspection
//!
//! Commands: show

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

use crate::embedded::EmbeddedServices;

#[derive(Subcommand)]
pub enum SchemeCommand {
    /// Show the active classification scheme
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle_command(command: SchemeCommand, config_path: Option<PathBuf>) -> Result<()> {
    let services = EmbeddedServices::new(config_path).await?;
    match command {
        SchemeCommand::Show { json } => show(&services, json),
    }
}

fn show(services: &EmbeddedServices, as_json: bool) -> Result<()> {
    let scheme = &services.scheme;

    if as_json {
        let value = json!({
            "classificationLevels": scheme.classification_levels(),
            "clearanceLevels": scheme.clearance_levels(),
            "classificationReasons": scheme.classification_reasons(),
            "exemptionCategories": scheme.exemption_categories(),
            "reclassificationValues": scheme
                .reclassification_values()
                .iter()
                .map(|v| v.id())
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Classification levels (most secure first):".bold());
    for level in scheme.classification_levels() {
        println!("  {:<12} {}", level.id().bold(), level.display_label_key().dimmed());
    }
    println!();

    println!("{}", "Clearance levels:".bold());
    for clearance in scheme.clearance_levels() {
        println!(
            "  {:<12} {}",
            clearance.highest_classification_level().id().bold(),
            clearance.display_label_key().dimmed()
        );
    }
    println!();

    println!("{}", "Classification reasons:".bold());
    for reason in scheme.classification_reasons() {
        println!("  {:<12} {}", reason.id().bold(), reason.display_label_key().dimmed());
    }
    println!();

    let categories = scheme.exemption_categories();
    println!("{}", "Exemption categories:".bold());
    if categories.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for category in categories {
        println!("  {:<12} {}", category.id().bold(), category.display_label_key().dimmed());
    }
    println!();

    println!("{}", "Reclassification values:".bold());
    for value in scheme.reclassification_values() {
        println!("  {}", value.id());
    }

    Ok(())
}
