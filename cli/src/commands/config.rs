// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use rm_classification_core::domain::service_config::ClassificationConfigManifest;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./rmc-config.yaml)
        #[arg(short, long, default_value = "./rmc-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,

        /// Also write a sample classification scheme into this directory
        #[arg(long, value_name = "DIR")]
        scheme_dir: Option<PathBuf>,
    },
}

pub async fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate {
            output,
            examples,
            scheme_dir,
        } => generate(output, examples, scheme_dir).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config =
        ClassificationConfigManifest::load_or_default(config_override.clone()).context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. RMC_CONFIG_PATH: {}",
            std::env::var("RMC_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./rmc-config.yaml");
        println!("  4. ~/.rmc/config.yaml");
        println!("  5. /etc/rmc/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();
    println!("  Name: {}", config.metadata.name);
    println!();

    let scheme = &config.spec.scheme;
    println!("{}", "Classification Scheme:".bold());
    println!("  Directory: {}", scheme.config_dir.display());
    print_scheme_file("Levels", &scheme.levels_path());
    print_scheme_file("Reasons", &scheme.reasons_path());
    print_scheme_file("Exemption categories", &scheme.exemption_categories_path());
    println!();

    let storage = &config.spec.storage;
    println!("{}", "Storage:".bold());
    println!("  State file: {}", display_or_memory(storage.state_file.as_deref()));
    println!("  Snapshot file: {}", display_or_memory(storage.snapshot_file.as_deref()));
    println!();

    println!("{}", "Logging:".bold());
    println!("  Level: {}", config.spec.logging.level);
    println!("  Format: {}", config.spec.logging.format);
    println!();

    Ok(())
}

fn print_scheme_file(label: &str, path: &Path) {
    let marker = if path.exists() {
        "✓".green()
    } else {
        "✗ missing".red()
    };
    println!("  {}: {} {}", label, path.display(), marker);
}

fn display_or_memory(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in-memory)".to_string())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = ClassificationConfigManifest::load_or_default(config_path).context("Failed to load configuration")?;

    config.validate().context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

async fn generate(output: PathBuf, with_examples: bool, scheme_dir: Option<PathBuf>) -> Result<()> {
    let sample = if with_examples {
        include_str!("../../templates/config-with-examples.yaml")
    } else {
        include_str!("../../templates/config-minimal.yaml")
    };

    std::fs::write(&output, sample).with_context(|| format!("Failed to write config to {:?}", output))?;

    println!("{}", format!("✓ Configuration generated: {}", output.display()).green());

    if let Some(dir) = scheme_dir {
        std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
        for (file, content) in [
            (
                "classification-levels.json",
                include_str!("../../templates/scheme/classification-levels.json"),
            ),
            (
                "classification-reasons.json",
                include_str!("../../templates/scheme/classification-reasons.json"),
            ),
            (
                "exemption-categories.json",
                include_str!("../../templates/scheme/exemption-categories.json"),
            ),
        ] {
            let path = dir.join(file);
            std::fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        }
        println!("{}", format!("✓ Sample scheme written to: {}", dir.display()).green());
    }

    Ok(())
}
