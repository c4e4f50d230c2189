// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Records-Management Classification CLI
//!
//! The `rmc` binary runs the classification services in-process against the
//! configured scheme files and repository snapshot.
//!
//! ## Commands
//!
//! - `rmc config show|validate|generate` - Configuration management
//! - `rmc scheme show` - Inspect the active classification scheme
//! - `rmc content create|classify|status|freeze|unfreeze` - Content classification
//! - `rmc clearance show|list|grant|add-user` - Security clearance

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod embedded;

use commands::{ClearanceCommand, ConfigCommand, ContentCommand, SchemeCommand};

/// Records-management classification and security clearance
#[derive(Parser)]
#[command(name = "rmc")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, env = "RMC_CONFIG_PATH", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides spec.logging.level
    #[arg(long, global = true, env = "RMC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format (text, json); overrides spec.logging.format
    #[arg(long, global = true, env = "RMC_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Classification scheme inspection
    #[command(name = "scheme")]
    Scheme {
        #[command(subcommand)]
        command: SchemeCommand,
    },

    /// Content classification
    #[command(name = "content")]
    Content {
        #[command(subcommand)]
        command: ContentCommand,
    },

    /// Security clearance management
    #[command(name = "clearance")]
    Clearance {
        #[command(subcommand)]
        command: ClearanceCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = embedded::resolve_logging(cli.config.clone(), cli.log_level.clone(), cli.log_format.clone());
    init_logging(&logging.level, &logging.format)?;

    match cli.command {
        Some(Commands::Config { command }) => commands::config::handle_command(command, cli.config).await,
        Some(Commands::Scheme { command }) => commands::scheme::handle_command(command, cli.config).await,
        Some(Commands::Content { command }) => commands::content::handle_command(command, cli.config).await,
        Some(Commands::Clearance { command }) => commands::clearance::handle_command(command, cli.config).await,
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        "json" => builder.json().init(),
        "text" => builder.compact().init(),
        other => anyhow::bail!("Invalid log format '{}'. Must be 'json' or 'text'", other),
    }

    Ok(())
}
