// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Content classification commands
//!
//! Commands: create, classify, status, freeze, unfreeze

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use rm_classification_core::domain::content::{ClassificationAspectProperties, Node, NodeKind, NodeRef};
use rm_classification_core::domain::repository::NodeRepository;

use crate::embedded::EmbeddedServices;

#[derive(Subcommand)]
pub enum ContentCommand {
    /// Create an empty content node in the repository snapshot
    Create {
        /// Create a folder instead of content
        #[arg(long)]
        folder: bool,
    },

    /// Classify (or reclassify) a content node
    Classify(ClassifyArgs),

    /// Show the classification of a node
    Status {
        #[arg(value_name = "NODE_REF")]
        node_ref: NodeRef,

        /// Also report whether this user may access the node
        #[arg(long, value_name = "USER")]
        user: Option<String>,
    },

    /// Place a node under a legal hold
    Freeze {
        #[arg(value_name = "NODE_REF")]
        node_ref: NodeRef,
    },

    /// Release a node from its legal hold
    Unfreeze {
        #[arg(value_name = "NODE_REF")]
        node_ref: NodeRef,
    },
}

#[derive(Args)]
pub struct ClassifyArgs {
    #[arg(value_name = "NODE_REF")]
    node_ref: NodeRef,

    /// User performing the classification
    #[arg(long = "as", value_name = "USER", env = "RMC_USER")]
    user: String,

    /// Classification level id
    #[arg(short, long)]
    level: String,

    /// Person or authority the classification is attributed to
    #[arg(long)]
    by: String,

    /// Classification reason id (repeatable)
    #[arg(short, long = "reason", required = true)]
    reasons: Vec<String>,

    #[arg(long)]
    agency: Option<String>,

    /// Exemption category id (repeatable)
    #[arg(long = "exemption")]
    exemptions: Vec<String>,

    #[arg(long, value_name = "RFC3339")]
    downgrade_date: Option<DateTime<Utc>>,

    #[arg(long)]
    downgrade_event: Option<String>,

    #[arg(long)]
    downgrade_instructions: Option<String>,

    #[arg(long, value_name = "RFC3339")]
    declassification_date: Option<DateTime<Utc>>,

    #[arg(long)]
    declassification_event: Option<String>,

    /// Reason for reclassifying already classified content
    #[arg(long)]
    reclassify_reason: Option<String>,
}

impl ClassifyArgs {
    fn properties(&self) -> ClassificationAspectProperties {
        let mut properties = ClassificationAspectProperties::new(&self.level, &self.by, &self.reasons);
        properties.classification_agency = self.agency.clone();
        properties.exemption_category_ids = self.exemptions.iter().cloned().collect();
        properties.downgrade_date = self.downgrade_date;
        properties.downgrade_event = self.downgrade_event.clone();
        properties.downgrade_instructions = self.downgrade_instructions.clone();
        properties.declassification_date = self.declassification_date;
        properties.declassification_event = self.declassification_event.clone();
        if self.reclassify_reason.is_some() {
            properties.last_reclassify_by = Some(self.user.clone());
            properties.last_reclassify_reason = self.reclassify_reason.clone();
        }
        properties
    }
}

pub async fn handle_command(command: ContentCommand, config_path: Option<PathBuf>) -> Result<()> {
    let services = EmbeddedServices::new(config_path).await?;
    match command {
        ContentCommand::Create { folder } => create(&services, folder).await,
        ContentCommand::Classify(args) => classify(&services, args).await,
        ContentCommand::Status { node_ref, user } => status(&services, node_ref, user).await,
        ContentCommand::Freeze { node_ref } => {
            services.repositories.freeze.freeze(node_ref).await;
            services.persist().await?;
            println!("{}", format!("✓ {} frozen", node_ref).green());
            Ok(())
        }
        ContentCommand::Unfreeze { node_ref } => {
            services.repositories.freeze.unfreeze(&node_ref).await;
            services.persist().await?;
            println!("{}", format!("✓ {} released", node_ref).green());
            Ok(())
        }
    }
}

async fn create(services: &EmbeddedServices, folder: bool) -> Result<()> {
    let node = Node::new(if folder { NodeKind::Folder } else { NodeKind::Content });
    services.repositories.nodes.save(&node).await?;
    services.persist().await?;
    println!("{}", node.node_ref);
    Ok(())
}

async fn classify(services: &EmbeddedServices, args: ClassifyArgs) -> Result<()> {
    let properties = args.properties();
    let already_classified = services.content.is_classified(&args.node_ref).await?;

    let result = if already_classified {
        services
            .content
            .edit_classified_content(&args.user, &properties, &args.node_ref)
            .await
    } else {
        services
            .content
            .classify_content(&args.user, &properties, &args.node_ref)
            .await
    };
    result.with_context(|| format!("Failed to classify {}", args.node_ref))?;

    services.persist().await?;

    let verb = if already_classified { "reclassified" } else { "classified" };
    println!(
        "{}",
        format!("✓ {} {} as {}", args.node_ref, verb, properties.classification_level_id).green()
    );
    Ok(())
}

async fn status(services: &EmbeddedServices, node_ref: NodeRef, user: Option<String>) -> Result<()> {
    let node = services
        .repositories
        .nodes
        .find_by_ref(&node_ref)
        .await?
        .with_context(|| format!("Node {} not found", node_ref))?;
    let level = services.content.get_current_classification(&node_ref).await?;

    println!("{}", "Node:".bold());
    println!("  Ref: {}", node.node_ref);
    println!("  Type: {}", node.kind.type_name());
    println!(
        "  Classification: {} {}",
        level.id().bold(),
        level.display_label_key().dimmed()
    );
    if !node.properties.is_empty() {
        println!("{}", "Properties:".bold());
        for (name, value) in &node.properties {
            println!("  {}: {}", name, serde_json::to_string(value)?);
        }
    }

    if let Some(user) = user {
        let cleared = services.content.has_clearance(&user, &node_ref).await?;
        let verdict = if cleared {
            "cleared".green()
        } else {
            "not cleared".red()
        };
        println!();
        println!("  {}: {}", user, verdict);
    }
    Ok(())
}
