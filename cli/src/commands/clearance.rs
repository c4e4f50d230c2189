// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Security clearance commands
//!
//! Commands: show, list, grant, add-user

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use rm_classification_core::domain::clearance::{
    PagingRequest, Person, PersonInfo, PersonSortField, SecurityClearance, UserQueryParams,
};
use rm_classification_core::domain::repository::PersonRepository;

use crate::embedded::EmbeddedServices;

#[derive(Clone, Copy, ValueEnum)]
pub enum SortField {
    UserName,
    FirstName,
    LastName,
}

impl From<SortField> for PersonSortField {
    fn from(field: SortField) -> Self {
        match field {
            SortField::UserName => PersonSortField::UserName,
            SortField::FirstName => PersonSortField::FirstName,
            SortField::LastName => PersonSortField::LastName,
        }
    }
}

#[derive(Subcommand)]
pub enum ClearanceCommand {
    /// Show a user's clearance and the levels it covers
    Show {
        #[arg(value_name = "USER")]
        user: String,
    },

    /// List users with their clearances
    List {
        /// Match against user name, first or last name
        #[arg(short, long)]
        filter: Option<String>,

        #[arg(long, value_enum, default_value = "user-name")]
        sort: SortField,

        #[arg(long)]
        descending: bool,

        #[arg(long, default_value = "0")]
        skip: usize,

        #[arg(long, default_value = "100")]
        max: usize,
    },

    /// Grant a user clearance up to a classification level
    Grant {
        #[arg(value_name = "USER")]
        user: String,

        #[arg(value_name = "LEVEL")]
        level: String,

        /// User granting the clearance
        #[arg(long = "as", value_name = "USER", env = "RMC_USER")]
        granted_by: String,
    },

    /// Add a user to the person directory
    AddUser {
        #[arg(value_name = "USER")]
        user: String,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Initial clearance, set directly on the person record
        #[arg(long, value_name = "LEVEL")]
        clearance: Option<String>,
    },
}

pub async fn handle_command(command: ClearanceCommand, config_path: Option<PathBuf>) -> Result<()> {
    let services = EmbeddedServices::new(config_path).await?;
    match command {
        ClearanceCommand::Show { user } => show(&services, &user).await,
        ClearanceCommand::List {
            filter,
            sort,
            descending,
            skip,
            max,
        } => {
            let params = UserQueryParams::new(filter)
                .with_sort(sort.into(), !descending)
                .with_paging(PagingRequest::new(skip, max));
            list(&services, &params).await
        }
        ClearanceCommand::Grant {
            user,
            level,
            granted_by,
        } => grant(&services, &granted_by, &user, &level).await,
        ClearanceCommand::AddUser {
            user,
            first_name,
            last_name,
            clearance,
        } => add_user(&services, PersonInfo::new(user, first_name, last_name), clearance).await,
    }
}

fn print_clearance(clearance: &SecurityClearance) {
    let level = clearance.clearance_level.highest_classification_level();
    println!(
        "  {:<16} {:<24} {} {}",
        clearance.person_info.user_name.bold(),
        clearance.person_info.full_name(),
        level.id(),
        clearance.clearance_level.display_label_key().dimmed()
    );
}

async fn show(services: &EmbeddedServices, user: &str) -> Result<()> {
    let clearance = services.clearance.get_user_security_clearance(user).await?;
    println!("{}", "Clearance:".bold());
    print_clearance(&clearance);
    println!();

    let levels = services.clearance.classification_levels_for(user).await?;
    println!("{}", "Accessible levels:".bold());
    for level in levels {
        println!("  {}", level.id());
    }
    Ok(())
}

async fn list(services: &EmbeddedServices, params: &UserQueryParams) -> Result<()> {
    let results = services.clearance.get_users_security_clearance(params).await?;
    if results.page.is_empty() {
        println!("{}", "No users found".yellow());
        return Ok(());
    }

    for clearance in &results.page {
        print_clearance(clearance);
    }
    println!();
    if let Some((lower, upper)) = results.total_result_count {
        if lower == upper {
            println!("{}", format!("{} matching users", lower).dimmed());
        } else {
            println!("{}", format!("{}-{} matching users", lower, upper).dimmed());
        }
    }
    if results.has_more_items {
        println!("{}", "More results available, use --skip to page".dimmed());
    }
    Ok(())
}

async fn grant(services: &EmbeddedServices, granted_by: &str, user: &str, level: &str) -> Result<()> {
    let clearance = services
        .clearance
        .set_user_security_clearance(granted_by, user, level)
        .await
        .with_context(|| format!("Failed to grant clearance to '{}'", user))?;
    services.persist().await?;

    println!("{}", format!("✓ Clearance granted to {}", user).green());
    print_clearance(&clearance);
    Ok(())
}

async fn add_user(services: &EmbeddedServices, info: PersonInfo, clearance: Option<String>) -> Result<()> {
    let people = &services.repositories.people;
    if people.find_by_user_name(&info.user_name).await?.is_some() {
        anyhow::bail!("User '{}' already exists", info.user_name);
    }
    let user_name = info.user_name.clone();
    let mut person = Person::new(info);
    if let Some(level) = clearance {
        services.scheme.classification_level_by_id(&level)?;
        person.set_clearance_level_id(level);
    }
    people.save(&person).await?;
    services.persist().await?;

    println!("{}", format!("✓ User {} added", user_name).green());
    Ok(())
}
