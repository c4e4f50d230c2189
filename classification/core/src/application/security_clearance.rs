// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Security Clearance Service
//!
//! Maps users to the most secure classification level they may access. A
//! user's clearance is the `clf:clearanceLevel` property on their person node;
//! users without one get the default "no clearance" level.

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::application::scheme_service::ClassificationSchemeService;
use crate::domain::classification_level::ClassificationLevel;
use crate::domain::clearance::{PagingResults, Person, SecurityClearance, UserQueryParams};
use crate::domain::errors::{ClassificationError, ClassificationResult};
use crate::domain::events::ClassificationEvent;
use crate::domain::repository::PersonRepository;
use crate::infrastructure::event_bus::EventBus;

pub struct SecurityClearanceService {
    scheme: Arc<ClassificationSchemeService>,
    people: Arc<dyn PersonRepository>,
    event_bus: EventBus,
}

impl SecurityClearanceService {
    pub fn new(scheme: Arc<ClassificationSchemeService>, people: Arc<dyn PersonRepository>, event_bus: EventBus) -> Self {
        Self {
            scheme,
            people,
            event_bus,
        }
    }

    async fn person(&self, user_name: &str) -> ClassificationResult<Person> {
        self.people
            .find_by_user_name(user_name)
            .await?
            .ok_or_else(|| ClassificationError::PersonNotFound(user_name.to_string()))
    }

    fn clearance_for(&self, person: Person) -> ClassificationResult<SecurityClearance> {
        let scheme = self.scheme.scheme();
        let clearance_level = match person.clearance_level_id() {
            Some(level_id) => scheme
                .clearance_levels
                .find_level_by_classification_level_id(level_id)?
                .clone(),
            None => scheme.clearance_levels.default_clearance_level(),
        };
        Ok(SecurityClearance::new(person.info, clearance_level))
    }

    pub async fn get_user_security_clearance(&self, user_name: &str) -> ClassificationResult<SecurityClearance> {
        let person = self.person(user_name).await?;
        self.clearance_for(person)
    }

    /// One page of users with their clearances. Hit counts and paging flags
    /// come from the person directory unchanged.
    pub async fn get_users_security_clearance(
        &self,
        params: &UserQueryParams,
    ) -> ClassificationResult<PagingResults<SecurityClearance>> {
        let results = self.people.query(params).await?;

        let mut page = Vec::with_capacity(results.page.len());
        for info in &results.page {
            let person = self.person(&info.user_name).await?;
            page.push(self.clearance_for(person)?);
        }
        Ok(results.with_page(page))
    }

    /// True when `level_id` exists and the user's clearance covers it.
    pub async fn is_cleared_for_classification(&self, user_name: &str, level_id: &str) -> ClassificationResult<bool> {
        let scheme = self.scheme.scheme();
        let level = match scheme.levels.find_level_by_id(level_id) {
            Ok(level) => level.clone(),
            Err(_) => return Ok(false),
        };
        let clearance = self.get_user_security_clearance(user_name).await?;
        Ok(scheme
            .comparator()
            .dominates(clearance.clearance_level.highest_classification_level(), &level))
    }

    /// Levels the user may see, most secure first.
    pub async fn classification_levels_for(&self, user_name: &str) -> ClassificationResult<Vec<ClassificationLevel>> {
        let clearance = self.get_user_security_clearance(user_name).await?;
        Ok(self.scheme.classification_levels_within(&clearance.clearance_level))
    }

    /// Grant `user_name` clearance up to `level_id`. The granting user must
    /// hold that clearance themselves; otherwise the level is reported as not
    /// found so its existence is not disclosed.
    pub async fn set_user_security_clearance(
        &self,
        granted_by: &str,
        user_name: &str,
        level_id: &str,
    ) -> ClassificationResult<SecurityClearance> {
        if !self.is_cleared_for_classification(granted_by, level_id).await? {
            return Err(ClassificationError::LevelIdNotFound(level_id.to_string()));
        }
        let mut person = self.person(user_name).await?;
        person.set_clearance_level_id(level_id);
        self.people.save(&person).await?;

        info!("User '{}' granted clearance '{}' by '{}'", user_name, level_id, granted_by);
        self.event_bus.publish(ClassificationEvent::ClearanceGranted {
            user_name: user_name.to_string(),
            classification_level_id: level_id.to_string(),
            granted_by: granted_by.to_string(),
            granted_at: Utc::now(),
        });

        self.clearance_for(person)
    }
}
