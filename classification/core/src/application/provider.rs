// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Process-wide service handles
//!
//! Components that cannot take their collaborators through a constructor,
//! such as property constraints registered with the content model, reach the
//! running services through these handles. Whoever wires the
//! services registers them once at startup. Re-registering replaces the
//! previous instance and logs a warning.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::scheme_service::ClassificationSchemeService;

/// Holds at most one shared instance of `T`.
pub struct ServiceProvider<T: ?Sized + Send + Sync> {
    name: &'static str,
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync> ServiceProvider<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: parking_lot::const_rwlock(None),
        }
    }

    /// Register `service`, replacing any earlier registration.
    pub fn set(&self, service: Arc<T>) {
        let mut slot = self.slot.write();
        if slot.is_some() {
            warn!("{} was already registered; replacing the previous instance", self.name);
        } else {
            debug!("{} registered", self.name);
        }
        *slot = Some(service);
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    pub fn clear(&self) {
        self.slot.write().take();
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub static CLASSIFICATION_SCHEME_SERVICE: ServiceProvider<ClassificationSchemeService> =
    ServiceProvider::new("ClassificationSchemeService");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_until_set() {
        let provider: ServiceProvider<String> = ServiceProvider::new("Greeting");
        assert!(provider.get().is_none());
        provider.set(Arc::new("hello".to_string()));
        assert_eq!(provider.get().as_deref().map(String::as_str), Some("hello"));
    }

    #[test]
    fn test_last_writer_wins() {
        let provider: ServiceProvider<String> = ServiceProvider::new("Greeting");
        provider.set(Arc::new("first".to_string()));
        provider.set(Arc::new("second".to_string()));
        assert_eq!(provider.get().as_deref().map(String::as_str), Some("second"));

        provider.clear();
        assert!(provider.get().is_none());
    }

    #[test]
    fn test_trait_objects() {
        trait Named: Send + Sync {
            fn name(&self) -> &str;
        }
        struct Fixed;
        impl Named for Fixed {
            fn name(&self) -> &str {
                "fixed"
            }
        }

        let provider: ServiceProvider<dyn Named> = ServiceProvider::new("Named");
        provider.set(Arc::new(Fixed));
        assert_eq!(provider.get().map(|n| n.name().to_string()).as_deref(), Some("fixed"));
    }
}
