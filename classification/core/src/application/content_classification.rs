// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Content Classification Service
//!
//! Applies classifications to content nodes and answers classification and
//! clearance questions about them.
//!
//! A node is classified when it carries the `clf:classified` aspect with a
//! current classification other than `UNCLASSIFIED`, either directly or
//! through a node it refers to for that aspect. Editing a classification
//! re-applies the full property set: the current values are overwritten and
//! only the initial classification is preserved from the first call.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::scheme_service::ClassificationSchemeService;
use crate::application::security_clearance::SecurityClearanceService;
use crate::domain::classification_level::{ClassificationLevel, UNCLASSIFIED_ID};
use crate::domain::content::{ClassificationAspectProperties, Node, NodeRef, PropertyValue};
use crate::domain::content_model::*;
use crate::domain::errors::{ClassificationError, ClassificationResult};
use crate::domain::events::ClassificationEvent;
use crate::domain::repository::{FreezeService, NodeRepository, ReferredMetadataService};
use crate::infrastructure::event_bus::EventBus;

/// Where a node's current classification comes from. Exactly one source
/// applies to any node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClassificationSource {
    /// The node's own `clf:classified` aspect.
    DirectAspect,
    /// A node this one refers to for its classification metadata.
    ReferredMetadata,
}

impl ClassificationSource {
    /// A node carrying the aspect answers for itself, even when the current
    /// classification property is unset.
    fn of(node: &Node) -> Self {
        if node.has_aspect(ASPECT_CLASSIFIED) {
            ClassificationSource::DirectAspect
        } else {
            ClassificationSource::ReferredMetadata
        }
    }
}

pub struct ContentClassificationService {
    scheme: Arc<ClassificationSchemeService>,
    clearance: Arc<SecurityClearanceService>,
    nodes: Arc<dyn NodeRepository>,
    freeze: Arc<dyn FreezeService>,
    referred_metadata: Arc<dyn ReferredMetadataService>,
    event_bus: EventBus,
}

impl ContentClassificationService {
    pub fn new(
        scheme: Arc<ClassificationSchemeService>,
        clearance: Arc<SecurityClearanceService>,
        nodes: Arc<dyn NodeRepository>,
        freeze: Arc<dyn FreezeService>,
        referred_metadata: Arc<dyn ReferredMetadataService>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            scheme,
            clearance,
            nodes,
            freeze,
            referred_metadata,
            event_bus,
        }
    }

    /// Classify `node_ref` on behalf of `user_name`.
    ///
    /// Checks run in order: required fields, caller clearance for the level,
    /// reasons, exemption categories, node type, quick-share, freeze.
    pub async fn classify_content(
        &self,
        user_name: &str,
        properties: &ClassificationAspectProperties,
        node_ref: &NodeRef,
    ) -> ClassificationResult<()> {
        check_not_blank("classificationLevelId", &properties.classification_level_id)?;
        check_not_blank("classifiedBy", &properties.classified_by)?;
        if properties.classification_reason_ids.is_empty() {
            return Err(ClassificationError::InvalidArgument(
                "classificationReasonIds must not be empty".to_string(),
            ));
        }

        let level_id = properties.classification_level_id.as_str();
        if !self.clearance.is_cleared_for_classification(user_name, level_id).await? {
            return Err(ClassificationError::LevelIdNotFound(level_id.to_string()));
        }
        for reason_id in &properties.classification_reason_ids {
            self.scheme.classification_reason_by_id(reason_id)?;
        }
        for category_id in &properties.exemption_category_ids {
            self.scheme.exemption_category_by_id(category_id)?;
        }

        let mut node = self
            .nodes
            .find_by_ref(node_ref)
            .await?
            .ok_or_else(|| ClassificationError::invalid_node(node_ref, "The supplied node does not exist."))?;
        if !node.kind.is_content() {
            return Err(ClassificationError::invalid_node(node_ref, "The supplied node is not a content node."));
        }
        if node.has_aspect(ASPECT_SHARED) {
            return Err(ClassificationError::IllegalState(
                "A shared content cannot be classified.".to_string(),
            ));
        }
        // System-level lookup: the answer must not depend on what the caller can read.
        if self.freeze.is_frozen(node_ref).await? {
            return Err(ClassificationError::AccessDenied(
                "Frozen nodes can not be classified.".to_string(),
            ));
        }

        let previous_level_id = node
            .has_aspect(ASPECT_CLASSIFIED)
            .then(|| node.text_property(PROP_CURRENT_CLASSIFICATION).map(str::to_string))
            .flatten();
        apply_properties(&mut node, properties);
        self.nodes.save(&node).await?;

        info!(
            "Content {} classified as '{}' by '{}'",
            node_ref, level_id, properties.classified_by
        );
        self.event_bus.publish(ClassificationEvent::ContentClassified {
            node_ref: *node_ref,
            classification_level_id: level_id.to_string(),
            previous_level_id,
            classified_by: properties.classified_by.clone(),
            classified_at: Utc::now(),
        });
        Ok(())
    }

    /// Reclassify content. Identical to [`Self::classify_content`]: the new
    /// properties overwrite the current ones and no history is kept.
    pub async fn edit_classified_content(
        &self,
        user_name: &str,
        properties: &ClassificationAspectProperties,
        node_ref: &NodeRef,
    ) -> ClassificationResult<()> {
        self.classify_content(user_name, properties, node_ref).await
    }

    /// The node's current level; `UNCLASSIFIED` when no source provides one.
    pub async fn get_current_classification(&self, node_ref: &NodeRef) -> ClassificationResult<ClassificationLevel> {
        match self.current_classification_id(node_ref).await? {
            Some(id) => self.scheme.classification_level_by_id(&id),
            None => Ok(self.scheme.unclassified_level()),
        }
    }

    pub async fn is_classified(&self, node_ref: &NodeRef) -> ClassificationResult<bool> {
        Ok(self
            .current_classification_id(node_ref)
            .await?
            .is_some_and(|id| id != UNCLASSIFIED_ID))
    }

    /// Whether `user_name` may access the node. Nodes that no longer exist
    /// impose no restriction.
    pub async fn has_clearance(&self, user_name: &str, node_ref: &NodeRef) -> ClassificationResult<bool> {
        if !self.nodes.exists(node_ref).await? {
            debug!("Node {} does not exist, no clearance required", node_ref);
            return Ok(true);
        }
        let clearance = self.clearance.get_user_security_clearance(user_name).await?;
        let classification = self.get_current_classification(node_ref).await?;
        let scheme = self.scheme.scheme();
        Ok(scheme
            .comparator()
            .dominates(clearance.clearance_level.highest_classification_level(), &classification))
    }

    async fn current_classification_id(&self, node_ref: &NodeRef) -> ClassificationResult<Option<String>> {
        let node = match self.nodes.find_by_ref(node_ref).await? {
            Some(node) => node,
            None => return Ok(None),
        };
        self.lookup(ClassificationSource::of(&node), &node).await
    }

    async fn lookup(&self, source: ClassificationSource, node: &Node) -> ClassificationResult<Option<String>> {
        match source {
            ClassificationSource::DirectAspect => Ok(classification_of(node)),
            ClassificationSource::ReferredMetadata => {
                let referred = match self.referred_metadata.referred_node(&node.node_ref, ASPECT_CLASSIFIED).await? {
                    Some(referred) => referred,
                    None => return Ok(None),
                };
                Ok(self
                    .nodes
                    .find_by_ref(&referred)
                    .await?
                    .and_then(|referred| classification_of(&referred)))
            }
        }
    }
}

fn classification_of(node: &Node) -> Option<String> {
    if !node.has_aspect(ASPECT_CLASSIFIED) {
        return None;
    }
    node.text_property(PROP_CURRENT_CLASSIFICATION).map(str::to_string)
}

fn check_not_blank(name: &str, value: &str) -> ClassificationResult<()> {
    if value.trim().is_empty() {
        return Err(ClassificationError::InvalidArgument(format!("{} must not be blank", name)));
    }
    Ok(())
}

fn text(value: &Option<String>) -> Option<PropertyValue> {
    value.clone().map(PropertyValue::Text)
}

fn apply_properties(node: &mut Node, properties: &ClassificationAspectProperties) {
    let level_id = PropertyValue::Text(properties.classification_level_id.clone());

    // Recorded once, never overwritten.
    if !node.has_aspect(ASPECT_CLASSIFIED) || node.property(PROP_INITIAL_CLASSIFICATION).is_none() {
        node.set_property(PROP_INITIAL_CLASSIFICATION, level_id.clone());
    }
    node.add_aspect(ASPECT_CLASSIFIED);

    node.set_property(PROP_CURRENT_CLASSIFICATION, level_id);
    node.set_optional_property(PROP_CLASSIFICATION_AGENCY, text(&properties.classification_agency));
    node.set_property(PROP_CLASSIFIED_BY, PropertyValue::Text(properties.classified_by.clone()));
    node.set_property(
        PROP_CLASSIFICATION_REASONS,
        PropertyValue::TextList(properties.classification_reason_ids.iter().cloned().collect()),
    );
    node.set_optional_property(PROP_DOWNGRADE_DATE, properties.downgrade_date.map(PropertyValue::Date));
    node.set_optional_property(PROP_DOWNGRADE_EVENT, text(&properties.downgrade_event));
    node.set_optional_property(PROP_DOWNGRADE_INSTRUCTIONS, text(&properties.downgrade_instructions));
    node.set_optional_property(
        PROP_DECLASSIFICATION_DATE,
        properties.declassification_date.map(PropertyValue::Date),
    );
    node.set_optional_property(PROP_DECLASSIFICATION_EVENT, text(&properties.declassification_event));
    node.set_property(
        PROP_DECLASSIFICATION_EXEMPTIONS,
        PropertyValue::TextList(properties.exemption_category_ids.iter().cloned().collect()),
    );
    node.set_optional_property(PROP_LAST_RECLASSIFY_BY, text(&properties.last_reclassify_by));
    node.set_optional_property(PROP_LAST_RECLASSIFY_REASON, text(&properties.last_reclassify_reason));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::NodeKind;

    #[test]
    fn test_initial_classification_recorded_once() {
        let mut node = Node::new(NodeKind::Content);
        apply_properties(&mut node, &ClassificationAspectProperties::new("S", "Jane", ["1.4(a)"]));
        apply_properties(&mut node, &ClassificationAspectProperties::new("TS", "Jane", ["1.4(a)"]));

        assert_eq!(node.text_property(PROP_INITIAL_CLASSIFICATION), Some("S"));
        assert_eq!(node.text_property(PROP_CURRENT_CLASSIFICATION), Some("TS"));
        assert!(node.has_aspect(ASPECT_CLASSIFIED));
    }

    #[test]
    fn test_optional_properties_are_rewritten() {
        let mut node = Node::new(NodeKind::Content);
        let mut first = ClassificationAspectProperties::new("S", "Jane", ["1.4(a)"]);
        first.downgrade_event = Some("end of project".to_string());
        apply_properties(&mut node, &first);
        assert_eq!(node.text_property(PROP_DOWNGRADE_EVENT), Some("end of project"));

        apply_properties(&mut node, &ClassificationAspectProperties::new("S", "Jane", ["1.4(a)"]));
        assert!(node.property(PROP_DOWNGRADE_EVENT).is_none());
    }

    #[test]
    fn test_classification_of_requires_aspect() {
        let mut node = Node::new(NodeKind::Content);
        node.set_property(PROP_CURRENT_CLASSIFICATION, PropertyValue::Text("S".into()));
        assert_eq!(classification_of(&node), None);
        node.add_aspect(ASPECT_CLASSIFIED);
        assert_eq!(classification_of(&node).as_deref(), Some("S"));
    }

    #[test]
    fn test_aspect_selects_direct_source() {
        let mut node = Node::new(NodeKind::Content);
        assert_eq!(ClassificationSource::of(&node), ClassificationSource::ReferredMetadata);
        node.add_aspect(ASPECT_CLASSIFIED);
        assert_eq!(ClassificationSource::of(&node), ClassificationSource::DirectAspect);
        assert_eq!(classification_of(&node), None);
    }

    #[test]
    fn test_check_not_blank() {
        assert!(check_not_blank("classifiedBy", "Jane").is_ok());
        assert!(matches!(
            check_not_blank("classifiedBy", "  "),
            Err(ClassificationError::InvalidArgument(_))
        ));
    }
}
