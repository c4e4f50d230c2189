// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use rm_classification_core::application::content_classification::ContentClassificationService;
use rm_classification_core::application::scheme_service::{ClassificationScheme, ClassificationSchemeService};
use rm_classification_core::application::security_clearance::SecurityClearanceService;
use rm_classification_core::domain::classification_level::ClassificationLevel;
use rm_classification_core::domain::classification_reason::ClassificationReason;
use rm_classification_core::domain::clearance::{Person, PersonInfo};
use rm_classification_core::domain::content::{ClassificationAspectProperties, Node, NodeKind, NodeRef};
use rm_classification_core::domain::content_model::*;
use rm_classification_core::domain::errors::ClassificationError;
use rm_classification_core::domain::events::ClassificationEvent;
use rm_classification_core::domain::exemption_category::ExemptionCategory;
use rm_classification_core::domain::repository::{NodeRepository, PersonRepository};
use rm_classification_core::infrastructure::event_bus::EventBus;
use rm_classification_core::infrastructure::repositories::{
    InMemoryFreezeService, InMemoryNodeRepository, InMemoryPersonRepository, InMemoryReferredMetadataService,
};
use std::sync::Arc;

struct Fixture {
    service: ContentClassificationService,
    nodes: Arc<InMemoryNodeRepository>,
    freeze: Arc<InMemoryFreezeService>,
    referred: Arc<InMemoryReferredMetadataService>,
    event_bus: EventBus,
}

async fn fixture() -> Fixture {
    let scheme = Arc::new(ClassificationSchemeService::new(ClassificationScheme::new(
        vec![
            ClassificationLevel::new("TS", "rm.classification.topSecret"),
            ClassificationLevel::new("S", "rm.classification.secret"),
            ClassificationLevel::new("C", "rm.classification.confidential"),
        ],
        vec![
            ClassificationReason::new("1.4(a)", "rm.classification-reason.14a"),
            ClassificationReason::new("1.4(c)", "rm.classification-reason.14c"),
        ],
        vec![ExemptionCategory::new("25X1", "rm.exemption-category.25X1")],
    )));

    let people = Arc::new(InMemoryPersonRepository::new());
    for (user_name, level) in [("admin", Some("TS")), ("jsmith", Some("S")), ("guest", None)] {
        let mut person = Person::new(PersonInfo::new(user_name, user_name, "User"));
        if let Some(level) = level {
            person.set_clearance_level_id(level);
        }
        people.save(&person).await.unwrap();
    }

    let event_bus = EventBus::with_default_capacity();
    let nodes = Arc::new(InMemoryNodeRepository::new());
    let freeze = Arc::new(InMemoryFreezeService::new());
    let referred = Arc::new(InMemoryReferredMetadataService::new());
    let clearance = Arc::new(SecurityClearanceService::new(scheme.clone(), people, event_bus.clone()));
    let service = ContentClassificationService::new(
        scheme,
        clearance,
        nodes.clone(),
        freeze.clone(),
        referred.clone(),
        event_bus.clone(),
    );

    Fixture {
        service,
        nodes,
        freeze,
        referred,
        event_bus,
    }
}

async fn content(nodes: &InMemoryNodeRepository) -> NodeRef {
    let node = Node::new(NodeKind::Content);
    nodes.save(&node).await.unwrap();
    node.node_ref
}

fn secret() -> ClassificationAspectProperties {
    let mut props = ClassificationAspectProperties::new("S", "Jane Smith", ["1.4(a)"]);
    props.classification_agency = Some("Records Office".to_string());
    props
}

#[tokio::test]
async fn test_classify_then_reclassify_keeps_initial_level() {
    let f = fixture().await;
    let node_ref = content(&f.nodes).await;

    assert!(!f.service.is_classified(&node_ref).await.unwrap());
    assert!(f.service.get_current_classification(&node_ref).await.unwrap().is_unclassified());

    f.service.classify_content("admin", &secret(), &node_ref).await.unwrap();
    assert!(f.service.is_classified(&node_ref).await.unwrap());
    assert_eq!(f.service.get_current_classification(&node_ref).await.unwrap().id(), "S");

    let mut upgrade = ClassificationAspectProperties::new("TS", "Jane Smith", ["1.4(a)", "1.4(c)"]);
    upgrade.last_reclassify_by = Some("admin".to_string());
    upgrade.last_reclassify_reason = Some("new intelligence".to_string());
    f.service.edit_classified_content("admin", &upgrade, &node_ref).await.unwrap();

    let node = f.nodes.find_by_ref(&node_ref).await.unwrap().unwrap();
    assert_eq!(node.text_property(PROP_INITIAL_CLASSIFICATION), Some("S"));
    assert_eq!(node.text_property(PROP_CURRENT_CLASSIFICATION), Some("TS"));
    assert_eq!(node.text_property(PROP_LAST_RECLASSIFY_REASON), Some("new intelligence"));
    assert_eq!(
        node.property(PROP_CLASSIFICATION_REASONS).and_then(|v| v.as_text_list()),
        Some(&["1.4(a)".to_string(), "1.4(c)".to_string()][..])
    );
    // Not supplied on the second call.
    assert!(node.property(PROP_CLASSIFICATION_AGENCY).is_none());
}

#[tokio::test]
async fn test_classification_publishes_event_with_previous_level() {
    let f = fixture().await;
    let node_ref = content(&f.nodes).await;
    let mut receiver = f.event_bus.subscribe_node(node_ref);

    f.service.classify_content("admin", &secret(), &node_ref).await.unwrap();
    let upgrade = ClassificationAspectProperties::new("TS", "Jane Smith", ["1.4(a)"]);
    f.service.classify_content("admin", &upgrade, &node_ref).await.unwrap();

    match receiver.recv().await.unwrap() {
        ClassificationEvent::ContentClassified {
            classification_level_id,
            previous_level_id,
            ..
        } => {
            assert_eq!(classification_level_id, "S");
            assert_eq!(previous_level_id, None);
        }
        other => panic!("unexpected event {:?}", other),
    }
    match receiver.recv().await.unwrap() {
        ClassificationEvent::ContentClassified { previous_level_id, .. } => {
            assert_eq!(previous_level_id.as_deref(), Some("S"));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_blank_arguments_are_rejected() {
    let f = fixture().await;
    let node_ref = content(&f.nodes).await;

    let blank_level = ClassificationAspectProperties::new(" ", "Jane", ["1.4(a)"]);
    let blank_by = ClassificationAspectProperties::new("S", "", ["1.4(a)"]);
    let no_reasons = ClassificationAspectProperties::new("S", "Jane", Vec::<String>::new());
    for props in [blank_level, blank_by, no_reasons] {
        assert!(matches!(
            f.service.classify_content("admin", &props, &node_ref).await,
            Err(ClassificationError::InvalidArgument(_))
        ));
    }
}

#[tokio::test]
async fn test_caller_cannot_classify_above_clearance() {
    let f = fixture().await;
    let node_ref = content(&f.nodes).await;

    let top_secret = ClassificationAspectProperties::new("TS", "Jane", ["1.4(a)"]);
    assert!(matches!(
        f.service.classify_content("jsmith", &top_secret, &node_ref).await,
        Err(ClassificationError::LevelIdNotFound(id)) if id == "TS"
    ));
    assert!(matches!(
        f.service.classify_content("guest", &secret(), &node_ref).await,
        Err(ClassificationError::LevelIdNotFound(_))
    ));
    // Unknown levels look the same as levels beyond the caller's clearance.
    let unknown = ClassificationAspectProperties::new("Q", "Jane", ["1.4(a)"]);
    assert!(matches!(
        f.service.classify_content("admin", &unknown, &node_ref).await,
        Err(ClassificationError::LevelIdNotFound(_))
    ));
    assert!(matches!(
        f.service.classify_content("nobody", &secret(), &node_ref).await,
        Err(ClassificationError::PersonNotFound(_))
    ));
    assert!(!f.service.is_classified(&node_ref).await.unwrap());
}

#[tokio::test]
async fn test_unknown_reason_and_exemption_category() {
    let f = fixture().await;
    let node_ref = content(&f.nodes).await;

    let bad_reason = ClassificationAspectProperties::new("S", "Jane", ["1.4(z)"]);
    assert!(matches!(
        f.service.classify_content("admin", &bad_reason, &node_ref).await,
        Err(ClassificationError::ReasonIdNotFound(id)) if id == "1.4(z)"
    ));

    let mut bad_category = secret();
    bad_category.exemption_category_ids.insert("50X9".to_string());
    assert!(matches!(
        f.service.classify_content("admin", &bad_category, &node_ref).await,
        Err(ClassificationError::ExemptionCategoryIdNotFound(id)) if id == "50X9"
    ));

    let mut good_category = secret();
    good_category.exemption_category_ids.insert("25X1".to_string());
    f.service.classify_content("admin", &good_category, &node_ref).await.unwrap();
}

#[tokio::test]
async fn test_only_unshared_unfrozen_content_can_be_classified() {
    let f = fixture().await;

    let folder = Node::new(NodeKind::Folder);
    f.nodes.save(&folder).await.unwrap();
    assert!(matches!(
        f.service.classify_content("admin", &secret(), &folder.node_ref).await,
        Err(ClassificationError::InvalidNode { .. })
    ));
    assert!(matches!(
        f.service.classify_content("admin", &secret(), &NodeRef::new()).await,
        Err(ClassificationError::InvalidNode { .. })
    ));

    let mut shared = Node::new(NodeKind::Content);
    shared.add_aspect(ASPECT_SHARED);
    f.nodes.save(&shared).await.unwrap();
    assert!(matches!(
        f.service.classify_content("admin", &secret(), &shared.node_ref).await,
        Err(ClassificationError::IllegalState(_))
    ));

    let frozen = content(&f.nodes).await;
    f.freeze.freeze(frozen).await;
    assert!(matches!(
        f.service.classify_content("admin", &secret(), &frozen).await,
        Err(ClassificationError::AccessDenied(_))
    ));

    f.freeze.unfreeze(&frozen).await;
    f.service.classify_content("admin", &secret(), &frozen).await.unwrap();
}

#[tokio::test]
async fn test_classification_read_through_referred_metadata() {
    let f = fixture().await;
    let original = content(&f.nodes).await;
    let rendition = content(&f.nodes).await;
    f.service.classify_content("admin", &secret(), &original).await.unwrap();

    assert!(!f.service.is_classified(&rendition).await.unwrap());
    f.referred.refer(rendition, ASPECT_CLASSIFIED, original).await;

    assert!(f.service.is_classified(&rendition).await.unwrap());
    assert_eq!(f.service.get_current_classification(&rendition).await.unwrap().id(), "S");

    // A direct classification takes precedence over the referred one.
    let top_secret = ClassificationAspectProperties::new("TS", "Jane", ["1.4(a)"]);
    f.service.classify_content("admin", &top_secret, &rendition).await.unwrap();
    assert_eq!(f.service.get_current_classification(&rendition).await.unwrap().id(), "TS");
}

#[tokio::test]
async fn test_has_clearance() {
    let f = fixture().await;
    let node_ref = content(&f.nodes).await;

    assert!(f.service.has_clearance("guest", &node_ref).await.unwrap());

    f.service.classify_content("admin", &secret(), &node_ref).await.unwrap();
    assert!(f.service.has_clearance("admin", &node_ref).await.unwrap());
    assert!(f.service.has_clearance("jsmith", &node_ref).await.unwrap());
    assert!(!f.service.has_clearance("guest", &node_ref).await.unwrap());

    let top_secret = content(&f.nodes).await;
    let properties = ClassificationAspectProperties::new("TS", "Jane", ["1.4(a)"]);
    f.service.classify_content("admin", &properties, &top_secret).await.unwrap();
    assert!(!f.service.has_clearance("jsmith", &top_secret).await.unwrap());
    assert!(f.service.has_clearance("admin", &top_secret).await.unwrap());

    let unclassified = content(&f.nodes).await;
    assert!(f.service.has_clearance("jsmith", &unclassified).await.unwrap());
    assert!(f.service.has_clearance("guest", &unclassified).await.unwrap());

    f.nodes.delete(&node_ref).await;
    assert!(f.service.has_clearance("guest", &node_ref).await.unwrap());
}

#[tokio::test]
async fn test_aspect_without_level_ignores_referred_metadata() {
    let f = fixture().await;
    let original = content(&f.nodes).await;
    f.service.classify_content("admin", &secret(), &original).await.unwrap();

    let mut copy = Node::new(NodeKind::Content);
    copy.add_aspect(ASPECT_CLASSIFIED);
    f.nodes.save(&copy).await.unwrap();
    f.referred.refer(copy.node_ref, ASPECT_CLASSIFIED, original).await;

    assert!(!f.service.is_classified(&copy.node_ref).await.unwrap());
    assert!(f
        .service
        .get_current_classification(&copy.node_ref)
        .await
        .unwrap()
        .is_unclassified());
    assert!(f.service.has_clearance("guest", &copy.node_ref).await.unwrap());
}
