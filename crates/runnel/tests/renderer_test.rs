//! Integration tests for the shape/connection renderer.
//!
//! These verify the dispatch is total over the known vocabulary, that
//! unknown tags (and only unknown tags) fall back to the default routine,
//! and that event-definition selection follows the fixed precedence order.

use runnel_model::element::Value;
use runnel_model::{Factory, QName, SemanticIndex};

use runnel::draw::renderer::{ElementKind, EventDefinitionKind, Renderer};
use runnel::draw::{ConnectionDatum, ShapeDatum, Styles};
use runnel::geometry::Point;

const SHAPE_TAGS: [&str; 28] = [
    "bpmn:StartEvent",
    "bpmn:EndEvent",
    "bpmn:IntermediateCatchEvent",
    "bpmn:IntermediateThrowEvent",
    "bpmn:BoundaryEvent",
    "bpmn:Task",
    "bpmn:ServiceTask",
    "bpmn:UserTask",
    "bpmn:ManualTask",
    "bpmn:SendTask",
    "bpmn:ReceiveTask",
    "bpmn:ScriptTask",
    "bpmn:BusinessRuleTask",
    "bpmn:SubProcess",
    "bpmn:AdHocSubProcess",
    "bpmn:Transaction",
    "bpmn:CallActivity",
    "bpmn:Participant",
    "bpmn:Lane",
    "bpmn:ExclusiveGateway",
    "bpmn:InclusiveGateway",
    "bpmn:ComplexGateway",
    "bpmn:ParallelGateway",
    "bpmn:EventBasedGateway",
    "bpmn:DataObjectReference",
    "bpmn:DataInput",
    "bpmn:DataOutput",
    "bpmn:DataStoreReference",
];

const CONNECTION_TAGS: [&str; 5] = [
    "bpmn:SequenceFlow",
    "bpmn:MessageFlow",
    "bpmn:Association",
    "bpmn:DataInputAssociation",
    "bpmn:DataOutputAssociation",
];

fn qn(s: &str) -> QName {
    s.parse().unwrap()
}

fn renderer() -> Renderer {
    Renderer::new(Styles::default())
}

fn shape_datum(id: &str, tag: &str) -> ShapeDatum {
    ShapeDatum {
        id: id.to_string(),
        element_type: qn(tag),
        width: 100.0,
        height: 80.0,
    }
}

fn connection_datum(id: &str, tag: &str) -> ConnectionDatum {
    ConnectionDatum {
        id: id.to_string(),
        element_type: qn(tag),
        waypoints: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
    }
}

/// Registers an event carrying the given definitions in a fresh index.
fn event_semantics(
    event_type: &str,
    definitions: &[&str],
    parallel_multiple: bool,
) -> SemanticIndex {
    let factory = Factory::standard().unwrap();
    let event = factory.create(&qn(event_type)).unwrap();
    event.set(qn("bpmn:id"), Value::Str("Event_1".into()));
    if parallel_multiple {
        event.set(qn("bpmn:parallelMultiple"), Value::Bool(true));
    }
    let items: Vec<_> = definitions
        .iter()
        .map(|tag| {
            let definition = factory.create(&qn(tag)).unwrap();
            definition.set_parent(&event);
            definition
        })
        .collect();
    event.set(qn("bpmn:eventDefinitions"), Value::List(items));

    let mut semantics = SemanticIndex::new();
    semantics.insert("Event_1", event);
    semantics
}

#[test]
fn every_known_shape_tag_has_a_dedicated_renderer() {
    let renderer = renderer();
    let semantics = SemanticIndex::new();

    for tag in SHAPE_TAGS {
        assert!(
            ElementKind::from_tag(&qn(tag)).is_some(),
            "{tag} missing from vocabulary"
        );
        let rendered = renderer
            .render_shape(&semantics, &shape_datum("Element_1", tag))
            .to_string();
        assert!(
            !rendered.contains("rn-default"),
            "{tag} fell back to the default renderer"
        );
    }
}

#[test]
fn every_known_connection_tag_has_a_dedicated_renderer() {
    let renderer = renderer();
    let semantics = SemanticIndex::new();

    for tag in CONNECTION_TAGS {
        assert!(ElementKind::from_tag(&qn(tag)).unwrap().is_connection());
        let rendered = renderer
            .render_connection(&semantics, &connection_datum("Flow_1", tag))
            .to_string();
        assert!(
            !rendered.contains("rn-default"),
            "{tag} fell back to the default renderer"
        );
    }
}

#[test]
fn unknown_tags_delegate_to_default_rendering() {
    let renderer = renderer();
    let semantics = SemanticIndex::new();

    let shape = renderer
        .render_shape(&semantics, &shape_datum("Odd_1", "vendor:Widget"))
        .to_string();
    assert!(shape.contains("rn-default"));

    let connection = renderer
        .render_connection(&semantics, &connection_datum("Odd_2", "vendor:Wire"))
        .to_string();
    assert!(connection.contains("rn-default"));
}

#[test]
fn event_definition_precedence_is_fixed() {
    let renderer = renderer();

    let cases: [(&[&str], bool, Option<EventDefinitionKind>); 10] = [
        (
            &["bpmn:TimerEventDefinition", "bpmn:MessageEventDefinition"],
            false,
            Some(EventDefinitionKind::Message),
        ),
        (
            &["bpmn:TimerEventDefinition"],
            false,
            Some(EventDefinitionKind::Timer),
        ),
        (
            &["bpmn:ConditionalEventDefinition"],
            false,
            Some(EventDefinitionKind::Conditional),
        ),
        (
            &["bpmn:SignalEventDefinition"],
            false,
            Some(EventDefinitionKind::Signal),
        ),
        // two definitions, neither cancel nor terminate: the multiple case
        (
            &[
                "bpmn:EscalationEventDefinition",
                "bpmn:ErrorEventDefinition",
            ],
            false,
            Some(EventDefinitionKind::Multiple),
        ),
        (
            &[
                "bpmn:EscalationEventDefinition",
                "bpmn:ErrorEventDefinition",
            ],
            true,
            Some(EventDefinitionKind::ParallelMultiple),
        ),
        // a terminate definition suppresses the multiple case
        (
            &["bpmn:ErrorEventDefinition", "bpmn:TerminateEventDefinition"],
            false,
            Some(EventDefinitionKind::Error),
        ),
        (
            &["bpmn:CancelEventDefinition"],
            false,
            Some(EventDefinitionKind::Cancel),
        ),
        (
            &["bpmn:TerminateEventDefinition"],
            false,
            Some(EventDefinitionKind::Terminate),
        ),
        (&[], false, None),
    ];

    for (definitions, parallel_multiple, expected) in cases {
        let semantics = event_semantics("bpmn:IntermediateCatchEvent", definitions, parallel_multiple);
        assert_eq!(
            renderer.select_event_content(&semantics, "Event_1"),
            expected,
            "definitions {definitions:?}, parallelMultiple {parallel_multiple}"
        );
    }
}

#[test]
fn event_without_matching_definition_draws_no_glyph() {
    let renderer = renderer();
    let plain = event_semantics("bpmn:StartEvent", &[], false);
    let with_message = event_semantics("bpmn:StartEvent", &["bpmn:MessageEventDefinition"], false);

    let datum = ShapeDatum {
        id: "Event_1".to_string(),
        element_type: qn("bpmn:StartEvent"),
        width: 36.0,
        height: 36.0,
    };

    let bare = renderer.render_shape(&plain, &datum).to_string();
    let decorated = renderer.render_shape(&with_message, &datum).to_string();

    // the bare event is just the circle; the decorated one adds a path
    assert!(!bare.contains("<path"));
    assert!(decorated.contains("<path"));
}

#[test]
fn throw_events_invert_the_message_glyph() {
    let renderer = renderer();
    let datum = ShapeDatum {
        id: "Event_1".to_string(),
        element_type: qn("bpmn:IntermediateThrowEvent"),
        width: 36.0,
        height: 36.0,
    };

    let throw = event_semantics(
        "bpmn:IntermediateThrowEvent",
        &["bpmn:MessageEventDefinition"],
        false,
    );
    let rendered = renderer.render_shape(&throw, &datum).to_string();
    assert!(rendered.contains(r#"stroke="white""#));

    let catch = event_semantics(
        "bpmn:IntermediateCatchEvent",
        &["bpmn:MessageEventDefinition"],
        false,
    );
    let datum = ShapeDatum {
        element_type: qn("bpmn:IntermediateCatchEvent"),
        ..datum
    };
    let rendered = renderer.render_shape(&catch, &datum).to_string();
    assert!(!rendered.contains(r#"stroke="white""#));
}

#[test]
fn end_events_are_throw_styled() {
    let renderer = renderer();
    let semantics = event_semantics("bpmn:EndEvent", &["bpmn:SignalEventDefinition"], false);
    let datum = ShapeDatum {
        id: "Event_1".to_string(),
        element_type: qn("bpmn:EndEvent"),
        width: 36.0,
        height: 36.0,
    };

    let rendered = renderer.render_shape(&semantics, &datum).to_string();
    // the signal triangle is filled for throw events
    assert!(rendered.contains(r#"fill="black""#));
}

#[test]
fn non_interrupting_boundary_events_are_dashed() {
    let factory = Factory::standard().unwrap();
    let event = factory.create(&qn("bpmn:BoundaryEvent")).unwrap();
    event.set(qn("bpmn:id"), Value::Str("Boundary_1".into()));
    event.set(qn("bpmn:cancelActivity"), Value::Bool(false));
    let mut semantics = SemanticIndex::new();
    semantics.insert("Boundary_1", event);

    let renderer = renderer();
    let datum = ShapeDatum {
        id: "Boundary_1".to_string(),
        element_type: qn("bpmn:BoundaryEvent"),
        width: 36.0,
        height: 36.0,
    };

    let rendered = renderer.render_shape(&semantics, &datum).to_string();
    assert!(rendered.contains(r#"stroke-dasharray="12""#));

    // an interrupting boundary event keeps solid strokes
    let interrupting = factory.create(&qn("bpmn:BoundaryEvent")).unwrap();
    interrupting.set(qn("bpmn:id"), Value::Str("Boundary_1".into()));
    let mut semantics = SemanticIndex::new();
    semantics.insert("Boundary_1", interrupting);
    let rendered = renderer.render_shape(&semantics, &datum).to_string();
    assert!(!rendered.contains("stroke-dasharray"));
}

#[test]
fn collection_marker_follows_the_referenced_data_object() {
    let factory = Factory::standard().unwrap();
    let data_object = factory.create(&qn("bpmn:DataObject")).unwrap();
    data_object.set(qn("bpmn:id"), Value::Str("DataObject_1".into()));
    data_object.set(qn("bpmn:isCollection"), Value::Bool(true));

    let reference = factory.create(&qn("bpmn:DataObjectReference")).unwrap();
    reference.set(qn("bpmn:id"), Value::Str("Ref_1".into()));
    reference.set(qn("bpmn:dataObjectRef"), Value::Ref("DataObject_1".into()));

    let mut semantics = SemanticIndex::new();
    semantics.insert("DataObject_1", data_object);
    semantics.insert("Ref_1", reference);

    let renderer = renderer();
    let datum = ShapeDatum {
        id: "Ref_1".to_string(),
        element_type: qn("bpmn:DataObjectReference"),
        width: 50.0,
        height: 60.0,
    };

    let with_marker = renderer.render_shape(&semantics, &datum).to_string();
    let plain = renderer
        .render_shape(&SemanticIndex::new(), &datum)
        .to_string();

    // the collection decoration adds a second path
    assert!(with_marker.matches("<path").count() > plain.matches("<path").count());
}

#[test]
fn connections_reference_their_markers() {
    let renderer = renderer();
    let semantics = SemanticIndex::new();

    let sequence = renderer
        .render_connection(&semantics, &connection_datum("Flow_1", "bpmn:SequenceFlow"))
        .to_string();
    assert!(sequence.contains("url(#sequenceflow-end)"));

    let message = renderer
        .render_connection(&semantics, &connection_datum("Flow_2", "bpmn:MessageFlow"))
        .to_string();
    assert!(message.contains("url(#messageflow-start)"));
    assert!(message.contains("url(#messageflow-end)"));
    assert!(message.contains(r#"stroke-dasharray="1,3""#));

    let association = renderer
        .render_connection(&semantics, &connection_datum("Assoc_1", "bpmn:Association"))
        .to_string();
    assert!(association.contains(r#"stroke-dasharray="3,3""#));

    let data = renderer
        .render_connection(
            &semantics,
            &connection_datum("DataAssoc_1", "bpmn:DataInputAssociation"),
        )
        .to_string();
    assert!(data.contains("url(#data-association-end)"));
    assert!(data.contains(r#"stroke-dasharray="2,4""#));
}
