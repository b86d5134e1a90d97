//! Diagram interchange documents.
//!
//! A document is the JSON form of a laid-out BPMN diagram: every element
//! record carries its semantic facts (type tag, event definitions,
//! extension attributes) together with resolved geometry (bounds for
//! shapes, waypoints for connections). Loading a document builds the
//! semantic element tree through a [`Factory`], fills the
//! [`SemanticIndex`] the renderer reads, and yields the per-paint datums.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;

use runnel_model::element::Value;
use runnel_model::{Factory, QName, SemanticIndex};

use crate::draw::{ConnectionDatum, ShapeDatum};
use crate::error::RunnelError;
use crate::geometry::Point;

fn bpmn(local: &str) -> QName {
    QName::new("bpmn", local)
}

/// The serde form of a diagram document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDoc {
    #[serde(default)]
    name: Option<String>,
    elements: Vec<ElementRecord>,
}

/// One element record: semantics plus resolved geometry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ElementRecord {
    id: String,
    #[serde(rename = "type")]
    element_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bounds: Option<BoundsRecord>,
    #[serde(default)]
    waypoints: Option<Vec<Point>>,
    #[serde(default)]
    source_ref: Option<String>,
    #[serde(default)]
    target_ref: Option<String>,
    #[serde(default)]
    data_object_ref: Option<String>,
    #[serde(default)]
    attached_to_ref: Option<String>,
    #[serde(default)]
    event_definitions: Vec<String>,
    #[serde(default)]
    parallel_multiple: Option<bool>,
    #[serde(default)]
    is_collection: Option<bool>,
    #[serde(default)]
    cancel_activity: Option<bool>,
    /// Extension attributes keyed by qualified name, e.g.
    /// `camunda:asyncBefore`.
    #[serde(default)]
    attributes: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct BoundsRecord {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// A shape datum together with its resolved position.
#[derive(Debug, Clone)]
pub struct PlacedShape {
    datum: ShapeDatum,
    origin: Point,
}

impl PlacedShape {
    pub fn datum(&self) -> &ShapeDatum {
        &self.datum
    }

    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// A loaded diagram: semantic index plus renderer-ready datums.
#[derive(Debug)]
pub struct Diagram {
    name: Option<String>,
    semantics: SemanticIndex,
    shapes: Vec<PlacedShape>,
    connections: Vec<ConnectionDatum>,
}

impl Diagram {
    /// Returns the diagram name, if the document carried one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the semantic lookup index.
    pub fn semantics(&self) -> &SemanticIndex {
        &self.semantics
    }

    /// Returns the placed shapes, in document order.
    pub fn shapes(&self) -> &[PlacedShape] {
        &self.shapes
    }

    /// Returns the connection datums, in document order.
    pub fn connections(&self) -> &[ConnectionDatum] {
        &self.connections
    }
}

/// Parses a JSON document and builds the diagram.
pub fn parse_json(source: &str, factory: &Factory) -> Result<Diagram, RunnelError> {
    let doc: DiagramDoc = serde_json::from_str(source)?;
    build(doc, factory)
}

fn build(doc: DiagramDoc, factory: &Factory) -> Result<Diagram, RunnelError> {
    let process = factory.create(&bpmn("Process"))?;
    if let Some(name) = &doc.name {
        process.set(bpmn("name"), Value::Str(name.clone()));
    }

    let mut semantics = SemanticIndex::new();
    let mut shapes = Vec::new();
    let mut connections = Vec::new();
    let mut flow_elements = Vec::new();

    for record in &doc.elements {
        let element_type: QName = record.element_type.parse()?;

        if factory.schema().contains_type(&element_type) {
            let element = build_semantic(record, &element_type, factory)?;
            element.set_parent(&process);
            flow_elements.push(element.clone());
            semantics.insert(record.id.clone(), element);
        } else {
            // unknown vocabulary still renders, through the default routine
            warn!(
                id = record.id,
                element_type:% = element_type;
                "element type not in schema, rendering with defaults"
            );
        }

        match (&record.waypoints, &record.bounds) {
            (Some(waypoints), _) => connections.push(ConnectionDatum {
                id: record.id.clone(),
                element_type,
                waypoints: waypoints.clone(),
            }),
            (None, Some(bounds)) => shapes.push(PlacedShape {
                datum: ShapeDatum {
                    id: record.id.clone(),
                    element_type,
                    width: bounds.width,
                    height: bounds.height,
                },
                origin: Point::new(bounds.x, bounds.y),
            }),
            (None, None) => {
                return Err(RunnelError::Document(format!(
                    "element `{}` has neither bounds nor waypoints",
                    record.id
                )));
            }
        }
    }

    process.set(bpmn("flowElements"), Value::List(flow_elements));

    debug!(
        shapes = shapes.len(),
        connections = connections.len();
        "diagram document loaded"
    );

    Ok(Diagram {
        name: doc.name,
        semantics,
        shapes,
        connections,
    })
}

fn build_semantic(
    record: &ElementRecord,
    element_type: &QName,
    factory: &Factory,
) -> Result<runnel_model::ElementRef, RunnelError> {
    let element = factory.create(element_type)?;
    element.set(bpmn("id"), Value::Str(record.id.clone()));

    if let Some(name) = &record.name {
        element.set(bpmn("name"), Value::Str(name.clone()));
    }
    if let Some(flag) = record.parallel_multiple {
        element.set(bpmn("parallelMultiple"), Value::Bool(flag));
    }
    if let Some(flag) = record.is_collection {
        element.set(bpmn("isCollection"), Value::Bool(flag));
    }
    if let Some(flag) = record.cancel_activity {
        element.set(bpmn("cancelActivity"), Value::Bool(flag));
    }
    if let Some(target) = &record.source_ref {
        element.set(bpmn("sourceRef"), Value::Ref(target.clone()));
    }
    if let Some(target) = &record.target_ref {
        element.set(bpmn("targetRef"), Value::Ref(target.clone()));
    }
    if let Some(target) = &record.data_object_ref {
        element.set(bpmn("dataObjectRef"), Value::Ref(target.clone()));
    }
    if let Some(target) = &record.attached_to_ref {
        element.set(bpmn("attachedToRef"), Value::Ref(target.clone()));
    }

    if !record.event_definitions.is_empty() {
        let mut definitions = Vec::new();
        for tag in &record.event_definitions {
            let definition_type: QName = tag.parse()?;
            let definition = factory.create(&definition_type)?;
            definition.set_parent(&element);
            definitions.push(definition);
        }
        element.set(bpmn("eventDefinitions"), Value::List(definitions));
    }

    for (key, raw) in &record.attributes {
        let attribute: QName = key.parse()?;
        let value = match raw {
            serde_json::Value::Bool(flag) => Value::Bool(*flag),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(integer) => Value::Int(integer),
                None => Value::Float(number.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(text) => Value::Str(text.clone()),
            other => {
                warn!(
                    id = record.id,
                    attribute:% = attribute,
                    value:% = other;
                    "unsupported attribute value, skipping"
                );
                continue;
            }
        };
        element.set(attribute, value);
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> Factory {
        Factory::standard().unwrap()
    }

    #[test]
    fn test_load_shape_and_connection() {
        let source = r#"{
            "name": "demo",
            "elements": [
                {
                    "id": "Start_1",
                    "type": "bpmn:StartEvent",
                    "bounds": { "x": 10, "y": 20, "width": 36, "height": 36 },
                    "eventDefinitions": ["bpmn:MessageEventDefinition"]
                },
                {
                    "id": "Flow_1",
                    "type": "bpmn:SequenceFlow",
                    "sourceRef": "Start_1",
                    "targetRef": "Start_1",
                    "waypoints": [ { "x": 46, "y": 38 }, { "x": 100, "y": 38 } ]
                }
            ]
        }"#;

        let diagram = parse_json(source, &factory()).unwrap();
        assert_eq!(diagram.name(), Some("demo"));
        assert_eq!(diagram.shapes().len(), 1);
        assert_eq!(diagram.connections().len(), 1);

        let start = diagram.semantics().get("Start_1").unwrap();
        let definitions = start
            .get(&bpmn("eventDefinitions"))
            .and_then(|value| value.as_list().map(<[_]>::to_vec))
            .unwrap();
        assert_eq!(definitions.len(), 1);
        assert!(definitions[0].parent().unwrap().same_as(start));
    }

    #[test]
    fn test_unknown_type_keeps_datum_only() {
        let source = r#"{
            "elements": [
                {
                    "id": "Odd_1",
                    "type": "vendor:Widget",
                    "bounds": { "x": 0, "y": 0, "width": 50, "height": 50 }
                }
            ]
        }"#;

        let diagram = parse_json(source, &factory()).unwrap();
        assert_eq!(diagram.shapes().len(), 1);
        assert!(diagram.semantics().get("Odd_1").is_none());
    }

    #[test]
    fn test_extension_attributes_are_qualified() {
        let source = r#"{
            "elements": [
                {
                    "id": "Task_1",
                    "type": "bpmn:UserTask",
                    "bounds": { "x": 0, "y": 0, "width": 100, "height": 80 },
                    "attributes": { "camunda:assignee": "kermit" }
                }
            ]
        }"#;

        let diagram = parse_json(source, &factory()).unwrap();
        let task = diagram.semantics().get("Task_1").unwrap();
        assert_eq!(
            task.get(&QName::new("camunda", "assignee"))
                .and_then(|value| value.as_str().map(String::from)),
            Some("kermit".to_string())
        );
    }

    #[test]
    fn test_missing_geometry_is_an_error() {
        let source = r#"{
            "elements": [ { "id": "Task_1", "type": "bpmn:UserTask" } ]
        }"#;

        let result = parse_json(source, &factory());
        assert!(matches!(result, Err(RunnelError::Document(_))));
    }
}
