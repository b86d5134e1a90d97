//! Semantic-to-graphical rendering dispatch.
//!
//! [`Renderer`] maps each BPMN element type to its visual: events are
//! circles with a glyph chosen from their event definitions, activities are
//! rounded rectangles, gateways diamonds, flows styled polylines with the
//! appropriate end markers. Types outside the known vocabulary fall back to
//! a default drawing routine; an unknown tag is never an error.

use log::trace;
use runnel_model::element::{ElementRef, Value};
use runnel_model::{QName, SemanticIndex};
use svg::node::element::{Group, Path};

use super::markers::MarkerSet;
use super::path_map::{Glyph, PathMap};
use super::{ConnectionDatum, ShapeDatum, Styles, circle, diamond, path, polyline, rounded_rect};
use crate::geometry::Size;

const TASK_BORDER_RADIUS: f64 = 8.0;
const INNER_OUTER_DIST: f64 = 3.0;
const NON_INTERRUPTING_DASH: &str = "12";

fn bpmn(local: &str) -> QName {
    QName::new("bpmn", local)
}

/// The closed vocabulary of element types the renderer knows.
///
/// Parsing is exact-match on the full qualified tag; aliasing of several
/// tags onto one drawing routine happens in the dispatch, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    StartEvent,
    EndEvent,
    IntermediateCatchEvent,
    IntermediateThrowEvent,
    BoundaryEvent,
    Task,
    ServiceTask,
    UserTask,
    ManualTask,
    SendTask,
    ReceiveTask,
    ScriptTask,
    BusinessRuleTask,
    SubProcess,
    AdHocSubProcess,
    Transaction,
    CallActivity,
    Participant,
    Lane,
    ExclusiveGateway,
    InclusiveGateway,
    ComplexGateway,
    ParallelGateway,
    EventBasedGateway,
    SequenceFlow,
    MessageFlow,
    Association,
    DataInputAssociation,
    DataOutputAssociation,
    DataObjectReference,
    DataInput,
    DataOutput,
    DataStoreReference,
}

impl ElementKind {
    /// Resolves a type tag to a kind; `None` means the tag is outside the
    /// known vocabulary and rendering falls back to the default routine.
    pub fn from_tag(tag: &QName) -> Option<Self> {
        if tag.prefix() != "bpmn" {
            return None;
        }
        let kind = match tag.local() {
            "StartEvent" => Self::StartEvent,
            "EndEvent" => Self::EndEvent,
            "IntermediateCatchEvent" => Self::IntermediateCatchEvent,
            "IntermediateThrowEvent" => Self::IntermediateThrowEvent,
            "BoundaryEvent" => Self::BoundaryEvent,
            "Task" => Self::Task,
            "ServiceTask" => Self::ServiceTask,
            "UserTask" => Self::UserTask,
            "ManualTask" => Self::ManualTask,
            "SendTask" => Self::SendTask,
            "ReceiveTask" => Self::ReceiveTask,
            "ScriptTask" => Self::ScriptTask,
            "BusinessRuleTask" => Self::BusinessRuleTask,
            "SubProcess" => Self::SubProcess,
            "AdHocSubProcess" => Self::AdHocSubProcess,
            "Transaction" => Self::Transaction,
            "CallActivity" => Self::CallActivity,
            "Participant" => Self::Participant,
            "Lane" => Self::Lane,
            "ExclusiveGateway" => Self::ExclusiveGateway,
            "InclusiveGateway" => Self::InclusiveGateway,
            "ComplexGateway" => Self::ComplexGateway,
            "ParallelGateway" => Self::ParallelGateway,
            "EventBasedGateway" => Self::EventBasedGateway,
            "SequenceFlow" => Self::SequenceFlow,
            "MessageFlow" => Self::MessageFlow,
            "Association" => Self::Association,
            "DataInputAssociation" => Self::DataInputAssociation,
            "DataOutputAssociation" => Self::DataOutputAssociation,
            "DataObjectReference" => Self::DataObjectReference,
            "DataInput" => Self::DataInput,
            "DataOutput" => Self::DataOutput,
            "DataStoreReference" => Self::DataStoreReference,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns true for kinds drawn as connections.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::SequenceFlow
                | Self::MessageFlow
                | Self::Association
                | Self::DataInputAssociation
                | Self::DataOutputAssociation
        )
    }
}

/// Which event-definition rendering path was selected for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDefinitionKind {
    Message,
    Timer,
    Conditional,
    Signal,
    Multiple,
    ParallelMultiple,
    Escalation,
    Link,
    Error,
    Cancel,
    Compensate,
    Terminate,
}

/// Maps semantic element types to SVG output.
#[derive(Debug)]
pub struct Renderer {
    styles: Styles,
    path_map: PathMap,
    markers: MarkerSet,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Styles::default())
    }
}

impl Renderer {
    /// Creates a renderer, building its marker set once up front.
    pub fn new(styles: Styles) -> Self {
        let markers = MarkerSet::new(&styles);
        Self {
            styles,
            path_map: PathMap::new(),
            markers,
        }
    }

    /// Returns the connection markers this renderer references.
    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Renders a shape datum into a positioned-at-origin SVG group.
    ///
    /// Unknown type tags delegate to the default shape routine.
    pub fn render_shape(&self, semantics: &SemanticIndex, datum: &ShapeDatum) -> Group {
        let Some(kind) = ElementKind::from_tag(&datum.element_type) else {
            trace!(element_type:% = datum.element_type; "no shape renderer, using default");
            return self.default_shape(datum);
        };
        if kind.is_connection() {
            trace!(element_type:% = datum.element_type; "connection tag in shape position");
            return self.default_shape(datum);
        }

        let size = datum.size();
        let group = Group::new().set(
            "class",
            format!("rn-shape rn-{}", datum.element_type.local()),
        );

        match kind {
            ElementKind::StartEvent => {
                let group = group.add(circle(size, 0.0, &self.styles));
                self.append_event_content(semantics, datum, group)
            }
            ElementKind::EndEvent => {
                let group = group.add(circle(size, 0.0, &self.styles).set("stroke-width", 4));
                self.append_event_content(semantics, datum, group)
            }
            ElementKind::IntermediateCatchEvent | ElementKind::IntermediateThrowEvent => {
                let group = group
                    .add(circle(size, 0.0, &self.styles))
                    .add(circle(size, INNER_OUTER_DIST, &self.styles));
                self.append_event_content(semantics, datum, group)
            }
            ElementKind::BoundaryEvent => {
                let interrupting = self.is_interrupting(semantics, &datum.id);
                let mut outer = circle(size, 0.0, &self.styles);
                let mut inner = circle(size, INNER_OUTER_DIST, &self.styles);
                if !interrupting {
                    outer = outer.set("stroke-dasharray", NON_INTERRUPTING_DASH);
                    inner = inner.set("stroke-dasharray", NON_INTERRUPTING_DASH);
                }
                let group = group.add(outer).add(inner);
                self.append_event_content(semantics, datum, group)
            }
            ElementKind::Task
            | ElementKind::ServiceTask
            | ElementKind::UserTask
            | ElementKind::ManualTask
            | ElementKind::SendTask
            | ElementKind::ReceiveTask
            | ElementKind::ScriptTask
            | ElementKind::BusinessRuleTask
            | ElementKind::SubProcess
            | ElementKind::AdHocSubProcess => {
                group.add(rounded_rect(size, TASK_BORDER_RADIUS, 0.0, &self.styles))
            }
            ElementKind::Transaction => group
                .add(
                    rounded_rect(size, TASK_BORDER_RADIUS, 0.0, &self.styles)
                        .set("stroke-width", 1.5),
                )
                .add(
                    rounded_rect(
                        size,
                        TASK_BORDER_RADIUS - 2.0,
                        INNER_OUTER_DIST,
                        &self.styles,
                    )
                    .set("stroke-width", 1.5),
                ),
            ElementKind::CallActivity => group.add(
                rounded_rect(size, TASK_BORDER_RADIUS, 0.0, &self.styles).set("stroke-width", 4),
            ),
            ElementKind::Participant | ElementKind::Lane => {
                group.add(rounded_rect(size, 0.0, 0.0, &self.styles))
            }
            ElementKind::ExclusiveGateway
            | ElementKind::InclusiveGateway
            | ElementKind::ComplexGateway
            | ElementKind::ParallelGateway
            | ElementKind::EventBasedGateway => group.add(diamond(size, &self.styles)),
            ElementKind::DataObjectReference => self.render_data_object(semantics, datum, group),
            ElementKind::DataInput => {
                let group = self.render_data_object(semantics, datum, group);
                group.add(self.data_arrow(size, false))
            }
            ElementKind::DataOutput => {
                let group = self.render_data_object(semantics, datum, group);
                group.add(self.data_arrow(size, true))
            }
            ElementKind::DataStoreReference => {
                let mut store = path(self.path_map.raw_path(Glyph::DataStore), false, &self.styles)
                    .set("stroke-width", 1);
                if let Some(transform) = self.path_map.fit_transform(Glyph::DataStore, size) {
                    store = store.set("transform", transform);
                }
                group.add(store)
            }
            // connection kinds are unreachable here, handled above
            _ => self.default_shape(datum),
        }
    }

    /// Renders a connection datum into an SVG group.
    ///
    /// Unknown type tags delegate to the default connection routine.
    /// Connection styling is purely type-driven; the semantic index is part
    /// of the contract but not consulted here.
    pub fn render_connection(&self, _semantics: &SemanticIndex, datum: &ConnectionDatum) -> Group {
        let Some(kind) = ElementKind::from_tag(&datum.element_type) else {
            trace!(element_type:% = datum.element_type; "no connection renderer, using default");
            return self.default_connection(datum);
        };

        let group = Group::new().set(
            "class",
            format!("rn-connection rn-{}", datum.element_type.local()),
        );
        let line = polyline(&datum.waypoints, &self.styles);

        match kind {
            ElementKind::SequenceFlow => {
                group.add(line.set("marker-end", self.markers.sequence_flow_end()))
            }
            ElementKind::Association => group.add(line.set("stroke-dasharray", "3,3")),
            ElementKind::DataInputAssociation | ElementKind::DataOutputAssociation => group.add(
                line.set("stroke-dasharray", "2,4")
                    .set("marker-end", self.markers.data_association_end()),
            ),
            ElementKind::MessageFlow => group.add(
                line.set("stroke-dasharray", "1,3")
                    .set("marker-start", self.markers.message_flow_start())
                    .set("marker-end", self.markers.message_flow_end()),
            ),
            _ => {
                trace!(element_type:% = datum.element_type; "shape tag in connection position");
                self.default_connection(datum)
            }
        }
    }

    /// Picks the event-definition rendering path for an event element.
    ///
    /// The precedence order is fixed: message, timer, conditional, signal,
    /// then the multiple/parallel-multiple pair, then escalation, link,
    /// error, cancel, compensate, terminate. The multiple pair triggers
    /// only when neither a cancel- nor a terminate-style definition is
    /// present but at least two definitions are; the `parallelMultiple`
    /// flag picks between the two variants. `None` means no glyph is drawn.
    pub fn select_event_content(
        &self,
        semantics: &SemanticIndex,
        id: &str,
    ) -> Option<EventDefinitionKind> {
        let definitions: Vec<QName> = event_definitions(semantics, id)
            .iter()
            .map(ElementRef::type_name)
            .collect();
        let has = |local: &str| {
            definitions
                .iter()
                .any(|definition| definition.prefix() == "bpmn" && definition.local() == local)
        };

        if has("MessageEventDefinition") {
            Some(EventDefinitionKind::Message)
        } else if has("TimerEventDefinition") {
            Some(EventDefinitionKind::Timer)
        } else if has("ConditionalEventDefinition") {
            Some(EventDefinitionKind::Conditional)
        } else if has("SignalEventDefinition") {
            Some(EventDefinitionKind::Signal)
        } else if !has("CancelEventDefinition")
            && !has("TerminateEventDefinition")
            && definitions.len() >= 2
            && !parallel_multiple(semantics, id)
        {
            Some(EventDefinitionKind::Multiple)
        } else if !has("CancelEventDefinition")
            && !has("TerminateEventDefinition")
            && definitions.len() >= 2
            && parallel_multiple(semantics, id)
        {
            Some(EventDefinitionKind::ParallelMultiple)
        } else if has("EscalationEventDefinition") {
            Some(EventDefinitionKind::Escalation)
        } else if has("LinkEventDefinition") {
            Some(EventDefinitionKind::Link)
        } else if has("ErrorEventDefinition") {
            Some(EventDefinitionKind::Error)
        } else if has("CancelEventDefinition") {
            Some(EventDefinitionKind::Cancel)
        } else if has("CompensateEventDefinition") {
            Some(EventDefinitionKind::Compensate)
        } else if has("TerminateEventDefinition") {
            Some(EventDefinitionKind::Terminate)
        } else {
            None
        }
    }

    fn append_event_content(
        &self,
        semantics: &SemanticIndex,
        datum: &ShapeDatum,
        group: Group,
    ) -> Group {
        let Some(kind) = self.select_event_content(semantics, &datum.id) else {
            return group;
        };
        let throw = is_throw_event(semantics, &datum.id);
        let size = datum.size();

        match kind {
            EventDefinitionKind::Message => {
                // throw messages invert fill and stroke
                let mut envelope = self.glyph(Glyph::EventMessage, size, throw);
                if throw {
                    envelope = envelope
                        .set("fill", self.styles.stroke().to_string())
                        .set("stroke", self.styles.fill().to_string());
                }
                group.add(envelope)
            }
            EventDefinitionKind::Timer => group
                .add(self.glyph(Glyph::EventTimerFace, size, false))
                .add(
                    self.glyph(Glyph::EventTimerHands, size, false)
                        .set("stroke-width", 1.5)
                        .set("stroke-linecap", "round"),
                )
                .add(self.glyph(Glyph::EventTimerTicks, size, false)),
            EventDefinitionKind::Conditional => {
                group.add(self.glyph(Glyph::EventConditional, size, false))
            }
            EventDefinitionKind::Signal => group.add(self.glyph(Glyph::EventSignal, size, throw)),
            EventDefinitionKind::Multiple => {
                group.add(self.glyph(Glyph::EventMultiple, size, throw))
            }
            EventDefinitionKind::ParallelMultiple => {
                group.add(self.glyph(Glyph::EventParallelMultiple, size, false))
            }
            EventDefinitionKind::Escalation => {
                group.add(self.glyph(Glyph::EventEscalation, size, throw))
            }
            EventDefinitionKind::Link => group.add(self.glyph(Glyph::EventLink, size, false)),
            EventDefinitionKind::Error => group.add(self.glyph(Glyph::EventError, size, throw)),
            EventDefinitionKind::Cancel => group.add(self.glyph(Glyph::EventCancel, size, throw)),
            EventDefinitionKind::Compensate => {
                group.add(self.glyph(Glyph::EventCompensation, size, throw))
            }
            EventDefinitionKind::Terminate => group.add(
                circle(size, 7.0, &self.styles)
                    .set("stroke-width", 4)
                    .set("fill", self.styles.stroke().to_string()),
            ),
        }
    }

    fn glyph(&self, glyph: Glyph, size: Size, fill: bool) -> Path {
        let mut node =
            path(self.path_map.raw_path(glyph), fill, &self.styles).set("stroke-width", 1);
        if let Some(transform) = self.path_map.fit_transform(glyph, size) {
            node = node.set("transform", transform);
        }
        node
    }

    fn render_data_object(
        &self,
        semantics: &SemanticIndex,
        datum: &ShapeDatum,
        group: Group,
    ) -> Group {
        let size = datum.size();
        let mut outline = path(self.path_map.raw_path(Glyph::DataObject), false, &self.styles);
        if let Some(transform) = self.path_map.fit_transform(Glyph::DataObject, size) {
            outline = outline.set("transform", transform);
        }
        let group = group.add(outline);

        if is_collection(semantics, &datum.id) {
            let reference = self.path_map.reference_box(Glyph::DataCollection);
            let sx = size.width() / reference.width();
            let sy = size.height() / reference.height();
            let marker = path(
                self.path_map.raw_path(Glyph::DataCollection),
                true,
                &self.styles,
            )
            .set("stroke-width", 1)
            .set("transform", format!("scale({sx} {sy}) translate(17.8 42)"));
            group.add(marker)
        } else {
            group
        }
    }

    fn data_arrow(&self, size: Size, filled: bool) -> Path {
        let reference = self.path_map.reference_box(Glyph::DataArrow);
        let sx = size.width() / reference.width();
        let sy = size.height() / reference.height();
        path(self.path_map.raw_path(Glyph::DataArrow), filled, &self.styles)
            .set("stroke-width", 1)
            .set("transform", format!("scale({sx} {sy}) translate(7 7)"))
    }

    fn default_shape(&self, datum: &ShapeDatum) -> Group {
        Group::new()
            .set("class", "rn-shape rn-default")
            .add(rounded_rect(datum.size(), 0.0, 0.0, &self.styles))
    }

    fn default_connection(&self, datum: &ConnectionDatum) -> Group {
        Group::new()
            .set("class", "rn-connection rn-default")
            .add(polyline(&datum.waypoints, &self.styles))
    }

    fn is_interrupting(&self, semantics: &SemanticIndex, id: &str) -> bool {
        semantics
            .get(id)
            .and_then(|element| element.get(&bpmn("cancelActivity")))
            .and_then(|value| value.as_bool())
            // boundary events interrupt unless marked otherwise
            .unwrap_or(true)
    }
}

fn event_definitions(semantics: &SemanticIndex, id: &str) -> Vec<ElementRef> {
    semantics
        .get(id)
        .and_then(|element| element.get(&bpmn("eventDefinitions")))
        .and_then(|value| match value {
            Value::List(items) => Some(items),
            _ => None,
        })
        .unwrap_or_default()
}

fn parallel_multiple(semantics: &SemanticIndex, id: &str) -> bool {
    semantics
        .get(id)
        .and_then(|element| element.get(&bpmn("parallelMultiple")))
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

fn is_throw_event(semantics: &SemanticIndex, id: &str) -> bool {
    semantics.get(id).is_some_and(|element| {
        let type_name = element.type_name();
        type_name == bpmn("IntermediateThrowEvent") || type_name == bpmn("EndEvent")
    })
}

/// `isCollection` may live on the reference itself or on the data object it
/// points at; both locations are honored.
fn is_collection(semantics: &SemanticIndex, id: &str) -> bool {
    let Some(element) = semantics.get(id) else {
        return false;
    };
    if element
        .get(&bpmn("isCollection"))
        .and_then(|value| value.as_bool())
        == Some(true)
    {
        return true;
    }
    element
        .get(&bpmn("dataObjectRef"))
        .and_then(|value| match value {
            Value::Ref(target) => semantics.get(&target).cloned(),
            _ => None,
        })
        .and_then(|target| target.get(&bpmn("isCollection")))
        .and_then(|value| value.as_bool())
        == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing_is_exact_match() {
        assert_eq!(
            ElementKind::from_tag(&"bpmn:UserTask".parse().unwrap()),
            Some(ElementKind::UserTask)
        );
        // no prefix or substring matching
        assert_eq!(ElementKind::from_tag(&"bpmn:UserTaskX".parse().unwrap()), None);
        assert_eq!(ElementKind::from_tag(&"bpmn:User".parse().unwrap()), None);
        assert_eq!(ElementKind::from_tag(&"other:UserTask".parse().unwrap()), None);
    }

    #[test]
    fn test_connection_kinds() {
        assert!(ElementKind::SequenceFlow.is_connection());
        assert!(ElementKind::DataOutputAssociation.is_connection());
        assert!(!ElementKind::BoundaryEvent.is_connection());
    }
}
