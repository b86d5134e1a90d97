//! Built-in vocabulary packages.
//!
//! The `bpmn` package declares the base process vocabulary the renderer and
//! clone helper operate over; the `camunda` package layers the vendor
//! extension types and attributes on top. Extension packages beyond these
//! two can be registered the same way through [`Schema::new`].

use crate::error::ModelError;
use crate::name::QName;
use crate::schema::{Package, PropertyDescriptor, Schema, TypeDescriptor};

fn bpmn(local: &str) -> QName {
    QName::new("bpmn", local)
}

fn camunda(local: &str) -> QName {
    QName::new("camunda", local)
}

/// Builds the base BPMN vocabulary package.
pub fn bpmn_package() -> Package {
    use PropertyDescriptor as P;

    let types = vec![
        TypeDescriptor::new(
            bpmn("BaseElement"),
            None,
            vec![
                P::id(bpmn("id")),
                P::many_contained(bpmn("documentation"), bpmn("Documentation")),
                P::contained(bpmn("extensionElements"), bpmn("ExtensionElements")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("Documentation"),
            Some(bpmn("BaseElement")),
            vec![P::scalar(bpmn("text")), P::scalar(bpmn("textFormat"))],
        ),
        TypeDescriptor::new(
            bpmn("ExtensionElements"),
            None,
            vec![P::many_contained(bpmn("values"), bpmn("BaseElement"))],
        )
        .extension_container(),
        // flow element hierarchy
        TypeDescriptor::new(
            bpmn("FlowElement"),
            Some(bpmn("BaseElement")),
            vec![P::scalar(bpmn("name"))],
        ),
        TypeDescriptor::new(
            bpmn("FlowNode"),
            Some(bpmn("FlowElement")),
            vec![
                P::many_references(bpmn("incoming")),
                P::many_references(bpmn("outgoing")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("Activity"),
            Some(bpmn("FlowNode")),
            vec![
                P::contained(bpmn("loopCharacteristics"), bpmn("LoopCharacteristics")),
                P::reference(bpmn("default")),
            ],
        ),
        TypeDescriptor::new(bpmn("Task"), Some(bpmn("Activity")), vec![]),
        TypeDescriptor::new(bpmn("ServiceTask"), Some(bpmn("Task")), vec![]),
        TypeDescriptor::new(bpmn("UserTask"), Some(bpmn("Task")), vec![]),
        TypeDescriptor::new(bpmn("ManualTask"), Some(bpmn("Task")), vec![]),
        TypeDescriptor::new(bpmn("SendTask"), Some(bpmn("Task")), vec![]),
        TypeDescriptor::new(bpmn("ReceiveTask"), Some(bpmn("Task")), vec![]),
        TypeDescriptor::new(
            bpmn("ScriptTask"),
            Some(bpmn("Task")),
            vec![P::scalar(bpmn("scriptFormat")), P::scalar(bpmn("script"))],
        ),
        TypeDescriptor::new(bpmn("BusinessRuleTask"), Some(bpmn("Task")), vec![]),
        TypeDescriptor::new(
            bpmn("SubProcess"),
            Some(bpmn("Activity")),
            vec![P::scalar(bpmn("triggeredByEvent"))],
        ),
        TypeDescriptor::new(bpmn("AdHocSubProcess"), Some(bpmn("SubProcess")), vec![]),
        TypeDescriptor::new(bpmn("Transaction"), Some(bpmn("SubProcess")), vec![]),
        TypeDescriptor::new(
            bpmn("CallActivity"),
            Some(bpmn("Activity")),
            vec![P::scalar(bpmn("calledElement"))],
        ),
        // gateways
        TypeDescriptor::new(bpmn("Gateway"), Some(bpmn("FlowNode")), vec![]),
        TypeDescriptor::new(bpmn("ExclusiveGateway"), Some(bpmn("Gateway")), vec![]),
        TypeDescriptor::new(bpmn("InclusiveGateway"), Some(bpmn("Gateway")), vec![]),
        TypeDescriptor::new(bpmn("ComplexGateway"), Some(bpmn("Gateway")), vec![]),
        TypeDescriptor::new(bpmn("ParallelGateway"), Some(bpmn("Gateway")), vec![]),
        TypeDescriptor::new(
            bpmn("EventBasedGateway"),
            Some(bpmn("Gateway")),
            vec![P::scalar(bpmn("instantiate"))],
        ),
        // events
        TypeDescriptor::new(bpmn("Event"), Some(bpmn("FlowNode")), vec![]),
        TypeDescriptor::new(
            bpmn("CatchEvent"),
            Some(bpmn("Event")),
            vec![
                P::scalar(bpmn("parallelMultiple")),
                P::many_contained(bpmn("eventDefinitions"), bpmn("EventDefinition")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("ThrowEvent"),
            Some(bpmn("Event")),
            vec![P::many_contained(
                bpmn("eventDefinitions"),
                bpmn("EventDefinition"),
            )],
        ),
        TypeDescriptor::new(
            bpmn("StartEvent"),
            Some(bpmn("CatchEvent")),
            vec![P::scalar(bpmn("isInterrupting"))],
        ),
        TypeDescriptor::new(bpmn("EndEvent"), Some(bpmn("ThrowEvent")), vec![]),
        TypeDescriptor::new(
            bpmn("IntermediateCatchEvent"),
            Some(bpmn("CatchEvent")),
            vec![],
        ),
        TypeDescriptor::new(
            bpmn("IntermediateThrowEvent"),
            Some(bpmn("ThrowEvent")),
            vec![],
        ),
        TypeDescriptor::new(
            bpmn("BoundaryEvent"),
            Some(bpmn("CatchEvent")),
            vec![
                P::scalar(bpmn("cancelActivity")),
                P::reference(bpmn("attachedToRef")),
            ],
        ),
        // event definitions
        TypeDescriptor::new(bpmn("EventDefinition"), Some(bpmn("BaseElement")), vec![]),
        TypeDescriptor::new(
            bpmn("MessageEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![P::reference(bpmn("messageRef"))],
        ),
        TypeDescriptor::new(
            bpmn("TimerEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![
                P::scalar(bpmn("timeDate")),
                P::scalar(bpmn("timeDuration")),
                P::scalar(bpmn("timeCycle")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("ConditionalEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![P::scalar(bpmn("condition"))],
        ),
        TypeDescriptor::new(
            bpmn("SignalEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![P::reference(bpmn("signalRef"))],
        ),
        TypeDescriptor::new(
            bpmn("EscalationEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![P::reference(bpmn("escalationRef"))],
        ),
        TypeDescriptor::new(
            bpmn("LinkEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![P::scalar(bpmn("name"))],
        ),
        TypeDescriptor::new(
            bpmn("ErrorEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![P::reference(bpmn("errorRef"))],
        ),
        TypeDescriptor::new(
            bpmn("CancelEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![],
        ),
        TypeDescriptor::new(
            bpmn("CompensateEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![
                P::scalar(bpmn("waitForCompletion")),
                P::reference(bpmn("activityRef")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("TerminateEventDefinition"),
            Some(bpmn("EventDefinition")),
            vec![],
        ),
        // connections
        TypeDescriptor::new(
            bpmn("SequenceFlow"),
            Some(bpmn("FlowElement")),
            vec![
                P::reference(bpmn("sourceRef")),
                P::reference(bpmn("targetRef")),
                P::scalar(bpmn("conditionExpression")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("MessageFlow"),
            Some(bpmn("BaseElement")),
            vec![
                P::scalar(bpmn("name")),
                P::reference(bpmn("sourceRef")),
                P::reference(bpmn("targetRef")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("Association"),
            Some(bpmn("BaseElement")),
            vec![
                P::scalar(bpmn("associationDirection")),
                P::reference(bpmn("sourceRef")),
                P::reference(bpmn("targetRef")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("DataAssociation"),
            Some(bpmn("BaseElement")),
            vec![
                P::reference(bpmn("sourceRef")),
                P::reference(bpmn("targetRef")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("DataInputAssociation"),
            Some(bpmn("DataAssociation")),
            vec![],
        ),
        TypeDescriptor::new(
            bpmn("DataOutputAssociation"),
            Some(bpmn("DataAssociation")),
            vec![],
        ),
        // data elements
        TypeDescriptor::new(
            bpmn("DataObject"),
            Some(bpmn("FlowElement")),
            vec![P::scalar(bpmn("isCollection"))],
        ),
        TypeDescriptor::new(
            bpmn("DataObjectReference"),
            Some(bpmn("FlowElement")),
            vec![
                P::reference(bpmn("dataObjectRef")),
                P::scalar(bpmn("isCollection")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("DataInput"),
            Some(bpmn("FlowElement")),
            vec![P::scalar(bpmn("isCollection"))],
        ),
        TypeDescriptor::new(
            bpmn("DataOutput"),
            Some(bpmn("FlowElement")),
            vec![P::scalar(bpmn("isCollection"))],
        ),
        TypeDescriptor::new(
            bpmn("DataStoreReference"),
            Some(bpmn("FlowElement")),
            vec![P::reference(bpmn("dataStoreRef"))],
        ),
        // containers
        TypeDescriptor::new(
            bpmn("Process"),
            Some(bpmn("BaseElement")),
            vec![
                P::scalar(bpmn("name")),
                P::scalar(bpmn("isExecutable")),
                P::many_contained(bpmn("flowElements"), bpmn("FlowElement")),
            ],
        ),
        TypeDescriptor::new(
            bpmn("Participant"),
            Some(bpmn("BaseElement")),
            vec![P::scalar(bpmn("name")), P::reference(bpmn("processRef"))],
        ),
        TypeDescriptor::new(
            bpmn("Lane"),
            Some(bpmn("BaseElement")),
            vec![P::scalar(bpmn("name"))],
        ),
        // loop characteristics
        TypeDescriptor::new(
            bpmn("LoopCharacteristics"),
            Some(bpmn("BaseElement")),
            vec![],
        ),
        TypeDescriptor::new(
            bpmn("MultiInstanceLoopCharacteristics"),
            Some(bpmn("LoopCharacteristics")),
            vec![
                P::scalar(bpmn("isSequential")),
                P::scalar(bpmn("elementVariable")),
            ],
        ),
    ];

    Package::new("BPMN 2.0", "bpmn", types, vec![])
}

/// Builds the Camunda extension package.
///
/// Declares the nested extension types carried inside
/// `bpmn:extensionElements` plus the scalar attributes the package layers
/// onto base elements (`camunda:asyncBefore` and friends).
pub fn camunda_package() -> Package {
    use PropertyDescriptor as P;

    let types = vec![
        TypeDescriptor::new(
            camunda("ExecutionListener"),
            None,
            vec![
                P::scalar(camunda("event")),
                P::scalar(camunda("class")),
                P::scalar(camunda("expression")),
                P::contained(camunda("script"), camunda("Script")),
            ],
        ),
        TypeDescriptor::new(
            camunda("Script"),
            None,
            vec![P::scalar(camunda("scriptFormat")), P::scalar(camunda("value"))],
        ),
        TypeDescriptor::new(
            camunda("InputOutput"),
            None,
            vec![
                P::many_contained(camunda("inputParameters"), camunda("InputParameter")),
                P::many_contained(camunda("outputParameters"), camunda("OutputParameter")),
            ],
        ),
        TypeDescriptor::new(
            camunda("InputParameter"),
            None,
            vec![
                P::scalar(camunda("name")),
                P::contained(camunda("definition"), camunda("List")),
            ],
        ),
        TypeDescriptor::new(
            camunda("OutputParameter"),
            None,
            vec![
                P::scalar(camunda("name")),
                P::contained(camunda("definition"), camunda("List")),
            ],
        ),
        TypeDescriptor::new(
            camunda("List"),
            None,
            vec![P::many_contained(camunda("items"), camunda("Value"))],
        ),
        TypeDescriptor::new(camunda("Value"), None, vec![P::scalar(camunda("value"))]),
        TypeDescriptor::new(
            camunda("Connector"),
            None,
            vec![
                P::scalar(camunda("connectorId")),
                P::contained(camunda("inputOutput"), camunda("InputOutput")),
            ],
        ),
        TypeDescriptor::new(
            camunda("Field"),
            None,
            vec![
                P::scalar(camunda("name")),
                P::scalar(camunda("string")),
                P::scalar(camunda("expression")),
            ],
        ),
        TypeDescriptor::new(
            camunda("FailedJobRetryTimeCycle"),
            None,
            vec![P::scalar(camunda("body"))],
        ),
        TypeDescriptor::new(
            camunda("Properties"),
            None,
            vec![P::many_contained(camunda("values"), camunda("Property"))],
        ),
        TypeDescriptor::new(
            camunda("Property"),
            None,
            vec![P::scalar(camunda("name")), P::scalar(camunda("value"))],
        ),
    ];

    let extension_attributes = vec![
        P::scalar(camunda("async")),
        P::scalar(camunda("asyncBefore")),
        P::scalar(camunda("asyncAfter")),
        P::scalar(camunda("assignee")),
        P::scalar(camunda("candidateUsers")),
        P::scalar(camunda("priority")),
    ];

    Package::new("Camunda", "camunda", types, extension_attributes)
}

/// Builds the standard schema: base BPMN plus the Camunda extension.
pub fn standard_schema() -> Result<Schema, ModelError> {
    Schema::new(vec![bpmn_package(), camunda_package()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schema_builds() {
        let schema = standard_schema().unwrap();
        assert!(schema.contains_type(&bpmn("UserTask")));
        assert!(schema.contains_type(&camunda("ExecutionListener")));
    }

    #[test]
    fn test_task_inherits_base_properties() {
        let schema = standard_schema().unwrap();
        let descriptor = schema
            .resolve_property(&bpmn("ServiceTask"), &bpmn("documentation"))
            .unwrap();
        assert!(descriptor.is_many());
        assert_eq!(
            descriptor.contained_type(),
            Some(&bpmn("Documentation"))
        );
    }

    #[test]
    fn test_camunda_attribute_applies_to_bpmn_task() {
        let schema = standard_schema().unwrap();
        let descriptor = schema
            .resolve_property(&bpmn("UserTask"), &camunda("asyncBefore"))
            .unwrap();
        assert!(!descriptor.is_many());
        assert!(!descriptor.is_reference());
    }

    #[test]
    fn test_extension_container_flag() {
        let schema = standard_schema().unwrap();
        assert!(schema.is_extension_container(&bpmn("ExtensionElements")));
        assert!(!schema.is_extension_container(&bpmn("Task")));
    }
}
