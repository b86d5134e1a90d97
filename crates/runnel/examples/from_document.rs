//! Render a small process from an inline diagram document.
//!
//! Run with: `cargo run --example from_document`

use runnel::{DiagramBuilder, config::AppConfig};

const DOCUMENT: &str = r#"{
    "name": "payment",
    "elements": [
        {
            "id": "Start_1",
            "type": "bpmn:StartEvent",
            "bounds": { "x": 40, "y": 82, "width": 36, "height": 36 }
        },
        {
            "id": "Charge_1",
            "type": "bpmn:ServiceTask",
            "name": "Charge card",
            "bounds": { "x": 140, "y": 60, "width": 100, "height": 80 }
        },
        {
            "id": "Timeout_1",
            "type": "bpmn:BoundaryEvent",
            "attachedToRef": "Charge_1",
            "cancelActivity": false,
            "bounds": { "x": 200, "y": 122, "width": 36, "height": 36 },
            "eventDefinitions": ["bpmn:TimerEventDefinition"]
        },
        {
            "id": "End_1",
            "type": "bpmn:EndEvent",
            "bounds": { "x": 300, "y": 82, "width": 36, "height": 36 }
        },
        {
            "id": "Flow_1",
            "type": "bpmn:SequenceFlow",
            "sourceRef": "Start_1",
            "targetRef": "Charge_1",
            "waypoints": [ { "x": 76, "y": 100 }, { "x": 140, "y": 100 } ]
        },
        {
            "id": "Flow_2",
            "type": "bpmn:SequenceFlow",
            "sourceRef": "Charge_1",
            "targetRef": "End_1",
            "waypoints": [ { "x": 240, "y": 100 }, { "x": 300, "y": 100 } ]
        }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let builder = DiagramBuilder::new(AppConfig::default())?;
    let diagram = builder.load(DOCUMENT)?;
    let svg = builder.render_svg(&diagram)?;

    println!("{svg}");
    Ok(())
}
