//! Connection end markers.
//!
//! BPMN connections reference a fixed set of arrowheads and endpoint dots
//! by name. The set is built once per renderer instance and emitted into
//! the document's `<defs>`; connection attributes then point at the
//! definitions with `url(#...)` references.

use svg::node::element::{Circle, Definitions, Marker, Path};

use super::Styles;

const SEQUENCE_FLOW_END: &str = "sequenceflow-end";
const MESSAGE_FLOW_START: &str = "messageflow-start";
const MESSAGE_FLOW_END: &str = "messageflow-end";
const ASSOCIATION_END: &str = "directed-association-end";
const DATA_ASSOCIATION_END: &str = "data-association-end";

/// The named marker definitions for connection endpoints.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    definitions: Definitions,
}

impl MarkerSet {
    /// Builds the full marker set with the given styles.
    pub fn new(styles: &Styles) -> Self {
        let sequence_flow_end = Marker::new()
            .set("id", SEQUENCE_FLOW_END)
            .set("viewBox", "0 0 10 10")
            .set("refX", 10)
            .set("refY", 5)
            .set("markerWidth", 10)
            .set("markerHeight", 6)
            .set("markerUnits", "strokeWidth")
            .set("orient", "auto")
            .set("overflow", "visible")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 Z")
                    .set("fill", styles.stroke().to_string())
                    .set("stroke", "none"),
            );

        let message_flow_start = Marker::new()
            .set("id", MESSAGE_FLOW_START)
            .set("viewBox", "0 0 10 10")
            .set("refX", 4)
            .set("refY", 4)
            .set("markerWidth", 7)
            .set("markerHeight", 7)
            .set("markerUnits", "strokeWidth")
            .set("orient", "auto")
            .set("overflow", "visible")
            .add(
                Circle::new()
                    .set("cx", 4)
                    .set("cy", 4)
                    .set("r", 4)
                    .set("fill", styles.fill().to_string())
                    .set("stroke", styles.stroke().to_string())
                    .set("stroke-width", 1),
            );

        let message_flow_end = Marker::new()
            .set("id", MESSAGE_FLOW_END)
            .set("viewBox", "0 0 10 10")
            .set("refX", 11)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("markerUnits", "strokeWidth")
            .set("orient", "auto")
            .set("overflow", "visible")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 Z")
                    .set("fill", styles.fill().to_string())
                    .set("stroke", styles.stroke().to_string())
                    .set("stroke-width", 1)
                    .set("stroke-linecap", "round"),
            );

        let association_end = Marker::new()
            .set("id", ASSOCIATION_END)
            .set("viewBox", "0 0 10 10")
            .set("refX", 10)
            .set("refY", 5)
            .set("markerWidth", 10)
            .set("markerHeight", 6)
            .set("markerUnits", "strokeWidth")
            .set("orient", "auto")
            .set("overflow", "visible")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10 Z")
                    .set("fill", "none")
                    .set("stroke", styles.stroke().to_string())
                    .set("stroke-width", 1.5)
                    .set("stroke-linecap", "round"),
            );

        let data_association_end = Marker::new()
            .set("id", DATA_ASSOCIATION_END)
            .set("viewBox", "0 0 10 10")
            .set("refX", 10)
            .set("refY", 5)
            .set("markerWidth", 10)
            .set("markerHeight", 6)
            .set("markerUnits", "strokeWidth")
            .set("orient", "auto")
            .set("overflow", "visible")
            .add(
                Path::new()
                    .set("d", "M 0 0 L 10 5 L 0 10")
                    .set("fill", styles.fill().to_string())
                    .set("stroke", styles.stroke().to_string()),
            );

        let definitions = Definitions::new()
            .add(sequence_flow_end)
            .add(message_flow_start)
            .add(message_flow_end)
            .add(association_end)
            .add(data_association_end);

        Self { definitions }
    }

    /// Returns the `<defs>` block to embed in the output document.
    pub fn definitions(&self) -> Definitions {
        self.definitions.clone()
    }

    pub fn sequence_flow_end(&self) -> String {
        reference(SEQUENCE_FLOW_END)
    }

    pub fn message_flow_start(&self) -> String {
        reference(MESSAGE_FLOW_START)
    }

    pub fn message_flow_end(&self) -> String {
        reference(MESSAGE_FLOW_END)
    }

    pub fn association_end(&self) -> String {
        reference(ASSOCIATION_END)
    }

    pub fn data_association_end(&self) -> String {
        reference(DATA_ASSOCIATION_END)
    }
}

fn reference(id: &str) -> String {
    format!("url(#{id})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_contain_all_markers() {
        let markers = MarkerSet::new(&Styles::default());
        let rendered = markers.definitions().to_string();
        for id in [
            SEQUENCE_FLOW_END,
            MESSAGE_FLOW_START,
            MESSAGE_FLOW_END,
            ASSOCIATION_END,
            DATA_ASSOCIATION_END,
        ] {
            assert!(rendered.contains(id), "missing marker {id}");
        }
    }

    #[test]
    fn test_references_point_at_ids() {
        let markers = MarkerSet::new(&Styles::default());
        assert_eq!(markers.sequence_flow_end(), "url(#sequenceflow-end)");
        assert_eq!(markers.message_flow_start(), "url(#messageflow-start)");
    }
}
