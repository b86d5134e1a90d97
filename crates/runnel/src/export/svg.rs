//! SVG document assembly.
//!
//! Composes the renderer's per-element groups into one SVG document:
//! marker definitions first, then shapes translated to their resolved
//! positions, then connections (drawn in absolute coordinates).

use log::info;
use svg::Document;
use svg::node::element::{Group, Rectangle};

use crate::document::Diagram;
use crate::draw::renderer::Renderer;

const DIAGRAM_MARGIN: f64 = 20.0;

/// Builds SVG documents from loaded diagrams.
#[derive(Debug)]
pub struct SvgExporter<'a> {
    renderer: &'a Renderer,
    background: Option<String>,
}

impl<'a> SvgExporter<'a> {
    pub fn new(renderer: &'a Renderer) -> Self {
        Self {
            renderer,
            background: None,
        }
    }

    /// Sets the document background color.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Renders the whole diagram to an SVG string.
    pub fn export(&self, diagram: &Diagram) -> String {
        let (width, height) = content_extent(diagram);

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"));

        if let Some(color) = &self.background {
            document = document.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", color.to_string()),
            );
        }

        document = document.add(self.renderer.markers().definitions());

        let semantics = diagram.semantics();

        for shape in diagram.shapes() {
            let rendered = self.renderer.render_shape(semantics, shape.datum());
            let origin = shape.origin();
            document = document.add(
                Group::new()
                    .set(
                        "transform",
                        format!("translate({} {})", origin.x(), origin.y()),
                    )
                    .add(rendered),
            );
        }

        for connection in diagram.connections() {
            document = document.add(self.renderer.render_connection(semantics, connection));
        }

        info!(
            shapes = diagram.shapes().len(),
            connections = diagram.connections().len();
            "diagram exported"
        );

        document.to_string()
    }
}

/// The document extent: everything drawn, plus a margin.
fn content_extent(diagram: &Diagram) -> (f64, f64) {
    let mut max_x: f64 = 0.0;
    let mut max_y: f64 = 0.0;

    for shape in diagram.shapes() {
        let origin = shape.origin();
        let datum = shape.datum();
        max_x = max_x.max(origin.x() + datum.width);
        max_y = max_y.max(origin.y() + datum.height);
    }
    for connection in diagram.connections() {
        for point in &connection.waypoints {
            max_x = max_x.max(point.x());
            max_y = max_y.max(point.y());
        }
    }

    (max_x + DIAGRAM_MARGIN, max_y + DIAGRAM_MARGIN)
}
