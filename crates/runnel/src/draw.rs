//! Drawing primitives and rendering entry points.
//!
//! The [`renderer::Renderer`] maps semantic element types to SVG output;
//! this module provides the shared primitives it composes: basic shapes
//! with the common attribute bundle ([`Styles`]), the glyph path templates
//! ([`path_map::PathMap`]), and the connection marker set
//! ([`markers::MarkerSet`]).

pub mod markers;
pub mod path_map;
pub mod renderer;

use runnel_model::QName;
use svg::node::element::{Circle, Path, Polygon, Polyline, Rectangle};

use crate::geometry::{Point, Size};

/// Read-only view of a shape to paint: identity plus resolved extent.
///
/// Produced per paint call by the document layer; the renderer never
/// mutates or retains it.
#[derive(Debug, Clone)]
pub struct ShapeDatum {
    pub id: String,
    pub element_type: QName,
    pub width: f64,
    pub height: f64,
}

impl ShapeDatum {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Read-only view of a connection to paint: identity plus waypoints.
#[derive(Debug, Clone)]
pub struct ConnectionDatum {
    pub id: String,
    pub element_type: QName,
    pub waypoints: Vec<Point>,
}

/// The common attribute bundle applied to every primitive.
#[derive(Debug, Clone)]
pub struct Styles {
    stroke: String,
    fill: String,
}

impl Styles {
    pub fn new(stroke: impl Into<String>, fill: impl Into<String>) -> Self {
        Self {
            stroke: stroke.into(),
            fill: fill.into(),
        }
    }

    /// Default stroke color for outlines.
    pub fn stroke(&self) -> &str {
        &self.stroke
    }

    /// Default fill color for shape interiors.
    pub fn fill(&self) -> &str {
        &self.fill
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new("black", "white")
    }
}

/// Draws a circle centered in a `size` box, shrunk inward by `offset`.
pub fn circle(size: Size, offset: f64, styles: &Styles) -> Circle {
    let radius = ((size.width() + size.height()) / 4.0 - offset).round();
    Circle::new()
        .set("cx", size.width() / 2.0)
        .set("cy", size.height() / 2.0)
        .set("r", radius)
        .set("stroke", styles.stroke())
        .set("stroke-width", 1)
        .set("fill", styles.fill())
}

/// Draws a rounded rectangle filling a `size` box, inset by `offset`.
pub fn rounded_rect(size: Size, radius: f64, offset: f64, styles: &Styles) -> Rectangle {
    Rectangle::new()
        .set("x", offset)
        .set("y", offset)
        .set("width", size.width() - offset * 2.0)
        .set("height", size.height() - offset * 2.0)
        .set("rx", radius)
        .set("ry", radius)
        .set("stroke", styles.stroke())
        .set("stroke-width", 2)
        .set("fill", styles.fill())
}

/// Draws a diamond spanning a `size` box.
pub fn diamond(size: Size, styles: &Styles) -> Polygon {
    let half_width = size.width() / 2.0;
    let half_height = size.height() / 2.0;
    let points = format!(
        "{half_width},0 {},{half_height} {half_width},{} 0,{half_height}",
        size.width(),
        size.height()
    );
    Polygon::new()
        .set("points", points)
        .set("stroke", styles.stroke())
        .set("stroke-width", 2)
        .set("fill", styles.fill())
}

/// Draws an unfilled polyline through the given waypoints.
pub fn polyline(waypoints: &[Point], styles: &Styles) -> Polyline {
    let points = waypoints
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ");
    Polyline::new()
        .set("points", points)
        .set("stroke", styles.stroke())
        .set("stroke-width", 2)
        .set("fill", "none")
}

/// Draws a raw path, optionally filled with the stroke color.
pub fn path(d: impl Into<String>, fill: bool, styles: &Styles) -> Path {
    let fill_color = if fill { styles.stroke() } else { "none" };
    Path::new()
        .set("d", d.into())
        .set("stroke", styles.stroke())
        .set("stroke-width", 2)
        .set("fill", fill_color.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_radius_from_box() {
        let node = circle(Size::new(36.0, 36.0), 0.0, &Styles::default());
        let rendered = node.to_string();
        assert!(rendered.contains(r#"r="18""#));
        assert!(rendered.contains(r#"cx="18""#));
    }

    #[test]
    fn test_rect_inset_by_offset() {
        let node = rounded_rect(Size::new(100.0, 80.0), 8.0, 3.0, &Styles::default());
        let rendered = node.to_string();
        assert!(rendered.contains(r#"width="94""#));
        assert!(rendered.contains(r#"height="74""#));
        assert!(rendered.contains(r#"rx="8""#));
    }

    #[test]
    fn test_polyline_flattens_waypoints() {
        let node = polyline(
            &[Point::new(0.0, 0.0), Point::new(10.0, 20.0)],
            &Styles::default(),
        );
        assert!(node.to_string().contains(r#"points="0,0 10,20""#));
    }
}
