//! Runnel - BPMN diagram rendering.
//!
//! Loading, semantic modeling, and SVG rendering for BPMN diagrams. A
//! diagram arrives as a JSON interchange document carrying semantics and
//! resolved geometry; Runnel builds the semantic element tree, then maps
//! each element type to its BPMN visual.

pub mod config;
pub mod document;
pub mod draw;
pub mod export;
pub mod geometry;

mod error;

pub use document::Diagram;
pub use error::RunnelError;
pub use runnel_model::{CloneHelper, Factory, QName, SemanticIndex};

use log::{debug, info};

use config::AppConfig;
use draw::Styles;
use draw::renderer::Renderer;
use export::svg::SvgExporter;

/// Builder for loading and rendering Runnel diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use runnel::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{ "elements": [] }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default())
///     .expect("Failed to build");
///
/// // Parse document to semantic model + datums
/// let diagram = builder.load(source)
///     .expect("Failed to load");
///
/// // Render to SVG
/// let svg = builder.render_svg(&diagram)
///     .expect("Failed to render");
/// ```
pub struct DiagramBuilder {
    config: AppConfig,
    factory: Factory,
    renderer: Renderer,
}

impl DiagramBuilder {
    /// Creates a new diagram builder with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `RunnelError` when the built-in vocabulary packages fail to
    /// assemble into a schema.
    pub fn new(config: AppConfig) -> Result<Self, RunnelError> {
        let factory = Factory::standard()?;
        let styles = Styles::new(
            config.style().stroke_color(),
            config.style().fill_color(),
        );
        let renderer = Renderer::new(styles);
        Ok(Self {
            config,
            factory,
            renderer,
        })
    }

    /// Returns the element factory backing this builder.
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Returns the renderer backing this builder.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Parses a JSON diagram document into a loaded diagram.
    ///
    /// # Errors
    ///
    /// Returns `RunnelError` for malformed JSON, malformed qualified
    /// names, or element records without geometry.
    pub fn load(&self, source: &str) -> Result<Diagram, RunnelError> {
        info!("Loading diagram document");

        let diagram = document::parse_json(source, &self.factory)?;

        debug!(
            name = diagram.name().unwrap_or("<unnamed>");
            "Diagram loaded successfully"
        );

        Ok(diagram)
    }

    /// Renders a loaded diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `RunnelError` for rendering errors.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, RunnelError> {
        info!("Rendering diagram to SVG");

        let mut exporter = SvgExporter::new(&self.renderer);
        if let Some(color) = self.config.style().background_color() {
            exporter = exporter.with_background(color);
        }

        let rendered = exporter.export(diagram);

        info!("SVG rendered successfully");
        Ok(rendered)
    }
}
