//! CLI logic for the Runnel diagram tool.

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use runnel::{DiagramBuilder, RunnelError};

/// Run the Runnel CLI application
///
/// This function processes the input document through the Runnel pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `RunnelError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), RunnelError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process diagram using the DiagramBuilder API
    let builder = DiagramBuilder::new(app_config)?;
    let diagram = builder.load(&source)?;
    let svg = builder.render_svg(&diagram)?;

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
