//! CLI logic for the Flowdeck BPMN to PowerPoint converter.
//!
//! This module contains the core CLI logic: configuration lookup, command
//! line overrides, and the file I/O around [`flowdeck::DeckBuilder`].

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use flowdeck::{DeckBuilder, FlowdeckError, config::AppConfig};

/// Run the Flowdeck CLI application
///
/// This function converts the input BPMN file into a presentation and writes
/// it to the output path. Nodes or flows that could not be drawn are logged
/// as warnings and do not fail the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FlowdeckError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Template and rendering errors
pub fn run(args: &Args) -> Result<(), FlowdeckError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Converting process diagram"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);

    let source = fs::read_to_string(&args.input)?;

    let builder = DeckBuilder::new(app_config);
    let graph = builder.parse(&source)?;
    let deck = builder.render_pptx(&graph)?;

    info!(
        shapes_count = deck.shapes_count(),
        connectors_count = deck.connectors_count(),
        warnings_count = deck.warnings().len();
        "Presentation built"
    );

    fs::write(&args.output, deck.into_bytes())?;

    info!(output_file = args.output; "Presentation exported successfully");

    Ok(())
}

/// Applies `--template` and `--slide` on top of the loaded configuration.
fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let mut template = config.template().clone();
    if let Some(path) = &args.template {
        template = template.with_path(path);
    }
    if let Some(slide) = args.slide {
        template = template.with_slide_index(slide);
    }
    config.with_template(template)
}
