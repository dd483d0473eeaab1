//! Command-line argument definitions for the Flowdeck CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, template overrides, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Flowdeck BPMN to PowerPoint converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input BPMN file
    #[arg(help = "Path to the input BPMN 2.0 XML file")]
    pub input: String,

    /// Path to the output presentation
    #[arg(short, long, default_value = "out.pptx")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Template presentation; overrides `[template] path` from the config
    #[arg(long)]
    pub template: Option<String>,

    /// Zero-based slide index; overrides `[template] slide_index`
    #[arg(long)]
    pub slide: Option<usize>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
