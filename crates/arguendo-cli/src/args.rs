//! Command-line argument definitions for the Arguendo CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the diagram source (a JSON document or
//! a built-in template), output path, layout, configuration file selection,
//! and logging verbosity.

use clap::{ArgGroup, Parser};

/// Command-line arguments for the Arguendo diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["input", "template", "list_templates"]),
))]
pub struct Args {
    /// Path to the input diagram document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: Option<String>,

    /// Name of a built-in template to render instead of an input file
    #[arg(short, long)]
    pub template: Option<String>,

    /// List the available built-in templates and exit
    #[arg(long)]
    pub list_templates: bool,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Rearrange all nodes onto a grid before exporting
    #[arg(long)]
    pub auto_layout: bool,

    /// Also write the diagram as a JSON document to this path
    #[arg(long)]
    pub export_json: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
