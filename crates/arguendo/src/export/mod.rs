//! Export surfaces and formats: SVG snapshots and plain-text summaries.

pub mod svg;
pub mod text;
