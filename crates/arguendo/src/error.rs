//! Error types for Arguendo operations.
//!
//! This module provides the main error type [`ArguendoError`] which wraps
//! the error conditions that can occur while loading, mutating, and
//! exporting diagrams.

use std::io;

use thiserror::Error;

use crate::{model::ModelError, template::TemplateError};

/// The main error type for Arguendo operations.
#[derive(Debug, Error)]
pub enum ArguendoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}
