//! Arguendo - an engine for interactive argumentation diagrams.
//!
//! The diagram model, the pan/zoom viewport, the pointer interaction state
//! machine, and the render synchronization that keeps a display surface
//! consistent with the model. Surfaces are pluggable: the built-in
//! [`export::svg::SvgSurface`] retains a scene and snapshots it to SVG, and
//! [`surface::RecordingSurface`] supports headless testing.
//!
//! # Examples
//!
//! ```
//! use arguendo::{
//!     export::svg::SvgSurface,
//!     template::{STANDARD_ASSESSMENT, template_by_name},
//!     workspace::Workspace,
//! };
//!
//! let mut workspace = Workspace::new(SvgSurface::new());
//! template_by_name(STANDARD_ASSESSMENT)
//!     .expect("built-in template")
//!     .apply_to(&mut workspace);
//!
//! let svg = workspace.surface().to_svg_string(None);
//! assert!(svg.contains("edge-group"));
//! ```

pub mod config;
pub mod document;
pub mod edge_visual;
pub mod export;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod render;
pub mod sanitize;
pub mod surface;
pub mod template;
pub mod workspace;

mod error;

pub use arguendo_core::{color, geometry, identifier, viewport};

pub use error::ArguendoError;
pub use workspace::Workspace;
