//! Automatic grid layout.
//!
//! Rearranges every node onto a uniform grid, row by row in model insertion
//! order. Purely positional: titles, bodies, and edges are untouched, and
//! edges follow their endpoints on the next render.

use arguendo_core::geometry::Point;

use crate::{config::LayoutConfig, model::Node, surface::Surface, workspace::Workspace};

const GRID_ORIGIN: (f32, f32) = (50.0, 50.0);

/// Grid layout parameters: spacing and column count.
#[derive(Debug, Clone)]
pub struct GridLayout {
    x_spacing: f32,
    y_spacing: f32,
    columns: Option<usize>,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl GridLayout {
    /// Builds a layout from the configured spacing, with automatic columns.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            x_spacing: config.x_spacing(),
            y_spacing: config.y_spacing(),
            columns: None,
        }
    }

    /// Fixes the number of columns instead of deriving it from the node
    /// count. Zero is treated as one.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns.max(1));
        self
    }

    /// Columns used for `count` nodes: fixed if set, otherwise the nearest
    /// square.
    fn columns_for(&self, count: usize) -> usize {
        match self.columns {
            Some(columns) => columns,
            None => (count as f32).sqrt().ceil().max(1.0) as usize,
        }
    }

    /// Position of the cell at `index`.
    fn cell(&self, index: usize, columns: usize) -> Point {
        let column = index % columns;
        let row = index / columns;
        Point::new(
            GRID_ORIGIN.0 + column as f32 * self.x_spacing,
            GRID_ORIGIN.1 + row as f32 * self.y_spacing,
        )
    }

    /// Rearranges every node in the workspace and re-renders.
    pub fn apply_to<S: Surface>(&self, workspace: &mut Workspace<S>) {
        let count = workspace.model().node_count();
        if count == 0 {
            return;
        }
        let columns = self.columns_for(count);

        let nodes: Vec<Node> = workspace
            .model()
            .nodes()
            .enumerate()
            .map(|(index, node)| {
                let mut node = node.clone();
                node.position = self.cell(index, columns);
                node
            })
            .collect();

        workspace.set_nodes(nodes);
        workspace.render_all();
    }
}
