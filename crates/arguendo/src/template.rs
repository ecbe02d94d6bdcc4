//! Built-in diagram templates.
//!
//! A template is a prefabricated set of nodes and edges with *local* ids.
//! Loading one replaces the workspace contents: every local id maps to a
//! freshly generated model id, and edges whose endpoints fail to map are
//! warned about and skipped.

use log::warn;
use thiserror::Error;

use arguendo_core::identifier::IdGenerator;

use crate::{
    model::{Condition, Edge, Node, NodeKind},
    surface::Surface,
    workspace::Workspace,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no template named `{name}`")]
    Unknown { name: String },
}

/// A node blueprint inside a template, identified by a template-local id.
#[derive(Debug, Clone)]
struct TemplateNode {
    local_id: &'static str,
    title: &'static str,
    body: &'static str,
    x: f32,
    y: f32,
    kind: NodeKind,
}

/// An edge blueprint referring to template-local node ids.
#[derive(Debug, Clone)]
struct TemplateEdge {
    source: &'static str,
    target: &'static str,
    condition: Option<Condition>,
}

/// Identifying metadata for a built-in template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// A named, prefabricated diagram.
#[derive(Debug, Clone)]
pub struct Template {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    nodes: Vec<TemplateNode>,
    edges: Vec<TemplateEdge>,
}

impl Template {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }

    /// Loads this template into the workspace and re-renders.
    ///
    /// Replaces the workspace contents; every template node gets a fresh id.
    pub fn apply_to<S: Surface>(&self, workspace: &mut Workspace<S>) {
        workspace.clear();

        let mut ids = IdGenerator::default();
        let mut mapping = Vec::with_capacity(self.nodes.len());

        for blueprint in &self.nodes {
            let id = ids.next_id();
            mapping.push((blueprint.local_id, id));

            let node = Node::new(id, blueprint.title, blueprint.body)
                .with_position(blueprint.x, blueprint.y)
                .with_kind(blueprint.kind);
            if let Err(err) = workspace.add_node(node) {
                warn!(err:% = err; "Skipping template node");
            }
        }

        let lookup = |local: &str| {
            mapping
                .iter()
                .find(|(candidate, _)| *candidate == local)
                .map(|(_, id)| *id)
        };

        for blueprint in &self.edges {
            let (Some(source), Some(target)) =
                (lookup(blueprint.source), lookup(blueprint.target))
            else {
                warn!(
                    source = blueprint.source,
                    target = blueprint.target;
                    "Skipping template edge with unmapped endpoint"
                );
                continue;
            };

            let mut edge = Edge::new(ids.next_id(), source, target);
            edge.condition = blueprint.condition;
            if let Err(err) = workspace.add_edge(edge) {
                warn!(err:% = err; "Skipping template edge");
            }
        }

        workspace.render_all();
    }
}

/// Metadata for all built-in templates.
pub fn available_templates() -> Vec<TemplateInfo> {
    vec![standard_assessment().info()]
}

/// Looks a built-in template up by id.
///
/// # Errors
/// Returns [`TemplateError::Unknown`] for an unrecognized id.
pub fn template_by_name(name: &str) -> Result<Template, TemplateError> {
    match name {
        STANDARD_ASSESSMENT => Ok(standard_assessment()),
        _ => Err(TemplateError::Unknown {
            name: name.to_string(),
        }),
    }
}

pub const STANDARD_ASSESSMENT: &str = "standard-assessment";

/// The standard three-step claim assessment scaffold.
///
/// Main chain down the left column, supporting detail in the right column,
/// result node at the bottom.
fn standard_assessment() -> Template {
    let node = |local_id, title, body, x, y, kind| TemplateNode {
        local_id,
        title,
        body,
        x,
        y,
        kind,
    };
    let edge = |source, target, condition| TemplateEdge {
        source,
        target,
        condition,
    };

    Template {
        id: STANDARD_ASSESSMENT,
        name: "Standard assessment",
        description: "Three-step claim assessment with supporting detail and a result node",
        nodes: vec![
            node(
                "a",
                "A. Claim arises",
                "<p>Did the claim come into existence?</p>",
                50.0,
                50.0,
                NodeKind::Normal,
            ),
            node(
                "b",
                "B. Claim not extinguished",
                "<p>Has the claim been extinguished since?</p>",
                50.0,
                200.0,
                NodeKind::Normal,
            ),
            node(
                "c",
                "C. Claim enforceable",
                "<p>Can the claim be enforced?</p>",
                50.0,
                350.0,
                NodeKind::Normal,
            ),
            node(
                "a1",
                "A1. Requirements",
                "<p>Offer, acceptance, capacity.</p>",
                300.0,
                50.0,
                NodeKind::Normal,
            ),
            node(
                "c1",
                "C1. Objections",
                "<p>Any defenses raised?</p>",
                300.0,
                350.0,
                NodeKind::Normal,
            ),
            node(
                "c2",
                "C2. Counter-objections",
                "<p>Do the defenses hold?</p>",
                300.0,
                450.0,
                NodeKind::Normal,
            ),
            node(
                "result",
                "Result",
                "<p>Overall assessment.</p>",
                50.0,
                550.0,
                NodeKind::ResultPartial,
            ),
        ],
        edges: vec![
            edge("a", "b", Some(Condition::Met)),
            edge("b", "c", Some(Condition::Met)),
            edge("a", "a1", None),
            edge("c", "c1", None),
            edge("c1", "c2", Some(Condition::NotMet)),
            edge("c", "result", Some(Condition::Met)),
        ],
    }
}
