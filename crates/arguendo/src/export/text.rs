//! Plain-text export of an argumentation path.
//!
//! Given an ordered list of node ids, produces a numbered summary with
//! sanitized body text. Ids that do not resolve are collected into a
//! trailing notes section instead of aborting the export.

use arguendo_core::identifier::Id;

use crate::{
    model::DiagramModel,
    sanitize::{PlainText, Sanitizer},
};

/// Renders the nodes along `path`, in order, as numbered plain text.
///
/// Unknown ids never fail the export; they are reported at the end so the
/// reader can see the path was incomplete.
pub fn export_path_to_text(model: &DiagramModel, path: &[Id]) -> String {
    let mut out = String::new();
    let mut missing = Vec::new();

    for (index, id) in path.iter().enumerate() {
        let Some(node) = model.node(*id) else {
            missing.push(*id);
            continue;
        };

        out.push_str(&format!("{}. {}\n", index + 1, node.title));
        let body = PlainText.sanitize(&node.body);
        if !body.is_empty() {
            for line in body.lines() {
                out.push_str(&format!("   {line}\n"));
            }
        }
        out.push('\n');
    }

    if !missing.is_empty() {
        out.push_str("Not found:\n");
        for id in missing {
            out.push_str(&format!("   {id}\n"));
        }
    }

    out.trim_end().to_string()
}
