//! The sanitization boundary between node body markup and visual text.
//!
//! Node bodies are opaque markup owned by an external editor. The engine
//! never interprets them; anything that turns a body into displayable text
//! goes through a [`Sanitizer`] first. [`PlainText`] is the built-in policy:
//! block tags become line breaks, list items become indented dashes, and
//! every remaining tag is dropped.

use std::sync::OnceLock;

use regex::Regex;

/// Converts opaque body markup into safe display text.
pub trait Sanitizer {
    fn sanitize(&self, markup: &str) -> String;
}

/// Strips markup down to plain text with minimal structure preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

fn paragraph_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</p>\s*<p[^>]*>|</?p[^>]*>").unwrap())
}

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").unwrap())
}

fn list_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<li[^>]*>").unwrap())
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

impl Sanitizer for PlainText {
    fn sanitize(&self, markup: &str) -> String {
        let text = paragraph_re().replace_all(markup, "\n");
        let text = line_break_re().replace_all(&text, "\n");
        let text = list_item_re().replace_all(&text, "\n  - ");
        let text = tag_re().replace_all(&text, "");
        // Trim the blank lines the replacements introduce, but keep the
        // indentation of a leading list item.
        text.trim_start_matches('\n').trim_end().to_string()
    }
}
