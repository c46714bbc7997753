//! Removal of the bundle's placeholder head tags.
//!
//! # Responsibilities
//! - Drop the default title, description, robots and canonical elements
//! - Drop every Open Graph and Twitter-card meta element
//! - Leave all other markup byte-for-byte intact
//!
//! # Design Decisions
//! - A fixed list of named rules, each a tag name + predicate + occurrence
//! - Rules apply in order, each to the output of the previous one
//! - Attribute values compare ASCII case-insensitively, in any attribute order

use crate::seo::markup::{find_close_tag, start_tags, StartTag};

/// How many matches a rule removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    All,
}

/// Shape of the element a rule removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Start tag only (`meta`, `link`).
    Void,
    /// Start tag through the matching closing tag (`title`).
    Container,
}

/// One removal rule.
#[derive(Clone, Copy)]
pub struct TagRule {
    pub label: &'static str,
    pub tag: &'static str,
    pub shape: Shape,
    pub occurrence: Occurrence,
    pub predicate: fn(&StartTag<'_>) -> bool,
}

impl std::fmt::Debug for TagRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagRule")
            .field("label", &self.label)
            .field("tag", &self.tag)
            .field("shape", &self.shape)
            .field("occurrence", &self.occurrence)
            .finish_non_exhaustive()
    }
}

impl TagRule {
    /// Apply this rule to `html`, returning the document without the matched elements.
    pub fn apply(&self, html: &str) -> String {
        let mut spans = Vec::new();
        for tag in start_tags(html, self.tag) {
            if spans.last().is_some_and(|&(_, end)| tag.start < end) {
                continue;
            }
            if !(self.predicate)(&tag) {
                continue;
            }
            let end = match self.shape {
                Shape::Void => tag.end,
                Shape::Container => match find_close_tag(html, self.tag, tag.end) {
                    Some((_, close_end)) => close_end,
                    None => continue,
                },
            };
            spans.push((tag.start, end));
            if self.occurrence == Occurrence::First {
                break;
            }
        }

        if spans.is_empty() {
            return html.to_string();
        }
        tracing::trace!(rule = self.label, removed = spans.len(), "Stripped default tags");
        remove_spans(html, &spans)
    }
}

fn remove_spans(html: &str, spans: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for &(start, end) in spans {
        out.push_str(&html[cursor..start]);
        cursor = end;
    }
    out.push_str(&html[cursor..]);
    out
}

/// The placeholder elements a front-end build ships with.
pub const DEFAULT_RULES: &[TagRule] = &[
    TagRule {
        label: "title",
        tag: "title",
        shape: Shape::Container,
        occurrence: Occurrence::First,
        predicate: |_| true,
    },
    TagRule {
        label: "description",
        tag: "meta",
        shape: Shape::Void,
        occurrence: Occurrence::First,
        predicate: |t| t.attr_eq("name", "description"),
    },
    TagRule {
        label: "robots",
        tag: "meta",
        shape: Shape::Void,
        occurrence: Occurrence::First,
        predicate: |t| t.attr_eq("name", "robots"),
    },
    TagRule {
        label: "canonical",
        tag: "link",
        shape: Shape::Void,
        occurrence: Occurrence::First,
        predicate: |t| t.attr_eq("rel", "canonical"),
    },
    TagRule {
        label: "open-graph",
        tag: "meta",
        shape: Shape::Void,
        occurrence: Occurrence::All,
        predicate: |t| t.attr_has_prefix("property", "og:"),
    },
    TagRule {
        label: "twitter-card",
        tag: "meta",
        shape: Shape::Void,
        occurrence: Occurrence::All,
        predicate: |t| t.attr_has_prefix("name", "twitter:"),
    },
];

/// Strips default SEO tags from a bundle document.
#[derive(Debug, Clone)]
pub struct DefaultTagStripper {
    rules: Vec<TagRule>,
}

impl DefaultTagStripper {
    pub fn new(rules: Vec<TagRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TagRule] {
        &self.rules
    }

    /// Remove every element matched by the configured rules. Never fails.
    pub fn strip(&self, html: &str) -> String {
        self.rules
            .iter()
            .fold(html.to_string(), |doc, rule| rule.apply(&doc))
    }
}

impl Default for DefaultTagStripper {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}
