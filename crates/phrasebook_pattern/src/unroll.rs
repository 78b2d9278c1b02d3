//! Literal-string enumeration.
//!
//! Unrolling picks one alternative of every choice and optional (skipping
//! included), concatenates the resulting text, and collects every distinct
//! result. It is used offline to build name tables, so it favours a simple
//! exhaustive expansion over speed: sub-patterns are never shared between
//! nodes, so there is nothing to memoize.
//!
//! Spaces follow the same rule as the matcher. A node sequence is cut into
//! segments at Space nodes and a segment that yields no text drops out along
//! with its separator, so `"[a] [b] c"` unrolls to `"c"` rather than `"  c"`.
//! Segments with no nodes at all (leading, trailing or doubled spaces) are
//! kept, so literal spacing survives.

use std::collections::BTreeSet;

use crate::node::Node;
use crate::pattern::Pattern;

/// Every non-empty literal string `pattern` can spell out.
///
/// Regex nodes contribute nothing. A placeholder contributes either its type
/// name or nothing, and both forms are enumerated.
#[must_use]
pub fn unroll(pattern: &Pattern) -> BTreeSet<String> {
    let mut names = expand_sequence(pattern.nodes());
    names.remove("");
    names
}

/// Expansions of a node sequence, including the empty string.
fn expand_sequence(nodes: &[Node]) -> BTreeSet<String> {
    // (text so far, whether any segment has been kept)
    let mut partial: BTreeSet<(String, bool)> = BTreeSet::from([(String::new(), false)]);

    for segment in nodes.split(Node::is_space) {
        let pieces = if segment.is_empty() {
            None
        } else {
            Some(expand_segment(segment))
        };

        let mut next = BTreeSet::new();
        for (text, kept) in &partial {
            match &pieces {
                None => {
                    next.insert(join(text, *kept, ""));
                }
                Some(pieces) => {
                    for piece in pieces {
                        if piece.is_empty() {
                            next.insert((text.clone(), *kept));
                        } else {
                            next.insert(join(text, *kept, piece));
                        }
                    }
                }
            }
        }
        partial = next;
    }

    partial.into_iter().map(|(text, _)| text).collect()
}

fn join(text: &str, kept: bool, piece: &str) -> (String, bool) {
    if kept {
        (format!("{text} {piece}"), true)
    } else {
        (piece.to_string(), true)
    }
}

/// Cartesian product of the expansions of a space-free run of nodes.
fn expand_segment(nodes: &[Node]) -> BTreeSet<String> {
    nodes.iter().fold(BTreeSet::from([String::new()]), |prefixes, node| {
        let suffixes = expand_node(node);
        prefixes
            .iter()
            .flat_map(|prefix| suffixes.iter().map(move |suffix| format!("{prefix}{suffix}")))
            .collect()
    })
}

fn expand_node(node: &Node) -> BTreeSet<String> {
    match node {
        Node::Literal(text) => BTreeSet::from([text.clone()]),
        Node::Space => BTreeSet::from([" ".to_string()]),
        Node::Placeholder(placeholder) => {
            BTreeSet::from([placeholder.type_name.clone(), String::new()])
        }
        Node::Regex(_) => BTreeSet::from([String::new()]),
        Node::Choice(alts) => alts
            .iter()
            .flat_map(|alt| expand_sequence(alt.nodes()))
            .collect(),
        Node::Optional(alts) => {
            let mut out: BTreeSet<String> = alts
                .iter()
                .flat_map(|alt| expand_sequence(alt.nodes()))
                .collect();
            out.insert(String::new());
            out
        }
    }
}
