//! ## Serialization
//!
//! `serialize()` is an unconditional operational entry point: every tree can
//! be turned into a JSON string regardless of whether the `serde` feature is
//! enabled. It works through a private shadow enum that mirrors `Node<V>`'s
//! shape field-for-field, so the live tree types stay free to derive
//! `Serialize`/`Deserialize` only when the `serde` feature asks for
//! whole-tree `bincode` persistence.

use super::node::{Entry, Node};
use crate::geometry::Rect;
use serde::Serialize;

#[derive(Serialize)]
#[serde(tag = "type")]
enum SerialTree<'a, V> {
    #[serde(rename = "leaf")]
    Leaf {
        boundary: Rect,
        entries: Vec<SerialEntry<'a, V>>,
    },
    #[serde(rename = "internal")]
    Internal {
        boundary: Rect,
        children: Vec<SerialTree<'a, V>>,
    },
}

#[derive(Serialize)]
struct SerialEntry<'a, V> {
    point: crate::geometry::Point,
    value: &'a V,
}

fn to_serial<V: Serialize>(node: &Node<V>) -> SerialTree<'_, V> {
    match node {
        Node::Leaf { boundary, entries } => SerialTree::Leaf {
            boundary: *boundary,
            entries: entries
                .iter()
                .map(|Entry { point, value }| SerialEntry { point: *point, value })
                .collect(),
        },
        Node::Internal { boundary, children } => SerialTree::Internal {
            boundary: *boundary,
            children: children.iter().map(to_serial).collect(),
        },
    }
}

/// Renders the subtree rooted at `node` as a JSON string. Every node carries
/// a `"type"` tag of `"leaf"` or `"internal"`, a `"boundary"`, and either
/// `"entries"` (each a `{"point", "value"}` pair) or `"children"` (always
/// four, in `[NW, NE, SW, SE]` order).
///
/// `V` is an opaque payload type (§3): nothing stops a caller from storing a
/// non-finite float inside it, so encoding is fallible and propagated rather
/// than unwrapped.
pub fn serialize<V: Serialize>(node: &Node<V>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&to_serial(node))
}
