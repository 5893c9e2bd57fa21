//! ## Set algebra over region quadtrees
//!
//! `merge`, `intersection`, `difference`, and `filter` all work the same
//! way: enumerate one or both inputs' entries with `query::all_entries`,
//! decide membership with `query::find`, then rebuild a fresh `Quadtree` by
//! repeated `insert`. None of this touches node internals directly, so it
//! stays correct regardless of how either input's tree happens to be
//! shaped.

use super::query::{all_entries, find};
use super::Quadtree;
use crate::errors::QuadTreeError;
use crate::geometry::Rect;

fn rebuild<V: Clone>(boundary: Rect, capacity: usize) -> Result<Quadtree<V>, QuadTreeError> {
    Quadtree::new(boundary, capacity)
}

/// The union of `a` and `b`'s entries over their combined boundary. Where
/// both trees hold a value at the same point, `a`'s value wins.
pub fn merge<V: Clone>(a: &Quadtree<V>, b: &Quadtree<V>) -> Result<Quadtree<V>, QuadTreeError> {
    let boundary = a.boundary().union(b.boundary());
    let mut out = rebuild(boundary, a.capacity())?;
    for (point, value) in all_entries(b.root()) {
        out.insert(point, value);
    }
    for (point, value) in all_entries(a.root()) {
        out.insert(point, value);
    }
    Ok(out)
}

/// Entries of `a` whose point also has an entry in `b`. Values are taken
/// from `a`.
pub fn intersection<V: Clone>(
    a: &Quadtree<V>,
    b: &Quadtree<V>,
) -> Result<Quadtree<V>, QuadTreeError> {
    let boundary = a.boundary().union(b.boundary());
    let mut out = rebuild(boundary, a.capacity())?;
    for (point, value) in all_entries(a.root()) {
        if find(b.root(), &point).is_some() {
            out.insert(point, value);
        }
    }
    Ok(out)
}

/// Entries of `a` whose point has no entry in `b`.
pub fn difference<V: Clone>(
    a: &Quadtree<V>,
    b: &Quadtree<V>,
) -> Result<Quadtree<V>, QuadTreeError> {
    let boundary = a.boundary().union(b.boundary());
    let mut out = rebuild(boundary, a.capacity())?;
    for (point, value) in all_entries(a.root()) {
        if find(b.root(), &point).is_none() {
            out.insert(point, value);
        }
    }
    Ok(out)
}

/// Entries of `tree` whose value satisfies `predicate`.
pub fn filter<V: Clone>(
    tree: &Quadtree<V>,
    predicate: impl Fn(&V) -> bool,
) -> Result<Quadtree<V>, QuadTreeError> {
    let mut out = rebuild(*tree.boundary(), tree.capacity())?;
    for (point, value) in all_entries(tree.root()) {
        if predicate(&value) {
            out.insert(point, value);
        }
    }
    Ok(out)
}
