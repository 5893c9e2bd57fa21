//! ## The region quadtree
//!
//! [`Quadtree`] owns a single root [`Node`] and the capacity threshold that
//! governs subdivision and collapse. Insert and lookup descend with a
//! `loop` that reassigns a mutable/shared reference rather than recursing;
//! mutation that needs ancestor access (compression) tracks its descent as
//! an explicit `Vec<usize>` quadrant-index path and re-navigates from the
//! root per path, so no part of this module makes a recursive call.

mod analysis;
mod node;
mod query;
mod serialize;
mod set_ops;

use crate::errors::QuadTreeError;
use crate::geometry::{Point, Rect};
use node::{collect_internal_paths, node_at_mut, quadrant_index, subdivide, try_collapse, Entry, Node};
use tracing::debug;

/// A region quadtree mapping 2D points to values of type `V`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quadtree<V> {
    root: Node<V>,
    capacity: usize,
}

impl<V> Quadtree<V> {
    /// Builds an empty tree over `boundary` that subdivides a leaf once it
    /// holds more than `capacity` entries. `capacity` must be nonzero.
    pub fn new(boundary: Rect, capacity: usize) -> Result<Self, QuadTreeError> {
        if capacity == 0 {
            return Err(QuadTreeError::InvalidCapacity { capacity });
        }
        Ok(Quadtree { root: Node::new_leaf(boundary), capacity })
    }

    pub fn boundary(&self) -> &Rect {
        self.root.boundary()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Total number of entries stored in the tree.
    pub fn count(&self) -> usize {
        node::count_entries(&self.root)
    }

    /// Greatest depth of any leaf below the root, which is `0` for an
    /// unsubdivided tree. Computed with an explicit stack.
    pub fn depth(&self) -> usize {
        let mut stack = vec![(&self.root, 0usize)];
        let mut max_depth = 0;
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Node::Internal { children, .. } = node {
                for c in children.iter() {
                    stack.push((c, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Counts nodes in the tree as `(leaves, internals)`.
    pub fn count_nodes(&self) -> (usize, usize) {
        let mut stack = vec![&self.root];
        let mut leaves = 0;
        let mut internals = 0;
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => leaves += 1,
                Node::Internal { children, .. } => {
                    internals += 1;
                    for c in children.iter() {
                        stack.push(c);
                    }
                }
            }
        }
        (leaves, internals)
    }
}

impl<V: Clone> Quadtree<V> {
    /// Inserts `value` at `point`. Returns `false` without modifying the
    /// tree if `point` lies outside the boundary. A point already holding a
    /// value has that value replaced, which never changes the entry count
    /// and so never triggers subdivision.
    ///
    /// Descends with a `loop` that reassigns a mutable node reference at
    /// each level rather than recursing, subdividing a leaf in place once
    /// inserting would push it past `capacity`.
    pub fn insert(&mut self, point: Point, value: V) -> bool {
        if !crate::geometry::rect_contains_point(self.root.boundary(), &point) {
            return false;
        }
        let capacity = self.capacity;
        let mut current = &mut self.root;
        loop {
            let boundary = *current.boundary();
            match current {
                Node::Leaf { entries, .. } => {
                    if let Some(existing) = entries.iter_mut().find(|e| e.point == point) {
                        existing.value = value;
                        return true;
                    }
                    if entries.len() < capacity {
                        entries.push(Entry { point, value });
                        debug!(?point, "inserted into leaf");
                        return true;
                    }
                    subdivide(current);
                    // fall through: current is now Internal, loop again
                    continue;
                }
                Node::Internal { children, .. } => {
                    let idx = quadrant_index(&boundary, &point);
                    current = &mut children[idx];
                }
            }
        }
    }

    /// Like [`insert`](Self::insert), but a leaf subdivides early, before
    /// reaching `capacity`, once its local point density exceeds
    /// `density_threshold` entries per unit area times `capacity_multiplier`.
    /// `capacity_multiplier` must be at least `1.0`.
    pub fn insert_adaptive(
        &mut self,
        point: Point,
        value: V,
        density_threshold: f64,
        capacity_multiplier: f32,
    ) -> Result<bool, QuadTreeError> {
        if capacity_multiplier < 1.0 {
            return Err(QuadTreeError::InvalidDensityMultiplier { multiplier: capacity_multiplier });
        }
        if !crate::geometry::rect_contains_point(self.root.boundary(), &point) {
            return Ok(false);
        }
        let capacity = self.capacity;
        let mut current = &mut self.root;
        loop {
            let boundary = *current.boundary();
            match current {
                Node::Leaf { entries, .. } => {
                    if let Some(existing) = entries.iter_mut().find(|e| e.point == point) {
                        existing.value = value;
                        return Ok(true);
                    }
                    let area = boundary.area();
                    let density = if area > 0.0 {
                        (entries.len() + 1) as f64 / area
                    } else {
                        f64::INFINITY
                    };
                    let adaptive_cap = if density > density_threshold {
                        capacity
                    } else {
                        (capacity as f32 * capacity_multiplier) as usize
                    };
                    if entries.len() < adaptive_cap {
                        entries.push(Entry { point, value });
                        return Ok(true);
                    }
                    subdivide(current);
                    continue;
                }
                Node::Internal { children, .. } => {
                    let idx = quadrant_index(&boundary, &point);
                    current = &mut children[idx];
                }
            }
        }
    }

    /// Removes the entry at `point`, if any, and compresses any ancestor
    /// whose subtree now fits back within capacity. Returns whether an
    /// entry was removed.
    pub fn remove(&mut self, point: Point) -> bool {
        if !crate::geometry::rect_contains_point(self.root.boundary(), &point) {
            return false;
        }
        let mut current = &mut self.root;
        let removed = loop {
            let boundary = *current.boundary();
            match current {
                Node::Leaf { entries, .. } => {
                    let before = entries.len();
                    entries.retain(|e| e.point != point);
                    break entries.len() != before;
                }
                Node::Internal { children, .. } => {
                    let idx = quadrant_index(&boundary, &point);
                    current = &mut children[idx];
                }
            }
        };
        if removed {
            self.compress_node();
        }
        removed
    }

    /// Removes every entry within `rect` (inclusive edges). Returns the
    /// number of entries removed.
    pub fn remove_range(&mut self, rect: &Rect) -> usize {
        let doomed: Vec<Point> = query::query_rect(&self.root, rect)
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        let mut removed = 0;
        for point in doomed {
            if self.remove(point) {
                removed += 1;
            }
        }
        removed
    }

    /// Resets the tree to an empty leaf over `boundary`.
    pub fn clear(&mut self, boundary: Rect) {
        self.root = Node::new_leaf(boundary);
    }

    /// Collapses every internal node whose subtree entry count has fallen
    /// back within capacity into a single leaf. Runs as one pass over all
    /// internal-node paths, deepest first, so a chain of ancestors collapses
    /// bottom-up in a single call.
    pub fn compress_node(&mut self) {
        let mut paths = collect_internal_paths(&self.root);
        paths.sort_by(|a, b| b.len().cmp(&a.len()));
        for path in paths {
            if let Some(node) = node_at_mut(&mut self.root, &path) {
                try_collapse(node, self.capacity);
            }
        }
    }

    pub fn find(&self, point: &Point) -> Option<&V> {
        query::find(&self.root, point)
    }

    /// Entries whose point falls within `rect` (inclusive edges).
    pub fn query(&self, rect: &Rect) -> Vec<(Point, V)> {
        query::query_rect(&self.root, rect)
    }

    pub fn query_circle(&self, center: &Point, radius: f32) -> Vec<(Point, V)> {
        query::query_circle(&self.root, center, radius)
    }

    pub fn query_polygon(&self, polygon: &[Point]) -> Vec<(Point, V)> {
        query::query_polygon(&self.root, polygon)
    }

    pub fn query_ray(&self, origin: Point, direction: Point, max_length: f32) -> Vec<(Point, V)> {
        query::query_ray(&self.root, origin, direction, max_length)
    }

    pub fn query_sector(
        &self,
        center: Point,
        start_angle: f64,
        end_angle: f64,
        radius: f32,
    ) -> Vec<(Point, V)> {
        query::query_sector(&self.root, center, start_angle, end_angle, radius)
    }

    pub fn all_entries(&self) -> Vec<(Point, V)> {
        query::all_entries(&self.root)
    }

    /// The `k` entries nearest `target`, nearest first.
    pub fn find_nearest(&self, target: &Point, k: usize) -> Vec<(Point, V)> {
        analysis::find_nearest(&self.root, target, k)
    }

    /// The densest region (entries per unit area) with at least `min_count`
    /// entries, and its count. `(boundary(), 0)` if nothing qualifies.
    pub fn find_hotspot(&self, min_count: usize) -> (Rect, usize) {
        analysis::find_hotspot(&self.root, min_count)
    }

    /// Moran's I spatial autocorrelation of `value_of(value)` across all
    /// entries. `threshold` is the neighbor-weight cutoff distance,
    /// defaulting to the mean nearest-neighbor distance when `None`.
    pub fn spatial_autocorrelation(
        &self,
        value_of: impl Fn(&V) -> f64,
        threshold: Option<f32>,
    ) -> f32 {
        analysis::spatial_autocorrelation(&self.root, value_of, threshold)
    }

    /// DBSCAN clusters of this tree's points with neighborhood radius `eps`
    /// and minimum cluster density `min_pts`. Noise points are omitted.
    pub fn dbscan_cluster(&self, eps: f32, min_pts: usize) -> Vec<Vec<Point>> {
        analysis::dbscan_cluster(&self.root, eps, min_pts)
    }

    /// Renders this tree as a JSON string, unconditionally of any Cargo
    /// feature: every node tagged `"leaf"` or `"internal"`, carrying its
    /// `boundary` and either `entries` or four `children`. Fails only if `V`
    /// serializes a non-finite float or other value `serde_json` rejects.
    pub fn serialize(&self) -> Result<String, serde_json::Error>
    where
        V: serde::Serialize,
    {
        serialize::serialize(&self.root)
    }

    pub fn merge(&self, other: &Quadtree<V>) -> Result<Quadtree<V>, QuadTreeError> {
        set_ops::merge(self, other)
    }

    pub fn intersection(&self, other: &Quadtree<V>) -> Result<Quadtree<V>, QuadTreeError> {
        set_ops::intersection(self, other)
    }

    pub fn difference(&self, other: &Quadtree<V>) -> Result<Quadtree<V>, QuadTreeError> {
        set_ops::difference(self, other)
    }

    pub fn filter(&self, predicate: impl Fn(&V) -> bool) -> Result<Quadtree<V>, QuadTreeError> {
        set_ops::filter(self, predicate)
    }
}
