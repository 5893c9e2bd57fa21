//! ## Analysis primitives
//!
//! k-nearest neighbors, density hotspot, Moran's I spatial autocorrelation,
//! and DBSCAN clustering, all built on the traversal machinery in
//! `query.rs` and `node.rs`.

use super::node::{count_entries, Node};
use super::query::{all_entries, query_circle};
use crate::geometry::{Point, Rect};
use ordered_float::OrderedFloat;
use std::collections::{BinaryHeap, HashSet, VecDeque};

/// One entry in the k-nearest-neighbor max-heap, ordered by ascending
/// distance (and, on ties, ascending traversal order) so that the
/// Ord-maximum -- the one `BinaryHeap::pop` evicts once the heap grows
/// past `k` -- is the farthest (or latest-seen, on a tie) point kept.
struct KnnItem<V> {
    dist_sq: OrderedFloat<f64>,
    seq: usize,
    point: Point,
    value: V,
}

impl<V> PartialEq for KnnItem<V> {
    fn eq(&self, other: &Self) -> bool {
        self.dist_sq == other.dist_sq && self.seq == other.seq
    }
}
impl<V> Eq for KnnItem<V> {}
impl<V> PartialOrd for KnnItem<V> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<V> Ord for KnnItem<V> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.dist_sq, self.seq).cmp(&(other.dist_sq, other.seq))
    }
}

/// One entry in the node frontier priority queue: nearer lower-bound first.
struct FrontierItem<'a, V> {
    neg_lower_bound: OrderedFloat<f64>,
    node: &'a Node<V>,
}
impl<V> PartialEq for FrontierItem<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.neg_lower_bound == other.neg_lower_bound
    }
}
impl<V> Eq for FrontierItem<'_, V> {}
impl<V> PartialOrd for FrontierItem<'_, V> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<V> Ord for FrontierItem<'_, V> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.neg_lower_bound.cmp(&other.neg_lower_bound)
    }
}

/// Best-first traversal: a priority queue keyed by the lower-bound distance
/// from `target` to each node's boundary. Popped leaves feed a bounded
/// max-heap of size `k`; a node whose lower bound exceeds the current
/// kth-best distance is pruned. Ties broken by traversal order.
pub fn find_nearest<V: Clone>(root: &Node<V>, target: &Point, k: usize) -> Vec<(Point, V)> {
    if k == 0 {
        return Vec::new();
    }
    let mut frontier: BinaryHeap<std::cmp::Reverse<FrontierItem<V>>> = BinaryHeap::new();
    frontier.push(std::cmp::Reverse(FrontierItem {
        neg_lower_bound: OrderedFloat(root.boundary().min_distance_sq(target)),
        node: root,
    }));
    let mut heap: BinaryHeap<KnnItem<V>> = BinaryHeap::new();
    let mut seq = 0usize;

    while let Some(std::cmp::Reverse(item)) = frontier.pop() {
        if heap.len() == k {
            if let Some(worst) = heap.peek() {
                let current_kth = worst.dist_sq.into_inner();
                if item.neg_lower_bound.into_inner() > current_kth {
                    continue;
                }
            }
        }
        match item.node {
            Node::Leaf { entries, .. } => {
                for e in entries {
                    let dist_sq = e.point.distance_sq(target);
                    heap.push(KnnItem {
                        dist_sq: OrderedFloat(dist_sq),
                        seq,
                        point: e.point,
                        value: e.value.clone(),
                    });
                    seq += 1;
                    if heap.len() > k {
                        heap.pop();
                    }
                }
            }
            Node::Internal { children, .. } => {
                for c in children.iter() {
                    frontier.push(std::cmp::Reverse(FrontierItem {
                        neg_lower_bound: OrderedFloat(c.boundary().min_distance_sq(target)),
                        node: c,
                    }));
                }
            }
        }
    }

    // Ascending by (dist_sq, seq) already puts the nearest (and, on ties,
    // earliest-traversed) point first.
    heap.into_sorted_vec()
        .into_iter()
        .map(|item| (item.point, item.value))
        .collect()
}

/// Every node's `(boundary, depth, traversal order, subtree entry count)`,
/// via an explicit iterative pre-order stack.
fn node_stats<V>(root: &Node<V>) -> Vec<(Rect, usize, usize, usize)> {
    let mut out = Vec::new();
    let mut stack = vec![(root, 0usize)];
    let mut order = 0usize;
    while let Some((node, depth)) = stack.pop() {
        out.push((*node.boundary(), depth, order, count_entries(node)));
        order += 1;
        if let Node::Internal { children, .. } = node {
            for c in children.iter().rev() {
                stack.push((c, depth + 1));
            }
        }
    }
    out
}

/// The `(rect, count)` pair maximizing entries-per-area, subject to
/// `count >= min_count`, over every node's boundary. Ties broken by
/// shallower depth (larger area) then traversal order. Returns
/// `(root_boundary, 0)` if nothing satisfies the minimum.
pub fn find_hotspot<V>(root: &Node<V>, min_count: usize) -> (Rect, usize) {
    let mut best: Option<(f64, usize, usize, Rect, usize)> = None; // (density, depth, order, rect, count)
    for (rect, depth, order, count) in node_stats(root) {
        if count < min_count {
            continue;
        }
        let area = rect.area();
        let density = if area > 0.0 { count as f64 / area } else { f64::INFINITY };
        let candidate = (density, depth, order, rect, count);
        best = Some(match best {
            None => candidate,
            Some(current) => {
                if candidate.0 > current.0
                    || (candidate.0 == current.0 && candidate.1 < current.1)
                    || (candidate.0 == current.0
                        && candidate.1 == current.1
                        && candidate.2 < current.2)
                {
                    candidate
                } else {
                    current
                }
            }
        });
    }
    match best {
        Some((_, _, _, rect, count)) => (rect, count),
        None => (*root.boundary(), 0),
    }
}

/// Moran's I spatial autocorrelation over a numeric projection of each
/// entry's value. `threshold` defaults to the mean nearest-neighbor
/// distance of the entry set when `None`. Returns `0.0` for fewer than two
/// entries or zero variance; otherwise a value in `[-1, 1]`.
pub fn spatial_autocorrelation<V>(
    root: &Node<V>,
    value_of: impl Fn(&V) -> f64,
    threshold: Option<f32>,
) -> f32 {
    let entries = all_entries(root);
    let n = entries.len();
    if n < 2 {
        return 0.0;
    }
    let values: Vec<f64> = entries.iter().map(|(_, v)| value_of(v)).collect();
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance_num: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    if variance_num == 0.0 {
        return 0.0;
    }

    let threshold_sq = match threshold {
        Some(t) => (t as f64) * (t as f64),
        None => {
            let mut total = 0.0;
            for i in 0..n {
                let mut best = f64::INFINITY;
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let d2 = entries[i].0.distance_sq(&entries[j].0);
                    if d2 < best {
                        best = d2;
                    }
                }
                if best.is_finite() {
                    total += best.sqrt();
                }
            }
            let mean_nn = total / n as f64;
            mean_nn * mean_nn
        }
    };

    let mut numerator = 0.0;
    let mut w_sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let d2 = entries[i].0.distance_sq(&entries[j].0);
            if d2 <= threshold_sq {
                w_sum += 1.0;
                numerator += (values[i] - mean) * (values[j] - mean);
            }
        }
    }
    if w_sum == 0.0 {
        return 0.0;
    }
    let i_value = (n as f64 / w_sum) * (numerator / variance_num);
    i_value.clamp(-1.0, 1.0) as f32
}

/// Standard DBSCAN over the index's entries. Neighborhood queries go
/// through `query_circle` for `O(log + k)` cost per point. Returns the
/// core-reachable clusters; non-core, non-reachable points are omitted.
pub fn dbscan_cluster<V: Clone>(root: &Node<V>, eps: f32, min_pts: usize) -> Vec<Vec<Point>> {
    let entries = all_entries(root);
    let mut visited: HashSet<Point> = HashSet::new();
    let mut assigned: HashSet<Point> = HashSet::new();
    let mut clusters: Vec<Vec<Point>> = Vec::new();

    for (point, _) in &entries {
        if visited.contains(point) {
            continue;
        }
        visited.insert(*point);
        let neighbors = query_circle(root, point, eps);
        if neighbors.len() < min_pts {
            continue;
        }
        let mut cluster = vec![*point];
        assigned.insert(*point);
        let mut seeds: VecDeque<Point> = neighbors.into_iter().map(|(p, _)| p).collect();
        while let Some(p) = seeds.pop_front() {
            if !visited.contains(&p) {
                visited.insert(p);
                let p_neighbors = query_circle(root, &p, eps);
                if p_neighbors.len() >= min_pts {
                    for (np, _) in p_neighbors {
                        seeds.push_back(np);
                    }
                }
            }
            if !assigned.contains(&p) {
                assigned.insert(p);
                cluster.push(p);
            }
        }
        clusters.push(cluster);
    }
    clusters
}
