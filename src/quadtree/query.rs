//! ## Query engine
//!
//! A single generic iterative traversal, parameterized by a boundary-prune
//! predicate and a per-entry test predicate. Each of the six region
//! queries is a thin wrapper supplying its own predicates built from
//! `geometry.rs`. Traversal order is `NW -> NE -> SW -> SE`, leaves listing
//! entries in insertion order.

use super::node::{Entry, Node};
use crate::geometry::{
    angle_in_sector, point_in_polygon, point_on_ray, rect_intersects_circle,
    rect_intersects_polygon, rect_intersects_ray, rect_intersects_sector, Point, Ray, Rect,
    Sector,
};

/// Walks `root` with an explicit work stack, pruning subtrees whose
/// boundary fails `prune`, and appending `(point, value.clone())` for every
/// leaf entry whose point satisfies `test`.
pub fn traverse_collect<V, P, T>(root: &Node<V>, prune: P, test: T, out: &mut Vec<(Point, V)>)
where
    V: Clone,
    P: Fn(&Rect) -> bool,
    T: Fn(&Point) -> bool,
{
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if prune(node.boundary()) {
            continue;
        }
        match node {
            Node::Leaf { entries, .. } => {
                for e in entries {
                    if test(&e.point) {
                        out.push((e.point, e.value.clone()));
                    }
                }
            }
            Node::Internal { children, .. } => {
                // Push in reverse so popping yields NW, NE, SW, SE.
                for c in children.iter().rev() {
                    stack.push(c);
                }
            }
        }
    }
}

/// Every entry in the subtree, in `NW -> NE -> SW -> SE` order, no pruning.
pub fn all_entries<V: Clone>(root: &Node<V>) -> Vec<(Point, V)> {
    let mut out = Vec::new();
    traverse_collect(root, |_| false, |_| true, &mut out);
    out
}

pub fn query_rect<V: Clone>(root: &Node<V>, rect: &Rect) -> Vec<(Point, V)> {
    let mut out = Vec::new();
    traverse_collect(
        root,
        |b| !crate::geometry::rect_intersects_rect(b, rect),
        |p| crate::geometry::rect_contains_point(rect, p),
        &mut out,
    );
    out
}

pub fn query_circle<V: Clone>(root: &Node<V>, center: &Point, radius: f32) -> Vec<(Point, V)> {
    let mut out = Vec::new();
    let radius_sq = (radius as f64) * (radius as f64);
    traverse_collect(
        root,
        |b| !rect_intersects_circle(b, center, radius),
        |p| p.distance_sq(center) <= radius_sq,
        &mut out,
    );
    out
}

pub fn query_polygon<V: Clone>(root: &Node<V>, polygon: &[Point]) -> Vec<(Point, V)> {
    let mut out = Vec::new();
    if polygon.len() < 3 {
        return out;
    }
    traverse_collect(
        root,
        |b| !rect_intersects_polygon(b, polygon),
        |p| point_in_polygon(polygon, p),
        &mut out,
    );
    out
}

pub fn query_ray<V: Clone>(
    root: &Node<V>,
    origin: Point,
    direction: Point,
    max_length: f32,
) -> Vec<(Point, V)> {
    let mut out = Vec::new();
    if direction.x == 0.0 && direction.y == 0.0 {
        return out;
    }
    let ray = Ray { origin, direction, max_length };
    traverse_collect(
        root,
        |b| !rect_intersects_ray(b, &ray),
        |p| point_on_ray(&ray, p),
        &mut out,
    );
    out
}

#[allow(clippy::too_many_arguments)]
pub fn query_sector<V: Clone>(
    root: &Node<V>,
    center: Point,
    start_angle: f64,
    end_angle: f64,
    radius: f32,
) -> Vec<(Point, V)> {
    let mut out = Vec::new();
    let sector = Sector { center, start_angle, end_angle, radius };
    let radius_sq = (radius as f64) * (radius as f64);
    traverse_collect(
        root,
        |b| !rect_intersects_sector(b, &sector),
        |p| {
            let d2 = center.distance_sq(p);
            d2 <= radius_sq && angle_in_sector_for(&sector, p)
        },
        &mut out,
    );
    out
}

fn angle_in_sector_for(sector: &Sector, p: &Point) -> bool {
    if sector.center.distance_sq(p) == 0.0 {
        return true;
    }
    let angle = ((p.y - sector.center.y) as f64).atan2((p.x - sector.center.x) as f64);
    angle_in_sector(angle, sector.start_angle, sector.end_angle)
}

/// Locates the entry at `point` by direct iterative descent, exploiting
/// the partition's uniqueness: a point maps to exactly one leaf.
pub fn find<'a, V>(root: &'a Node<V>, point: &Point) -> Option<&'a V> {
    if !crate::geometry::rect_contains_point(root.boundary(), point) {
        return None;
    }
    let mut current = root;
    loop {
        match current {
            Node::Leaf { entries, .. } => {
                return entries.iter().find(|e| e.point == *point).map(|e| &e.value);
            }
            Node::Internal { children, .. } => {
                let idx = super::node::quadrant_index(current.boundary(), point);
                current = &children[idx];
            }
        }
    }
}

pub fn find_entry_owned<V: Clone>(root: &Node<V>, point: &Point) -> Option<Entry<V>> {
    find(root, point).map(|v| Entry { point: *point, value: v.clone() })
}
