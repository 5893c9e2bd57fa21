#![allow(dead_code)]
#[path = "shared.rs"]
mod shared;
use shared::*;

use criterion::{criterion_group, Criterion};
use quadspace::geometry::{Point, Rect};
use quadspace::Quadtree;
use std::hint::black_box;

fn build_tree() -> Quadtree<i32> {
    let points = generate_points();
    let mut tree: Quadtree<i32> = Quadtree::new(BENCH_BOUNDARY, BENCH_NODE_CAPACITY).unwrap();
    for (i, p) in points.iter().enumerate() {
        tree.insert(*p, i as i32);
    }
    tree
}

fn bench_knn(_c: &mut Criterion) {
    let tree = build_tree();
    let target = Point::new(500.0, 500.0);
    let mut cc = configure_criterion();
    cc.bench_function("find_nearest", |b| {
        b.iter(|| black_box(tree.find_nearest(&target, BENCH_KNN_SIZE)))
    });
}

fn bench_range_search(_c: &mut Criterion) {
    let tree = build_tree();
    let center = Point::new(500.0, 500.0);
    let mut cc = configure_criterion();
    cc.bench_function("query_circle", |b| {
        b.iter(|| black_box(tree.query_circle(&center, BENCH_RANGE_RADIUS)))
    });
}

fn bench_rect_query(_c: &mut Criterion) {
    let tree = build_tree();
    let rect = Rect { x: 400.0, y: 400.0, width: 200.0, height: 200.0 };
    let mut cc = configure_criterion();
    cc.bench_function("query_rect", |b| b.iter(|| black_box(tree.query(&rect))));
}

criterion_group!(benches, bench_knn, bench_range_search, bench_rect_query);
