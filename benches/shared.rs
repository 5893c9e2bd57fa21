#![allow(dead_code)]

//! Shared utilities for Quadspace benchmarks: sizing constants, a boundary,
//! and point-set generators.

use criterion::Criterion;
use quadspace::geometry::{Point, Rect};
use tracing::{debug, info};

pub const BENCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
pub const BENCH_NUM_INSERT: i32 = 2000;
pub const BENCH_NODE_CAPACITY: usize = 8;

pub const BENCH_KNN_SIZE: usize = 8;
pub const BENCH_RANGE_RADIUS: f32 = 30.0;

pub const BENCH_BOUNDARY: Rect = Rect { x: 0.0, y: 0.0, width: 1000.0, height: 1000.0 };

pub fn generate_points() -> Vec<Point> {
    info!("Generating {} points", BENCH_NUM_INSERT);
    let data: Vec<Point> = (0..BENCH_NUM_INSERT)
        .map(|i| {
            // A cheap deterministic scatter across the boundary.
            let x = (i.wrapping_mul(2654435761) % 1000).unsigned_abs() as f32;
            let y = (i.wrapping_mul(40503) % 1000).unsigned_abs() as f32;
            let pt = Point::new(x, y);
            debug!("Generated point: {:?}", pt);
            pt
        })
        .collect();
    info!("Finished generating data ({} points)", data.len());
    data
}

pub fn configure_criterion() -> Criterion {
    Criterion::default().measurement_time(BENCH_TIMEOUT)
}
