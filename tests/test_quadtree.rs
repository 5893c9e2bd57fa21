use shared::*;

use quadspace::geometry::Point;
use quadspace::Quadtree;
use tracing::{debug, info};

fn run_quadtree_test() {
    info!("Starting quadtree integration test");

    let mut tree: Quadtree<&str> = Quadtree::new(BOUNDARY, CAPACITY).unwrap();
    info!("Created quadtree with boundary: {:?}", BOUNDARY);

    let points = common_points();
    for (pt, label) in &points {
        tree.insert(*pt, *label);
        debug!("Inserted point: {:?} -> {}", pt, label);
    }
    info!("Finished inserting {} points", points.len());

    // kNN search
    let target = target_point();
    let knn_results = tree.find_nearest(&target, KNN_COUNT);
    assert_eq!(
        knn_results.len(),
        KNN_COUNT,
        "Expected {} nearest neighbors, got {}",
        KNN_COUNT,
        knn_results.len()
    );
    let mut prev_dist = 0.0;
    for (pt, _) in &knn_results {
        let d = distance(&target, pt);
        debug!("kNN: Point {:?} at distance {}", pt, d);
        assert!(d >= prev_dist, "kNN results not sorted by increasing distance");
        prev_dist = d;
    }

    // Range search
    let range_query = range_query_point();
    let range_results = tree.query_circle(&range_query, RADIUS);
    for (pt, _) in &range_results {
        let d = distance(&range_query, pt);
        assert!(
            d <= RADIUS as f64,
            "Point {:?} is at distance {} which exceeds radius {}",
            pt,
            d,
            RADIUS
        );
    }
    assert!(
        range_results.len() >= 5,
        "Expected at least 5 points in range, got {}",
        range_results.len()
    );

    info!("Quadtree integration test completed successfully");
}

#[test]
fn test_quadtree_insert_query_knn() {
    run_quadtree_test();
}

#[test]
fn test_insert_outside_boundary_rejected() {
    let mut tree: Quadtree<i32> = Quadtree::new(BOUNDARY, CAPACITY).unwrap();
    assert!(!tree.insert(Point::new(500.0, 500.0), 1));
    assert_eq!(tree.count(), 0);
}

#[test]
fn test_subdivide_then_collapse_round_trip() {
    let mut tree: Quadtree<i32> = Quadtree::new(BOUNDARY, 2).unwrap();
    let points = [
        Point::new(5.0, 5.0),
        Point::new(6.0, 6.0),
        Point::new(95.0, 95.0),
    ];
    for (i, p) in points.iter().enumerate() {
        tree.insert(*p, i as i32);
    }
    let (leaves, internals) = tree.count_nodes();
    assert!(leaves + internals > 1, "tree should have subdivided");
    assert!(internals > 0);

    for p in &points {
        tree.remove(*p);
    }
    assert_eq!(tree.count(), 0);
    assert_eq!(
        tree.count_nodes(),
        (1, 0),
        "tree should have fully compressed"
    );
}

#[test]
fn test_remove_range_clears_region() {
    let mut tree: Quadtree<i32> = Quadtree::new(BOUNDARY, CAPACITY).unwrap();
    tree.insert(Point::new(10.0, 10.0), 1);
    tree.insert(Point::new(15.0, 15.0), 2);
    tree.insert(Point::new(90.0, 90.0), 3);

    let region = quadspace::geometry::Rect { x: 0.0, y: 0.0, width: 50.0, height: 50.0 };
    let removed = tree.remove_range(&region);
    assert_eq!(removed, 2);
    assert_eq!(tree.count(), 1);
    assert!(tree.find(&Point::new(90.0, 90.0)).is_some());
}

#[test]
fn test_rectangular_query_matches_spec_scenario() {
    let mut tree: Quadtree<&str> = Quadtree::new(BOUNDARY, 4).unwrap();
    tree.insert(Point::new(10.0, 20.0), "a");
    tree.insert(Point::new(30.0, 40.0), "b");
    tree.insert(Point::new(70.0, 80.0), "c");

    let region = quadspace::geometry::Rect { x: 0.0, y: 0.0, width: 50.0, height: 50.0 };
    let mut hits = tree.query(&region);
    hits.sort_by(|a, b| a.1.cmp(b.1));

    assert_eq!(
        hits,
        vec![(Point::new(10.0, 20.0), "a"), (Point::new(30.0, 40.0), "b")]
    );
}

#[test]
fn test_split_bias_goes_upper_right() {
    let mut tree: Quadtree<&str> = Quadtree::new(BOUNDARY, 1).unwrap();
    // Force a subdivision so the midline bias is exercised.
    tree.insert(Point::new(10.0, 10.0), "a");
    tree.insert(Point::new(50.0, 50.0), "mid");
    assert_eq!(tree.find(&Point::new(50.0, 50.0)), Some(&"mid"));
}
