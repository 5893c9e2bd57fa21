use quadspace::geometry::Rect;
use quadspace::{Quadtree, QuadTreeError};

#[test]
fn test_zero_capacity_is_rejected() {
    let boundary = Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let err = Quadtree::<i32>::new(boundary, 0).unwrap_err();
    assert!(matches!(err, QuadTreeError::InvalidCapacity { capacity: 0 }));
}

#[test]
fn test_adaptive_insert_rejects_multiplier_below_one() {
    let boundary = Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let mut tree: Quadtree<i32> = Quadtree::new(boundary, 4).unwrap();
    let err = tree
        .insert_adaptive(quadspace::geometry::Point::new(1.0, 1.0), 1, 1.0, 0.99)
        .unwrap_err();
    assert!(matches!(err, QuadTreeError::InvalidDensityMultiplier { .. }));
}
