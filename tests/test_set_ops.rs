use quadspace::geometry::{Point, Rect};
use quadspace::Quadtree;

fn boundary() -> Rect {
    Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 }
}

#[test]
fn test_merge_prefers_left_operand_on_collision() {
    let mut a: Quadtree<&str> = Quadtree::new(boundary(), 4).unwrap();
    let mut b: Quadtree<&str> = Quadtree::new(boundary(), 4).unwrap();
    a.insert(Point::new(10.0, 10.0), "a");
    b.insert(Point::new(10.0, 10.0), "b");
    b.insert(Point::new(20.0, 20.0), "only-b");

    let merged = a.merge(&b).unwrap();
    assert_eq!(merged.find(&Point::new(10.0, 10.0)), Some(&"a"));
    assert_eq!(merged.find(&Point::new(20.0, 20.0)), Some(&"only-b"));
    assert_eq!(merged.count(), 2);
}

#[test]
fn test_intersection_keeps_only_shared_points() {
    let mut a: Quadtree<i32> = Quadtree::new(boundary(), 4).unwrap();
    let mut b: Quadtree<i32> = Quadtree::new(boundary(), 4).unwrap();
    a.insert(Point::new(10.0, 10.0), 1);
    a.insert(Point::new(20.0, 20.0), 2);
    b.insert(Point::new(10.0, 10.0), 99);

    let shared = a.intersection(&b).unwrap();
    assert_eq!(shared.count(), 1);
    assert_eq!(shared.find(&Point::new(10.0, 10.0)), Some(&1));
}

#[test]
fn test_difference_removes_points_present_in_other() {
    let mut a: Quadtree<i32> = Quadtree::new(boundary(), 4).unwrap();
    let mut b: Quadtree<i32> = Quadtree::new(boundary(), 4).unwrap();
    a.insert(Point::new(10.0, 10.0), 1);
    a.insert(Point::new(20.0, 20.0), 2);
    b.insert(Point::new(10.0, 10.0), 99);

    let diff = a.difference(&b).unwrap();
    assert_eq!(diff.count(), 1);
    assert_eq!(diff.find(&Point::new(20.0, 20.0)), Some(&2));
}

#[test]
fn test_binary_ops_result_boundary_is_union_of_inputs() {
    let a_boundary = Rect { x: 0.0, y: 0.0, width: 50.0, height: 50.0 };
    let b_boundary = Rect { x: 100.0, y: 100.0, width: 50.0, height: 50.0 };
    let expected = a_boundary.union(&b_boundary);

    let a: Quadtree<i32> = Quadtree::new(a_boundary, 4).unwrap();
    let b: Quadtree<i32> = Quadtree::new(b_boundary, 4).unwrap();

    assert_eq!(*a.merge(&b).unwrap().boundary(), expected);
    assert_eq!(*a.intersection(&b).unwrap().boundary(), expected);
    assert_eq!(*a.difference(&b).unwrap().boundary(), expected);
}

#[test]
fn test_filter_keeps_matching_values() {
    let mut tree: Quadtree<i32> = Quadtree::new(boundary(), 4).unwrap();
    tree.insert(Point::new(10.0, 10.0), 1);
    tree.insert(Point::new(20.0, 20.0), 2);
    tree.insert(Point::new(30.0, 30.0), 3);

    let evens = tree.filter(|v| v % 2 == 0).unwrap();
    assert_eq!(evens.count(), 1);
    assert_eq!(evens.find(&Point::new(20.0, 20.0)), Some(&2));
}
