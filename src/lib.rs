//! ## Quadspace
//!
//! A region quadtree spatial index. Points are `(x, y)` pairs paired with an
//! opaque value, stored inside a fixed axis-aligned world boundary. The tree
//! subdivides on insert past a capacity threshold and collapses back on
//! removal.
//!
//! ### Example
//!
//! ```
//! use quadspace::geometry::{Point, Rect};
//! use quadspace::quadtree::Quadtree;
//!
//! let boundary = Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 };
//! let mut tree: Quadtree<&str> = Quadtree::new(boundary, 4).unwrap();
//!
//! tree.insert(Point { x: 10.0, y: 20.0 }, "a");
//! tree.insert(Point { x: 50.0, y: 50.0 }, "b");
//!
//! let nearest = tree.find_nearest(&Point { x: 12.0, y: 22.0 }, 1);
//! assert_eq!(nearest[0].0, Point { x: 10.0, y: 20.0 });
//! ```

pub mod errors;
pub mod geometry;
mod logging;
pub mod quadtree;

pub use errors::QuadTreeError;
pub use quadtree::Quadtree;
