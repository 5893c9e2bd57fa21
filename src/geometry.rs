//! ## Geometry primitives
//!
//! Pure, allocation-free predicates the quadtree engine prunes and tests
//! with: point/rect containment, rect-rect, rect-circle, point-in-polygon,
//! rect-polygon, rect-ray (slab method), and rect-sector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable 2D point. Equality is bit-identical on both coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Squared Euclidean distance to another point. Widened to `f64`
    /// internally to avoid precision loss in analysis accumulations.
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx * dx + dy * dy
    }
}

impl Eq for Point {}

impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

/// An axis-aligned rectangle `[x, x+width] x [y, y+height]`, min-corner form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// The smallest rectangle that encloses both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x1 = self.x.min(other.x);
        let y1 = self.y.min(other.y);
        let x2 = (self.x + self.width).max(other.x + other.width);
        let y2 = (self.y + self.height).max(other.y + other.height);
        Rect {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y),
            Point::new(self.x + self.width, self.y + self.height),
            Point::new(self.x, self.y + self.height),
        ]
    }

    /// Edges as `(start, end)` pairs, in corner order.
    fn edges(&self) -> [(Point, Point); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// Squared distance from `p` to the closest point of the closed rect.
    pub fn min_distance_sq(&self, p: &Point) -> f64 {
        let mut dx = 0.0f32;
        if p.x < self.x {
            dx = self.x - p.x;
        } else if p.x > self.x + self.width {
            dx = p.x - (self.x + self.width);
        }
        let mut dy = 0.0f32;
        if p.y < self.y {
            dy = self.y - p.y;
        } else if p.y > self.y + self.height {
            dy = p.y - (self.y + self.height);
        }
        (dx as f64) * (dx as f64) + (dy as f64) * (dy as f64)
    }
}

/// Inclusive on all four edges.
pub fn rect_contains_point(r: &Rect, p: &Point) -> bool {
    p.x >= r.x && p.x <= r.x + r.width && p.y >= r.y && p.y <= r.y + r.height
}

/// Overlap is inclusive: touching edges count as intersecting.
pub fn rect_intersects_rect(a: &Rect, b: &Rect) -> bool {
    !(b.x > a.x + a.width || b.x + b.width < a.x || b.y > a.y + a.height || b.y + b.height < a.y)
}

/// The closed disk of radius `r` about `center` intersects `rect` iff the
/// squared distance from `center` to the rect's closest point is `<= r^2`.
/// Never takes a square root.
pub fn rect_intersects_circle(rect: &Rect, center: &Point, radius: f32) -> bool {
    rect.min_distance_sq(center) <= (radius as f64) * (radius as f64)
}

/// Even-odd ray-casting point-in-polygon test. The polygon is closed
/// implicitly (last vertex connects back to the first). Fewer than 3
/// vertices is treated as containing nothing.
pub fn point_in_polygon(polygon: &[Point], p: &Point) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;
    for i in 0..n {
        let vi = polygon[i];
        let vj = polygon[j];
        let crosses = (vi.y > p.y) != (vj.y > p.y);
        if crosses {
            let x_intersect = vi.x + (p.y - vi.y) * (vj.x - vi.x) / (vj.y - vi.y);
            if p.x < x_intersect {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn segments_intersect(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    fn cross(o: Point, a: Point, b: Point) -> f32 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    }
    fn on_segment(p: Point, q: Point, r: Point) -> bool {
        q.x.min(p.x) <= r.x
            && r.x <= q.x.max(p.x)
            && q.y.min(p.y) <= r.y
            && r.y <= q.y.max(p.y)
    }
    let d1 = cross(b0, b1, a0);
    let d2 = cross(b0, b1, a1);
    let d3 = cross(a0, a1, b0);
    let d4 = cross(a0, a1, b1);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    if d1 == 0.0 && on_segment(b0, b1, a0) {
        return true;
    }
    if d2 == 0.0 && on_segment(b0, b1, a1) {
        return true;
    }
    if d3 == 0.0 && on_segment(a0, a1, b0) {
        return true;
    }
    if d4 == 0.0 && on_segment(a0, a1, b1) {
        return true;
    }
    false
}

/// Conservative rect-polygon intersection: exact for convex polygons, a
/// slight over-approximation for concave ones, which only affects pruning.
/// Fewer than 3 vertices never intersects.
pub fn rect_intersects_polygon(rect: &Rect, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    if polygon.iter().any(|v| rect_contains_point(rect, v)) {
        return true;
    }
    if rect.corners().iter().any(|c| point_in_polygon(polygon, c)) {
        return true;
    }
    let rect_edges = rect.edges();
    let n = polygon.len();
    for i in 0..n {
        let a0 = polygon[i];
        let a1 = polygon[(i + 1) % n];
        for (b0, b1) in rect_edges {
            if segments_intersect(a0, a1, b0, b1) {
                return true;
            }
        }
    }
    false
}

/// A ray: an origin, a non-zero direction, and a positive maximum length
/// measured as the scalar parameter `t` in `origin + t * direction`.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point,
    pub direction: Point,
    pub max_length: f32,
}

/// Rect-ray intersection via the 2D slab method: accept when the
/// parametric interval `[tmin, tmax]` overlaps `[0, max_length]`. A
/// zero-direction ray never intersects anything.
pub fn rect_intersects_ray(rect: &Rect, ray: &Ray) -> bool {
    if ray.direction.x == 0.0 && ray.direction.y == 0.0 {
        return false;
    }
    let mut t_min = 0.0f32;
    let mut t_max = ray.max_length;

    for axis in 0..2 {
        let (origin, dir, lo, hi) = if axis == 0 {
            (ray.origin.x, ray.direction.x, rect.x, rect.x + rect.width)
        } else {
            (
                ray.origin.y,
                ray.direction.y,
                rect.y,
                rect.y + rect.height,
            )
        };
        if dir == 0.0 {
            if origin < lo || origin > hi {
                return false;
            }
            continue;
        }
        let inv_dir = 1.0 / dir;
        let mut t0 = (lo - origin) * inv_dir;
        let mut t1 = (hi - origin) * inv_dir;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return false;
        }
    }
    t_min <= t_max
}

/// Relative epsilon used when testing whether a point lies on a ray,
/// scaled by the direction vector's magnitude.
const RAY_EPSILON_REL: f64 = 1e-4;

/// Is there a `t` in `[0, max_length]` such that `origin + t*direction`
/// equals `point`, within an epsilon proportional to `|direction|`?
pub fn point_on_ray(ray: &Ray, point: &Point) -> bool {
    let dx = ray.direction.x as f64;
    let dy = ray.direction.y as f64;
    let dir_len_sq = dx * dx + dy * dy;
    if dir_len_sq == 0.0 {
        return false;
    }
    let vx = (point.x - ray.origin.x) as f64;
    let vy = (point.y - ray.origin.y) as f64;
    let t = (vx * dx + vy * dy) / dir_len_sq;
    if t < 0.0 || t > ray.max_length as f64 {
        return false;
    }
    let proj_x = t * dx;
    let proj_y = t * dy;
    let perp_x = vx - proj_x;
    let perp_y = vy - proj_y;
    let perp_dist_sq = perp_x * perp_x + perp_y * perp_y;
    let dir_len = dir_len_sq.sqrt();
    let epsilon = RAY_EPSILON_REL * dir_len;
    perp_dist_sq <= epsilon * epsilon
}

const TAU: f64 = std::f64::consts::PI * 2.0;

/// Normalizes an angle in radians into `[0, 2*PI)`.
fn normalize_angle(a: f64) -> f64 {
    let mut r = a % TAU;
    if r < 0.0 {
        r += TAU;
    }
    r
}

/// Whether the raw, unnormalized `end - start` already reaches a full turn
/// (spec: "the sector bounds the whole disk (end-start >= 2*PI)"). Must be
/// checked before either bound is reduced modulo 2*PI, since e.g. `(0, 2*PI)`
/// normalizes to a zero span and would otherwise look like an empty sector
/// instead of a full circle.
fn is_full_circle_span(start: f64, end: f64) -> bool {
    end - start >= TAU - f64::EPSILON * TAU
}

/// Is `angle` within `[start, end]`, interpreted modulo 2*PI, spanning
/// counter-clockwise from `start` to `end`?
pub fn angle_in_sector(angle: f64, start: f64, end: f64) -> bool {
    if is_full_circle_span(start, end) {
        return true;
    }
    let a = normalize_angle(angle);
    let s = normalize_angle(start);
    let span = normalize_angle(end - start);
    let rel = normalize_angle(a - s);
    rel <= span
}

/// A circular sector: center, start/end angles in radians (CCW from +x),
/// and radius.
#[derive(Debug, Clone, Copy)]
pub struct Sector {
    pub center: Point,
    pub start_angle: f64,
    pub end_angle: f64,
    pub radius: f32,
}

impl Sector {
    fn is_full_circle(&self) -> bool {
        is_full_circle_span(self.start_angle, self.end_angle)
    }

    fn radius_endpoint(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * (angle.cos() as f32),
            self.center.y + self.radius * (angle.sin() as f32),
        )
    }
}

/// Rect-sector intersection: true iff the rect intersects the disk AND at
/// least one of: the sector spans the whole disk, a rect corner lies in
/// the sector, or a rect edge crosses one of the two bounding radii.
pub fn rect_intersects_sector(rect: &Rect, sector: &Sector) -> bool {
    if !rect_intersects_circle(rect, &sector.center, sector.radius) {
        return false;
    }
    if sector.is_full_circle() {
        return true;
    }
    for corner in rect.corners() {
        if point_in_disk_sector(sector, &corner) {
            return true;
        }
    }
    let start_edge = (sector.center, sector.radius_endpoint(sector.start_angle));
    let end_edge = (sector.center, sector.radius_endpoint(sector.end_angle));
    for (r0, r1) in [start_edge, end_edge] {
        for (e0, e1) in rect.edges() {
            if segments_intersect(r0, r1, e0, e1) {
                return true;
            }
        }
    }
    false
}

fn point_in_disk_sector(sector: &Sector, p: &Point) -> bool {
    let dist_sq = sector.center.distance_sq(p);
    if dist_sq > (sector.radius as f64) * (sector.radius as f64) {
        return false;
    }
    if dist_sq == 0.0 {
        return true;
    }
    let angle = ((p.y - sector.center.y) as f64).atan2((p.x - sector.center.x) as f64);
    angle_in_sector(angle, sector.start_angle, sector.end_angle)
}
