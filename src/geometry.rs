//! Exact rotation primitives and base facet shapes for the truncated solid.
//!
//! All committed geometry changes go through coordinate permutations with
//! sign flips rather than trigonometry. Negating and swapping f32 components
//! is exact, so any number of quarter turns or diagonal turns composes with
//! zero drift. The permutations generate the full 24-element rotation group
//! of the cube.

/// A vertex of a facet.
pub type Point = (f32, f32, f32);

/// An axis or diagonal direction with components in {-1, 0, 1}.
///
/// Kept as integers so dot products and committed rotations stay exact.
pub type Dir = (i32, i32, i32);

/// Quarter turn of a single point around the X axis.
#[inline]
pub fn rotate_point_x(p: Point) -> Point {
    (p.0, -p.2, p.1)
}

/// Quarter turn of a single point around the Y axis.
#[inline]
pub fn rotate_point_y(p: Point) -> Point {
    (p.2, p.1, -p.0)
}

/// Quarter turn of a single point around the Z axis.
#[inline]
pub fn rotate_point_z(p: Point) -> Point {
    (-p.1, p.0, p.2)
}

/// Quarter turn of a direction around the X axis.
#[inline]
pub fn rotate_dir_x(d: Dir) -> Dir {
    (d.0, -d.2, d.1)
}

/// Quarter turn of a direction around the Y axis.
#[inline]
pub fn rotate_dir_y(d: Dir) -> Dir {
    (d.2, d.1, -d.0)
}

/// Quarter turn of a direction around the Z axis.
#[inline]
pub fn rotate_dir_z(d: Dir) -> Dir {
    (-d.1, d.0, d.2)
}

fn repeat(points: &[Point], count: usize, turn: fn(Point) -> Point) -> Vec<Point> {
    points
        .iter()
        .map(|&p| {
            let mut q = p;
            for _ in 0..count {
                q = turn(q);
            }
            q
        })
        .collect()
}

/// Applies `count` quarter turns around X to every point, returning a new list.
pub fn rotate_x(points: &[Point], count: usize) -> Vec<Point> {
    repeat(points, count, rotate_point_x)
}

/// Applies `count` quarter turns around Y to every point, returning a new list.
pub fn rotate_y(points: &[Point], count: usize) -> Vec<Point> {
    repeat(points, count, rotate_point_y)
}

/// Applies `count` quarter turns around Z to every point, returning a new list.
pub fn rotate_z(points: &[Point], count: usize) -> Vec<Point> {
    repeat(points, count, rotate_point_z)
}

/// Rotates a point by +120 degrees around the diagonal `axis`.
///
/// `axis` must be one of the eight sign triples. The result is a cyclic
/// coordinate permutation with sign flips, order 3, fixing `axis`. The sign
/// pattern of the axis decides which of the two cyclic branches realizes the
/// right-hand-rule +120 degree turn, so the committed rotation always lands
/// where the animated interpolation was heading.
#[inline]
pub fn rotate_point_about(axis: Dir, p: Point) -> Point {
    let (sx, sy, sz) = (axis.0 as f32, axis.1 as f32, axis.2 as f32);
    if axis.0 * axis.1 * axis.2 == 1 {
        (sx * sz * p.2, sy * sx * p.0, sz * sy * p.1)
    } else {
        (sx * sy * p.1, sy * sz * p.2, sz * sx * p.0)
    }
}

/// Rotates a direction by +120 degrees around the diagonal `axis`.
///
/// Same permutation as [`rotate_point_about`], on integer components.
#[inline]
pub fn rotate_dir_about(axis: Dir, d: Dir) -> Dir {
    let (sx, sy, sz) = axis;
    if sx * sy * sz == 1 {
        (sx * sz * d.2, sy * sx * d.0, sz * sy * d.1)
    } else {
        (sx * sy * d.1, sy * sz * d.2, sz * sx * d.0)
    }
}

/// Dot product of two directions.
#[inline]
pub fn dot(a: Dir, b: Dir) -> i32 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

/// Derived facet constants for an outer extent `a`.
///
/// `b` is the half-diagonal of a unit square (the square facet's in-plane
/// reach) and `c` the midpoint between `a` and `b`, where the corner cuts
/// land.
pub struct Extents {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Extents {
    pub fn new(a: f32) -> Self {
        let b = std::f32::consts::SQRT_2 / 2.0;
        Self {
            a,
            b,
            c: (a + b) / 2.0,
        }
    }
}

/// The corner triangle facet at the (+,+,+) vertex.
pub fn triangle(e: &Extents) -> Vec<Point> {
    let c = e.c;
    vec![(c, 0.0, c), (0.0, c, c), (c, c, 0.0)]
}

/// The trapezoid facet between the (+,+,+) corner triangle and the +Z square.
pub fn trapezoid(e: &Extents) -> Vec<Point> {
    let (a, b, c) = (e.a, e.b, e.c);
    vec![(c, 0.0, c), (0.0, c, c), (0.0, b, a), (b, 0.0, a)]
}

/// The square facet capping the +Z face.
pub fn square(e: &Extents) -> Vec<Point> {
    let (a, b) = (e.a, e.b);
    vec![(b, 0.0, a), (0.0, b, a), (-b, 0.0, a), (0.0, -b, a)]
}

/// The hexagonal cross-section exposed by cutting through the center
/// perpendicular to the (1,1,1) diagonal.
///
/// Winding as listed faces the (-1,-1,-1) side; reverse it for the other
/// half's face.
pub fn hexagon(e: &Extents) -> Vec<Point> {
    let c = e.c;
    let base = [
        (c, 0.0, c),
        (0.0, -c, c),
        (-c, -c, 0.0),
        (-c, 0.0, -c),
        (0.0, c, -c),
        (c, c, 0.0),
    ];
    rotate_y(&base, 1)
}
