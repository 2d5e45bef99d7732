pub mod intersect_2d;
pub mod polygon_2d;
pub mod solver;

pub use solver::solve_matrix;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Default coordinate snap grid for point and segment identity.
pub const QUANTUM: f64 = 1e-6;

/// Snaps a point to a square grid of spacing `grid`.
#[must_use]
pub fn snap(p: &Point2, grid: f64) -> Point2 {
    Point2::new((p.x / grid).round() * grid, (p.y / grid).round() * grid)
}

/// Integer lattice coordinates of `p` on a grid of spacing `grid`.
///
/// Two points share a lattice cell exactly when they snap to the same point,
/// so the result is safe to hash.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lattice(p: &Point2, grid: f64) -> (i64, i64) {
    ((p.x / grid).round() as i64, (p.y / grid).round() as i64)
}

/// Z component of the 3D cross product of two planar vectors.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Unsigned angle between two vectors in `[0, pi]`.
#[must_use]
pub fn angle(a: &Vector2, b: &Vector2) -> f64 {
    cross(a, b).atan2(a.dot(b)).abs()
}
