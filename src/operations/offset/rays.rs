use crate::geometry::Polygon2;
use crate::math::intersect_2d::point_at;
use crate::math::polygon_2d::segment_direction;
use crate::math::solver::solve_2x2;
use crate::math::{left_normal, Point2, Vector2, TOLERANCE};

/// Points closer than this after a move are the same vertex.
const MERGE_DISTANCE: f64 = 1e-7;

/// Edge-turn angle (radians) under which a vertex is dropped as collinear.
const COLLINEAR_ANGLE: f64 = 1e-9;

/// Loops with less area than this are discarded.
const MIN_LOOP_AREA: f64 = 1e-9;

/// A boundary vertex moving with the offset front.
///
/// After moving for offset distance `t` the vertex is at `origin + velocity * t`,
/// and both of its adjacent edges have moved exactly `t` along their normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRay {
    pub origin: Point2,
    pub velocity: Vector2,
}

impl VertexRay {
    #[must_use]
    pub fn at(&self, t: f64) -> Point2 {
        point_at(&self.origin, &self.velocity, t)
    }
}

/// Unit direction of the edge `i -> i + 1`, zero for a degenerate edge.
#[must_use]
pub fn edge_direction(points: &[Point2], i: usize) -> Vector2 {
    let n = points.len();
    segment_direction(&points[i], &points[(i + 1) % n]).unwrap_or_else(|_| Vector2::zeros())
}

/// Unit normal each edge moves along: its left normal for `sign > 0`, the
/// right one otherwise.
///
/// On a clockwise boundary the left normal points out of the material, so a
/// positive sign grows the boundary and a negative sign shrinks it.
#[must_use]
pub fn motion_normals(points: &[Point2], sign: f64) -> Vec<Vector2> {
    (0..points.len())
        .map(|i| left_normal(&edge_direction(points, i)) * sign)
        .collect()
}

/// Velocity of the corner between two edges moving along `incoming` and `outgoing`.
///
/// Solves `incoming . v = 1` and `outgoing . v = 1`. Parallel normals have
/// no unique answer, so the corner then follows `outgoing`.
#[must_use]
pub fn corner_velocity(incoming: &Vector2, outgoing: &Vector2) -> Vector2 {
    match solve_2x2(
        [incoming.x, outgoing.x],
        [incoming.y, outgoing.y],
        [1.0, 1.0],
    ) {
        Ok((x, y)) if x.is_finite() && y.is_finite() => Vector2::new(x, y),
        _ => *outgoing,
    }
}

/// Rays of every vertex of a closed point cycle.
#[must_use]
pub fn vertex_rays(points: &[Point2], normals: &[Vector2]) -> Vec<VertexRay> {
    let n = points.len();
    (0..n)
        .map(|i| VertexRay {
            origin: points[i],
            velocity: corner_velocity(&normals[(i + n - 1) % n], &normals[i]),
        })
        .collect()
}

/// Offset distance at which the edge `k -> k + 1` shrinks to a point.
///
/// Intersects the rays of the two end vertices; parallel rays and meetings
/// behind the start never collapse the edge.
#[must_use]
pub fn collapse_distance(rays: &[VertexRay], k: usize) -> Option<f64> {
    let n = rays.len();
    let a = &rays[k];
    let b = &rays[(k + 1) % n];
    let d = b.origin - a.origin;
    let (t, _) = solve_2x2(
        [a.velocity.x, a.velocity.y],
        [-b.velocity.x, -b.velocity.y],
        [d.x, d.y],
    )
    .ok()?;
    (t.is_finite() && t >= -TOLERANCE).then_some(t.max(0.0))
}

/// Positions of every vertex after moving offset distance `t`.
#[must_use]
pub fn advance(rays: &[VertexRay], t: f64) -> Vec<Point2> {
    rays.iter().map(|ray| ray.at(t)).collect()
}

/// Repairs a moved point cycle until nothing changes.
///
/// Merges coincident neighbours and drops collinear vertices and zero-width
/// spikes. Returns `None` when fewer than 3 points or no area remain.
#[must_use]
pub fn cleanup(points: Vec<Point2>) -> Option<Vec<Point2>> {
    let mut polygon = Polygon2::new(points);
    loop {
        let before = polygon.len();
        polygon = polygon
            .simplify(MERGE_DISTANCE)?
            .collate(COLLINEAR_ANGLE)?;
        if polygon.len() == before {
            break;
        }
    }
    (polygon.area() > MIN_LOOP_AREA).then(|| polygon.into_points())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn unit_square() -> Vec<Point2> {
        pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    #[test]
    fn shrinking_square_corners_move_inward() {
        let points = unit_square();
        let normals = motion_normals(&points, -1.0);
        assert_relative_eq!(normals[0], Vector2::new(1.0, 0.0));
        let rays = vertex_rays(&points, &normals);
        assert_relative_eq!(rays[0].velocity, Vector2::new(1.0, 1.0));
        assert_relative_eq!(rays[2].velocity, Vector2::new(-1.0, -1.0));
        assert_relative_eq!(rays[0].at(0.25), Point2::new(0.25, 0.25));
    }

    #[test]
    fn square_edges_collapse_at_half_width() {
        let points = unit_square();
        let rays = vertex_rays(&points, &motion_normals(&points, -1.0));
        for k in 0..4 {
            assert_relative_eq!(collapse_distance(&rays, k).unwrap(), 0.5, epsilon = 1e-12);
        }
        let grown = vertex_rays(&points, &motion_normals(&points, 1.0));
        assert!(collapse_distance(&grown, 0).is_none());
    }

    #[test]
    fn straight_corner_follows_the_outgoing_normal() {
        let n = Vector2::new(0.0, 1.0);
        assert_eq!(corner_velocity(&n, &n), n);
    }

    #[test]
    fn cleanup_removes_spikes_and_duplicates() {
        let points = pts(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (0.5, 1.0),
            (0.5, 2.0),
            (0.5, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (1.0, 0.0),
        ]);
        let clean = cleanup(points).unwrap();
        assert_eq!(clean, unit_square());
    }

    #[test]
    fn cleanup_rejects_collapsed_loops() {
        let dot = pts(&[(0.5, 0.5), (0.5, 0.5), (0.5, 0.5), (0.5, 0.5)]);
        assert!(cleanup(dot).is_none());
        let sliver = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(cleanup(sliver).is_none());
    }
}
