use tracing::debug;

use super::rays::{
    cleanup, collapse_distance, corner_velocity, edge_direction, motion_normals, vertex_rays,
};
use super::OffsetEngine;
use crate::error::{OperationError, Result};
use crate::geometry::Polygon2;
use crate::math::solver::solve_2x2;
use crate::math::{Point2, TOLERANCE};

/// Local offset that moves each surviving edge and re-mitres its corners.
///
/// Edges whose end rays meet before the full distance are dropped in a single
/// pass; the remaining edge lines are intersected pairwise and each corner is
/// pushed along its miter direction. The boundary never splits, so this is
/// only faithful for convex or mildly concave shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiterOffset;

impl OffsetEngine for MiterOffset {
    fn offset_boundary(&self, boundary: &Polygon2, amount: f64) -> Result<Vec<Polygon2>> {
        if !amount.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "offset amount must be finite, got {amount}"
            ))
            .into());
        }
        let Some(points) = cleanup(boundary.to_clockwise().into_points()) else {
            return Ok(Vec::new());
        };
        if amount.abs() < TOLERANCE {
            return Ok(vec![Polygon2::new(points)]);
        }

        let distance = amount.abs();
        let normals = motion_normals(&points, amount.signum());
        let rays = vertex_rays(&points, &normals);
        let survivors: Vec<usize> = (0..points.len())
            .filter(|&k| collapse_distance(&rays, k).is_none_or(|t| t > distance))
            .collect();

        let count = survivors.len();
        let moved: Vec<Point2> = (0..count)
            .map(|w| {
                let a = survivors[(w + count - 1) % count];
                let b = survivors[w];
                let da = edge_direction(&points, a);
                let db = edge_direction(&points, b);
                let gap = points[b] - points[a];
                let corner = match solve_2x2([da.x, da.y], [-db.x, -db.y], [gap.x, gap.y]) {
                    Ok((s, _)) if s.is_finite() => points[a] + da * s,
                    _ => points[b],
                };
                corner + corner_velocity(&normals[a], &normals[b]) * distance
            })
            .collect();

        debug!(
            amount,
            edges = points.len(),
            survivors = count,
            "miter offset finished"
        );
        Ok(cleanup(moved)
            .map(|p| vec![Polygon2::new(p)])
            .unwrap_or_default())
    }
}
