mod sliced;

use tracing::{debug, warn};

use crate::geometry::Polygon2;
use crate::math::polygon_2d::triangle_area;
use crate::math::{Point2, TOLERANCE};
use crate::tolerance::Tolerances;

use sliced::{Sliced, Wall};

/// A quadrilateral cell of a sweep-line decomposition.
///
/// Corners run up the first wall of the pair and back down the second one:
/// `[first@lower, first@upper, second@upper, second@lower]`. The lower and
/// upper sides are horizontal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trapezoid {
    pub corners: [Point2; 4],
}

impl Trapezoid {
    /// Area from the triangle fan `(a, b, c)` + `(a, c, d)`.
    #[must_use]
    pub fn area(&self) -> f64 {
        let [a, b, c, d] = &self.corners;
        triangle_area(a, b, c) + triangle_area(a, c, d)
    }

    /// Converts to a polygon, merging corners closer than `tolerance`.
    ///
    /// Returns `None` when fewer than 3 distinct corners remain.
    #[must_use]
    pub fn into_polygon(self, tolerance: f64) -> Option<Polygon2> {
        Polygon2::new(self.corners.to_vec()).simplify(tolerance)
    }
}

/// Splits a set of polygons into horizontal trapezoids with a sweep line.
///
/// Boundaries may be given in either orientation and may include holes;
/// inside is decided by the even-odd pairing of edges along each scan line.
/// Within a pair, the wall that comes first in input order is emitted as the
/// left side, so corner order follows the input orientation.
#[derive(Debug)]
pub struct TrapezoidalDecomposition<'a> {
    polygons: &'a [Polygon2],
    min_area: Option<f64>,
    simplify: f64,
}

impl<'a> TrapezoidalDecomposition<'a> {
    #[must_use]
    pub fn new(polygons: &'a [Polygon2]) -> Self {
        Self {
            polygons,
            min_area: None,
            simplify: TOLERANCE,
        }
    }

    /// Takes the area filter and corner merge distance from `tolerances`.
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: &Tolerances) -> Self {
        self.min_area = tolerances.min_area;
        self.simplify = tolerances.simplify;
        self
    }

    /// Discards trapezoids whose area does not exceed `min_area`.
    #[must_use]
    pub fn with_min_area(mut self, min_area: Option<f64>) -> Self {
        self.min_area = min_area;
        self
    }

    /// Runs the sweep and returns every raw trapezoid in emission order.
    ///
    /// Emission order is by scan band (ascending Y), then by the X order of
    /// the wall pairs within the band.
    #[must_use]
    pub fn trapezoids(&self) -> Vec<Trapezoid> {
        let mut queues: Vec<Sliced> = self
            .polygons
            .iter()
            .enumerate()
            .map(|(ix, polygon)| Sliced::new(ix, polygon))
            .collect();

        let mut levels: Vec<f64> = self
            .polygons
            .iter()
            .flat_map(|polygon| polygon.points().iter().map(|p| p.y))
            .collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();

        let mut out = Vec::new();
        let mut active: Vec<[Wall; 2]> = Vec::new();
        let mut prior = f64::NEG_INFINITY;

        for &level in &levels {
            let mut next: Vec<Wall> = Vec::new();

            for pair in &active {
                let mut pair = *pair;
                pair.sort_by_key(|wall| wall.order);
                let [left, right] = pair;
                out.push(Trapezoid {
                    corners: [
                        Point2::new(left.x_at(prior), prior),
                        Point2::new(left.x_at(level), level),
                        Point2::new(right.x_at(level), level),
                        Point2::new(right.x_at(prior), prior),
                    ],
                });
                next.extend(pair.into_iter().filter(|wall| !wall.ends_at(level)));
            }

            for queue in &mut queues {
                next.extend(queue.departures(level));
            }

            next.sort_by(|a, b| a.cmp_at(b, level));
            if next.len() % 2 != 0 {
                warn!(level, walls = next.len(), "odd wall count on scan line");
            }
            active = next
                .chunks_exact(2)
                .map(|chunk| [chunk[0], chunk[1]])
                .collect();
            prior = level;
        }

        let pending = queues.iter().filter(|queue| !queue.is_exhausted()).count();
        if pending > 0 {
            warn!(pending, "edge queues not drained by the sweep");
        }
        debug!(
            polygons = self.polygons.len(),
            levels = levels.len(),
            trapezoids = out.len(),
            "trapezoidal sweep finished"
        );
        out
    }

    /// Runs the sweep and returns the surviving trapezoids as polygons.
    #[must_use]
    pub fn execute(&self) -> Vec<Polygon2> {
        self.trapezoids()
            .into_iter()
            .filter(|t| self.min_area.is_none_or(|min| t.area() > min))
            .filter_map(|t| t.into_polygon(self.simplify))
            .collect()
    }
}

/// Decomposes `polygons` into trapezoids, dropping those not larger than `min_area`.
#[must_use]
pub fn trapezoidal(polygons: &[Polygon2], min_area: Option<f64>) -> Vec<Polygon2> {
    TrapezoidalDecomposition::new(polygons)
        .with_min_area(min_area)
        .execute()
}

/// Decomposes `polygons` using the area filter and merge distance of `tolerances`.
#[must_use]
pub fn trapezoidal_with(polygons: &[Polygon2], tolerances: &Tolerances) -> Vec<Polygon2> {
    TrapezoidalDecomposition::new(polygons)
        .with_tolerances(tolerances)
        .execute()
}

/// Raw trapezoids of `polygons`, without area filtering or simplification.
#[must_use]
pub fn trapezoids(polygons: &[Polygon2]) -> Vec<Trapezoid> {
    TrapezoidalDecomposition::new(polygons).trapezoids()
}
