use super::complex::ComplexPolygon2;
use super::line::LineSegment2;
use crate::error::Result;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{angle, cross, Point2, Vector2, TOLERANCE};

/// A simple polygon given as a cyclic point sequence.
///
/// The last point implicitly connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2 {
    points: Vec<Point2>,
}

impl Polygon2 {
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Directed edges in order, including the closing edge.
    #[must_use]
    pub fn segments(&self) -> Vec<LineSegment2> {
        let n = self.points.len();
        (0..n)
            .map(|i| LineSegment2::new(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    /// Shoelace area, positive for counter-clockwise order.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    #[must_use]
    pub fn inverted(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    #[must_use]
    pub fn to_clockwise(&self) -> Self {
        if self.clockwise() {
            self.clone()
        } else {
            self.inverted()
        }
    }

    #[must_use]
    pub fn to_counterclockwise(&self) -> Self {
        if self.clockwise() {
            self.inverted()
        } else {
            self.clone()
        }
    }

    /// Rotates the starting point forward by `n` positions.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.points.is_empty() {
            return self.clone();
        }
        let n = n % self.points.len();
        let mut points = self.points[n..].to_vec();
        points.extend_from_slice(&self.points[..n]);
        Self::new(points)
    }

    #[must_use]
    pub fn translated(&self, v: &Vector2) -> Self {
        Self::new(self.points.iter().map(|p| p + v).collect())
    }

    /// Axis-aligned bounding box as `(min, max)`, `None` when empty.
    #[must_use]
    pub fn envelope(&self) -> Option<(Point2, Point2)> {
        let first = self.points.first()?;
        let mut lo = *first;
        let mut hi = *first;
        for p in &self.points[1..] {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
        }
        Some((lo, hi))
    }

    /// Tests whether `p` lies inside the polygon or on its boundary.
    ///
    /// Interior points are decided by the even-odd rule on a ray cast
    /// towards `+x`; each edge is treated as half-open in Y so a ray through
    /// a vertex is counted once.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        let segments = self.segments();
        if segments
            .iter()
            .any(|s| s.length() > 0.0 && s.touches(p, TOLERANCE))
        {
            return true;
        }

        let mut inside = false;
        for s in &segments {
            let (a, b) = (s.p1, s.p2);
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x > p.x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Removes points closer than `tolerance` to the previously kept point.
    ///
    /// The comparison wraps around, so a trailing duplicate of the first
    /// point is dropped too. Returns `None` when fewer than 3 points remain.
    #[must_use]
    pub fn simplify(&self, tolerance: f64) -> Option<Self> {
        let last = *self.points.last()?;
        let mut kept: Vec<Point2> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            let prev = kept.last().copied().unwrap_or(last);
            if (p - prev).norm() > tolerance {
                kept.push(*p);
            }
        }
        while kept.len() > 1 && (kept[kept.len() - 1] - kept[0]).norm() <= tolerance {
            kept.pop();
        }
        (kept.len() >= 3).then(|| Self::new(kept))
    }

    /// Merges runs of nearly collinear edges.
    ///
    /// A vertex is dropped when the turn between its incoming and outgoing
    /// edges is below `angle_tolerance` or when the two edges fold back onto
    /// each other (a zero-width spike). Returns `None` when fewer than 3
    /// points remain.
    #[must_use]
    pub fn collate(&self, angle_tolerance: f64) -> Option<Self> {
        let mut points = self.points.clone();
        let mut changed = true;
        while changed && points.len() >= 3 {
            changed = false;
            let n = points.len();
            for i in 0..n {
                let prev = points[(i + n - 1) % n];
                let next = points[(i + 1) % n];
                let incoming = points[i] - prev;
                let outgoing = next - points[i];
                let turn = angle(&incoming, &outgoing);
                let degenerate = incoming.norm() < TOLERANCE || outgoing.norm() < TOLERANCE;
                if degenerate
                    || turn < angle_tolerance
                    || turn > std::f64::consts::PI - angle_tolerance
                {
                    points.remove(i);
                    changed = true;
                    break;
                }
            }
        }
        (points.len() >= 3).then(|| Self::new(points))
    }

    /// Returns whether the polygon is strictly convex.
    ///
    /// Requires at least 3 points, no repeated consecutive points, every turn
    /// in the same direction, and a total turning of exactly one revolution.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut orientation = 0.0_f64;
        let mut total = 0.0;
        for i in 0..n {
            let a = self.points[(i + n - 1) % n];
            let b = self.points[i];
            let c = self.points[(i + 1) % n];
            let incoming = b - a;
            let outgoing = c - b;
            if incoming.norm() < TOLERANCE || outgoing.norm() < TOLERANCE {
                return false;
            }
            let turn = cross(&incoming, &outgoing).atan2(incoming.dot(&outgoing));
            if turn.abs() < TOLERANCE {
                return false;
            }
            if orientation == 0.0 {
                orientation = turn.signum();
            } else if orientation * turn <= 0.0 {
                return false;
            }
            total += turn;
        }
        ((total.abs() / std::f64::consts::TAU) - 1.0).abs() < 1e-6
    }

    /// Offsets every edge by `amount` perpendicular to itself.
    ///
    /// Positive `amount` grows the polygon and negative shrinks it. The
    /// result may split into several pieces or vanish entirely.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`crate::operations::offset::offset`].
    pub fn offset(&self, amount: f64) -> Result<ComplexPolygon2> {
        crate::operations::offset::offset(self, amount)
    }
}

impl From<Vec<Point2>> for Polygon2 {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}
