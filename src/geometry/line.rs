use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, project_param};
use crate::math::{angle, lattice, snap, Point2, Vector2, TOLERANCE};

/// Parameter range accepted along a line-like shape `p + u * v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Unbounded in both directions.
    Infinite,
    /// `u >= 0`.
    Ray,
    /// `0 <= u <= 1`.
    Segment,
}

impl Extent {
    /// Returns whether `u` lies in the range.
    #[must_use]
    pub fn contains(self, u: f64) -> bool {
        match self {
            Self::Infinite => true,
            Self::Ray => u >= 0.0,
            Self::Segment => (0.0..=1.0).contains(&u),
        }
    }

    /// Clamps `u` into the range.
    #[must_use]
    pub fn clamp(self, u: f64) -> f64 {
        match self {
            Self::Infinite => u,
            Self::Ray => u.max(0.0),
            Self::Segment => u.clamp(0.0, 1.0),
        }
    }
}

/// An infinite line `p + u * v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2 {
    pub p: Point2,
    pub v: Vector2,
}

impl Line2 {
    /// Creates a line through `p` with direction `v`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if `v` has zero length.
    pub fn new(p: Point2, v: Vector2) -> Result<Self> {
        if v.norm_squared() < TOLERANCE * TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { p, v })
    }

    /// The horizontal line `y = level`.
    #[must_use]
    pub fn horizontal(level: f64) -> Self {
        Self {
            p: Point2::new(0.0, level),
            v: Vector2::new(1.0, 0.0),
        }
    }

    /// Intersection with another infinite line, `None` when parallel.
    #[must_use]
    pub fn intersect_line(&self, other: &Line2) -> Option<Point2> {
        line_line_intersect_2d(&self.p, &self.v, &other.p, &other.v)
            .map(|(t, _)| self.p + self.v * t)
    }
}

/// A half-line starting at `p` and extending along `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    pub p: Point2,
    pub v: Vector2,
}

impl Ray2 {
    /// Creates a ray from `p` along `v`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if `v` has zero length.
    pub fn new(p: Point2, v: Vector2) -> Result<Self> {
        if v.norm_squared() < TOLERANCE * TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { p, v })
    }
}

/// A directed segment from `p1` to `p2`.
///
/// Both endpoints are stored verbatim; `p2` is never rebuilt as `p1 + v`,
/// so segments keyed or compared by endpoint stay consistent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment2 {
    pub p1: Point2,
    pub p2: Point2,
}

/// Undirected, grid-snapped identity of a segment. A segment and its reverse
/// produce the same key.
pub type SegmentKey = ((i64, i64), (i64, i64));

impl LineSegment2 {
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Direction vector `p2 - p1`.
    #[must_use]
    pub fn v(&self) -> Vector2 {
        self.p2 - self.p1
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.v().norm()
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// Lower of the two endpoint Y coordinates.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.p1.y.min(self.p2.y)
    }

    /// The supporting infinite line.
    #[must_use]
    pub fn line(&self) -> Line2 {
        Line2 {
            p: self.p1,
            v: self.v(),
        }
    }

    /// X coordinate where the supporting line crosses `y = level`.
    ///
    /// Returns `None` for horizontal segments.
    #[must_use]
    pub fn x_at(&self, level: f64) -> Option<f64> {
        self.line()
            .intersect_line(&Line2::horizontal(level))
            .map(|p| p.x)
    }

    /// Closest point on the segment to `p`.
    #[must_use]
    pub fn closest_point(&self, p: &Point2) -> Point2 {
        let u = Extent::Segment.clamp(project_param(p, &self.p1, &self.v()));
        self.p1 + self.v() * u
    }

    /// Returns whether `p` lies on the segment within `tolerance`.
    #[must_use]
    pub fn touches(&self, p: &Point2, tolerance: f64) -> bool {
        (self.closest_point(p) - p).norm() <= tolerance
    }

    /// Unsigned angle between this segment's direction and `other`'s.
    #[must_use]
    pub fn angle(&self, other: &LineSegment2) -> f64 {
        angle(&self.v(), &other.v())
    }

    /// Segment with both endpoints snapped to `grid`.
    #[must_use]
    pub fn snapped(&self, grid: f64) -> Self {
        Self::new(snap(&self.p1, grid), snap(&self.p2, grid))
    }

    /// Undirected identity on a grid of spacing `quantum`.
    #[must_use]
    pub fn key(&self, quantum: f64) -> SegmentKey {
        let a = lattice(&self.p1, quantum);
        let b = lattice(&self.p2, quantum);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
