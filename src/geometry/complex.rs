use super::line::LineSegment2;
use super::polygon::Polygon2;
use crate::error::Result;

/// Default distance under which consecutive boundary points are merged.
const SIMPLIFY_TOLERANCE: f64 = 1e-4;

/// A shape made of exterior boundaries and interior (hole) boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexPolygon2 {
    exterior: Vec<Polygon2>,
    interior: Vec<Polygon2>,
}

impl ComplexPolygon2 {
    /// Builds from already-classified boundaries, kept as given.
    #[must_use]
    pub fn new(exterior: Vec<Polygon2>, interior: Vec<Polygon2>) -> Self {
        Self { exterior, interior }
    }

    /// Classifies a flat list of boundaries.
    ///
    /// Each boundary is simplified (dropped if it degenerates) and oriented
    /// clockwise. It is an interior boundary when any other input boundary
    /// contains its first point, and exterior otherwise.
    #[must_use]
    pub fn from_polygons(polygons: &[Polygon2]) -> Self {
        let mut exterior = Vec::new();
        let mut interior = Vec::new();
        for (ix, polygon) in polygons.iter().enumerate() {
            let Some(simple) = polygon.simplify(SIMPLIFY_TOLERANCE) else {
                continue;
            };
            let simple = simple.to_clockwise();
            let first = simple.points()[0];
            let nested = polygons
                .iter()
                .enumerate()
                .any(|(other_ix, other)| other_ix != ix && other.contains(&first));
            if nested {
                interior.push(simple);
            } else {
                exterior.push(simple);
            }
        }
        Self { exterior, interior }
    }

    #[must_use]
    pub fn exterior(&self) -> &[Polygon2] {
        &self.exterior
    }

    #[must_use]
    pub fn interior(&self) -> &[Polygon2] {
        &self.interior
    }

    /// All boundaries, exteriors first.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon2> {
        self.exterior.iter().chain(self.interior.iter())
    }

    #[must_use]
    pub fn segments(&self) -> Vec<LineSegment2> {
        self.polygons().flat_map(Polygon2::segments).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty() && self.interior.is_empty()
    }

    /// Filled area: exterior area minus hole area.
    #[must_use]
    pub fn area(&self) -> f64 {
        let outer: f64 = self.exterior.iter().map(Polygon2::area).sum();
        let holes: f64 = self.interior.iter().map(Polygon2::area).sum();
        outer - holes
    }

    #[must_use]
    pub fn to_clockwise(&self) -> Self {
        Self {
            exterior: self.exterior.iter().map(Polygon2::to_clockwise).collect(),
            interior: self.interior.iter().map(Polygon2::to_clockwise).collect(),
        }
    }

    #[must_use]
    pub fn to_counterclockwise(&self) -> Self {
        Self {
            exterior: self
                .exterior
                .iter()
                .map(Polygon2::to_counterclockwise)
                .collect(),
            interior: self
                .interior
                .iter()
                .map(Polygon2::to_counterclockwise)
                .collect(),
        }
    }

    /// Offsets exteriors by `amount` and holes by `-amount`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`crate::operations::offset::nonlocal_offset`].
    pub fn offset(&self, amount: f64) -> Result<Self> {
        crate::operations::offset::nonlocal_offset(self, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point2, Vector2};

    fn square(x: f64, y: f64, size: f64) -> Polygon2 {
        Polygon2::new(vec![
            Point2::new(x, y),
            Point2::new(x, y + size),
            Point2::new(x + size, y + size),
            Point2::new(x + size, y),
        ])
    }

    #[test]
    fn classifies_holes_by_containment() {
        let outer = square(0.0, 0.0, 3.0);
        let hole = square(1.0, 1.0, 1.0).inverted();
        let complex = ComplexPolygon2::from_polygons(&[hole, outer]);
        assert_eq!(complex.exterior().len(), 1);
        assert_eq!(complex.interior().len(), 1);
        assert!(complex.interior()[0].clockwise());
        assert!((complex.area() - 8.0).abs() < 1e-9);
        assert_eq!(complex.segments().len(), 8);
    }

    #[test]
    fn disjoint_boundaries_are_all_exterior() {
        let a = square(0.0, 0.0, 1.0);
        let b = a.translated(&Vector2::new(5.0, 0.0));
        let complex = ComplexPolygon2::from_polygons(&[a, b]);
        assert_eq!(complex.exterior().len(), 2);
        assert!(complex.interior().is_empty());
    }

    #[test]
    fn degenerate_boundaries_are_dropped() {
        let sliver = Polygon2::new(vec![Point2::new(0.0, 0.0), Point2::new(0.0, 0.0)]);
        let complex = ComplexPolygon2::from_polygons(&[sliver]);
        assert!(complex.is_empty());
    }

    #[test]
    fn orientation_conversion() {
        let complex = ComplexPolygon2::new(vec![square(0.0, 0.0, 1.0)], Vec::new());
        assert!(complex.to_counterclockwise().exterior()[0].signed_area() > 0.0);
        assert!(complex.to_clockwise().exterior()[0].clockwise());
    }
}
