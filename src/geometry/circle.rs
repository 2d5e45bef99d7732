use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::circle_circle_intersect_2d;
use crate::math::{Point2, TOLERANCE};

/// A circle defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if `radius` is not positive.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if radius <= TOLERANCE || !radius.is_finite() {
            return Err(GeometryError::Degenerate(format!("circle radius {radius}")).into());
        }
        Ok(Self { center, radius })
    }

    /// Points where the tangents through the external point `p` touch this circle.
    ///
    /// Intersects the circle with the circle on diameter `center..p`, so the
    /// result is empty when `p` lies inside.
    #[must_use]
    pub fn tangent_points(&self, p: &Point2) -> Vec<Point2> {
        let mid = Point2::from((self.center.coords + p.coords) * 0.5);
        let half = (p - mid).norm();
        circle_circle_intersect_2d(&self.center, self.radius, &mid, half)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_radius() {
        assert!(Circle::new(Point2::origin(), 0.0).is_err());
        assert!(Circle::new(Point2::origin(), -1.0).is_err());
    }

    #[test]
    fn tangents_from_external_point() {
        let c = Circle::new(Point2::origin(), 1.0).unwrap();
        let p = Point2::new(2.0, 0.0);
        let touch = c.tangent_points(&p);
        assert_eq!(touch.len(), 2);
        for t in &touch {
            // Radius is perpendicular to the tangent line at the touch point.
            assert!(((t - c.center).dot(&(p - t))).abs() < 1e-9);
            assert!(((t - c.center).norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn no_tangents_from_inside() {
        let c = Circle::new(Point2::origin(), 2.0).unwrap();
        assert!(c.tangent_points(&Point2::new(0.5, 0.0)).is_empty());
    }
}
