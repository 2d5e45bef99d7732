mod miter;
mod nonlocal;
mod rays;

pub use miter::MiterOffset;
pub use nonlocal::NonlocalOffset;

use tracing::debug;

use crate::error::Result;
use crate::geometry::{ComplexPolygon2, Polygon2};

/// Strategy for moving a single closed boundary.
pub trait OffsetEngine {
    /// Moves every edge of `boundary` by `amount` along its normal.
    ///
    /// The boundary is treated as clockwise: positive `amount` grows it and
    /// negative shrinks it. Returned loops that come out counter-clockwise
    /// enclose the opposite side (a gap pinched off while growing).
    ///
    /// # Errors
    ///
    /// Engine specific; see the implementors.
    fn offset_boundary(&self, boundary: &Polygon2, amount: f64) -> Result<Vec<Polygon2>>;
}

/// Offsets a complex polygon with `engine`.
///
/// Exteriors move by `amount` and holes by `-amount`, so shrinking the
/// material grows its holes. Each resulting loop keeps its class unless it
/// came out reversed, in which case it switches between exterior and
/// interior. All output boundaries are clockwise.
///
/// # Errors
///
/// Propagates the first error returned by `engine`.
pub fn offset_with<E: OffsetEngine + ?Sized>(
    engine: &E,
    complex: &ComplexPolygon2,
    amount: f64,
) -> Result<ComplexPolygon2> {
    let mut exterior = Vec::new();
    let mut interior = Vec::new();

    for boundary in complex.exterior() {
        for piece in engine.offset_boundary(boundary, amount)? {
            if piece.clockwise() {
                exterior.push(piece);
            } else {
                interior.push(piece.to_clockwise());
            }
        }
    }
    for boundary in complex.interior() {
        for piece in engine.offset_boundary(boundary, -amount)? {
            if piece.clockwise() {
                interior.push(piece);
            } else {
                exterior.push(piece.to_clockwise());
            }
        }
    }

    debug!(
        amount,
        exterior = exterior.len(),
        interior = interior.len(),
        "complex offset finished"
    );
    Ok(ComplexPolygon2::new(exterior, interior))
}

/// Offsets a complex polygon with the default [`NonlocalOffset`].
///
/// # Errors
///
/// Returns `OperationError::EventLimit` when the front needs more events
/// than the engine allows, or `OperationError::InvalidInput` for a
/// non-finite `amount`.
pub fn nonlocal_offset(complex: &ComplexPolygon2, amount: f64) -> Result<ComplexPolygon2> {
    offset_with(&NonlocalOffset::default(), complex, amount)
}

/// Offsets a single polygon, treated as an exterior boundary.
///
/// # Errors
///
/// See [`nonlocal_offset`].
pub fn offset(polygon: &Polygon2, amount: f64) -> Result<ComplexPolygon2> {
    nonlocal_offset(
        &ComplexPolygon2::new(vec![polygon.clone()], Vec::new()),
        amount,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2, Vector2};

    fn polygon(coords: &[(f64, f64)]) -> Polygon2 {
        Polygon2::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn square() -> Polygon2 {
        polygon(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    fn scaled(p: &Polygon2, k: f64) -> Polygon2 {
        Polygon2::new(p.points().iter().map(|q| Point2::from(q.coords * k)).collect())
    }

    fn assert_points(actual: &Polygon2, expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (p, &(x, y)) in actual.points().iter().zip(expected) {
            assert!((p - Point2::new(x, y)).norm() < 1e-9, "{actual:?}");
        }
    }

    fn assert_envelope(p: &Polygon2, lo: (f64, f64), hi: (f64, f64)) {
        let (a, b) = p.envelope().unwrap();
        assert!((a - Point2::new(lo.0, lo.1)).norm() < 1e-9, "{p:?}");
        assert!((b - Point2::new(hi.0, hi.1)).norm() < 1e-9, "{p:?}");
    }

    #[test]
    fn square_inset_and_outset() {
        let inner = offset(&square(), -0.1).unwrap();
        assert_eq!(inner.exterior().len(), 1);
        assert!(inner.interior().is_empty());
        assert_points(
            &inner.exterior()[0],
            &[(0.1, 0.1), (0.1, 0.9), (0.9, 0.9), (0.9, 0.1)],
        );
        let outer = square().offset(0.1).unwrap();
        assert_points(
            &outer.exterior()[0],
            &[(-0.1, -0.1), (-0.1, 1.1), (1.1, 1.1), (1.1, -0.1)],
        );
    }

    #[test]
    fn overshoot_leaves_an_empty_result() {
        assert!(offset(&square(), -10.0).unwrap().is_empty());
    }

    #[test]
    fn holes_move_against_the_exterior() {
        let hole = square().translated(&Vector2::new(1.0, 1.0));
        let complex = ComplexPolygon2::from_polygons(&[hole, scaled(&square(), 3.0)]);
        let result = complex.offset(-0.1).unwrap();
        assert_eq!(result.exterior().len(), 1);
        assert_eq!(result.interior().len(), 1);
        assert_envelope(&result.exterior()[0], (0.1, 0.1), (2.9, 2.9));
        assert_envelope(&result.interior()[0], (0.9, 0.9), (2.1, 2.1));
    }

    #[test]
    fn closing_a_slit_encloses_a_hole() {
        // A ring whose cavity opens to the outside through a narrow slit.
        let ring = polygon(&[
            (0.0, 0.0),
            (0.0, 6.0),
            (2.75, 6.0),
            (2.75, 4.0),
            (2.0, 4.0),
            (2.0, 2.0),
            (4.0, 2.0),
            (4.0, 4.0),
            (3.25, 4.0),
            (3.25, 6.0),
            (6.0, 6.0),
            (6.0, 0.0),
        ]);
        let result = offset(&ring, 0.5).unwrap();
        assert_eq!(result.exterior().len(), 1);
        assert_eq!(result.interior().len(), 1);
        assert_envelope(&result.exterior()[0], (-0.5, -0.5), (6.5, 6.5));
        assert_envelope(&result.interior()[0], (2.5, 2.5), (3.5, 3.5));
        assert!(result.interior()[0].clockwise());
        assert!((result.area() - 48.0).abs() < 1e-9);
    }

    #[test]
    fn engines_agree_on_convex_input() {
        let complex = ComplexPolygon2::new(vec![scaled(&square(), 2.0)], Vec::new());
        let miter = offset_with(&MiterOffset, &complex, -0.3).unwrap();
        let nonlocal = offset_with(&NonlocalOffset::default(), &complex, -0.3).unwrap();
        assert_eq!(miter.exterior().len(), 1);
        for (a, b) in miter.exterior()[0]
            .points()
            .iter()
            .zip(nonlocal.exterior()[0].points())
        {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn engine_can_be_passed_as_trait_object() {
        let engines: Vec<Box<dyn OffsetEngine>> =
            vec![Box::new(MiterOffset), Box::new(NonlocalOffset::new())];
        let complex = ComplexPolygon2::new(vec![square()], Vec::new());
        for engine in &engines {
            let result = offset_with(engine.as_ref(), &complex, 0.25).unwrap();
            assert!((result.area() - 2.25).abs() < 1e-9);
        }
    }
}
