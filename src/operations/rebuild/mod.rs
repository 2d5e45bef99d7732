mod fragment;
mod recreate;

pub use fragment::{decouple, fragment};
pub use recreate::{recreate_polygons, FragmentKey};

use tracing::debug;

use crate::error::Result;
use crate::geometry::{LineSegment2, Polygon2};
use crate::tolerance::Tolerances;

/// Turns overlapping boundaries into clean, non-overlapping loops.
///
/// Runs [`rebuild_with`] with [`Tolerances::default`].
///
/// # Errors
///
/// See [`rebuild_with`].
pub fn rebuild(polygons: &[Polygon2]) -> Result<Vec<Polygon2>> {
    rebuild_with(polygons, &Tolerances::default())
}

/// Fragments, cancels and re-walks the edges of `polygons`.
///
/// Edges shared by two boundaries in opposite directions cancel, so adjacent
/// clockwise boundaries merge into their common outline. Each resulting loop
/// is simplified with `tolerances.simplify` and its collinear vertices are
/// merged with `tolerances.collinear`; loops that degenerate are dropped.
///
/// # Errors
///
/// Returns a `TopologyError` when the surviving fragments do not form
/// disjoint simple cycles.
pub fn rebuild_with(polygons: &[Polygon2], tolerances: &Tolerances) -> Result<Vec<Polygon2>> {
    let segments: Vec<LineSegment2> = polygons.iter().flat_map(Polygon2::segments).collect();
    let fragments = fragment(&segments, tolerances.fragment_error);
    let survivors = decouple(&fragments, tolerances.quantum);
    let loops = recreate_polygons(&survivors, tolerances.quantum)?;

    let out: Vec<Polygon2> = loops
        .iter()
        .filter_map(|p| p.simplify(tolerances.simplify))
        .filter_map(|p| p.collate(tolerances.collinear))
        .collect();
    debug!(
        inputs = polygons.len(),
        segments = segments.len(),
        fragments = fragments.len(),
        survivors = survivors.len(),
        polygons = out.len(),
        "rebuild finished"
    );
    Ok(out)
}
