use std::collections::HashMap;
use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::geometry::{LineSegment2, SegmentKey};
use crate::math::intersect_2d::project_param;
use crate::math::{lattice, Point2, TOLERANCE};

/// Splits every segment where another segment's endpoint lands on its interior.
///
/// An endpoint counts when it lies within `error` of the segment's line,
/// strictly between its ends, and is not within `error` of either end.
/// Segments parallel or antiparallel to the one being split are ignored.
/// Each endpoint is projected onto the segment's line and the segment is cut
/// at that projection, so every piece stays on the original line. Pieces
/// shorter than `error` are skipped.
#[must_use]
pub fn fragment(segments: &[LineSegment2], error: f64) -> Vec<LineSegment2> {
    let mut out = Vec::with_capacity(segments.len());

    for (ix, segment) in segments.iter().enumerate() {
        let v = segment.v();
        let length = v.norm();
        if length < TOLERANCE {
            continue;
        }

        let mut cuts: Vec<(f64, Point2)> = Vec::new();
        for (other_ix, other) in segments.iter().enumerate() {
            if other_ix == ix || other.length() < TOLERANCE {
                continue;
            }
            let turn = segment.angle(other);
            if turn < TOLERANCE || turn > PI - TOLERANCE {
                continue;
            }
            for p in [other.p1, other.p2] {
                if (p - segment.p1).norm() <= error || (p - segment.p2).norm() <= error {
                    continue;
                }
                let u = project_param(&p, &segment.p1, &v);
                if u <= 0.0 || u >= 1.0 {
                    continue;
                }
                let foot = segment.p1 + v * u;
                if (p - foot).norm() <= error {
                    cuts.push((u * length, foot));
                }
            }
        }

        if cuts.is_empty() {
            out.push(*segment);
            continue;
        }
        cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
        trace!(segment = ix, cuts = cuts.len(), "splitting segment");

        let mut start = segment.p1;
        for (_, cut) in cuts {
            if (cut - start).norm() < error {
                continue;
            }
            out.push(LineSegment2::new(start, cut));
            start = cut;
        }
        out.push(LineSegment2::new(start, segment.p2));
    }

    debug!(
        input = segments.len(),
        fragments = out.len(),
        "fragmented segments"
    );
    out
}

/// Snaps fragments to `quantum` and cancels every fragment that occurs more than once.
///
/// Occurrences are counted on the undirected key, so a fragment and its
/// reverse cancel each other. Survivors keep their input order and direction.
/// Fragments that collapse to a single grid point are dropped.
#[must_use]
pub fn decouple(segments: &[LineSegment2], quantum: f64) -> Vec<LineSegment2> {
    let snapped: Vec<LineSegment2> = segments
        .iter()
        .map(|s| s.snapped(quantum))
        .filter(|s| lattice(&s.p1, quantum) != lattice(&s.p2, quantum))
        .collect();

    let mut counts: HashMap<SegmentKey, usize> = HashMap::new();
    for s in &snapped {
        *counts.entry(s.key(quantum)).or_insert(0) += 1;
    }

    let survivors: Vec<LineSegment2> = snapped
        .into_iter()
        .filter(|s| counts.get(&s.key(quantum)) == Some(&1))
        .collect();
    debug!(
        input = segments.len(),
        survivors = survivors.len(),
        "cancelled shared fragments"
    );
    survivors
}
