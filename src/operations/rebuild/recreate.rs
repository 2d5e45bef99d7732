use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::error::{Result, TopologyError};
use crate::geometry::{LineSegment2, Polygon2};
use crate::math::{lattice, Point2};

new_key_type! {
    /// Handle to a fragment waiting to be walked.
    pub struct FragmentKey;
}

/// Grid cell identifying a fragment endpoint.
type Cell = (i64, i64);

/// Fragments indexed by the grid cells of their endpoints.
struct FragmentGraph {
    quantum: f64,
    fragments: SlotMap<FragmentKey, LineSegment2>,
    incidence: HashMap<Cell, Vec<FragmentKey>>,
}

impl FragmentGraph {
    fn new(segments: &[LineSegment2], quantum: f64) -> Self {
        let mut fragments = SlotMap::with_key();
        let mut incidence: HashMap<Cell, Vec<FragmentKey>> = HashMap::new();
        for segment in segments {
            let snapped = segment.snapped(quantum);
            let a = lattice(&snapped.p1, quantum);
            let b = lattice(&snapped.p2, quantum);
            if a == b {
                continue;
            }
            let key = fragments.insert(snapped);
            incidence.entry(a).or_default().push(key);
            incidence.entry(b).or_default().push(key);
        }
        Self {
            quantum,
            fragments,
            incidence,
        }
    }

    /// The first live fragment in insertion order.
    fn first(&self) -> Option<(FragmentKey, LineSegment2)> {
        self.fragments.iter().next().map(|(key, segment)| (key, *segment))
    }

    fn cell(&self, p: &Point2) -> Cell {
        lattice(p, self.quantum)
    }

    /// The one live fragment at `cell` other than `from`.
    fn successor(&self, cell: Cell, from: FragmentKey, at: &Point2) -> Result<FragmentKey> {
        let candidates: Vec<FragmentKey> = self
            .incidence
            .get(&cell)
            .map(|keys| {
                keys.iter()
                    .copied()
                    .filter(|&k| k != from && self.fragments.contains_key(k))
                    .collect()
            })
            .unwrap_or_default();
        match candidates.as_slice() {
            [next] => Ok(*next),
            [] => Err(TopologyError::OpenChain { x: at.x, y: at.y }.into()),
            _ => Err(TopologyError::Branch {
                x: at.x,
                y: at.y,
                candidates: candidates.len(),
            }
            .into()),
        }
    }

    /// Walks one closed loop starting from `start` and returns its points and fragments.
    fn walk(
        &self,
        start: FragmentKey,
        first: LineSegment2,
    ) -> Result<(Vec<Point2>, Vec<FragmentKey>)> {
        let origin = self.cell(&first.p1);
        let mut points = vec![first.p1];
        let mut used = vec![start];
        let mut current = start;
        let mut at = first.p2;

        loop {
            let cell = self.cell(&at);
            if cell == origin {
                break;
            }
            if used.len() > self.fragments.len() {
                return Err(TopologyError::NoProgress {
                    remaining: self.fragments.len(),
                }
                .into());
            }
            points.push(at);

            let next = self.successor(cell, current, &at)?;
            let Some(segment) = self.fragments.get(next) else {
                return Err(TopologyError::OpenChain { x: at.x, y: at.y }.into());
            };
            at = if self.cell(&segment.p1) == cell {
                segment.p2
            } else {
                segment.p1
            };
            used.push(next);
            current = next;
        }
        Ok((points, used))
    }
}

/// Walks directed or undirected fragments into closed loops.
///
/// Endpoints are snapped to `quantum`, and two endpoints in the same grid
/// cell are the same vertex. Loops are returned in discovery order, each
/// starting at the start point of its first remaining fragment. Loops with
/// fewer than 3 points are discarded.
///
/// # Errors
///
/// - `TopologyError::Branch` if more than one unused fragment continues a walk
/// - `TopologyError::OpenChain` if a walk reaches a vertex with no continuation
/// - `TopologyError::NoProgress` if a walk fails to close or consume fragments
pub fn recreate_polygons(segments: &[LineSegment2], quantum: f64) -> Result<Vec<Polygon2>> {
    let mut graph = FragmentGraph::new(segments, quantum);
    let mut loops = Vec::new();

    while let Some((start, first)) = graph.first() {
        let before = graph.fragments.len();
        let (points, used) = graph.walk(start, first)?;
        for key in &used {
            graph.fragments.remove(*key);
        }
        if graph.fragments.len() >= before {
            return Err(TopologyError::NoProgress {
                remaining: graph.fragments.len(),
            }
            .into());
        }

        trace!(points = points.len(), "closed loop");
        if points.len() >= 3 {
            loops.push(Polygon2::new(points));
        }
    }

    debug!(
        fragments = segments.len(),
        loops = loops.len(),
        "recreated polygons"
    );
    Ok(loops)
}
