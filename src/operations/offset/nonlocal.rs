use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use super::rays::{
    advance, cleanup, collapse_distance, edge_direction, motion_normals, vertex_rays, VertexRay,
};
use super::OffsetEngine;
use crate::error::{OperationError, Result};
use crate::geometry::Polygon2;
use crate::math::solver::solve_2x2;
use crate::math::{cross, Point2, Vector2, TOLERANCE};

/// Slack allowed when testing event distances and edge spans.
const EVENT_EPSILON: f64 = 1e-9;

/// Default event allowance per input vertex.
const EVENTS_PER_VERTEX: usize = 4;

/// What happens to the front at an event.
#[derive(Debug, Clone, Copy, PartialEq)]
enum EventKind {
    /// The edge `edge -> edge + 1` shrinks to a point.
    Collapse { edge: usize },
    /// The vertex runs into the interior of a non-adjacent edge.
    Split { vertex: usize, edge: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Event {
    distance: f64,
    kind: EventKind,
}

impl Event {
    fn rank(&self) -> (u8, usize, usize) {
        match self.kind {
            EventKind::Collapse { edge } => (0, edge, edge),
            EventKind::Split { vertex, edge } => (1, vertex, edge),
        }
    }

    /// Earliest first; collapses before splits; then by vertex and edge index.
    fn cmp_priority(&self, other: &Event) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.rank().cmp(&other.rank()))
    }
}

/// A piece of the front still to be moved by `budget`.
#[derive(Debug)]
struct Front {
    points: Vec<Point2>,
    budget: f64,
}

/// Offset that splits the boundary wherever the moving front runs into itself.
///
/// Each piece of the front is kept on a worklist with the offset distance it
/// still has to travel. The next event is either an edge collapsing to a
/// point or a vertex striking a non-adjacent edge; the latter cuts the piece
/// in two at the strike point. Pieces with no event inside their budget are
/// moved the rest of the way and emitted.
#[derive(Debug, Clone, Copy)]
pub struct NonlocalOffset {
    events_per_vertex: usize,
}

impl Default for NonlocalOffset {
    fn default() -> Self {
        Self {
            events_per_vertex: EVENTS_PER_VERTEX,
        }
    }
}

impl NonlocalOffset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event allowance; the cap is `events_per_vertex * n + 8`.
    #[must_use]
    pub fn with_events_per_vertex(mut self, events_per_vertex: usize) -> Self {
        self.events_per_vertex = events_per_vertex;
        self
    }

    fn event_limit(&self, vertices: usize) -> usize {
        self.events_per_vertex * vertices + 8
    }
}

impl OffsetEngine for NonlocalOffset {
    fn offset_boundary(&self, boundary: &Polygon2, amount: f64) -> Result<Vec<Polygon2>> {
        if !amount.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "offset amount must be finite, got {amount}"
            ))
            .into());
        }
        let Some(start) = cleanup(boundary.to_clockwise().into_points()) else {
            return Ok(Vec::new());
        };
        if amount.abs() < TOLERANCE {
            return Ok(vec![Polygon2::new(start)]);
        }

        let sign = amount.signum();
        let limit = self.event_limit(start.len());
        let mut work = vec![Front {
            points: start,
            budget: amount.abs(),
        }];
        let mut out = Vec::new();
        let mut events = 0;

        while let Some(front) = work.pop() {
            let normals = motion_normals(&front.points, sign);
            let rays = vertex_rays(&front.points, &normals);

            let event = match next_event(&front.points, &normals, &rays, sign) {
                Some(event) if event.distance <= front.budget => event,
                _ => {
                    if let Some(points) = cleanup(advance(&rays, front.budget)) {
                        trace!(points = points.len(), "front finished");
                        out.push(Polygon2::new(points));
                    }
                    continue;
                }
            };

            events += 1;
            if events > limit {
                warn!(limit, "offset event limit exceeded");
                return Err(OperationError::EventLimit { limit }.into());
            }

            let moved = advance(&rays, event.distance);
            let budget = front.budget - event.distance;
            match event.kind {
                EventKind::Collapse { edge } => {
                    trace!(kind = "collapse", distance = event.distance, edge, "offset event");
                    if let Some(points) = cleanup(moved) {
                        work.push(Front { points, budget });
                    }
                }
                EventKind::Split { vertex, edge } => {
                    trace!(
                        kind = "split",
                        distance = event.distance,
                        vertex,
                        edge,
                        "offset event"
                    );
                    for part in split(&moved, vertex, edge) {
                        if let Some(points) = cleanup(part) {
                            work.push(Front { points, budget });
                        }
                    }
                }
            }
        }

        debug!(
            amount,
            events,
            pieces = out.len(),
            "non-local offset finished"
        );
        Ok(out)
    }
}

/// The highest-priority event of a front, if any.
fn next_event(
    points: &[Point2],
    normals: &[Vector2],
    rays: &[VertexRay],
    sign: f64,
) -> Option<Event> {
    let n = points.len();
    let collapses = (0..n).filter_map(|edge| {
        collapse_distance(rays, edge).map(|distance| Event {
            distance,
            kind: EventKind::Collapse { edge },
        })
    });

    let splits = (0..n)
        .filter(|&vertex| is_striking(points, vertex, sign))
        .flat_map(|vertex| {
            (0..n)
                .filter(move |&edge| edge != vertex && (edge + 1) % n != vertex)
                .filter_map(move |edge| {
                    strike_distance(points, normals, rays, vertex, edge).map(|distance| Event {
                        distance,
                        kind: EventKind::Split { vertex, edge },
                    })
                })
        });

    collapses.chain(splits).min_by(Event::cmp_priority)
}

/// Whether the corner at `vertex` turns against the direction of motion, so
/// that it can run into other parts of the front.
fn is_striking(points: &[Point2], vertex: usize, sign: f64) -> bool {
    let n = points.len();
    let incoming = edge_direction(points, (vertex + n - 1) % n);
    let outgoing = edge_direction(points, vertex);
    cross(&incoming, &outgoing) * sign < 0.0
}

/// Offset distance at which `vertex` lands on the moving edge `edge -> edge + 1`.
fn strike_distance(
    points: &[Point2],
    normals: &[Vector2],
    rays: &[VertexRay],
    vertex: usize,
    edge: usize,
) -> Option<f64> {
    let n = points.len();
    let next = (edge + 1) % n;
    let dir = edge_direction(points, edge);
    if dir.norm() < TOLERANCE {
        return None;
    }
    // The edge only advances away from points behind it.
    if normals[edge].dot(&(points[vertex] - points[edge])) < -EVENT_EPSILON {
        return None;
    }

    let relative = rays[vertex].velocity - rays[edge].velocity;
    let gap = points[edge] - points[vertex];
    let (t, u) = solve_2x2([relative.x, relative.y], [-dir.x, -dir.y], [gap.x, gap.y]).ok()?;
    if !t.is_finite() || !u.is_finite() || t < -EVENT_EPSILON {
        return None;
    }
    let t = t.max(0.0);
    let span = (rays[next].at(t) - rays[edge].at(t)).dot(&dir);
    (span > 0.0 && u >= -EVENT_EPSILON && u <= span + EVENT_EPSILON).then_some(t)
}

/// Cuts a moved front where `vertex` landed on `edge`.
///
/// The strike point starts both pieces: one runs forward from the vertex to
/// the start of the struck edge, the other from the end of the struck edge
/// back to the vertex.
fn split(points: &[Point2], vertex: usize, edge: usize) -> [Vec<Point2>; 2] {
    let n = points.len();
    let strike = points[vertex];
    let walk = |from: usize, to: usize| {
        let mut part = vec![strike];
        let mut i = from;
        loop {
            part.push(points[i]);
            if i == to {
                break;
            }
            i = (i + 1) % n;
        }
        part
    };
    [
        walk((vertex + 1) % n, edge),
        walk((edge + 1) % n, (vertex + n - 1) % n),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn polygon(coords: &[(f64, f64)]) -> Polygon2 {
        Polygon2::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    fn dumbbell() -> Polygon2 {
        polygon(&[
            (0.0, 0.0),
            (0.0, 4.0),
            (4.0, 4.0),
            (4.0, 2.5),
            (6.0, 2.5),
            (6.0, 4.0),
            (10.0, 4.0),
            (10.0, 0.0),
            (6.0, 0.0),
            (6.0, 1.5),
            (4.0, 1.5),
            (4.0, 0.0),
        ])
    }

    fn sorted_envelopes(pieces: &[Polygon2]) -> Vec<(Point2, Point2)> {
        let mut envelopes: Vec<_> = pieces.iter().map(|p| p.envelope().unwrap()).collect();
        envelopes.sort_by(|a, b| a.0.x.total_cmp(&b.0.x));
        envelopes
    }

    fn assert_near(a: Point2, b: (f64, f64)) {
        assert!((a - Point2::new(b.0, b.1)).norm() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn split_walks_both_sides_of_the_strike() {
        let points: Vec<Point2> = (0..6).map(|i| Point2::new(f64::from(i), 0.0)).collect();
        let [a, b] = split(&points, 1, 4);
        assert_eq!(a, vec![points[1], points[2], points[3], points[4]]);
        assert_eq!(b, vec![points[1], points[5], points[0]]);
    }

    #[test]
    fn events_order_by_distance_then_kind() {
        let collapse = Event {
            distance: 0.5,
            kind: EventKind::Collapse { edge: 7 },
        };
        let split = Event {
            distance: 0.5,
            kind: EventKind::Split { vertex: 0, edge: 3 },
        };
        let early = Event {
            distance: 0.25,
            kind: EventKind::Split { vertex: 9, edge: 1 },
        };
        assert_eq!(collapse.cmp_priority(&split), Ordering::Less);
        assert_eq!(early.cmp_priority(&collapse), Ordering::Less);
    }

    #[test]
    fn dumbbell_neck_pinches_into_two_squares() {
        let pieces = NonlocalOffset::default()
            .offset_boundary(&dumbbell(), -0.75)
            .unwrap();
        assert_eq!(pieces.len(), 2);
        assert!(pieces.iter().all(Polygon2::clockwise));
        let envelopes = sorted_envelopes(&pieces);
        assert_near(envelopes[0].0, (0.75, 0.75));
        assert_near(envelopes[0].1, (3.25, 3.25));
        assert_near(envelopes[1].0, (6.75, 0.75));
        assert_near(envelopes[1].1, (9.25, 3.25));
        assert!(pieces.iter().all(|p| p.len() == 4));
    }

    #[test]
    fn dumbbell_short_of_the_pinch_stays_whole() {
        let pieces = NonlocalOffset::default()
            .offset_boundary(&dumbbell(), -0.25)
            .unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].len(), 12);
    }

    #[test]
    fn square_shrinks_to_nothing() {
        let square = polygon(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let pieces = NonlocalOffset::default()
            .offset_boundary(&square, -10.0)
            .unwrap();
        assert!(pieces.is_empty());
    }

    #[test]
    fn counterclockwise_input_is_normalized() {
        let square = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let pieces = NonlocalOffset::default()
            .offset_boundary(&square, 0.5)
            .unwrap();
        assert_eq!(pieces.len(), 1);
        assert!(pieces[0].clockwise());
        assert!((pieces[0].area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn zero_amount_returns_the_boundary() {
        let square = polygon(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let pieces = NonlocalOffset::default()
            .offset_boundary(&square, 0.0)
            .unwrap();
        assert_eq!(pieces, vec![square]);
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let square = polygon(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(NonlocalOffset::default()
            .offset_boundary(&square, f64::NAN)
            .is_err());
    }

    #[test]
    fn event_cap_is_enforced() {
        // Uneven sides collapse one at a time while the shape shrinks away.
        let lumpy = Polygon2::new(
            (0..16)
                .map(|k| {
                    let k = f64::from(k);
                    let a = -(k * std::f64::consts::TAU / 16.0 + 0.15 * k.sin());
                    Point2::new(10.0 * a.cos(), 10.0 * a.sin())
                })
                .collect(),
        );
        let err = NonlocalOffset::default()
            .with_events_per_vertex(0)
            .offset_boundary(&lumpy, -20.0)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::PlanarError::Operation(OperationError::EventLimit { limit: 8 })
        ));
    }
}
