use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::geometry::{LineSegment2, Polygon2};

/// One boundary edge taking part in the sweep.
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    pub segment: LineSegment2,
    /// `(polygon index, segment index)`: fixes left/right order inside a pair.
    pub order: (usize, usize),
}

impl Wall {
    /// X coordinate of the wall at `level`.
    #[must_use]
    pub fn x_at(&self, level: f64) -> f64 {
        self.segment.x_at(level).unwrap_or(self.segment.p1.x)
    }

    /// Horizontal drift per unit of Y, used to order walls leaving the same point.
    fn drift(&self) -> f64 {
        let v = self.segment.v();
        if v.y == 0.0 {
            0.0
        } else {
            v.x / v.y
        }
    }

    /// Returns whether either endpoint sits exactly on `level`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn ends_at(&self, level: f64) -> bool {
        self.segment.p1.y == level || self.segment.p2.y == level
    }

    /// Sweep order at `level`: by X, then by direction just above the level.
    #[must_use]
    pub fn cmp_at(&self, other: &Wall, level: f64) -> Ordering {
        self.x_at(level)
            .total_cmp(&other.x_at(level))
            .then_with(|| self.drift().total_cmp(&other.drift()))
    }
}

/// Edges of one polygon queued by their lower endpoint Y.
#[derive(Debug)]
pub struct Sliced {
    queue: VecDeque<(f64, Wall)>,
}

impl Sliced {
    #[must_use]
    pub fn new(polygon_index: usize, polygon: &Polygon2) -> Self {
        let mut entries: Vec<(f64, Wall)> = polygon
            .segments()
            .into_iter()
            .enumerate()
            .map(|(segment_index, segment)| {
                (
                    segment.min_y(),
                    Wall {
                        segment,
                        order: (polygon_index, segment_index),
                    },
                )
            })
            .collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            queue: entries.into(),
        }
    }

    /// Pops every edge starting at `level` and returns the ones that rise above it.
    ///
    /// Horizontal edges lying on the level are consumed without being returned.
    #[allow(clippy::float_cmp)]
    pub fn departures(&mut self, level: f64) -> Vec<Wall> {
        let mut out = Vec::new();
        while let Some((start, wall)) = self.queue.front().copied() {
            if start != level {
                break;
            }
            self.queue.pop_front();
            let flat = wall.segment.p1.y == level && wall.segment.p2.y == level;
            if !flat {
                out.push(wall);
            }
        }
        out
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn staircase() -> Polygon2 {
        Polygon2::new(
            [
                (0.0, 0.0),
                (0.0, 7.0),
                (4.0, 7.0),
                (4.0, 5.0),
                (2.0, 5.0),
                (2.0, 4.0),
                (4.0, 4.0),
                (4.0, 2.0),
                (2.0, 2.0),
                (2.0, 0.0),
            ]
            .iter()
            .map(|&(x, y)| Point2::new(x, y))
            .collect(),
        )
    }

    #[test]
    fn departures_skip_flat_edges() {
        let mut sliced = Sliced::new(0, &staircase());
        let first = sliced.departures(0.0);
        let orders: Vec<_> = first.iter().map(|w| w.order.1).collect();
        assert_eq!(orders, vec![0, 8]);
        assert!(sliced.departures(1.0).is_empty());
    }

    #[test]
    fn queue_drains_across_all_levels() {
        let mut sliced = Sliced::new(0, &staircase());
        let mut risen = 0;
        for level in [0.0, 2.0, 4.0, 5.0, 7.0] {
            risen += sliced.departures(level).len();
        }
        assert!(sliced.is_exhausted());
        // Five vertical edges rise; the five horizontal ones are consumed silently.
        assert_eq!(risen, 5);
    }

    #[test]
    fn walls_leaving_a_shared_vertex_are_ordered_by_direction() {
        let apex = Point2::new(1.0, 0.0);
        let left = Wall {
            segment: LineSegment2::new(apex, Point2::new(0.0, 1.0)),
            order: (0, 0),
        };
        let right = Wall {
            segment: LineSegment2::new(Point2::new(2.0, 1.0), apex),
            order: (0, 1),
        };
        assert_eq!(left.cmp_at(&right, 0.0), Ordering::Less);
        assert!(left.ends_at(0.0));
        assert!(!left.ends_at(0.5));
    }
}
