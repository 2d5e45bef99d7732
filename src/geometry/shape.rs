use super::circle::Circle;
use super::line::{Extent, Line2, LineSegment2, Ray2};
use crate::math::intersect_2d::{
    circle_circle_intersect_2d, line_circle_intersect_2d, line_line_intersect_2d, project_param,
};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Closed set of planar primitives that can be intersected and connected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Point(Point2),
    Line(Line2),
    Ray(Ray2),
    Segment(LineSegment2),
    Circle(Circle),
}

/// Result of intersecting two shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    Point(Point2),
    /// Two isolated points, as produced by two crossing circles.
    Pair(Point2, Point2),
    /// An overlapping stretch, as produced by a line crossing a circle.
    Segment(LineSegment2),
}

/// Line-like view `p + u * v` restricted to `extent`.
#[derive(Debug, Clone, Copy)]
struct Linear {
    p: Point2,
    v: Vector2,
    extent: Extent,
}

impl Linear {
    fn at(&self, u: f64) -> Point2 {
        self.p + self.v * u
    }

    fn closest(&self, q: &Point2) -> Point2 {
        self.at(self.extent.clamp(project_param(q, &self.p, &self.v)))
    }

    /// Finite endpoints of the shape.
    fn endpoints(&self) -> Vec<Point2> {
        match self.extent {
            Extent::Infinite => Vec::new(),
            Extent::Ray => vec![self.p],
            Extent::Segment => vec![self.p, self.at(1.0)],
        }
    }
}

impl From<Line2> for Shape {
    fn from(line: Line2) -> Self {
        Self::Line(line)
    }
}

impl From<Ray2> for Shape {
    fn from(ray: Ray2) -> Self {
        Self::Ray(ray)
    }
}

impl From<LineSegment2> for Shape {
    fn from(segment: LineSegment2) -> Self {
        Self::Segment(segment)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl Shape {
    fn linear(&self) -> Option<Linear> {
        match self {
            Self::Line(l) => Some(Linear {
                p: l.p,
                v: l.v,
                extent: Extent::Infinite,
            }),
            Self::Ray(r) => Some(Linear {
                p: r.p,
                v: r.v,
                extent: Extent::Ray,
            }),
            Self::Segment(s) => Some(Linear {
                p: s.p1,
                v: s.v(),
                extent: Extent::Segment,
            }),
            Self::Point(_) | Self::Circle(_) => None,
        }
    }

    /// Intersects two shapes.
    ///
    /// A point intersects a circle when it lies in the closed disk. Pairs
    /// without a meaningful intersection (point with line, parallel lines)
    /// return `None`.
    #[must_use]
    pub fn intersect(&self, other: &Shape) -> Option<Intersection> {
        match (self, other) {
            (Self::Point(p), Self::Circle(c)) | (Self::Circle(c), Self::Point(p)) => {
                ((p - c.center).norm() <= c.radius).then_some(Intersection::Point(*p))
            }
            (Self::Circle(a), Self::Circle(b)) => {
                let hits = circle_circle_intersect_2d(&a.center, a.radius, &b.center, b.radius);
                match hits.as_slice() {
                    [p] => Some(Intersection::Point(*p)),
                    [p, q] => Some(Intersection::Pair(*p, *q)),
                    _ => None,
                }
            }
            (Self::Circle(c), shape) | (shape, Self::Circle(c)) => {
                intersect_linear_circle(&shape.linear()?, c)
            }
            (a, b) => intersect_linear_linear(&a.linear()?, &b.linear()?),
        }
    }

    /// Shortest segment leading from this shape to `other`.
    ///
    /// Returns `None` when the direction is undefined, e.g. connecting a
    /// circle to its own center.
    #[must_use]
    pub fn connect(&self, other: &Shape) -> Option<LineSegment2> {
        match (self, other) {
            (Self::Point(p), Self::Point(q)) => Some(LineSegment2::new(*p, *q)),
            (Self::Point(p), Self::Circle(c)) => {
                Some(LineSegment2::new(*p, towards_circle(c, p)?))
            }
            (Self::Circle(_), Self::Point(_)) => other.connect(self).map(|s| s.reversed()),
            (Self::Circle(a), Self::Circle(b)) => connect_circles(a, b),
            (Self::Point(p), shape) => {
                let l = shape.linear()?;
                Some(LineSegment2::new(*p, l.closest(p)))
            }
            (shape, Self::Point(_)) => {
                shape.linear()?;
                other.connect(self).map(|s| s.reversed())
            }
            (shape, Self::Circle(c)) => {
                let l = shape.linear()?;
                let near = l.closest(&c.center);
                Some(LineSegment2::new(near, towards_circle(c, &near)?))
            }
            (Self::Circle(_), _) => other.connect(self).map(|s| s.reversed()),
            (a, b) => connect_linear_linear(&a.linear()?, &b.linear()?),
        }
    }

    /// Length of the connecting segment, zero when the shapes touch.
    #[must_use]
    pub fn distance(&self, other: &Shape) -> f64 {
        self.connect(other).map_or(0.0, |s| s.length())
    }
}

fn intersect_linear_linear(a: &Linear, b: &Linear) -> Option<Intersection> {
    let (ua, ub) = line_line_intersect_2d(&a.p, &a.v, &b.p, &b.v)?;
    (a.extent.contains(ua) && b.extent.contains(ub)).then(|| Intersection::Point(a.at(ua)))
}

fn intersect_linear_circle(l: &Linear, c: &Circle) -> Option<Intersection> {
    let params = line_circle_intersect_2d(&l.p, &l.v, &c.center, c.radius);
    match params.as_slice() {
        [u] => l.extent.contains(*u).then(|| Intersection::Point(l.at(*u))),
        [u1, u2] => {
            // Chord clipped to the shape's own parameter range.
            let lo = l.extent.clamp(*u1);
            let hi = l.extent.clamp(*u2);
            if !l.extent.contains(*u1) && !l.extent.contains(*u2) && (lo - hi).abs() < TOLERANCE
            {
                return None;
            }
            if (hi - lo).abs() < TOLERANCE {
                Some(Intersection::Point(l.at(lo)))
            } else {
                Some(Intersection::Segment(LineSegment2::new(l.at(lo), l.at(hi))))
            }
        }
        _ => None,
    }
}

fn connect_linear_linear(a: &Linear, b: &Linear) -> Option<LineSegment2> {
    if let Some(Intersection::Point(p)) = intersect_linear_linear(a, b) {
        return Some(LineSegment2::new(p, p));
    }

    // Disjoint convex pieces: the closest pair involves a finite endpoint.
    let mut best: Option<LineSegment2> = None;
    let mut consider = |s: LineSegment2| {
        if best.map_or(true, |b| s.length() < b.length()) {
            best = Some(s);
        }
    };
    for p in a.endpoints() {
        consider(LineSegment2::new(p, b.closest(&p)));
    }
    for q in b.endpoints() {
        consider(LineSegment2::new(a.closest(&q), q));
    }

    // Two parallel infinite lines have no endpoints at all.
    best.or_else(|| Some(LineSegment2::new(a.p, b.closest(&a.p))))
}

fn towards_circle(c: &Circle, from: &Point2) -> Option<Point2> {
    let v = from - c.center;
    let len = v.norm();
    if len < TOLERANCE {
        return None;
    }
    Some(c.center + v * (c.radius / len))
}

fn connect_circles(a: &Circle, b: &Circle) -> Option<LineSegment2> {
    let v = b.center - a.center;
    let d = v.norm();
    if d < TOLERANCE {
        return None;
    }
    let (s1, s2) = if a.radius >= b.radius && d < a.radius {
        (1.0, 1.0)
    } else if b.radius > a.radius && d < b.radius {
        (-1.0, -1.0)
    } else {
        (1.0, -1.0)
    };
    let dir = v / d;
    Some(LineSegment2::new(
        a.center + dir * (s1 * a.radius),
        b.center + dir * (s2 * b.radius),
    ))
}
