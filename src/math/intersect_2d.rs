use super::{cross, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let denom = cross(d1, d2);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let d = p2 - p1;
    let t = cross(&d, d2) / denom;
    let u = cross(&d, d1) / denom;
    Some((t, u))
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

/// Parameter of the orthogonal projection of `p` onto the line `origin + t * dir`.
#[must_use]
pub fn project_param(p: &Point2, origin: &Point2, dir: &Vector2) -> f64 {
    let len_sq = dir.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return 0.0;
    }
    (p - origin).dot(dir) / len_sq
}

/// Intersection parameters of the line `origin + t * dir` with a circle.
///
/// Returns zero, one (tangent) or two parameters in ascending order.
#[must_use]
pub fn line_circle_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    center: &Point2,
    radius: f64,
) -> Vec<f64> {
    let a = dir.norm_squared();
    if a < TOLERANCE * TOLERANCE || radius < TOLERANCE {
        return Vec::new();
    }

    // Substitute the parametric line into |x - c|^2 = r^2.
    let f = origin - center;
    let b = 2.0 * f.dot(dir);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < -TOLERANCE {
        return Vec::new();
    }

    let disc_sqrt = discriminant.max(0.0).sqrt();
    if disc_sqrt < TOLERANCE * 100.0 {
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    }
}

/// Intersection points of two full circles.
///
/// Returns an empty vector for disjoint, nested or concentric circles, one
/// point when tangent, and two points otherwise.
#[must_use]
pub fn circle_circle_intersect_2d(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return Vec::new();
    }

    let delta = c2 - c1;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();
    if dist < TOLERANCE {
        return Vec::new();
    }
    if dist > r1 + r2 + TOLERANCE || dist < (r1 - r2).abs() - TOLERANCE {
        return Vec::new();
    }

    // Distance from c1 along c1 -> c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h = (r1 * r1 - a * a).max(0.0).sqrt();
    let axis = delta / dist;
    let mid = c1 + axis * a;
    let perp = Vector2::new(-axis.y, axis.x);

    if h < TOLERANCE {
        vec![mid]
    } else {
        vec![mid + perp * h, mid - perp * h]
    }
}
