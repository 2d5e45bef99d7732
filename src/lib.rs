pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tolerance;

pub use error::{PlanarError, Result};
pub use geometry::{ComplexPolygon2, LineSegment2, Polygon2};
pub use math::{solve_matrix, Point2, Vector2};
pub use tolerance::Tolerances;
