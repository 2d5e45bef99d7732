pub mod circle;
pub mod complex;
pub mod line;
pub mod polygon;
pub mod shape;

pub use circle::Circle;
pub use complex::ComplexPolygon2;
pub use line::{Extent, Line2, LineSegment2, Ray2, SegmentKey};
pub use polygon::Polygon2;
pub use shape::{Intersection, Shape};
