pub mod decompose;
pub mod offset;
pub mod rebuild;

pub use decompose::{
    trapezoidal, trapezoidal_with, trapezoids, Trapezoid, TrapezoidalDecomposition,
};
pub use offset::{
    nonlocal_offset, offset, offset_with, MiterOffset, NonlocalOffset, OffsetEngine,
};
pub use rebuild::{decouple, fragment, rebuild, rebuild_with, recreate_polygons};
