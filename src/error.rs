use thiserror::Error;

/// Top-level error type for the planar kernel.
#[derive(Debug, Error)]
pub enum PlanarError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by the dense linear solver.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MathError {
    /// A pivot was exactly zero: the system has no unique solution.
    #[error("singular matrix: zero pivot in column {column}")]
    SingularMatrix { column: usize },

    #[error("augmented matrix must be n x (n + 1), got {rows} x {cols}")]
    DimensionMismatch { rows: usize, cols: usize },
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised when a fragment graph is not a disjoint union of simple cycles.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("malformed topology: {candidates} fragments branch from ({x}, {y})")]
    Branch { x: f64, y: f64, candidates: usize },

    #[error("malformed topology: chain is open at ({x}, {y})")]
    OpenChain { x: f64, y: f64 },

    #[error("cycle reconstruction made no progress with {remaining} fragments left")]
    NoProgress { remaining: usize },
}

/// Errors related to kernel operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("offset exceeded {limit} events")]
    EventLimit { limit: usize },
}

/// Convenience type alias for results using [`PlanarError`].
pub type Result<T> = std::result::Result<T, PlanarError>;
