use crate::math::QUANTUM;

/// Tolerance knobs shared by the decomposition, rebuild and offset pipelines.
///
/// Every value is passed by value into the operations; nothing here is global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Snap grid used for point and segment identity.
    pub quantum: f64,
    /// Maximum distance for an endpoint to count as lying on another segment.
    pub fragment_error: f64,
    /// Distance under which consecutive polygon points are merged.
    pub simplify: f64,
    /// Edge-turn angle (radians) under which a vertex is considered collinear.
    pub collinear: f64,
    /// Trapezoids with a smaller area are discarded.
    pub min_area: Option<f64>,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            quantum: QUANTUM,
            fragment_error: QUANTUM,
            simplify: 1e-4,
            collinear: 1e-6,
            min_area: Some(1e-4),
        }
    }
}

impl Tolerances {
    #[must_use]
    pub fn with_quantum(mut self, quantum: f64) -> Self {
        self.quantum = quantum;
        self
    }

    #[must_use]
    pub fn with_fragment_error(mut self, error: f64) -> Self {
        self.fragment_error = error;
        self
    }

    #[must_use]
    pub fn with_simplify(mut self, tolerance: f64) -> Self {
        self.simplify = tolerance;
        self
    }

    #[must_use]
    pub fn with_collinear(mut self, angle: f64) -> Self {
        self.collinear = angle;
        self
    }

    #[must_use]
    pub fn with_min_area(mut self, min_area: Option<f64>) -> Self {
        self.min_area = min_area;
        self
    }
}
