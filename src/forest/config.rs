/// Tuning knobs for a [`TraceForest`](super::TraceForest).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestConfig {
    /// Re-point visited nodes at their root during mutable lookups.
    ///
    /// Never changes which node is the representative.
    pub path_compression: bool,
    /// Nudge added before rounding a length readout to two decimals.
    pub measurement_epsilon: f64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            path_compression: false,
            measurement_epsilon: f64::EPSILON,
        }
    }
}

impl ForestConfig {
    /// Returns a config with path compression enabled.
    #[must_use]
    pub fn with_path_compression(mut self) -> Self {
        self.path_compression = true;
        self
    }

    /// Returns a config with a custom measurement epsilon.
    #[must_use]
    pub fn with_measurement_epsilon(mut self, epsilon: f64) -> Self {
        self.measurement_epsilon = epsilon;
        self
    }
}
