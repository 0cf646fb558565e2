use std::fmt;

use crate::math::rounding::round_half_up;

/// A length rounded half-up to two decimals for an on-screen readout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    value: f64,
}

impl Measurement {
    /// Rounds `raw` as `round((raw + epsilon) * 100) / 100`.
    #[must_use]
    pub fn new(raw: f64, epsilon: f64) -> Self {
        Self {
            value: round_half_up(raw, 2, epsilon),
        }
    }

    /// Returns the rounded value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rounds_half_up() {
        let m = Measurement::new(1.005, f64::EPSILON);
        assert_relative_eq!(m.value(), 1.01);
        assert_eq!(m.to_string(), "1.01");
    }

    #[test]
    fn whole_numbers_keep_two_decimals() {
        assert_eq!(Measurement::new(4.0, f64::EPSILON).to_string(), "4.00");
    }
}
