/// Rounds `value` half-up to `decimals` places after nudging it by `epsilon`.
///
/// The nudge keeps values such as `1.005` (stored as `1.00499999...`) from
/// truncating to the lower neighbour: `round((value + epsilon) * 10^decimals) / 10^decimals`.
#[must_use]
pub fn round_half_up(value: f64, decimals: i32, epsilon: f64) -> f64 {
    let scale = 10f64.powi(decimals);
    ((value + epsilon) * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rounds_to_two_places() {
        assert_relative_eq!(round_half_up(3.14159, 2, f64::EPSILON), 3.14);
        assert_relative_eq!(round_half_up(2.0, 2, f64::EPSILON), 2.0);
    }

    #[test]
    fn half_up_at_boundary() {
        assert_relative_eq!(round_half_up(0.125, 2, f64::EPSILON), 0.13);
        assert_relative_eq!(round_half_up(1.005, 2, f64::EPSILON), 1.01);
    }

    #[test]
    fn without_epsilon_boundary_truncates() {
        // 1.005 is stored slightly below the midpoint.
        assert_relative_eq!(round_half_up(1.005, 2, 0.0), 1.0);
    }
}
