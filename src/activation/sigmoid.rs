use std::f64::consts::E;

/// Logistic sigmoid, `1 / (1 + e^-x)`.
///
/// Applied as the direct formula: very large `|x|` saturates to `0.0` or
/// `1.0` under IEEE semantics rather than being clamped.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of [`sigmoid`] evaluated at the pre-activation `x`.
pub fn sigmoid_derivative(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_at_zero_is_half() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert_relative_eq!(sigmoid_derivative(0.0), 0.25);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for &x in &[0.1, 0.5, 1.0, 3.0, 7.5] {
            assert_relative_eq!(sigmoid(x) + sigmoid(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let h = 1e-6;
        for &x in &[-4.0, -1.0, -0.2, 0.0, 0.7, 2.5] {
            let numerical = (sigmoid(x + h) - sigmoid(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical, sigmoid_derivative(x), max_relative = 1e-6);
        }
    }

    #[test]
    fn extreme_inputs_saturate() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid_derivative(1000.0), 0.0);
    }
}
