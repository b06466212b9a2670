/// Summed squared error, the network's score.
pub struct SquaredErrorLoss;

impl SquaredErrorLoss {
    /// Scalar score: Σ (expected - predicted)², not averaged.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, t)| (t - a).powi(2))
            .sum()
    }

    /// Per-output gradient of the score: 2 · (predicted - expected)
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, t)| 2.0 * (a - t))
            .collect()
    }
}
