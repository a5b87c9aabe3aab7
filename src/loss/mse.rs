/// Squared-error regression loss, applied element-wise.
pub struct MseLoss;

impl MseLoss {
    /// Scalar loss for one element: (predicted − expected)²
    pub fn loss(predicted: f64, expected: f64) -> f64 {
        (predicted - expected).powi(2)
    }

    /// Gradient: 2·(predicted − expected)
    pub fn derivative(predicted: f64, expected: f64) -> f64 {
        2.0 * (predicted - expected)
    }
}
