/// Absolute-error regression loss, applied element-wise.
pub struct MaeLoss;

impl MaeLoss {
    /// Scalar loss for one element: |predicted − expected|
    pub fn loss(predicted: f64, expected: f64) -> f64 {
        (predicted - expected).abs()
    }

    /// Subgradient: sign(predicted − expected), 0 at equality.
    pub fn derivative(predicted: f64, expected: f64) -> f64 {
        let diff = predicted - expected;
        if diff > 0.0 { 1.0 } else if diff < 0.0 { -1.0 } else { 0.0 }
    }
}
