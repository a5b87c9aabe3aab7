/// Huber regression loss, applied element-wise.
pub struct HuberLoss;

// Fixed δ = 1.0 keeps the enum variant unit (no f64 field) → preserves Eq + Copy.
const DELTA: f64 = 1.0;

impl HuberLoss {
    /// Scalar loss for one element:
    ///   h(x) = 0.5·x²            if |x| ≤ δ
    ///          δ·(|x| − 0.5·δ)   otherwise
    /// with x = predicted − expected.
    pub fn loss(predicted: f64, expected: f64) -> f64 {
        let x = predicted - expected;
        if x.abs() <= DELTA {
            0.5 * x * x
        } else {
            DELTA * (x.abs() - 0.5 * DELTA)
        }
    }

    /// Gradient: x if |x| ≤ δ, else δ·sign(x)
    pub fn derivative(predicted: f64, expected: f64) -> f64 {
        let x = predicted - expected;
        if x.abs() <= DELTA { x } else { DELTA * x.signum() }
    }
}
