/// Binary hinge loss on raw scores with ±1 labels.
pub struct HingeLoss;

impl HingeLoss {
    /// Scalar loss: L = max(0, 1 − c·x)
    pub fn loss(x: f64, label: f64) -> f64 {
        (1.0 - label * x).max(0.0)
    }

    /// Subgradient: −c while the margin is violated (c·x < 1), 0 otherwise.
    pub fn derivative(x: f64, label: f64) -> f64 {
        if label * x < 1.0 { -label } else { 0.0 }
    }
}
