/// Logistic loss on raw scores with ±1 labels.
pub struct LogisticLoss;

impl LogisticLoss {
    /// Scalar loss: L = log(1 + exp(−c·x))
    ///
    /// Evaluated as max(a, 0) + log(1 + exp(−|a|)) with a = −c·x, which never
    /// exponentiates a positive argument.
    pub fn loss(x: f64, label: f64) -> f64 {
        let a = -label * x;
        a.max(0.0) + (-a.abs()).exp().ln_1p()
    }

    /// Gradient: dL/dx = −c·σ(−c·x) = −c / (1 + exp(c·x))
    pub fn derivative(x: f64, label: f64) -> f64 {
        // exp() of a non-positive argument when c·x ≥ 0, otherwise rewrite
        // through the complementary sigmoid to keep the argument non-positive.
        let m = label * x;
        if m >= 0.0 {
            -label * (-m).exp() / (1.0 + (-m).exp())
        } else {
            -label / (1.0 + m.exp())
        }
    }
}
