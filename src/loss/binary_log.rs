/// Binary log loss on scores that are already probabilities of the +1 class.
pub struct BinaryLogLoss;

const EPS: f64 = 1e-12;

impl BinaryLogLoss {
    /// Scalar loss for one probability x ∈ [0, 1] and label c ∈ {−1, +1}:
    ///   L = −log(c·(x − 0.5) + 0.5 + ε)
    ///
    /// which is −log(x) for c = +1 and −log(1 − x) for c = −1.
    pub fn loss(x: f64, label: f64) -> f64 {
        -(label * (x - 0.5) + 0.5 + EPS).ln()
    }

    /// Gradient: −c / (c·(x − 0.5) + 0.5 + ε)
    pub fn derivative(x: f64, label: f64) -> f64 {
        -label / (label * (x - 0.5) + 0.5 + EPS)
    }
}
