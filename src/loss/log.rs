/// Log loss (negative log-likelihood) on scores that are already
/// probabilities, e.g. the output of a softmax layer.
pub struct LogLoss;

const EPS: f64 = 1e-12;

impl LogLoss {
    /// Scalar loss for one probability vector: L = −log(x_c + ε)
    pub fn loss(scores: &[f64], class: usize) -> f64 {
        -(scores[class] + EPS).ln()
    }

    /// Per-score gradient: −1/(x_c + ε) at the true class, 0 elsewhere.
    pub fn derivative(scores: &[f64], class: usize) -> Vec<f64> {
        let mut grad = vec![0.0; scores.len()];
        grad[class] = -1.0 / (scores[class] + EPS);
        grad
    }
}
