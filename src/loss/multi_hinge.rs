/// Multiclass hinge loss on the true-class score.
pub struct MultiHingeLoss;

impl MultiHingeLoss {
    /// Scalar loss for one score vector: L = max(0, 1 − x_c)
    pub fn loss(scores: &[f64], class: usize) -> f64 {
        (1.0 - scores[class]).max(0.0)
    }

    /// Per-score subgradient: −1 at the true class while the margin is
    /// violated (x_c < 1), 0 elsewhere.
    pub fn derivative(scores: &[f64], class: usize) -> Vec<f64> {
        let mut grad = vec![0.0; scores.len()];
        if scores[class] < 1.0 {
            grad[class] = -1.0;
        }
        grad
    }
}
