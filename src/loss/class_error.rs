/// Top-k classification error: 0 when the true class is among the `top_k`
/// highest-scoring classes, 1 otherwise.
pub struct ClassErrorLoss;

impl ClassErrorLoss {
    /// Scalar 0/1 error for one score vector.
    ///
    /// The true class counts as "in the top k" when fewer than k classes
    /// score strictly higher than it, so ties resolve in its favor.
    pub fn loss(scores: &[f64], class: usize, top_k: usize) -> f64 {
        let xc = scores[class];
        let strictly_above = scores.iter().filter(|&&x| x > xc).count();
        if strictly_above < top_k { 0.0 } else { 1.0 }
    }

    /// The error is piecewise constant; its gradient is zero everywhere.
    pub fn derivative(scores: &[f64], _class: usize, _top_k: usize) -> Vec<f64> {
        vec![0.0; scores.len()]
    }
}
