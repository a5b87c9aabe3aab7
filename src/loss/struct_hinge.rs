/// Structured (Crammer-Singer) multiclass hinge loss: margin between the
/// true-class score and the best competing class score.
pub struct StructHingeLoss;

impl StructHingeLoss {
    /// Scalar loss for one score vector:
    ///   L = max(0, 1 − (x_c − max_{j≠c} x_j))
    ///
    /// Needs at least two classes, otherwise there is no competitor.
    pub fn loss(scores: &[f64], class: usize) -> f64 {
        let (_, best) = Self::best_competitor(scores, class);
        (1.0 - (scores[class] - best)).max(0.0)
    }

    /// Per-score subgradient while the margin is violated: −1 at the true
    /// class, +1 at the best competing class, 0 elsewhere.
    pub fn derivative(scores: &[f64], class: usize) -> Vec<f64> {
        let (best_idx, best) = Self::best_competitor(scores, class);
        let mut grad = vec![0.0; scores.len()];
        if scores[class] - best < 1.0 {
            grad[class] = -1.0;
            grad[best_idx] = 1.0;
        }
        grad
    }

    /// Index and score of the highest-scoring class other than `class`.
    fn best_competitor(scores: &[f64], class: usize) -> (usize, f64) {
        assert!(scores.len() >= 2, "structured hinge needs at least two classes");
        let mut best_idx = usize::MAX;
        let mut best = f64::NEG_INFINITY;
        for (j, &x) in scores.iter().enumerate() {
            if j != class && x > best {
                best_idx = j;
                best = x;
            }
        }
        (best_idx, best)
    }
}
