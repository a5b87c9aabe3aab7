/// Softmax log loss (multinomial logistic loss) on raw per-category scores.
pub struct SoftmaxLogLoss;

impl SoftmaxLogLoss {
    /// Scalar loss for one score vector:
    ///   L = log(Σ_k exp(x_k)) − x_c
    ///
    /// The sum is evaluated with the log-sum-exp shift (subtract max(x))
    /// so that large scores do not overflow exp().
    pub fn loss(scores: &[f64], class: usize) -> f64 {
        let xmax = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let sum_exp: f64 = scores.iter().map(|&x| (x - xmax).exp()).sum();
        sum_exp.ln() + xmax - scores[class]
    }

    /// Per-score gradient: softmax(x)_k − [k == c]
    pub fn derivative(scores: &[f64], class: usize) -> Vec<f64> {
        let xmax = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let sum_exp: f64 = scores.iter().map(|&x| (x - xmax).exp()).sum();
        scores
            .iter()
            .enumerate()
            .map(|(k, &x)| {
                let p = (x - xmax).exp() / sum_exp;
                if k == class { p - 1.0 } else { p }
            })
            .collect()
    }
}
