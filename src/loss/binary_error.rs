/// Binary 0/1 error of a thresholded score against a ±1 label.
pub struct BinaryErrorLoss;

impl BinaryErrorLoss {
    /// Scalar 0/1 error: 1 when sign(x − threshold) disagrees with the label.
    ///
    /// A score sitting exactly on the threshold counts as class −1, so it is
    /// an error for a +1 label.
    pub fn loss(x: f64, label: f64, threshold: f64) -> f64 {
        let predicted = if x > threshold { 1.0 } else { -1.0 };
        if predicted == label { 0.0 } else { 1.0 }
    }

    /// The error is piecewise constant; its gradient is zero everywhere.
    pub fn derivative(_x: f64, _label: f64, _threshold: f64) -> f64 {
        0.0
    }
}
