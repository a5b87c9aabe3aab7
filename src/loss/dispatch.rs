use crate::loss::binary_error::BinaryErrorLoss;
use crate::loss::binary_log::BinaryLogLoss;
use crate::loss::class_error::ClassErrorLoss;
use crate::loss::config::LossConfig;
use crate::loss::hinge::HingeLoss;
use crate::loss::huber::HuberLoss;
use crate::loss::log::LogLoss;
use crate::loss::logistic::LogisticLoss;
use crate::loss::loss_type::LossType;
use crate::loss::mae::MaeLoss;
use crate::loss::mse::MseLoss;
use crate::loss::multi_hinge::MultiHingeLoss;
use crate::loss::softmax_log::SoftmaxLogLoss;
use crate::loss::struct_hinge::StructHingeLoss;
use crate::loss::weights::{instance_weight, label_at, validate};
use crate::math::tensor::Tensor4;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Computes the scalar loss: the instance-weighted sum of per-instance losses
/// over every labeled location of every image in the batch.
///
/// `x` holds per-location, per-category prediction scores with shape
/// `(H, W, C, N)`. The label layout selects how instances are formed: one
/// per channel vector for categorical losses, one per scalar for binary and
/// regression losses. Instances with an ignore label (0) contribute nothing.
///
/// The result is a plain sum; divide by a count of your choice (or fold the
/// normalization into `cfg.instance_weights`) to obtain a mean.
///
/// # Panics
/// Panics on any shape or label-range violation (see `weights::validate`).
pub fn loss_forward(x: &Tensor4, labels: &Tensor4, cfg: &LossConfig) -> f64 {
    validate(x, labels, cfg);
    if cfg.loss_type.is_categorical() {
        categorical_forward(x, labels, cfg)
    } else {
        elementwise_forward(x, labels, cfg)
    }
}

/// Computes the gradient of the scalar loss with respect to `x`, scaled by
/// the upstream gradient `dzdy`.
///
/// The returned tensor has the shape of `x`. Ignored instances and the
/// non-differentiable error losses (`class_error`, `binary_error`)
/// contribute zeros.
///
/// # Panics
/// Panics on any shape or label-range violation (see `weights::validate`).
pub fn loss_backward(x: &Tensor4, labels: &Tensor4, dzdy: f64, cfg: &LossConfig) -> Tensor4 {
    validate(x, labels, cfg);
    if cfg.loss_type.is_categorical() {
        categorical_backward(x, labels, dzdy, cfg)
    } else {
        elementwise_backward(x, labels, dzdy, cfg)
    }
}

// ---------------------------------------------------------------------------
// Categorical losses: one instance per channel vector
// ---------------------------------------------------------------------------

fn categorical_forward(x: &Tensor4, labels: &Tensor4, cfg: &LossConfig) -> f64 {
    let mut total = 0.0;
    let mut scores = vec![0.0; x.channels];

    for n in 0..x.batch {
        for h in 0..x.height {
            for w in 0..x.width {
                let label = label_at(labels, h, w, 0, n);
                if label == 0.0 {
                    continue;
                }
                let class = label as usize - 1;
                x.read_channels(h, w, n, &mut scores);

                let t = match cfg.loss_type {
                    LossType::ClassError => ClassErrorLoss::loss(&scores, class, cfg.top_k),
                    LossType::Log => LogLoss::loss(&scores, class),
                    LossType::SoftmaxLog => SoftmaxLogLoss::loss(&scores, class),
                    LossType::MultiHinge => MultiHingeLoss::loss(&scores, class),
                    LossType::StructHinge => StructHingeLoss::loss(&scores, class),
                    other => unreachable!("{} is not a categorical loss", other.name()),
                };
                total += instance_weight(cfg, h, w, 0, n, class) * t;
            }
        }
    }
    total
}

fn categorical_backward(x: &Tensor4, labels: &Tensor4, dzdy: f64, cfg: &LossConfig) -> Tensor4 {
    let mut out = Tensor4::zeros(x.height, x.width, x.channels, x.batch);
    let mut scores = vec![0.0; x.channels];

    for n in 0..x.batch {
        for h in 0..x.height {
            for w in 0..x.width {
                let label = label_at(labels, h, w, 0, n);
                if label == 0.0 {
                    continue;
                }
                let class = label as usize - 1;
                x.read_channels(h, w, n, &mut scores);

                let grad = match cfg.loss_type {
                    LossType::ClassError => ClassErrorLoss::derivative(&scores, class, cfg.top_k),
                    LossType::Log => LogLoss::derivative(&scores, class),
                    LossType::SoftmaxLog => SoftmaxLogLoss::derivative(&scores, class),
                    LossType::MultiHinge => MultiHingeLoss::derivative(&scores, class),
                    LossType::StructHinge => StructHingeLoss::derivative(&scores, class),
                    other => unreachable!("{} is not a categorical loss", other.name()),
                };
                let scale = dzdy * instance_weight(cfg, h, w, 0, n, class);
                for (k, g) in grad.into_iter().enumerate() {
                    out.set(h, w, k, n, scale * g);
                }
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Binary and regression losses: one instance per prediction scalar
// ---------------------------------------------------------------------------

fn elementwise_forward(x: &Tensor4, labels: &Tensor4, cfg: &LossConfig) -> f64 {
    let binary = cfg.loss_type.is_binary();
    let mut total = 0.0;

    for n in 0..x.batch {
        for k in 0..x.channels {
            for h in 0..x.height {
                for w in 0..x.width {
                    let label = labels.get(h, w, k, n);
                    if binary && label == 0.0 {
                        continue;
                    }
                    let t = element_loss(cfg, x.get(h, w, k, n), label);
                    total += instance_weight(cfg, h, w, k, n, k) * t;
                }
            }
        }
    }
    total
}

fn elementwise_backward(x: &Tensor4, labels: &Tensor4, dzdy: f64, cfg: &LossConfig) -> Tensor4 {
    let binary = cfg.loss_type.is_binary();
    let mut out = Tensor4::zeros(x.height, x.width, x.channels, x.batch);

    for n in 0..x.batch {
        for k in 0..x.channels {
            for h in 0..x.height {
                for w in 0..x.width {
                    let label = labels.get(h, w, k, n);
                    if binary && label == 0.0 {
                        continue;
                    }
                    let g = element_derivative(cfg, x.get(h, w, k, n), label);
                    out.set(h, w, k, n, dzdy * instance_weight(cfg, h, w, k, n, k) * g);
                }
            }
        }
    }
    out
}

fn element_loss(cfg: &LossConfig, x: f64, label: f64) -> f64 {
    match cfg.loss_type {
        LossType::BinaryError => BinaryErrorLoss::loss(x, label, cfg.threshold),
        LossType::BinaryLog => BinaryLogLoss::loss(x, label),
        LossType::Logistic => LogisticLoss::loss(x, label),
        LossType::Hinge => HingeLoss::loss(x, label),
        LossType::Mse => MseLoss::loss(x, label),
        LossType::Mae => MaeLoss::loss(x, label),
        LossType::Huber => HuberLoss::loss(x, label),
        other => unreachable!("{} is not an element-wise loss", other.name()),
    }
}

fn element_derivative(cfg: &LossConfig, x: f64, label: f64) -> f64 {
    match cfg.loss_type {
        LossType::BinaryError => BinaryErrorLoss::derivative(x, label, cfg.threshold),
        LossType::BinaryLog => BinaryLogLoss::derivative(x, label),
        LossType::Logistic => LogisticLoss::derivative(x, label),
        LossType::Hinge => HingeLoss::derivative(x, label),
        LossType::Mse => MseLoss::derivative(x, label),
        LossType::Mae => MaeLoss::derivative(x, label),
        LossType::Huber => HuberLoss::derivative(x, label),
        other => unreachable!("{} is not an element-wise loss", other.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Helpers ────────────────────────────────────────────────────────────

    /// Central finite-difference check of `loss_backward` against
    /// `loss_forward`, element by element.
    fn check_gradient(x: &Tensor4, labels: &Tensor4, cfg: &LossConfig) {
        let analytic = loss_backward(x, labels, 1.0, cfg);
        let step = 1e-5;
        for i in 0..x.len() {
            let mut xp = x.clone();
            xp.data[i] += step;
            let mut xm = x.clone();
            xm.data[i] -= step;
            let numeric = (loss_forward(&xp, labels, cfg) - loss_forward(&xm, labels, cfg)) / (2.0 * step);
            let scale = 1.0 + numeric.abs().max(analytic.data[i].abs());
            assert!(
                (numeric - analytic.data[i]).abs() / scale < 1e-5,
                "{}: element {i}: numeric {numeric} vs analytic {}",
                cfg.loss_type.name(),
                analytic.data[i]
            );
        }
    }

    /// Random categorical fixture: scores in [-1, 1), labels cycling 1..=C.
    fn categorical_fixture() -> (Tensor4, Tensor4) {
        let (height, width, channels, batch) = (3, 4, 5, 2);
        let x = Tensor4::random(height, width, channels, batch);
        let mut labels = Tensor4::zeros(height, width, 1, batch);
        for (i, l) in labels.data.iter_mut().enumerate() {
            *l = (i % channels) as f64 + 1.0;
        }
        (x, labels)
    }

    /// Random binary fixture: scores in [-1, 1), labels alternating ±1.
    fn binary_fixture() -> (Tensor4, Tensor4) {
        let (height, width, channels, batch) = (2, 3, 4, 2);
        let x = Tensor4::random(height, width, channels, batch);
        let mut labels = Tensor4::zeros(height, width, channels, batch);
        for (i, l) in labels.data.iter_mut().enumerate() {
            *l = if i % 2 == 0 { 1.0 } else { -1.0 };
        }
        (x, labels)
    }

    // ── Forward values on hand-computed examples ───────────────────────────

    #[test]
    fn softmax_log_forward_matches_hand_computation() {
        // One location, two classes, two images; labels 1 and 2.
        let x = Tensor4::from_data(1, 1, 2, 2, vec![2.0, 1.0, 0.0, 0.0]);
        let labels = Tensor4::from_data(1, 1, 1, 2, vec![1.0, 2.0]);
        let cfg = LossConfig::new(LossType::SoftmaxLog);
        let expected = (1.0 + (-1.0_f64).exp()).ln() + 2.0_f64.ln();
        assert!((loss_forward(&x, &labels, &cfg) - expected).abs() < 1e-12);
    }

    #[test]
    fn class_error_forward_counts_mistakes() {
        // Image 0 predicts class 1 (correct), image 1 predicts class 1 (wrong).
        let x = Tensor4::from_data(1, 1, 2, 2, vec![2.0, 1.0, 3.0, 0.0]);
        let labels = Tensor4::from_data(1, 1, 1, 2, vec![1.0, 2.0]);
        let cfg = LossConfig::new(LossType::ClassError);
        assert_eq!(loss_forward(&x, &labels, &cfg), 1.0);
    }

    #[test]
    fn binary_error_forward_uses_the_threshold() {
        let x = Tensor4::from_data(1, 1, 1, 3, vec![0.7, 0.3, 0.6]);
        let labels = Tensor4::from_data(1, 1, 1, 3, vec![1.0, 1.0, -1.0]);
        let mut cfg = LossConfig::new(LossType::BinaryError);
        cfg.threshold = 0.5;
        // 0.7 → +1 (ok), 0.3 → −1 (error), 0.6 → +1 (error).
        assert_eq!(loss_forward(&x, &labels, &cfg), 2.0);
    }

    #[test]
    fn mse_forward_sums_squared_errors() {
        let x = Tensor4::from_data(1, 2, 1, 1, vec![1.0, -1.0]);
        let labels = Tensor4::from_data(1, 2, 1, 1, vec![0.0, 1.0]);
        let cfg = LossConfig::new(LossType::Mse);
        assert!((loss_forward(&x, &labels, &cfg) - 5.0).abs() < 1e-12);
    }

    // ── Gradient checks, smooth losses on random tensors ───────────────────

    #[test]
    fn softmax_log_gradient_matches_finite_differences() {
        let (x, labels) = categorical_fixture();
        check_gradient(&x, &labels, &LossConfig::new(LossType::SoftmaxLog));
    }

    #[test]
    fn log_gradient_matches_finite_differences() {
        // Probabilities bounded away from 0 so the epsilon guard is inert.
        let (x, labels) = categorical_fixture();
        let x = x.map(|v| 0.1 + 0.4 * (v + 1.0));
        check_gradient(&x, &labels, &LossConfig::new(LossType::Log));
    }

    #[test]
    fn logistic_gradient_matches_finite_differences() {
        let (x, labels) = binary_fixture();
        check_gradient(&x, &labels, &LossConfig::new(LossType::Logistic));
    }

    #[test]
    fn binary_log_gradient_matches_finite_differences() {
        // Scores are probabilities in [0.1, 0.9].
        let (x, labels) = binary_fixture();
        let x = x.map(|v| 0.1 + 0.4 * (v + 1.0));
        check_gradient(&x, &labels, &LossConfig::new(LossType::BinaryLog));
    }

    #[test]
    fn mse_gradient_matches_finite_differences() {
        let (x, labels) = binary_fixture();
        check_gradient(&x, &labels, &LossConfig::new(LossType::Mse));
    }

    #[test]
    fn huber_gradient_matches_finite_differences() {
        // Targets at 3 push |residual| past δ; targets at 0 keep it inside.
        let x = Tensor4::random(2, 2, 2, 2);
        let mut labels = Tensor4::zeros(2, 2, 2, 2);
        for (i, l) in labels.data.iter_mut().enumerate() {
            *l = if i % 2 == 0 { 3.0 } else { 0.0 };
        }
        check_gradient(&x, &labels, &LossConfig::new(LossType::Huber));
    }

    #[test]
    fn mae_gradient_matches_finite_differences_away_from_zero() {
        // Targets at ±3 keep residuals clear of the kink at 0.
        let x = Tensor4::random(2, 2, 2, 1);
        let labels = Tensor4::filled(2, 2, 2, 1, 3.0);
        check_gradient(&x, &labels, &LossConfig::new(LossType::Mae));
    }

    // ── Gradient checks, hinge losses on margin-safe fixtures ──────────────

    #[test]
    fn multi_hinge_gradient_matches_finite_differences() {
        // True-class scores well off the kink at 1.
        let x = Tensor4::from_data(1, 2, 3, 1, vec![0.2, 1.8, -0.4, 0.5, 2.5, -1.0]);
        let labels = Tensor4::from_data(1, 2, 1, 1, vec![1.0, 3.0]);
        check_gradient(&x, &labels, &LossConfig::new(LossType::MultiHinge));
    }

    #[test]
    fn struct_hinge_gradient_matches_finite_differences() {
        // Margins well away from the kink and no competitor ties.
        let x = Tensor4::from_data(1, 2, 3, 1, vec![0.2, 1.8, -0.4, 3.5, 0.5, -1.0]);
        let labels = Tensor4::from_data(1, 2, 1, 1, vec![2.0, 1.0]);
        check_gradient(&x, &labels, &LossConfig::new(LossType::StructHinge));
    }

    #[test]
    fn hinge_gradient_matches_finite_differences() {
        let x = Tensor4::from_data(1, 1, 2, 2, vec![0.5, -1.8, 1.6, -0.2]);
        let mut labels = Tensor4::zeros(1, 1, 2, 2);
        for (i, l) in labels.data.iter_mut().enumerate() {
            *l = if i % 2 == 0 { 1.0 } else { -1.0 };
        }
        check_gradient(&x, &labels, &LossConfig::new(LossType::Hinge));
    }

    // ── Error losses have zero gradient ────────────────────────────────────

    #[test]
    fn error_losses_have_zero_gradient() {
        let (x, labels) = categorical_fixture();
        let grad = loss_backward(&x, &labels, 1.0, &LossConfig::new(LossType::ClassError));
        assert!(grad.data.iter().all(|&g| g == 0.0));

        let (x, labels) = binary_fixture();
        let grad = loss_backward(&x, &labels, 1.0, &LossConfig::new(LossType::BinaryError));
        assert!(grad.data.iter().all(|&g| g == 0.0));
    }

    // ── Weighting, ignore labels, broadcast, upstream gradient ─────────────

    #[test]
    fn loss_scales_linearly_in_instance_weights() {
        let (x, labels) = categorical_fixture();
        let mut cfg = LossConfig::new(LossType::SoftmaxLog);
        let unweighted = loss_forward(&x, &labels, &cfg);

        cfg.instance_weights = Some(Tensor4::filled(x.height, x.width, 1, x.batch, 2.5));
        let weighted = loss_forward(&x, &labels, &cfg);
        assert!((weighted - 2.5 * unweighted).abs() < 1e-9);

        let grad = loss_backward(&x, &labels, 1.0, &cfg);
        let base = loss_backward(&x, &labels, 1.0, &LossConfig::new(LossType::SoftmaxLog));
        for (g, b) in grad.data.iter().zip(base.data.iter()) {
            assert!((g - 2.5 * b).abs() < 1e-9);
        }
    }

    #[test]
    fn upstream_gradient_scales_the_backward_pass() {
        let (x, labels) = categorical_fixture();
        let cfg = LossConfig::new(LossType::SoftmaxLog);
        let unit = loss_backward(&x, &labels, 1.0, &cfg);
        let scaled = loss_backward(&x, &labels, -0.5, &cfg);
        for (s, u) in scaled.data.iter().zip(unit.data.iter()) {
            assert!((s + 0.5 * u).abs() < 1e-12);
        }
    }

    #[test]
    fn ignore_labels_contribute_nothing() {
        let x = Tensor4::from_data(1, 2, 2, 1, vec![2.0, -1.0, 1.0, 0.5]);
        let labeled = Tensor4::from_data(1, 2, 1, 1, vec![1.0, 2.0]);
        let partial = Tensor4::from_data(1, 2, 1, 1, vec![1.0, 0.0]);
        let cfg = LossConfig::new(LossType::SoftmaxLog);

        let only_first = {
            let solo = Tensor4::from_data(1, 1, 2, 1, vec![2.0, 1.0]);
            let solo_label = Tensor4::from_data(1, 1, 1, 1, vec![1.0]);
            loss_forward(&solo, &solo_label, &cfg)
        };
        assert!((loss_forward(&x, &partial, &cfg) - only_first).abs() < 1e-12);
        assert!(loss_forward(&x, &labeled, &cfg) > loss_forward(&x, &partial, &cfg));

        // The ignored location's gradient column stays zero.
        let grad = loss_backward(&x, &partial, 1.0, &cfg);
        assert_eq!(grad.get(0, 1, 0, 0), 0.0);
        assert_eq!(grad.get(0, 1, 1, 0), 0.0);
        assert!(grad.get(0, 0, 0, 0) != 0.0);
    }

    #[test]
    fn per_image_labels_equal_broadcast_per_location_labels() {
        let x = Tensor4::random(3, 3, 4, 2);
        let per_image = Tensor4::from_data(1, 1, 1, 2, vec![2.0, 4.0]);
        let mut per_location = Tensor4::zeros(3, 3, 1, 2);
        for h in 0..3 {
            for w in 0..3 {
                per_location.set(h, w, 0, 0, 2.0);
                per_location.set(h, w, 0, 1, 4.0);
            }
        }
        let cfg = LossConfig::new(LossType::SoftmaxLog);
        let a = loss_forward(&x, &per_image, &cfg);
        let b = loss_forward(&x, &per_location, &cfg);
        assert!((a - b).abs() < 1e-9);

        let ga = loss_backward(&x, &per_image, 1.0, &cfg);
        let gb = loss_backward(&x, &per_location, 1.0, &cfg);
        for (a, b) in ga.data.iter().zip(gb.data.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn class_weights_reweight_per_class_contributions() {
        // Two images, same scores, labels 1 and 2; weight class 2 by zero.
        let x = Tensor4::from_data(1, 1, 2, 2, vec![2.0, 1.0, 2.0, 1.0]);
        let labels = Tensor4::from_data(1, 1, 1, 2, vec![1.0, 2.0]);
        let mut cfg = LossConfig::new(LossType::SoftmaxLog);
        cfg.class_weights = Some(vec![1.0, 0.0]);

        let solo = Tensor4::from_data(1, 1, 2, 1, vec![2.0, 1.0]);
        let solo_label = Tensor4::from_data(1, 1, 1, 1, vec![1.0]);
        let expected = loss_forward(&solo, &solo_label, &LossConfig::new(LossType::SoftmaxLog));
        assert!((loss_forward(&x, &labels, &cfg) - expected).abs() < 1e-12);

        // Gradient for the zero-weighted image vanishes.
        let grad = loss_backward(&x, &labels, 1.0, &cfg);
        assert_eq!(grad.get(0, 0, 0, 1), 0.0);
        assert_eq!(grad.get(0, 0, 1, 1), 0.0);
    }

    #[test]
    fn binary_labels_can_ignore_single_channels() {
        let x = Tensor4::from_data(1, 1, 3, 1, vec![0.5, -0.5, 2.0]);
        let labels = Tensor4::from_data(1, 1, 3, 1, vec![1.0, 0.0, -1.0]);
        let cfg = LossConfig::new(LossType::Logistic);
        let expected = LogisticLoss::loss(0.5, 1.0) + LogisticLoss::loss(2.0, -1.0);
        assert!((loss_forward(&x, &labels, &cfg) - expected).abs() < 1e-12);
        let grad = loss_backward(&x, &labels, 1.0, &cfg);
        assert_eq!(grad.get(0, 0, 1, 0), 0.0);
    }
}
