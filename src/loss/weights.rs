use crate::loss::config::LossConfig;
use crate::math::tensor::Tensor4;

/// Checks every shape invariant between predictions, labels and the
/// configuration. Violations are programming errors and panic.
///
/// Accepted label layouts:
/// - categorical: `(1, 1, 1, N)` (one label per image, broadcast over space)
///   or `(H, W, 1, N)` (one label per location); values are 1-based class
///   indices, 0 = ignore
/// - binary: full prediction shape `(H, W, C, N)`; values ±1, 0 = ignore
/// - regression: full prediction shape, arbitrary target values
///
/// Accepted instance-weight layouts: per-image `(1, 1, 1, N)`, per-location
/// `(H, W, 1, N)`, or the full prediction shape for binary/regression losses.
pub fn validate(x: &Tensor4, labels: &Tensor4, cfg: &LossConfig) {
    assert_eq!(labels.batch, x.batch, "label batch must match prediction batch");

    let loss = cfg.loss_type;
    if loss.is_categorical() {
        assert_eq!(labels.channels, 1, "categorical labels must have a single channel");
        assert!(
            spatial_match(labels, x) || per_image(labels),
            "categorical labels must be (H, W, 1, N) or (1, 1, 1, N)"
        );
        let categories = x.channels as f64;
        for &l in &labels.data {
            assert!(
                l.fract() == 0.0 && l >= 0.0 && l <= categories,
                "categorical label {l} out of range 0..={categories}"
            );
        }
    } else if loss.is_binary() {
        assert!(
            labels.same_shape(x),
            "binary labels must match the prediction shape element-wise"
        );
        for &l in &labels.data {
            assert!(
                l == 1.0 || l == -1.0 || l == 0.0,
                "binary label {l} must be +1, -1 or 0 (ignore)"
            );
        }
    } else {
        assert!(
            labels.same_shape(x),
            "regression targets must match the prediction shape element-wise"
        );
    }

    if let Some(ref w) = cfg.instance_weights {
        assert_eq!(w.batch, x.batch, "instance-weight batch must match prediction batch");
        let full_ok = !loss.is_categorical() && w.same_shape(x);
        let location_ok = w.channels == 1 && spatial_match(w, x);
        let image_ok = per_image(w) && w.channels == 1;
        assert!(
            full_ok || location_ok || image_ok,
            "instance weights must be (1, 1, 1, N), (H, W, 1, N) or the full prediction shape"
        );
    }

    if let Some(ref cw) = cfg.class_weights {
        assert_eq!(
            cw.len(),
            x.channels,
            "class weights must have one entry per prediction channel"
        );
    }
}

/// Label for the instance at (h, w, n), honoring per-image broadcast.
pub fn label_at(labels: &Tensor4, h: usize, w: usize, k: usize, n: usize) -> f64 {
    if per_image(labels) {
        labels.get(0, 0, k, n)
    } else {
        labels.get(h, w, k, n)
    }
}

/// Combined instance weight for the element at (h, w, k, n), classified as
/// `class`: user-supplied weight (broadcast as needed) times the class
/// weight. The zero weight of ignore labels is applied by the caller, which
/// skips those instances outright.
pub fn instance_weight(cfg: &LossConfig, h: usize, w: usize, k: usize, n: usize, class: usize) -> f64 {
    let mut weight = 1.0;
    if let Some(ref iw) = cfg.instance_weights {
        weight *= if iw.channels > 1 {
            iw.get(h, w, k, n)
        } else if per_image(iw) {
            iw.get(0, 0, 0, n)
        } else {
            iw.get(h, w, 0, n)
        };
    }
    if let Some(ref cw) = cfg.class_weights {
        weight *= cw[class];
    }
    weight
}

fn spatial_match(a: &Tensor4, b: &Tensor4) -> bool {
    a.height == b.height && a.width == b.width
}

fn per_image(t: &Tensor4) -> bool {
    t.height == 1 && t.width == 1
}
