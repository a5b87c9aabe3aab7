use serde::{Serialize, Deserialize};

use crate::loss::loss_type::LossType;
use crate::math::tensor::Tensor4;

/// Configuration bag for one `loss_forward` / `loss_backward` call.
///
/// # Fields
/// - `loss_type`        — which loss to compute
/// - `instance_weights` — optional per-instance weights; shape must be
///                        per-image `(1, 1, 1, N)`, per-location
///                        `(H, W, 1, N)`, or (for binary/regression losses)
///                        the full prediction shape `(H, W, C, N)`
/// - `class_weights`    — optional per-category weights, length `C`
/// - `threshold`        — decision threshold for `binary_error`
/// - `top_k`            — k for `class_error` (1 = plain argmax error)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LossConfig {
    pub loss_type: LossType,
    #[serde(default)]
    pub instance_weights: Option<Tensor4>,
    #[serde(default)]
    pub class_weights: Option<Vec<f64>>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    1
}

impl LossConfig {
    /// Creates a minimal config with no weighting, threshold 0 and top-1 error.
    pub fn new(loss_type: LossType) -> Self {
        LossConfig {
            loss_type,
            instance_weights: None,
            class_weights: None,
            threshold: 0.0,
            top_k: 1,
        }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a config from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<LossConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}

impl Default for LossConfig {
    fn default() -> Self {
        LossConfig::new(LossType::SoftmaxLog)
    }
}
