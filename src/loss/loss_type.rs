use serde::{Serialize, Deserialize};
use std::fmt;

/// Error returned when a loss name string does not match any known loss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LossError {
    UnknownLoss(String),
}

impl fmt::Display for LossError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossError::UnknownLoss(name) => write!(f, "unknown loss type: `{name}`"),
        }
    }
}

impl std::error::Error for LossError {}

/// Selects which loss function `loss_forward` / `loss_backward` compute.
///
/// Categorical losses expect one class label per prediction *vector* (the
/// channel dimension holds one score per category):
/// - `ClassError`  — 0/1 top-k classification error; zero gradient.
/// - `Log`         — negative log-likelihood of pre-normalized probabilities.
/// - `SoftmaxLog`  — softmax + negative log-likelihood of raw scores.
/// - `MultiHinge`  — hinge on the true-class score.
/// - `StructHinge` — structured hinge against the best competing class.
///
/// Binary losses expect one ±1 label per prediction *scalar* (each channel is
/// an independent attribute):
/// - `BinaryError` — 0/1 error of sign(x − threshold); zero gradient.
/// - `BinaryLog`   — negative log-likelihood of probabilities in [0, 1].
/// - `Logistic`    — log(1 + exp(−c·x)).
/// - `Hinge`       — max(0, 1 − c·x).
///
/// Regression losses expect one target per prediction scalar:
/// - `Mse`   — squared error; `Mae` — absolute error; `Huber` — Huber (δ=1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    ClassError,
    Log,
    SoftmaxLog,
    MultiHinge,
    StructHinge,
    BinaryError,
    BinaryLog,
    Logistic,
    Hinge,
    Mse,
    Mae,
    Huber,
}

impl LossType {
    /// Parses a loss name as it appears in configuration files.
    pub fn from_name(name: &str) -> Result<LossType, LossError> {
        match name {
            "class_error" => Ok(LossType::ClassError),
            "log" => Ok(LossType::Log),
            "softmax_log" => Ok(LossType::SoftmaxLog),
            "multi_hinge" => Ok(LossType::MultiHinge),
            "struct_hinge" => Ok(LossType::StructHinge),
            "binary_error" => Ok(LossType::BinaryError),
            "binary_log" => Ok(LossType::BinaryLog),
            "logistic" => Ok(LossType::Logistic),
            "hinge" => Ok(LossType::Hinge),
            "mse" => Ok(LossType::Mse),
            "mae" => Ok(LossType::Mae),
            "huber" => Ok(LossType::Huber),
            other => Err(LossError::UnknownLoss(other.to_string())),
        }
    }

    /// The configuration-file name of this loss (inverse of `from_name`).
    pub fn name(&self) -> &'static str {
        match self {
            LossType::ClassError => "class_error",
            LossType::Log => "log",
            LossType::SoftmaxLog => "softmax_log",
            LossType::MultiHinge => "multi_hinge",
            LossType::StructHinge => "struct_hinge",
            LossType::BinaryError => "binary_error",
            LossType::BinaryLog => "binary_log",
            LossType::Logistic => "logistic",
            LossType::Hinge => "hinge",
            LossType::Mse => "mse",
            LossType::Mae => "mae",
            LossType::Huber => "huber",
        }
    }

    /// True for losses that take one categorical label per channel vector.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            LossType::ClassError
                | LossType::Log
                | LossType::SoftmaxLog
                | LossType::MultiHinge
                | LossType::StructHinge
        )
    }

    /// True for losses that take one ±1 label per prediction scalar.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            LossType::BinaryError | LossType::BinaryLog | LossType::Logistic | LossType::Hinge
        )
    }

    /// True for losses that take one regression target per prediction scalar.
    pub fn is_regression(&self) -> bool {
        matches!(self, LossType::Mse | LossType::Mae | LossType::Huber)
    }
}
