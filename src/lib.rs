pub mod math;
pub mod loss;

// Convenience re-exports
pub use math::tensor::Tensor4;
pub use loss::config::LossConfig;
pub use loss::loss_type::{LossError, LossType};
pub use loss::dispatch::{loss_backward, loss_forward};
