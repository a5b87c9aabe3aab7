pub mod loss_type;
pub mod config;
pub mod weights;
pub mod dispatch;

pub mod class_error;
pub mod log;
pub mod softmax_log;
pub mod multi_hinge;
pub mod struct_hinge;
pub mod binary_error;
pub mod binary_log;
pub mod logistic;
pub mod hinge;
pub mod mse;
pub mod mae;
pub mod huber;

pub use loss_type::{LossError, LossType};
pub use config::LossConfig;
pub use dispatch::{loss_backward, loss_forward};
