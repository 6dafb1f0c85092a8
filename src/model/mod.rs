//! Model adapters
//!
//! External algorithms plug in through [`Algorithm`]; their trained models
//! implement [`Model`] and optionally expose [`SoftClassifier`] and
//! [`OnlineClassifier`] views. [`ModelAdapter`] runs the build / predict
//! lifecycle on host frames, and [`OnlineUpdateAdapter`] adds single-row
//! updates.

pub mod adapter;
pub mod online;
pub mod traits;

pub use self::adapter::ModelAdapter;
pub use self::online::OnlineUpdateAdapter;
pub use self::traits::{
    Algorithm, Model, ModelCapabilities, ModelKind, OnlineClassifier, SoftClassifier,
};
