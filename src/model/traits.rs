//! Traits implemented by external algorithms and their trained models

use serde::{Deserialize, Serialize};

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::schema::Dataset;

/// What a trained model predicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Class codes of a nominal response
    Classifier,
    /// Numeric response values
    Regressor,
    /// Cluster indices, no response
    Clusterer,
}

/// Operations a trained model supports beyond plain `predict`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    distribution: bool,
    incremental: bool,
}

impl ModelCapabilities {
    /// Hard predictions only
    pub fn predict_only() -> Self {
        ModelCapabilities::default()
    }

    pub fn with_distribution(mut self) -> Self {
        self.distribution = true;
        self
    }

    pub fn with_incremental_learning(mut self) -> Self {
        self.incremental = true;
        self
    }

    pub fn supports_distribution(&self) -> bool {
        self.distribution
    }

    pub fn supports_incremental_learning(&self) -> bool {
        self.incremental
    }
}

/// A trained, opaque model
pub trait Model {
    /// Predicts one encoded feature vector
    ///
    /// Classifiers return a class code, regressors a response value and
    /// clusterers a cluster index.
    fn predict(&self, x: &[f64]) -> Result<f64>;

    /// Type or identity of the model, shown by `describe`
    fn identity(&self) -> String;

    /// Soft-prediction view of the model, if it has one
    fn as_soft(&self) -> Option<&dyn SoftClassifier> {
        None
    }

    /// Incremental-learning view of the model, if it has one
    fn as_online_mut(&mut self) -> Option<&mut dyn OnlineClassifier> {
        None
    }

    /// Number of clusters found by a partitioning clusterer
    fn num_clusters(&self) -> Option<usize> {
        None
    }
}

/// Classifier that can report per-class probabilities
pub trait SoftClassifier {
    /// Posterior probabilities, one entry per class code
    fn predict_proba(&self, x: &[f64]) -> Result<Vec<f64>>;
}

/// Classifier that can learn from single rows after training
pub trait OnlineClassifier {
    fn learn(&mut self, x: &[f64], label: usize) -> Result<()>;
}

/// An external learning algorithm with its configuration
pub trait Algorithm {
    type Model: Model;

    /// Family identifier
    fn id(&self) -> String;

    fn kind(&self) -> ModelKind;

    /// Data the algorithm accepts for training
    fn capabilities(&self) -> Capabilities;

    /// Operations the trained models support
    fn model_capabilities(&self) -> ModelCapabilities {
        ModelCapabilities::predict_only()
    }

    /// Identifier followed by the configured options
    fn command_line(&self) -> String {
        self.id()
    }

    /// Trains a model on a converted dataset
    fn train(&self, data: &Dataset) -> Result<Self::Model>;
}
