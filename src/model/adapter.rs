//! Generic lifecycle wrapper around an external algorithm
//!
//! A [`ModelAdapter`] is either empty or holds a dataset header together with
//! the model trained on the dataset that header describes. The two are set in
//! one assignment at the end of a successful build and cleared together, so
//! a failed build never leaves half of the pair behind.

use std::borrow::Cow;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::config::{AdapterConfig, DistributionFallback};
use crate::convert::DatasetConverter;
use crate::error::{Error, Result};
use crate::frame::{Cell, HostFrame};
use crate::header::DatasetHeader;
use crate::model::traits::{Algorithm, Model, ModelCapabilities, ModelKind};
use crate::na::is_missing;

/// Header and model of a successful build
#[derive(Clone, Serialize, Deserialize)]
pub(crate) struct Trained<M> {
    pub(crate) header: DatasetHeader,
    pub(crate) model: M,
}

/// Build / reset / predict lifecycle for one external algorithm
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "A: Serialize, A::Model: Serialize",
    deserialize = "A: Deserialize<'de>, A::Model: Deserialize<'de>"
))]
pub struct ModelAdapter<A: Algorithm> {
    algorithm: A,
    #[serde(default)]
    config: AdapterConfig,
    model_capabilities: ModelCapabilities,
    state: Option<Trained<A::Model>>,
}

impl<A: Algorithm> ModelAdapter<A> {
    pub fn new(algorithm: A) -> Self {
        Self::with_config(algorithm, AdapterConfig::default())
    }

    /// Creates an empty adapter; the model capabilities are captured here
    pub fn with_config(algorithm: A, config: AdapterConfig) -> Self {
        let model_capabilities = algorithm.model_capabilities();
        ModelAdapter {
            algorithm,
            config,
            model_capabilities,
            state: None,
        }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn model_capabilities(&self) -> ModelCapabilities {
        self.model_capabilities
    }

    /// Drops the header and the model
    pub fn reset(&mut self) {
        self.state = None;
    }

    pub fn is_built(&self) -> bool {
        self.state.is_some()
    }

    pub fn header(&self) -> Option<&DatasetHeader> {
        self.state.as_ref().map(|t| &t.header)
    }

    pub fn model(&self) -> Option<&A::Model> {
        self.state.as_ref().map(|t| &t.model)
    }

    pub(crate) fn trained_mut(&mut self) -> Result<&mut Trained<A::Model>> {
        self.state.as_mut().ok_or(Error::NotBuilt)
    }

    /// Trains the algorithm on `frame`
    ///
    /// The adapter is reset first. The frame is tested against the
    /// algorithm's capabilities before it is converted; rows with a missing
    /// class are dropped when the configuration asks for it.
    pub fn build(&mut self, frame: &HostFrame) -> Result<()> {
        self.reset();
        let id = self.algorithm.id();

        self.algorithm.capabilities().test(frame)?;

        let frame = if self.config.drop_missing_class && frame.has_missing_class() {
            let mut copy = frame.clone();
            let dropped = copy.delete_with_missing_class();
            log::warn!(
                "{}: dropped {} rows with a missing class from '{}'",
                id,
                dropped,
                frame.relation()
            );
            Cow::Owned(copy)
        } else {
            Cow::Borrowed(frame)
        };

        let converter = DatasetConverter::new(self.config.unseen_category);
        let dataset = converter.convert_dataset(&frame)?;
        let model = self.algorithm.train(&dataset).map_err(|e| match e {
            Error::TrainingFailed { .. } => e,
            other => Error::training(id.clone(), other.to_string()),
        })?;
        let header = DatasetHeader::new(&dataset, &frame, converter);

        log::info!(
            "{}: built {} on '{}' ({} rows)",
            id,
            model.identity(),
            dataset.relation(),
            dataset.num_rows()
        );
        self.state = Some(Trained { header, model });
        Ok(())
    }

    /// Predicts one host row typed by the training structure
    pub fn predict(&mut self, row: &[Cell]) -> Result<f64> {
        let trained = self.trained_mut()?;
        let x = trained.header.convert_row(row)?;
        trained.model.predict(&x)
    }

    /// Class distribution for one host row, indexed by class code
    ///
    /// Models without soft predictions get the configured fallback: a
    /// one-hot vector at the hard prediction, or `UnsupportedOperation`.
    pub fn predict_distribution(&mut self, row: &[Cell]) -> Result<Vec<f64>> {
        if self.algorithm.kind() != ModelKind::Classifier {
            return Err(Error::UnsupportedOperation(format!(
                "{} is not a classifier and has no class distribution",
                self.algorithm.id()
            )));
        }
        let soft = self.model_capabilities.supports_distribution();
        let fallback = self.config.distribution_fallback;
        let trained = self.state.as_mut().ok_or(Error::NotBuilt)?;

        let x = trained.header.convert_row(row)?;
        let num_classes = trained
            .header
            .dataset()?
            .response()
            .and_then(|r| r.num_categories())
            .ok_or_else(|| Error::Consistency("response attribute is not nominal".to_string()))?;

        if soft {
            let model = trained.model.as_soft().ok_or_else(|| {
                Error::UnsupportedOperation(format!(
                    "{} declares class distributions but has no soft view",
                    trained.model.identity()
                ))
            })?;
            let distribution = model.predict_proba(&x)?;
            if distribution.len() != num_classes {
                return Err(Error::LengthMismatch {
                    expected: num_classes,
                    actual: distribution.len(),
                });
            }
            return Ok(distribution);
        }

        match fallback {
            DistributionFallback::Error => Err(Error::UnsupportedOperation(format!(
                "{} does not produce class distributions",
                trained.model.identity()
            ))),
            DistributionFallback::OneHot => {
                let code = class_code(trained.model.predict(&x)?, num_classes)?;
                log::warn!(
                    "{} has no class distribution; using one-hot vector at class {}",
                    trained.model.identity(),
                    code
                );
                let mut distribution = vec![0.0; num_classes];
                distribution[code] = 1.0;
                Ok(distribution)
            }
        }
    }

    /// Predicts one host row and decodes the result into the host label space
    pub fn predict_label(&mut self, row: &[Cell]) -> Result<String> {
        if self.algorithm.kind() == ModelKind::Clusterer {
            return Err(Error::UnsupportedOperation(format!(
                "{} has no response attribute to decode into",
                self.algorithm.id()
            )));
        }
        let trained = self.trained_mut()?;
        let x = trained.header.convert_row(row)?;
        let value = trained.model.predict(&x)?;
        trained.header.decode_label(value)
    }

    /// Number of clusters found by a clusterer
    pub fn number_of_clusters(&self) -> Result<usize> {
        let trained = self.state.as_ref().ok_or(Error::NotBuilt)?;
        if self.algorithm.kind() != ModelKind::Clusterer {
            return Err(Error::UnsupportedOperation(format!(
                "{} is not a clusterer",
                self.algorithm.id()
            )));
        }
        trained.model.num_clusters().ok_or_else(|| {
            Error::UnsupportedOperation(format!(
                "{} cannot report its number of clusters",
                trained.model.identity()
            ))
        })
    }

    /// Command line followed by the model identity, or a not-built notice
    pub fn describe(&self) -> String {
        let body = match &self.state {
            None => "No model built yet!".to_string(),
            Some(trained) => trained.model.identity(),
        };
        format!("{}\n{}", self.algorithm.command_line(), body)
    }
}

/// Validates a predicted or observed class value as a code below `num_classes`
pub(crate) fn class_code(value: f64, num_classes: usize) -> Result<usize> {
    if is_missing(value) || value.fract() != 0.0 || value < 0.0 {
        return Err(Error::Cast(format!("{} is not a class code", value)));
    }
    let code = value as usize;
    if code >= num_classes {
        return Err(Error::IndexOutOfBounds {
            index: code,
            size: num_classes,
        });
    }
    Ok(code)
}

impl<A> Clone for ModelAdapter<A>
where
    A: Algorithm + Clone,
    A::Model: Clone,
{
    fn clone(&self) -> Self {
        ModelAdapter {
            algorithm: self.algorithm.clone(),
            config: self.config,
            model_capabilities: self.model_capabilities,
            state: self.state.clone(),
        }
    }
}

impl<A: Algorithm> fmt::Debug for ModelAdapter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("algorithm", &self.algorithm.id())
            .field("config", &self.config)
            .field("model_capabilities", &self.model_capabilities)
            .field("built", &self.is_built())
            .finish()
    }
}

impl<A: Algorithm> Display for ModelAdapter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
