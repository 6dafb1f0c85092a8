//! Adapters for algorithms that learn from single rows after training

use std::fmt::{self, Display};
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::config::AdapterConfig;
use crate::error::{Error, Result};
use crate::frame::Cell;
use crate::model::adapter::{class_code, ModelAdapter};
use crate::model::traits::{Algorithm, Model};

/// [`ModelAdapter`] with incremental single-row updates
#[derive(Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "A: Serialize, A::Model: Serialize",
        deserialize = "A: Deserialize<'de>, A::Model: Deserialize<'de>"
    )
)]
pub struct OnlineUpdateAdapter<A: Algorithm> {
    inner: ModelAdapter<A>,
}

impl<A: Algorithm> OnlineUpdateAdapter<A> {
    pub fn new(algorithm: A) -> Self {
        OnlineUpdateAdapter {
            inner: ModelAdapter::new(algorithm),
        }
    }

    pub fn with_config(algorithm: A, config: AdapterConfig) -> Self {
        OnlineUpdateAdapter {
            inner: ModelAdapter::with_config(algorithm, config),
        }
    }

    pub fn into_inner(self) -> ModelAdapter<A> {
        self.inner
    }

    /// Learns from one labelled host row
    ///
    /// The row is encoded through the stored header, so its class cell must
    /// be present. The adapter stays built; only the model changes.
    pub fn update(&mut self, row: &[Cell]) -> Result<()> {
        let incremental = self.inner.model_capabilities().supports_incremental_learning();
        let trained = self.inner.trained_mut()?;
        if !incremental {
            return Err(Error::UnsupportedOperation(format!(
                "{} does not support incremental learning",
                trained.model.identity()
            )));
        }

        let (x, label) = trained.header.convert_labelled_row(row)?;
        let num_classes = trained
            .header
            .dataset()?
            .response()
            .and_then(|r| r.num_categories())
            .ok_or_else(|| {
                Error::UnsupportedOperation(
                    "incremental learning needs a nominal response".to_string(),
                )
            })?;
        let code = class_code(label, num_classes)?;

        let identity = trained.model.identity();
        let online = trained.model.as_online_mut().ok_or_else(|| {
            Error::UnsupportedOperation(format!(
                "{} declares incremental learning but has no online view",
                identity
            ))
        })?;
        online.learn(&x, code)?;
        log::debug!("{}: learned one row with class {}", identity, code);
        Ok(())
    }
}

impl<A: Algorithm> From<ModelAdapter<A>> for OnlineUpdateAdapter<A> {
    fn from(inner: ModelAdapter<A>) -> Self {
        OnlineUpdateAdapter { inner }
    }
}

impl<A: Algorithm> Deref for OnlineUpdateAdapter<A> {
    type Target = ModelAdapter<A>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<A: Algorithm> DerefMut for OnlineUpdateAdapter<A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<A> Clone for OnlineUpdateAdapter<A>
where
    A: Algorithm + Clone,
    A::Model: Clone,
{
    fn clone(&self) -> Self {
        OnlineUpdateAdapter {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Algorithm> fmt::Debug for OnlineUpdateAdapter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OnlineUpdateAdapter")
            .field(&self.inner)
            .finish()
    }
}

impl<A: Algorithm> Display for OnlineUpdateAdapter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
