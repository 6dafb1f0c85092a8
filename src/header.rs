//! Persistable dataset headers
//!
//! A [`DatasetHeader`] keeps two things: the host-side structure of the
//! training frame (always serialisable) and a zero-row dataset snapshot
//! derived from it. Only the structure is persisted; after loading, the
//! snapshot is rebuilt on first access by converting the structure again.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::convert::DatasetConverter;
use crate::error::{Error, Result};
use crate::frame::{Cell, HostFrame};
use crate::schema::Dataset;

/// Derived zero-row dataset, never persisted
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    slot: Option<Dataset>,
}

impl SnapshotCache {
    fn filled(dataset: Dataset) -> Self {
        SnapshotCache {
            slot: Some(dataset),
        }
    }

    pub fn is_filled(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns the snapshot, building it with `rebuild` if vacant
    ///
    /// A failed rebuild leaves the cache vacant, so the next call retries.
    fn get_or_try_fill<F>(&mut self, rebuild: F) -> Result<&mut Dataset>
    where
        F: FnOnce() -> Result<Dataset>,
    {
        let dataset = match self.slot.take() {
            Some(dataset) => dataset,
            None => rebuild()?,
        };
        Ok(self.slot.insert(dataset))
    }
}

/// Schema-only, re-creatable snapshot of a training dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetHeader {
    description: HostFrame,
    #[serde(default)]
    converter: DatasetConverter,
    #[serde(skip)]
    snapshot: SnapshotCache,
}

impl DatasetHeader {
    /// Captures the header of a freshly converted dataset
    ///
    /// `frame` is the host frame `dataset` was converted from; only its
    /// structure is kept.
    pub fn new(dataset: &Dataset, frame: &HostFrame, converter: DatasetConverter) -> Self {
        DatasetHeader {
            description: frame.structure(),
            converter,
            snapshot: SnapshotCache::filled(dataset.head(0)),
        }
    }

    /// Creates a header from a host structure alone; the snapshot starts vacant
    pub fn from_description(frame: &HostFrame, converter: DatasetConverter) -> Self {
        DatasetHeader {
            description: frame.structure(),
            converter,
            snapshot: SnapshotCache::default(),
        }
    }

    /// The zero-row dataset, rebuilt from the host structure if needed
    pub fn dataset(&mut self) -> Result<&mut Dataset> {
        materialize(&self.description, self.converter, &mut self.snapshot)
    }

    /// Encodes the feature cells of a host row typed by the preserved structure
    pub fn convert_row(&mut self, row: &[Cell]) -> Result<Vec<f64>> {
        let dataset = materialize(&self.description, self.converter, &mut self.snapshot)?;
        let instance = self.description.with_row(row)?;
        self.converter.convert_row(&instance, dataset)
    }

    /// Encodes the feature cells and the class cell of a host row
    pub fn convert_labelled_row(&mut self, row: &[Cell]) -> Result<(Vec<f64>, f64)> {
        let dataset = materialize(&self.description, self.converter, &mut self.snapshot)?;
        let instance = self.description.with_row(row)?;
        let features = self.converter.convert_row(&instance, dataset)?;
        let label = self.converter.convert_label(&instance, dataset)?;
        Ok((features, label))
    }

    /// Decodes a response value back into the host label space
    pub fn decode_label(&mut self, code: f64) -> Result<String> {
        let dataset = self.dataset()?;
        let relation = dataset.relation().to_string();
        dataset
            .response()
            .ok_or_else(|| Error::Consistency(format!("dataset '{}' has no response attribute", relation)))?
            .label_of(code)
    }

    /// Whether the snapshot is currently present
    pub fn is_materialized(&self) -> bool {
        self.snapshot.is_filled()
    }

    /// The preserved host structure
    pub fn instances(&self) -> &HostFrame {
        &self.description
    }

    pub fn converter(&self) -> DatasetConverter {
        self.converter
    }
}

fn materialize<'a>(
    description: &HostFrame,
    converter: DatasetConverter,
    snapshot: &'a mut SnapshotCache,
) -> Result<&'a mut Dataset> {
    snapshot.get_or_try_fill(|| match converter.convert_dataset(description) {
        Ok(dataset) => {
            log::info!(
                "reconstructed dataset header '{}' from its host structure",
                description.relation()
            );
            Ok(dataset)
        }
        Err(e) => {
            log::error!(
                "failed to reconstruct dataset header '{}': {}",
                description.relation(),
                e
            );
            Err(e)
        }
    })
}

impl Display for DatasetHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}
