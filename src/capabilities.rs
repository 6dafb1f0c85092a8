//! Data capabilities of learning algorithms
//!
//! An algorithm declares which attribute types it accepts for features and
//! for the response column, whether it can run without a response and
//! whether missing values are tolerated. Adapters test a host frame against
//! these declarations before any conversion happens.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Display};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frame::HostFrame;

/// Closed set of algorithm-facing attribute types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Numeric,
    Nominal,
    Date,
    String,
}

impl Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::Numeric => "numeric",
            AttributeType::Nominal => "nominal",
            AttributeType::Date => "date",
            AttributeType::String => "string",
        };
        write!(f, "{}", name)
    }
}

/// Declared data capabilities of an algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    attributes: BTreeSet<AttributeType>,
    classes: BTreeSet<AttributeType>,
    no_class: bool,
    missing_values: bool,
    missing_class_values: bool,
    min_instances: usize,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl Capabilities {
    /// Accepts nothing; at least one training row is required
    pub fn new() -> Self {
        Capabilities {
            attributes: BTreeSet::new(),
            classes: BTreeSet::new(),
            no_class: false,
            missing_values: false,
            missing_class_values: false,
            min_instances: 1,
        }
    }

    pub fn with_attribute(mut self, attribute_type: AttributeType) -> Self {
        self.attributes.insert(attribute_type);
        self
    }

    pub fn with_class(mut self, attribute_type: AttributeType) -> Self {
        self.classes.insert(attribute_type);
        self
    }

    /// Allows datasets without a response column
    pub fn with_no_class(mut self) -> Self {
        self.no_class = true;
        self
    }

    pub fn with_missing_values(mut self) -> Self {
        self.missing_values = true;
        self
    }

    pub fn with_missing_class_values(mut self) -> Self {
        self.missing_class_values = true;
        self
    }

    pub fn with_min_instances(mut self, min_instances: usize) -> Self {
        self.min_instances = min_instances;
        self
    }

    pub fn attributes(&self) -> &BTreeSet<AttributeType> {
        &self.attributes
    }

    pub fn classes(&self) -> &BTreeSet<AttributeType> {
        &self.classes
    }

    pub fn handles_attribute(&self, attribute_type: AttributeType) -> bool {
        self.attributes.contains(&attribute_type)
    }

    pub fn handles_class(&self, attribute_type: AttributeType) -> bool {
        self.classes.contains(&attribute_type)
    }

    pub fn allows_no_class(&self) -> bool {
        self.no_class
    }

    pub fn allows_missing_values(&self) -> bool {
        self.missing_values
    }

    pub fn allows_missing_class_values(&self) -> bool {
        self.missing_class_values
    }

    pub fn min_instances(&self) -> usize {
        self.min_instances
    }

    /// Tests `frame` against these capabilities
    pub fn test(&self, frame: &HostFrame) -> Result<()> {
        let class_index = frame.class_index();

        for (i, column) in frame.columns().iter().enumerate() {
            if Some(i) == class_index {
                continue;
            }
            match column.column_type().attribute_type() {
                Some(t) if self.handles_attribute(t) => {}
                _ => {
                    return Err(Error::IncompatibleData(format!(
                        "cannot handle {} attribute '{}' (#{})",
                        column.column_type().type_name(),
                        column.name(),
                        i + 1
                    )))
                }
            }
        }

        match frame.class_column() {
            None if !self.no_class => {
                return Err(Error::IncompatibleData(
                    "a class attribute is required".to_string(),
                ))
            }
            None => {}
            Some(column) => match column.column_type().attribute_type() {
                Some(t) if self.handles_class(t) => {}
                _ => {
                    return Err(Error::IncompatibleData(format!(
                        "cannot handle {} class '{}'",
                        column.column_type().type_name(),
                        column.name()
                    )))
                }
            },
        }

        if !self.missing_values && frame.has_missing_values() {
            return Err(Error::IncompatibleData(
                "cannot handle missing values".to_string(),
            ));
        }
        if !self.missing_class_values && frame.has_missing_class() {
            return Err(Error::IncompatibleData(
                "cannot handle missing class values".to_string(),
            ));
        }
        if frame.num_rows() < self.min_instances {
            return Err(Error::IncompatibleData(format!(
                "not enough training instances: {} (required: {})",
                frame.num_rows(),
                self.min_instances
            )));
        }
        Ok(())
    }
}

fn feature_types(types: &[AttributeType]) -> Capabilities {
    types
        .iter()
        .fold(Capabilities::new(), |caps, t| caps.with_attribute(*t))
}

lazy_static! {
    static ref CAPABILITY_TABLE: HashMap<&'static str, Capabilities> = {
        use AttributeType::*;

        let mut table = HashMap::new();
        let classifier = feature_types(&[Nominal, Numeric, Date])
            .with_missing_values()
            .with_class(Nominal)
            .with_missing_class_values();
        table.insert("svm", classifier.clone());
        table.insert("random_forest", classifier);

        let regressor = feature_types(&[Nominal, Numeric, Date])
            .with_missing_values()
            .with_class(Numeric)
            .with_class(Date)
            .with_missing_class_values();
        table.insert("svr", regressor.clone());
        table.insert("ridge_regression", regressor.clone());
        table.insert("gaussian_process_regression", regressor);
        table.insert(
            "random_forest_regression",
            feature_types(&[Nominal, Numeric, Date])
                .with_missing_values()
                .with_class(Numeric)
                .with_missing_class_values(),
        );

        let clusterer = feature_types(&[Nominal, Numeric]).with_no_class();
        table.insert("kmeans", clusterer.clone());
        table.insert("birch", clusterer.clone());
        table.insert("clarans", clusterer);
        table
    };
}

/// Declared capabilities of a built-in algorithm family
pub fn capabilities_for(family_id: &str) -> Option<Capabilities> {
    CAPABILITY_TABLE.get(family_id).cloned()
}

/// Identifiers with an entry in the capability table, sorted
pub fn known_families() -> Vec<&'static str> {
    let mut ids: Vec<_> = CAPABILITY_TABLE.keys().copied().collect();
    ids.sort_unstable();
    ids
}
