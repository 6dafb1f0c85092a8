//! Adapter configuration
//!
//! Policies that decide how the conversion layer and the adapters behave at
//! the edges: unseen categories, missing distributions and missing class
//! values. Configurations load from TOML, YAML or JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do when a closed attribute (nominal, date) cannot encode a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnseenCategoryPolicy {
    /// Fail with `UnknownCategoryValue`
    #[default]
    Fail,
    /// Encode the value as missing
    Missing,
}

/// What `predict_distribution` does for models without soft predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionFallback {
    /// Degenerate distribution: 1.0 at the hard prediction, 0.0 elsewhere
    #[default]
    OneHot,
    /// Fail with `UnsupportedOperation`
    Error,
}

fn default_drop_missing_class() -> bool {
    true
}

/// Behavioural policies of a model adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    #[serde(default)]
    pub unseen_category: UnseenCategoryPolicy,
    #[serde(default)]
    pub distribution_fallback: DistributionFallback,
    /// Drop rows with a missing class before supervised training
    #[serde(default = "default_drop_missing_class")]
    pub drop_missing_class: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        AdapterConfig {
            unseen_category: UnseenCategoryPolicy::default(),
            distribution_fallback: DistributionFallback::default(),
            drop_missing_class: default_drop_missing_class(),
        }
    }
}

impl AdapterConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a configuration file; the extension selects the format
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(Error::Format(format!(
                "unrecognised configuration format: {}",
                path.display()
            ))),
        }
    }
}
