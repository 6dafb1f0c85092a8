//! Bridge between host tabular datasets and numeric learning algorithms
//!
//! Host frames (typed columns, rows of cells, an optional class column) are
//! converted into feature matrices for external algorithms, and
//! [`ModelAdapter`] runs the build / predict lifecycle on top of that
//! conversion while keeping a persistable header of the training schema.

// Disable specific warnings
#![allow(clippy::needless_return)]
#![allow(clippy::redundant_closure)]
#![allow(clippy::let_and_return)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_lifetimes)]

pub mod capabilities;
pub mod config;
pub mod convert;
pub mod error;
pub mod family;
pub mod frame;
pub mod header;
pub mod io;
pub mod model;
pub mod na;
pub mod schema;

// Re-export commonly used types
pub use capabilities::{capabilities_for, AttributeType, Capabilities};
pub use config::{AdapterConfig, DistributionFallback, UnseenCategoryPolicy};
pub use convert::DatasetConverter;
pub use error::{Error, Result};
pub use family::AlgorithmFamily;
pub use frame::{Cell, HostColumn, HostColumnType, HostFrame, Instance, Value};
pub use header::DatasetHeader;
pub use model::{
    Algorithm, Model, ModelAdapter, ModelCapabilities, ModelKind, OnlineClassifier,
    OnlineUpdateAdapter, SoftClassifier,
};
pub use na::{is_missing, MISSING_VALUE, NA};
pub use schema::{Attribute, AttributeKind, Dataset};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
