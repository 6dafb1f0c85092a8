//! Algorithm-facing schema: attributes and numeric datasets

pub mod attribute;
pub mod dataset;
pub mod date;

pub use self::attribute::{Attribute, AttributeKind, NominalTable, StringTable};
pub use self::dataset::Dataset;
