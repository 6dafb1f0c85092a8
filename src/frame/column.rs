use serde::{Deserialize, Serialize};

use crate::capabilities::AttributeType;

/// Date format used when a date column does not declare one
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Type of a host column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostColumnType {
    /// Real-valued column
    Numeric,
    /// Categorical column with a fixed, ordered label list
    Nominal { labels: Vec<String> },
    /// Date column; cells are text in `format` or epoch milliseconds
    Date {
        #[serde(default = "default_date_format")]
        format: String,
    },
    /// Free-text column
    String,
    /// Nested relation; has no algorithm-facing counterpart
    Relational,
}

impl HostColumnType {
    /// Name used in diagnostics and in the ARFF-style header
    pub fn type_name(&self) -> &'static str {
        match self {
            HostColumnType::Numeric => "numeric",
            HostColumnType::Nominal { .. } => "nominal",
            HostColumnType::Date { .. } => "date",
            HostColumnType::String => "string",
            HostColumnType::Relational => "relational",
        }
    }

    /// Attribute type this column maps to, if any
    pub fn attribute_type(&self) -> Option<AttributeType> {
        match self {
            HostColumnType::Numeric => Some(AttributeType::Numeric),
            HostColumnType::Nominal { .. } => Some(AttributeType::Nominal),
            HostColumnType::Date { .. } => Some(AttributeType::Date),
            HostColumnType::String => Some(AttributeType::String),
            HostColumnType::Relational => None,
        }
    }
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_weight() -> f64 {
    1.0
}

/// A named, typed host column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostColumn {
    name: String,
    #[serde(default = "default_weight")]
    weight: f64,
    column_type: HostColumnType,
}

impl HostColumn {
    /// Creates a column of the given type with weight 1.0
    pub fn new(name: impl Into<String>, column_type: HostColumnType) -> Self {
        HostColumn {
            name: name.into(),
            weight: default_weight(),
            column_type,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, HostColumnType::Numeric)
    }

    /// Creates a nominal column; label order defines the category codes
    pub fn nominal<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            HostColumnType::Nominal {
                labels: labels.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Creates a date column with a chrono `strftime`-style format
    ///
    /// Fields missing from `format` parse as January, the first and midnight;
    /// the format needs a year. Encoded values keep only what the format
    /// carries, so `%Y-%m-%d` drops the time of day.
    pub fn date(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self::new(
            name,
            HostColumnType::Date {
                format: format.into(),
            },
        )
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, HostColumnType::String)
    }

    pub fn relational(name: impl Into<String>) -> Self {
        Self::new(name, HostColumnType::Relational)
    }

    /// Sets the column weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn column_type(&self) -> &HostColumnType {
        &self.column_type
    }

    /// Nominal labels, or an empty slice for other column types
    pub fn labels(&self) -> &[String] {
        match &self.column_type {
            HostColumnType::Nominal { labels } => labels,
            _ => &[],
        }
    }
}
