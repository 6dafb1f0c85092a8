use thiserror::Error;

/// Error type for schema conversion and model adapters
#[derive(Error, Debug)]
pub enum Error {
    /// `index` is the zero-based column position; messages show it one-based
    #[error("unsupported attribute type (#{}/{}): {}", .index + 1, .name, .type_name)]
    UnsupportedAttributeType {
        index: usize,
        name: String,
        type_name: String,
    },

    #[error("unknown value '{value}' for attribute '{attribute}'")]
    UnknownCategoryValue { attribute: String, value: String },

    #[error("incompatible data: {0}")]
    IncompatibleData(String),

    #[error("no model built yet")]
    NotBuilt,

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("training failed ({algorithm}): {message}")]
    TrainingFailed { algorithm: String, message: String },

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("type cast error: {0}")]
    Cast(String),

    #[error("data consistency error: {0}")]
    Consistency(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("data format error: {0}")]
    Format(String),

    #[error("I/O error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),

    #[error("YAML error")]
    Yaml(#[source] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a training failure reported by an external algorithm
    pub fn training(algorithm: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TrainingFailed {
            algorithm: algorithm.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Toml(err.to_string())
    }
}
