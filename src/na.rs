use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// Reserved numeric encoding of a missing value.
///
/// Every attribute type encodes a missing cell as NaN, and algorithms
/// receiving it must treat it as "missing", never as a category code.
pub const MISSING_VALUE: f64 = f64::NAN;

/// Returns whether an encoded value is the missing-value sentinel
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// A host-side value that may be missing (NA, Not Available)
///
/// Host cells are typed through their column, so a cell only records
/// whether a value is present.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum NA<T> {
    /// A present value
    Value(T),
    /// A missing value
    NA,
}

impl<T> NA<T> {
    /// Checks whether the value is missing
    pub fn is_na(&self) -> bool {
        match self {
            NA::Value(_) => false,
            NA::NA => true,
        }
    }

    /// Checks whether a value is present
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// Returns the value, if present
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }

    /// Maps the present value, keeping NA as NA
    pub fn map<U, F>(&self, f: F) -> NA<U>
    where
        F: FnOnce(&T) -> U,
    {
        match self {
            NA::Value(v) => NA::Value(f(v)),
            NA::NA => NA::NA,
        }
    }
}

impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

impl<T> From<NA<T>> for Option<T> {
    fn from(na: NA<T>) -> Self {
        match na {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

impl<T: Debug> Debug for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{:?}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            // ARFF marker for a missing value
            NA::NA => write!(f, "?"),
        }
    }
}
