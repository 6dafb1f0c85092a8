use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::frame::column::{HostColumn, HostColumnType};
use crate::na::NA;
use crate::schema::date;

/// A present host value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A host cell; `NA::NA` marks a missing value
pub type Cell = NA<Value>;

impl From<f64> for NA<Value> {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            NA::NA
        } else {
            NA::Value(Value::Number(value))
        }
    }
}

impl From<&str> for NA<Value> {
    fn from(value: &str) -> Self {
        NA::Value(Value::Text(value.to_string()))
    }
}

impl From<String> for NA<Value> {
    fn from(value: String) -> Self {
        NA::Value(Value::Text(value))
    }
}

/// Checks that a cell is representable in its column
pub(crate) fn check_cell(column: &HostColumn, cell: &Cell) -> Result<()> {
    let value = match cell {
        NA::NA => return Ok(()),
        NA::Value(v) => v,
    };
    match (column.column_type(), value) {
        (HostColumnType::Numeric, Value::Number(_)) => Ok(()),
        (HostColumnType::Nominal { labels }, Value::Text(s)) => {
            if labels.iter().any(|l| l == s) {
                Ok(())
            } else {
                Err(Error::UnknownCategoryValue {
                    attribute: column.name().to_string(),
                    value: s.clone(),
                })
            }
        }
        (HostColumnType::Nominal { labels }, Value::Number(v)) => {
            nominal_index(*v, labels.len(), column.name()).map(|_| ())
        }
        (HostColumnType::Date { .. }, _) => Ok(()),
        (HostColumnType::String, Value::Text(_)) => Ok(()),
        (HostColumnType::Relational, _) => Ok(()),
        (column_type, value) => Err(Error::Cast(format!(
            "cannot store {:?} in {} column '{}'",
            value,
            column_type.type_name(),
            column.name()
        ))),
    }
}

fn nominal_index(value: f64, size: usize, name: &str) -> Result<usize> {
    if value.fract() != 0.0 || value < 0.0 || value >= size as f64 {
        return Err(Error::Cast(format!(
            "{} is not a label index of nominal column '{}'",
            value, name
        )));
    }
    Ok(value as usize)
}

/// String form of a cell as seen through its column; `None` if missing
pub(crate) fn string_form(column: &HostColumn, cell: &Cell) -> Result<Option<String>> {
    let value = match cell {
        NA::NA => return Ok(None),
        NA::Value(v) => v,
    };
    let text = match (column.column_type(), value) {
        (HostColumnType::Nominal { labels }, Value::Number(v)) => {
            labels[nominal_index(*v, labels.len(), column.name())?].clone()
        }
        (HostColumnType::Date { format }, Value::Number(millis)) => {
            date::format_millis(*millis, format)?
        }
        (_, Value::Text(s)) => s.clone(),
        (_, Value::Number(v)) => v.to_string(),
    };
    Ok(Some(text))
}
