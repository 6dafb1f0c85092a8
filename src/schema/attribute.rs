use std::collections::HashMap;

use crate::capabilities::AttributeType;
use crate::config::UnseenCategoryPolicy;
use crate::error::{Error, Result};
use crate::frame::HostColumn;
use crate::na::{is_missing, MISSING_VALUE};
use crate::schema::date;

/// Closed label list of a nominal attribute
///
/// The code of a label is its position in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalTable {
    labels: Vec<String>,
    codes: HashMap<String, usize>,
}

impl NominalTable {
    /// Builds the table in the given order; duplicate labels are rejected
    pub fn new(labels: Vec<String>) -> Result<Self> {
        let mut codes = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if codes.insert(label.clone(), i).is_some() {
                return Err(Error::Consistency(format!(
                    "duplicate nominal label '{}'",
                    label
                )));
            }
        }
        Ok(NominalTable { labels, codes })
    }

    pub fn code_of(&self, label: &str) -> Option<usize> {
        self.codes.get(label).copied()
    }

    pub fn label(&self, code: usize) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Open-world value table of a string attribute (first seen, next code)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringTable {
    values: Vec<String>,
    codes: HashMap<String, usize>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code of `value`, appending it if unseen
    pub fn intern(&mut self, value: &str) -> usize {
        if let Some(&code) = self.codes.get(value) {
            return code;
        }
        let code = self.values.len();
        self.values.push(value.to_string());
        self.codes.insert(value.to_string(), code);
        code
    }

    pub fn value(&self, code: usize) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Type-specific part of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    Numeric,
    Nominal(NominalTable),
    Date { format: String },
    String(StringTable),
}

/// Algorithm-facing description of one column
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    weight: f64,
    kind: AttributeKind,
}

impl Attribute {
    pub fn new(name: impl Into<String>, weight: f64, kind: AttributeKind) -> Self {
        Attribute {
            name: name.into(),
            weight,
            kind,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, 1.0, AttributeKind::Numeric)
    }

    pub fn nominal<I, S>(name: impl Into<String>, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = NominalTable::new(labels.into_iter().map(Into::into).collect())?;
        Ok(Self::new(name, 1.0, AttributeKind::Nominal(table)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn attribute_type(&self) -> AttributeType {
        match self.kind {
            AttributeKind::Numeric => AttributeType::Numeric,
            AttributeKind::Nominal(_) => AttributeType::Nominal,
            AttributeKind::Date { .. } => AttributeType::Date,
            AttributeKind::String(_) => AttributeType::String,
        }
    }

    /// Number of categories of a nominal attribute
    pub fn num_categories(&self) -> Option<usize> {
        match &self.kind {
            AttributeKind::Nominal(table) => Some(table.len()),
            _ => None,
        }
    }

    /// Encodes the string form of a value
    ///
    /// Closed attributes (nominal, date) consult `policy` for values they
    /// cannot encode; string attributes grow their table instead.
    pub fn value_of(&mut self, text: &str, policy: UnseenCategoryPolicy) -> Result<f64> {
        let code = match &mut self.kind {
            AttributeKind::Numeric => {
                return text.trim().parse::<f64>().map_err(|_| {
                    Error::Cast(format!(
                        "'{}' is not numeric (attribute '{}')",
                        text, self.name
                    ))
                })
            }
            AttributeKind::Nominal(table) => table.code_of(text).map(|c| c as f64),
            AttributeKind::Date { format } => date::parse_millis(text, format),
            AttributeKind::String(table) => Some(table.intern(text) as f64),
        };
        match (code, policy) {
            (Some(code), _) => Ok(code),
            (None, UnseenCategoryPolicy::Missing) => {
                log::debug!(
                    "unseen value '{}' for attribute '{}' encoded as missing",
                    text,
                    self.name
                );
                Ok(MISSING_VALUE)
            }
            (None, UnseenCategoryPolicy::Fail) => Err(Error::UnknownCategoryValue {
                attribute: self.name.clone(),
                value: text.to_string(),
            }),
        }
    }

    /// Decodes an encoded value back to its string form
    pub fn label_of(&self, code: f64) -> Result<String> {
        if is_missing(code) {
            return Err(Error::Cast(format!(
                "missing value has no label (attribute '{}')",
                self.name
            )));
        }
        let index = || -> Result<usize> {
            if code.fract() != 0.0 || code < 0.0 {
                return Err(Error::Cast(format!("{} is not a category code", code)));
            }
            Ok(code as usize)
        };
        match &self.kind {
            AttributeKind::Numeric => Ok(code.to_string()),
            AttributeKind::Date { format } => date::format_millis(code, format),
            AttributeKind::Nominal(table) => {
                let i = index()?;
                table
                    .label(i)
                    .map(str::to_string)
                    .ok_or(Error::IndexOutOfBounds {
                        index: i,
                        size: table.len(),
                    })
            }
            AttributeKind::String(table) => {
                let i = index()?;
                table
                    .value(i)
                    .map(str::to_string)
                    .ok_or(Error::IndexOutOfBounds {
                        index: i,
                        size: table.len(),
                    })
            }
        }
    }

    /// Same name, weight and type definition; string table contents are ignored
    pub fn same_definition(&self, other: &Attribute) -> bool {
        if self.name != other.name || self.weight != other.weight {
            return false;
        }
        match (&self.kind, &other.kind) {
            (AttributeKind::Numeric, AttributeKind::Numeric) => true,
            (AttributeKind::Nominal(a), AttributeKind::Nominal(b)) => a.labels() == b.labels(),
            (AttributeKind::Date { format: a }, AttributeKind::Date { format: b }) => a == b,
            (AttributeKind::String(_), AttributeKind::String(_)) => true,
            _ => false,
        }
    }

    /// Host column this attribute was derived from
    pub fn to_host_column(&self) -> HostColumn {
        let column = match &self.kind {
            AttributeKind::Numeric => HostColumn::numeric(self.name.clone()),
            AttributeKind::Nominal(table) => {
                HostColumn::nominal(self.name.clone(), table.labels().to_vec())
            }
            AttributeKind::Date { format } => HostColumn::date(self.name.clone(), format.clone()),
            AttributeKind::String(_) => HostColumn::string(self.name.clone()),
        };
        column.with_weight(self.weight)
    }
}
