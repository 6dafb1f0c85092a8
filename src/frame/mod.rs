//! Host-side tabular data
//!
//! A [`HostFrame`] is the caller's row-oriented dataset: named, typed
//! columns, an optional class (response) column and rows of cells. It is the
//! input of the conversion layer and, as a zero-row structure, the
//! persistent description kept by dataset headers.

pub mod cell;
pub mod column;
mod display;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use self::cell::{Cell, Value};
pub use self::column::{HostColumn, HostColumnType, DEFAULT_DATE_FORMAT};

/// One host row, one cell per column
pub type HostRow = Vec<Cell>;

/// Row-oriented host dataset with typed columns
///
/// Deserialized frames go through the same class index and row checks as
/// [`HostFrame::set_class_index`] and [`HostFrame::add_row`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHostFrame")]
pub struct HostFrame {
    relation: String,
    columns: Vec<HostColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_index: Option<usize>,
    #[serde(default)]
    rows: Vec<HostRow>,
}

/// Unchecked serialized form of a [`HostFrame`]
#[derive(Deserialize)]
struct RawHostFrame {
    relation: String,
    columns: Vec<HostColumn>,
    #[serde(default)]
    class_index: Option<usize>,
    #[serde(default)]
    rows: Vec<HostRow>,
}

impl TryFrom<RawHostFrame> for HostFrame {
    type Error = Error;

    fn try_from(raw: RawHostFrame) -> Result<Self> {
        let mut frame = HostFrame::new(raw.relation, raw.columns);
        frame.set_class_index(raw.class_index)?;
        frame.rows.reserve(raw.rows.len());
        for row in raw.rows {
            frame.add_row(row)?;
        }
        Ok(frame)
    }
}

impl HostFrame {
    /// Creates an empty frame without a class column
    pub fn new(relation: impl Into<String>, columns: Vec<HostColumn>) -> Self {
        HostFrame {
            relation: relation.into(),
            columns,
            class_index: None,
            rows: Vec::new(),
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn columns(&self) -> &[HostColumn] {
        &self.columns
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[HostRow] {
        &self.rows
    }

    /// Returns the column at `index`
    pub fn column(&self, index: usize) -> Result<&HostColumn> {
        self.columns.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            size: self.columns.len(),
        })
    }

    /// Position of the class column, if one is designated
    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    pub fn class_column(&self) -> Option<&HostColumn> {
        self.class_index.and_then(|i| self.columns.get(i))
    }

    /// Designates (or clears) the class column
    pub fn set_class_index(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(i) = index {
            if i >= self.columns.len() {
                return Err(Error::IndexOutOfBounds {
                    index: i,
                    size: self.columns.len(),
                });
            }
        }
        self.class_index = index;
        Ok(())
    }

    /// Designates the class column by name
    pub fn set_class_by_name(&mut self, name: &str) -> Result<()> {
        let index = self
            .columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        self.set_class_index(Some(index))
    }

    /// Appends a row after checking its length and cell types
    pub fn add_row(&mut self, row: HostRow) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        for (column, value) in self.columns.iter().zip(row.iter()) {
            cell::check_cell(column, value)?;
        }
        self.rows.push(row);
        Ok(())
    }

    /// Row `index` typed by this frame
    pub fn instance(&self, index: usize) -> Result<Instance<'_>> {
        let row = self.rows.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            size: self.rows.len(),
        })?;
        Ok(Instance { frame: self, row })
    }

    /// Pairs an external row with this frame's structure
    pub fn with_row<'a>(&'a self, row: &'a [Cell]) -> Result<Instance<'a>> {
        if row.len() != self.columns.len() {
            return Err(Error::LengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        Ok(Instance { frame: self, row })
    }

    /// Iterates over all rows as instances
    pub fn instances(&self) -> impl Iterator<Item = Instance<'_>> {
        self.rows.iter().map(move |row| Instance { frame: self, row })
    }

    /// Zero-row copy of this frame: columns, class index and relation name
    pub fn structure(&self) -> HostFrame {
        HostFrame {
            relation: self.relation.clone(),
            columns: self.columns.clone(),
            class_index: self.class_index,
            rows: Vec::new(),
        }
    }

    /// Removes rows whose class value is missing; returns how many were removed
    pub fn delete_with_missing_class(&mut self) -> usize {
        let class_index = match self.class_index {
            Some(i) => i,
            None => return 0,
        };
        let before = self.rows.len();
        self.rows
            .retain(|row| row.get(class_index).map_or(false, |c| c.is_value()));
        before - self.rows.len()
    }

    /// Whether any non-class cell is missing
    pub fn has_missing_values(&self) -> bool {
        self.rows.iter().any(|row| {
            row.iter()
                .enumerate()
                .any(|(i, c)| Some(i) != self.class_index && c.is_na())
        })
    }

    /// Whether any class cell is missing
    pub fn has_missing_class(&self) -> bool {
        match self.class_index {
            Some(ci) => self
                .rows
                .iter()
                .any(|row| row.get(ci).map_or(true, |c| c.is_na())),
            None => false,
        }
    }

    /// String form of a cell; `None` when the cell is missing
    pub fn string_value(&self, row: usize, column: usize) -> Result<Option<String>> {
        self.instance(row)?.string_value(column)
    }
}

/// A host row seen through the frame structure that types it
#[derive(Debug, Clone, Copy)]
pub struct Instance<'a> {
    frame: &'a HostFrame,
    row: &'a [Cell],
}

impl<'a> Instance<'a> {
    pub fn frame(&self) -> &'a HostFrame {
        self.frame
    }

    pub fn cells(&self) -> &'a [Cell] {
        self.row
    }

    pub fn num_columns(&self) -> usize {
        self.row.len()
    }

    pub fn class_index(&self) -> Option<usize> {
        self.frame.class_index
    }

    pub fn column(&self, index: usize) -> Result<&'a HostColumn> {
        self.frame.column(index)
    }

    pub fn cell(&self, index: usize) -> Result<&'a Cell> {
        self.row.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            size: self.row.len(),
        })
    }

    /// String form of the cell at `index`, decoded through its column
    pub fn string_value(&self, index: usize) -> Result<Option<String>> {
        cell::string_form(self.column(index)?, self.cell(index)?)
    }

    /// Whether the class cell is missing
    pub fn class_is_missing(&self) -> bool {
        self.class_index()
            .map(|ci| self.row.get(ci).map_or(true, |c| c.is_na()))
            .unwrap_or(false)
    }
}
