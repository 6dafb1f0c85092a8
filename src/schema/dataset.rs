use crate::error::{Error, Result};
use crate::frame::HostFrame;
use crate::schema::attribute::Attribute;

/// Algorithm-facing dataset: feature attributes, optional response
/// attribute, numeric feature matrix and label vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    relation: String,
    attributes: Vec<Attribute>,
    response: Option<Attribute>,
    /// Position of the response column in the host frame
    response_index: Option<usize>,
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
}

impl Dataset {
    /// Creates an empty dataset without a response attribute
    pub fn new(relation: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Dataset {
            relation: relation.into(),
            attributes,
            response: None,
            response_index: None,
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Creates an empty dataset with a response taken from host column `response_index`
    pub fn with_response(
        relation: impl Into<String>,
        attributes: Vec<Attribute>,
        response: Attribute,
        response_index: usize,
    ) -> Self {
        Dataset {
            response: Some(response),
            response_index: Some(response_index),
            ..Self::new(relation, attributes)
        }
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut [Attribute] {
        &mut self.attributes
    }

    pub fn response(&self) -> Option<&Attribute> {
        self.response.as_ref()
    }

    pub fn response_mut(&mut self) -> Option<&mut Attribute> {
        self.response.as_mut()
    }

    pub fn response_index(&self) -> Option<usize> {
        self.response_index
    }

    pub fn num_features(&self) -> usize {
        self.attributes.len()
    }

    pub fn num_rows(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Feature matrix, one row per instance
    pub fn x(&self) -> &[Vec<f64>] {
        &self.x
    }

    /// Label vector; empty when there is no response attribute
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    fn check_row(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.attributes.len() {
            return Err(Error::LengthMismatch {
                expected: self.attributes.len(),
                actual: row.len(),
            });
        }
        Ok(())
    }

    /// Appends an unlabelled row
    pub fn add(&mut self, row: Vec<f64>) -> Result<()> {
        if self.response.is_some() {
            return Err(Error::Consistency(format!(
                "dataset '{}' has a response attribute; rows need a label",
                self.relation
            )));
        }
        self.check_row(&row)?;
        self.x.push(row);
        Ok(())
    }

    /// Appends a row with its encoded label
    pub fn add_labelled(&mut self, row: Vec<f64>, label: f64) -> Result<()> {
        if self.response.is_none() {
            return Err(Error::Consistency(format!(
                "dataset '{}' has no response attribute",
                self.relation
            )));
        }
        self.check_row(&row)?;
        self.x.push(row);
        self.y.push(label);
        Ok(())
    }

    /// Copy holding the schema and at most the first `n` rows
    pub fn head(&self, n: usize) -> Dataset {
        let n = n.min(self.x.len());
        Dataset {
            relation: self.relation.clone(),
            attributes: self.attributes.clone(),
            response: self.response.clone(),
            response_index: self.response_index,
            x: self.x[..n].to_vec(),
            y: self.y[..n.min(self.y.len())].to_vec(),
        }
    }

    /// Schema equality, ignoring rows and open-world string table contents
    pub fn same_schema(&self, other: &Dataset) -> bool {
        let responses_match = match (&self.response, &other.response) {
            (Some(a), Some(b)) => a.same_definition(b),
            (None, None) => true,
            _ => false,
        };
        self.relation == other.relation
            && self.response_index == other.response_index
            && responses_match
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(other.attributes.iter())
                .all(|(a, b)| a.same_definition(b))
    }

    /// Zero-row host frame with the column layout this dataset came from
    pub fn to_host_structure(&self) -> Result<HostFrame> {
        let mut columns: Vec<_> = self.attributes.iter().map(|a| a.to_host_column()).collect();
        if let (Some(response), Some(index)) = (&self.response, self.response_index) {
            if index > columns.len() {
                return Err(Error::IndexOutOfBounds {
                    index,
                    size: columns.len(),
                });
            }
            columns.insert(index, response.to_host_column());
        }
        let mut frame = HostFrame::new(self.relation.clone(), columns);
        frame.set_class_index(self.response_index)?;
        Ok(frame)
    }
}
