//! Host frame to dataset conversion
//!
//! [`DatasetConverter`] maps host columns onto attributes and encodes host
//! rows as numeric feature vectors. Every non-numeric cell is encoded by the
//! attribute of the dataset it is converted for, never by a table belonging
//! to another dataset.

use serde::{Deserialize, Serialize};

use crate::config::UnseenCategoryPolicy;
use crate::error::{Error, Result};
use crate::frame::{HostColumn, HostColumnType, HostFrame, Instance, Value};
use crate::na::{MISSING_VALUE, NA};
use crate::schema::{Attribute, AttributeKind, Dataset, NominalTable, StringTable};

/// Converts host frames and rows into the algorithm-facing representation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConverter {
    #[serde(default)]
    unseen_category: UnseenCategoryPolicy,
}

impl DatasetConverter {
    pub fn new(unseen_category: UnseenCategoryPolicy) -> Self {
        DatasetConverter { unseen_category }
    }

    pub fn unseen_category(&self) -> UnseenCategoryPolicy {
        self.unseen_category
    }

    /// Maps host column `index` onto an attribute
    pub fn attribute_for(&self, index: usize, column: &HostColumn) -> Result<Attribute> {
        let kind = match column.column_type() {
            HostColumnType::Numeric => AttributeKind::Numeric,
            HostColumnType::Date { format } => AttributeKind::Date {
                format: format.clone(),
            },
            HostColumnType::Nominal { labels } => {
                AttributeKind::Nominal(NominalTable::new(labels.clone())?)
            }
            HostColumnType::String => AttributeKind::String(StringTable::new()),
            other => {
                return Err(Error::UnsupportedAttributeType {
                    index,
                    name: column.name().to_string(),
                    type_name: other.type_name().to_string(),
                })
            }
        };
        Ok(Attribute::new(column.name(), column.weight(), kind))
    }

    /// Converts a whole frame: schema first, then every row
    pub fn convert_dataset(&self, frame: &HostFrame) -> Result<Dataset> {
        let class_index = frame.class_index();
        let mut attributes = Vec::with_capacity(frame.num_columns());
        let mut response = None;
        for (i, column) in frame.columns().iter().enumerate() {
            let attribute = self.attribute_for(i, column)?;
            if Some(i) == class_index {
                response = Some(attribute);
            } else {
                attributes.push(attribute);
            }
        }

        let mut dataset = match (response, class_index) {
            (Some(response), Some(ci)) => {
                Dataset::with_response(frame.relation(), attributes, response, ci)
            }
            _ => Dataset::new(frame.relation(), attributes),
        };

        for instance in frame.instances() {
            let row = self.convert_row(&instance, &mut dataset)?;
            if dataset.response().is_some() {
                let label = self.convert_label(&instance, &mut dataset)?;
                dataset.add_labelled(row, label)?;
            } else {
                dataset.add(row)?;
            }
        }

        log::debug!(
            "converted '{}': {} rows x {} features{}",
            dataset.relation(),
            dataset.num_rows(),
            dataset.num_features(),
            if dataset.response().is_some() {
                " + response"
            } else {
                ""
            }
        );
        Ok(dataset)
    }

    /// Encodes the non-response cells of `instance`, in column order
    ///
    /// The skipped position is the dataset's response column; a row whose
    /// class column sits elsewhere is rejected.
    pub fn convert_row(&self, instance: &Instance<'_>, dataset: &mut Dataset) -> Result<Vec<f64>> {
        let response_index = check_response_position(instance, dataset)?;
        let expected = instance
            .num_columns()
            .saturating_sub(usize::from(response_index.is_some()));
        if dataset.num_features() != expected {
            return Err(Error::Consistency(format!(
                "row has {} feature columns but dataset '{}' has {} attributes",
                expected,
                dataset.relation(),
                dataset.num_features()
            )));
        }

        let mut result = Vec::with_capacity(expected);
        let attributes = dataset.attributes_mut();
        let mut j = 0;
        for i in 0..instance.num_columns() {
            if Some(i) == response_index {
                continue;
            }
            let value = self.encode(instance, i, &mut attributes[j])?;
            result.push(value);
            j += 1;
        }
        Ok(result)
    }

    /// Encodes the response cell of `instance`
    pub fn convert_label(&self, instance: &Instance<'_>, dataset: &mut Dataset) -> Result<f64> {
        let class_index = check_response_position(instance, dataset)?.ok_or_else(|| {
            Error::Consistency("instance has no class attribute".to_string())
        })?;
        let relation = dataset.relation().to_string();
        let response = dataset.response_mut().ok_or_else(|| {
            Error::Consistency(format!("dataset '{}' has no response attribute", relation))
        })?;
        self.encode(instance, class_index, response)
    }

    fn encode(&self, instance: &Instance<'_>, index: usize, attribute: &mut Attribute) -> Result<f64> {
        let column = instance.column(index)?;
        let cell = instance.cell(index)?;
        match column.column_type() {
            HostColumnType::Numeric => match cell {
                NA::NA => Ok(MISSING_VALUE),
                NA::Value(Value::Number(v)) => Ok(*v),
                NA::Value(other) => Err(Error::Cast(format!(
                    "non-numeric value {:?} in numeric column '{}'",
                    other,
                    column.name()
                ))),
            },
            HostColumnType::Date { .. } | HostColumnType::Nominal { .. } | HostColumnType::String => {
                match instance.string_value(index)? {
                    None => Ok(MISSING_VALUE),
                    Some(text) => attribute.value_of(&text, self.unseen_category),
                }
            }
            other => Err(Error::UnsupportedAttributeType {
                index,
                name: column.name().to_string(),
                type_name: other.type_name().to_string(),
            }),
        }
    }
}

/// Checks that the row's class column is the dataset's response column
fn check_response_position(instance: &Instance<'_>, dataset: &Dataset) -> Result<Option<usize>> {
    fn position(index: Option<usize>) -> String {
        match index {
            Some(i) => format!("column {}", i),
            None => "no column".to_string(),
        }
    }

    let response_index = dataset.response_index();
    if instance.class_index() != response_index {
        return Err(Error::Consistency(format!(
            "row has its class at {} but dataset '{}' has its response at {}",
            position(instance.class_index()),
            dataset.relation(),
            position(response_index)
        )));
    }
    Ok(response_index)
}
