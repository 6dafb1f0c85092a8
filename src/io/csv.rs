use csv::{ReaderBuilder, Trim, Writer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::frame::{Cell, HostColumn, HostColumnType, HostFrame};
use crate::na::NA;

/// Text read as a missing cell besides the empty string
pub const MISSING_TOKEN: &str = "?";

/// Reads a host frame from a CSV file
///
/// `columns` types the file. With `has_header`, columns are matched to the
/// header by name; otherwise by position. Empty fields and `?` are missing.
pub fn read_csv<P: AsRef<Path>>(
    path: P,
    relation: &str,
    columns: Vec<HostColumn>,
    class_index: Option<usize>,
    has_header: bool,
) -> Result<HostFrame> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_csv_from_reader(file, relation, columns, class_index, has_header)
}

/// Reads a host frame from any CSV source
pub fn read_csv_from_reader<R: Read>(
    reader: R,
    relation: &str,
    columns: Vec<HostColumn>,
    class_index: Option<usize>,
    has_header: bool,
) -> Result<HostFrame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(has_header)
        .trim(Trim::All)
        .from_reader(reader);

    // record position of each column
    let positions: Vec<usize> = if has_header {
        let headers = rdr.headers().map_err(Error::Csv)?.clone();
        columns
            .iter()
            .map(|c| {
                headers
                    .iter()
                    .position(|h| h == c.name())
                    .ok_or_else(|| Error::ColumnNotFound(c.name().to_string()))
            })
            .collect::<Result<_>>()?
    } else {
        (0..columns.len()).collect()
    };

    let mut frame = HostFrame::new(relation, columns);
    frame.set_class_index(class_index)?;

    for (line, result) in rdr.records().enumerate() {
        let record = result.map_err(Error::Csv)?;
        let mut row = Vec::with_capacity(positions.len());
        for (column, &position) in frame.columns().iter().zip(&positions) {
            let field = record.get(position).ok_or(Error::IndexOutOfBounds {
                index: position,
                size: record.len(),
            })?;
            row.push(parse_field(column, field).map_err(|e| {
                Error::Format(format!("line {}, column '{}': {}", line + 1, column.name(), e))
            })?);
        }
        frame.add_row(row)?;
    }

    log::debug!(
        "read {} rows x {} columns into '{}'",
        frame.num_rows(),
        frame.num_columns(),
        frame.relation()
    );
    Ok(frame)
}

fn parse_field(column: &HostColumn, field: &str) -> Result<Cell> {
    if field.is_empty() || field == MISSING_TOKEN {
        return Ok(NA::NA);
    }
    match column.column_type() {
        HostColumnType::Numeric => field
            .parse::<f64>()
            .map(Cell::from)
            .map_err(|e| Error::Cast(format!("'{}' is not a number: {}", field, e))),
        _ => Ok(Cell::from(field)),
    }
}

/// Writes a host frame to a CSV file with a header row
pub fn write_csv<P: AsRef<Path>>(frame: &HostFrame, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    write_csv_to_writer(frame, file)
}

/// Writes a host frame to any CSV sink; missing cells are written as `?`
pub fn write_csv_to_writer<W: Write>(frame: &HostFrame, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(frame.columns().iter().map(|c| c.name()))
        .map_err(Error::Csv)?;

    for i in 0..frame.num_rows() {
        let mut record = Vec::with_capacity(frame.num_columns());
        for j in 0..frame.num_columns() {
            record.push(
                frame
                    .string_value(i, j)?
                    .unwrap_or_else(|| MISSING_TOKEN.to_string()),
            );
        }
        wtr.write_record(&record).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}
