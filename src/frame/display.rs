use std::fmt::{self, Display};

use crate::frame::{HostColumnType, HostFrame};
use crate::na::NA;

fn quote(s: &str) -> String {
    let needs_quotes = s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '\'' | '"' | '{' | '}' | '%' | '?'));
    if needs_quotes {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    } else {
        s.to_string()
    }
}

// ARFF-style rendering: header section, then one data line per row
impl Display for HostFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@relation {}", quote(self.relation()))?;
        writeln!(f)?;
        for column in self.columns() {
            write!(f, "@attribute {} ", quote(column.name()))?;
            match column.column_type() {
                HostColumnType::Nominal { labels } => {
                    let labels: Vec<String> = labels.iter().map(|l| quote(l)).collect();
                    writeln!(f, "{{{}}}", labels.join(","))?;
                }
                HostColumnType::Date { format } => writeln!(f, "date '{}'", format)?,
                other => writeln!(f, "{}", other.type_name())?,
            }
        }
        writeln!(f)?;
        writeln!(f, "@data")?;
        for row in self.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    NA::NA => "?".to_string(),
                    NA::Value(v) => quote(&v.to_string()),
                })
                .collect();
            writeln!(f, "{}", cells.join(","))?;
        }
        Ok(())
    }
}
