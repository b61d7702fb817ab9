// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rendering of caseload rows as JSON or CSV.
//!
//! CSV output flattens nested objects into dotted column names, so the
//! practitioner of a row becomes `probationPractitioner.state`,
//! `probationPractitioner.staffCode` and so on. Columns are the union across
//! all rows; cells a row has no value for are left empty.

use clap::ValueEnum;
use color_eyre::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Csv,
}

/// Writes `rows` to `out` in the requested format.
pub fn render<T: Serialize, W: Write>(rows: &[T], format: Format, out: W) -> Result<()> {
    match format {
        Format::Json => render_json(rows, out),
        Format::Csv => render_csv(rows, out),
    }
}

fn render_json<T: Serialize, W: Write>(rows: &[T], mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, rows)?;
    writeln!(out)?;
    Ok(())
}

fn render_csv<T: Serialize, W: Write>(rows: &[T], out: W) -> Result<()> {
    let flattened = rows
        .iter()
        .map(|row| -> Result<BTreeMap<String, String>> {
            let mut cells = BTreeMap::new();
            flatten("", &serde_json::to_value(row)?, &mut cells);
            Ok(cells)
        })
        .collect::<Result<Vec<_>>>()?;

    let columns: BTreeSet<&str> = flattened
        .iter()
        .flat_map(|cells| cells.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(out);
    if columns.is_empty() {
        writer.flush()?;
        return Ok(());
    }

    writer.write_record(&columns)?;
    for cells in &flattened {
        writer.write_record(
            columns
                .iter()
                .map(|column| cells.get(*column).map_or("", String::as_str)),
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn flatten(prefix: &str, value: &Value, cells: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                let column = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&column, field, cells);
            }
        }
        Value::Null => {
            cells.entry(prefix.to_string()).or_default();
        }
        Value::String(text) => {
            cells.insert(prefix.to_string(), text.clone());
        }
        other => {
            cells.insert(prefix.to_string(), other.to_string());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use caseload_domain::ProbationPractitioner;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        name: &'static str,
        licence_id: Option<i64>,
        probation_practitioner: ProbationPractitioner,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Bob Smith",
                licence_id: Some(1),
                probation_practitioner: ProbationPractitioner::Allocated {
                    staff_code: String::from("STAFF1"),
                    name: String::from("Joe Bloggs"),
                },
            },
            Row {
                name: "Ann Jones",
                licence_id: None,
                probation_practitioner: ProbationPractitioner::Unallocated,
            },
        ]
    }

    fn render_to_string(format: Format) -> String {
        let mut out = Vec::new();
        render(&rows(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_flattens_nested_practitioner() {
        let csv = render_to_string(Format::Csv);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines,
            vec![
                "licenceId,name,probationPractitioner.name,probationPractitioner.staffCode,probationPractitioner.state",
                "1,Bob Smith,Joe Bloggs,STAFF1,allocated",
                ",Ann Jones,,,unallocated",
            ]
        );
    }

    #[test]
    fn test_json_is_an_array_of_rows() {
        let json: Value = serde_json::from_str(&render_to_string(Format::Json)).unwrap();

        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[1]["licenceId"], Value::Null);
    }

    #[test]
    fn test_empty_csv_has_no_output() {
        let mut out = Vec::new();
        render::<Row, _>(&[], Format::Csv, &mut out).unwrap();

        assert!(out.is_empty());
    }
}
