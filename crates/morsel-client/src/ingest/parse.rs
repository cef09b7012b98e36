use std::collections::HashMap;
use std::path::Path;

use crate::{ClientError, ClientResult};

/// The requested columns of one data row, in the order they were asked for.
#[derive(Debug, Clone)]
pub(crate) struct ColumnRow {
    pub(crate) row: i64,
    pub(crate) values: Vec<String>,
}

impl ColumnRow {
    pub(crate) fn value(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Reads a headed CSV body and projects each row onto `required` columns.
/// Extra columns are ignored; a missing one is a `schema_error`. Header
/// names are trimmed, cell values are kept verbatim.
pub(crate) fn read_required_columns(
    path: &Path,
    content: &str,
    required: &[&str],
) -> ClientResult<Vec<ColumnRow>> {
    let body = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| ClientError::malformed_csv(path, 0, &error.to_string()))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.as_str(), index))
        .collect::<HashMap<&str, usize>>();

    let mut column_indexes = Vec::with_capacity(required.len());
    for name in required {
        match index_by_name.get(name) {
            Some(index) => column_indexes.push(*index),
            None => {
                return Err(ClientError::schema_mismatch(path, required, headers.clone()));
            }
        }
    }

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let row = (row_index as i64) + 1;
        let record =
            result_row.map_err(|error| ClientError::malformed_csv(path, row, &error.to_string()))?;

        rows.push(ColumnRow {
            row,
            values: column_indexes
                .iter()
                .map(|index| record.get(*index).unwrap_or("").to_string())
                .collect(),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::read_required_columns;

    const COLUMNS: [&str; 3] = ["date", "region", "price"];

    #[test]
    fn projects_rows_onto_requested_column_order() {
        let content = "\u{feff}price , region,date,extra\n$3.00,north,2018-02-06,x\n";
        let rows = read_required_columns(Path::new("a.csv"), content, &COLUMNS);
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].row, 1);
            assert_eq!(rows[0].values, vec!["2018-02-06", "north", "$3.00"]);
        }
    }

    #[test]
    fn cell_whitespace_is_kept() {
        let content = "date,region,price\n2018-02-06, north ,$3.00\n";
        let rows = read_required_columns(Path::new("a.csv"), content, &COLUMNS);
        assert!(rows.is_ok());
        if let Ok(rows) = rows {
            assert_eq!(rows[0].values, vec!["2018-02-06", " north ", "$3.00"]);
        }
    }

    #[test]
    fn missing_column_is_schema_error() {
        let content = "date,region\n2018-02-06,north\n";
        let rows = read_required_columns(Path::new("a.csv"), content, &COLUMNS);
        assert!(rows.is_err());
        if let Err(error) = rows {
            assert_eq!(error.code, "schema_error");
            assert!(error.message.contains("price"));
        }
    }

    #[test]
    fn empty_file_is_schema_error() {
        let rows = read_required_columns(Path::new("a.csv"), "", &COLUMNS);
        assert!(rows.is_err());
        if let Err(error) = rows {
            assert_eq!(error.code, "schema_error");
        }
    }

    #[test]
    fn ragged_rows_are_parse_errors() {
        let content = "date,region,price\n2018-02-06,north\n";
        let rows = read_required_columns(Path::new("a.csv"), content, &COLUMNS);
        assert!(rows.is_err());
        if let Err(error) = rows {
            assert_eq!(error.code, "parse_error");
            assert!(error.message.contains("row 1"));
        }
    }
}
