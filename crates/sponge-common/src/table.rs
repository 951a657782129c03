//! Row-oriented tables built from JSON record lists.
//!
//! Nested objects in a record become dotted column names
//! (`dataset.disease_name`); arrays and scalars are kept as-is. Columns
//! are the union of all record keys in first-seen order; a record missing
//! a column gets `null` in that cell.

use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

use crate::error::{Result, SpongeError};

/// Column name used when the payload is a list of scalars.
pub const SCALAR_COLUMN: &str = "value";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl FlatTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Flatten a decoded JSON body into a table.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => Self::from_records(items),
            Value::Object(_) => Self::from_records(std::slice::from_ref(value)),
            other => Err(SpongeError::malformed(
                "$",
                format!("expected an array of records, got {}", json_type(other)),
            )),
        }
    }

    fn from_records(items: &[Value]) -> Result<Self> {
        if !items.is_empty() && items.iter().all(|v| !v.is_object()) {
            return Ok(Self {
                columns: vec![SCALAR_COLUMN.to_string()],
                rows: items.iter().map(|v| vec![v.clone()]).collect(),
            });
        }

        let mut flattened = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let object = item.as_object().ok_or_else(|| {
                SpongeError::malformed(format!("[{}]", i), format!("expected an object, got {}", json_type(item)))
            })?;
            let mut row = Map::new();
            flatten_into(&mut row, None, object);
            flattened.push(row);
        }

        let mut columns: Vec<String> = Vec::new();
        for row in &flattened {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = flattened
            .into_iter()
            .map(|mut row| {
                columns
                    .iter()
                    .map(|c| row.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(SpongeError::malformed(
                format!("[{}]", self.rows.len()),
                format!("row has {} cells, table has {} columns", row.len(), self.columns.len()),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Write the table as CSV with a header row.
    /// Strings are written bare, nulls as empty cells, everything else as JSON.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in &self.rows {
            out.write_record(row.iter().map(cell_text))?;
        }
        out.flush()?;
        Ok(())
    }
}

fn flatten_into(out: &mut Map<String, Value>, prefix: Option<&str>, object: &Map<String, Value>) {
    for (key, value) in object {
        let name = match prefix {
            Some(p) => format!("{}.{}", p, key),
            None => key.clone(),
        };
        match value {
            // empty objects stay as values
            Value::Object(inner) if !inner.is_empty() => flatten_into(out, Some(&name), inner),
            other => {
                out.insert(name, other.clone());
            }
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_uniform_records_keep_key_order() {
        let body = json!([
            {"ensg_number": "ENSG00000130700", "gene_symbol": "GATA5", "log2FoldChange": 1.25},
            {"ensg_number": "ENSG00000100345", "gene_symbol": "MYH9", "log2FoldChange": -0.5},
            {"ensg_number": "ENSG00000141510", "gene_symbol": "TP53", "log2FoldChange": 0.1},
        ]);
        let table = FlatTable::from_json(&body).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns(), &["ensg_number", "gene_symbol", "log2FoldChange"]);
        assert_eq!(table.get(1, "gene_symbol"), Some(&json!("MYH9")));
    }

    #[test]
    fn test_nested_objects_flatten_to_dotted_columns() {
        let body = json!([
            {"run_ID": 1, "dataset": {"disease_name": "kidney", "data_origin": "TCGA"}, "tags": ["a", "b"]},
            {"run_ID": 2, "dataset": {"disease_name": "liver"}, "extra": null},
        ]);
        let table = FlatTable::from_json(&body).unwrap();

        assert_eq!(
            table.columns(),
            &["run_ID", "dataset.disease_name", "dataset.data_origin", "tags", "extra"]
        );
        assert_eq!(table.get(0, "tags"), Some(&json!(["a", "b"])));
        assert_eq!(table.get(1, "dataset.data_origin"), Some(&Value::Null));
        assert_eq!(table.get(0, "extra"), Some(&Value::Null));
    }

    #[test]
    fn test_single_object_is_one_row() {
        let table = FlatTable::from_json(&json!({"count": 7})).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.column("count"), Some(vec![&json!(7)]));
    }

    #[test]
    fn test_scalar_list_and_empty_list() {
        let table = FlatTable::from_json(&json!(["GO:0001", "GO:0002"])).unwrap();
        assert_eq!(table.columns(), &[SCALAR_COLUMN]);
        assert_eq!(table.len(), 2);

        let empty = FlatTable::from_json(&json!([])).unwrap();
        assert!(empty.is_empty());
        assert!(empty.columns().is_empty());
    }

    #[test]
    fn test_non_record_payload_is_malformed() {
        let err = FlatTable::from_json(&json!("just a string")).unwrap_err();
        assert!(matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "$"));

        let err = FlatTable::from_json(&json!([{"a": 1}, 2])).unwrap_err();
        assert!(matches!(err, SpongeError::MalformedResponse { ref path, .. } if path == "[1]"));
    }

    #[test]
    fn test_write_csv() {
        let table = FlatTable::from_json(&json!([
            {"gene": "TCF7L1", "score": 0.5, "note": null},
            {"gene": "SEMA4B, variant", "score": 2, "note": "x"},
        ]))
        .unwrap();

        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "gene,score,note\nTCF7L1,0.5,\n\"SEMA4B, variant\",2,x\n");
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = FlatTable::new(vec!["x".into(), "y".into()]);
        table.push_row(vec![json!(1), json!(2)]).unwrap();
        assert!(table.push_row(vec![json!(1)]).is_err());
        assert_eq!(table.len(), 1);
    }
}
