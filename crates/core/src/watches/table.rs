use anyhow::{Context, Result};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One observation as received from the remote service. Fields are not validated.
pub type ChartPoint = Map<String, Value>;

/// Ordered chart points with the union of their keys as columns.
///
/// Columns appear in order of first appearance across rows. A row that lacks
/// a column reads as absent for it. An empty table is the "no data" value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<ChartPoint>,
}

impl Table {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(rows: Vec<ChartPoint>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    /// Builds a table from a JSON array of objects.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => anyhow::bail!("expected a JSON array, got {}", kind(&other)),
        };

        let mut rows = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(map) => rows.push(map),
                other => anyhow::bail!("element {idx} is {}, expected an object", kind(&other)),
            }
        }
        Ok(Self::from_records(rows))
    }

    pub fn from_json_str(body: &str) -> Result<Self> {
        let value = serde_json::from_str::<Value>(body).context("body is not valid JSON")?;
        Self::from_json_value(value)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ChartPoint] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ChartPoint> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// All values of one column, `None` where a row lacks it.
    /// Returns `None` if no row has the column.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&Value>>> {
        if !self.has_column(name) {
            return None;
        }
        Some(self.rows.iter().map(|row| row.get(name)).collect())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.rows)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
