use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tabular result of a report run: column headers plus ordered rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub legend: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl ReportData {
    pub fn new(legend: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { legend, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows rendered as plain strings, in legend order.
    ///
    /// Strings are emitted without JSON quoting and nulls become empty cells.
    pub fn text_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
