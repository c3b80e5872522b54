use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a column groups rows or carries an aggregated metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Grouping column; its values define the result buckets
    Key,
    /// Metric column; aggregated within each bucket
    Value,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Key => write!(f, "key"),
            ColumnRole::Value => write!(f, "value"),
        }
    }
}

/// A named report column.
///
/// The role is fixed by the constructor and cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    name: String,
    role: ColumnRole,
}

impl Column {
    /// Create a grouping column
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: ColumnRole::Key,
        }
    }

    /// Create a metric column
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: ColumnRole::Value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> ColumnRole {
        self.role
    }

    pub fn is_key(&self) -> bool {
        self.role == ColumnRole::Key
    }

    /// Split a comma separated list of names into columns of one role.
    ///
    /// Surrounding whitespace is dropped and empty entries are skipped.
    pub fn parse_list(names: &str, role: ColumnRole) -> Vec<Column> {
        names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| match role {
                ColumnRole::Key => Column::key(name),
                ColumnRole::Value => Column::value(name),
            })
            .collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
