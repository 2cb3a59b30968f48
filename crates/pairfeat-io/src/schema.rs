//! Schema and column types for data representation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Schema describing the structure of a table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSchema {
    /// Column descriptors
    pub columns: Vec<ColumnDescriptor>,

    /// Number of records
    pub num_records: usize,

    /// Additional metadata
    pub metadata: HashMap<String, String>,
}

impl DataSchema {
    /// Create a new schema
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
            metadata: HashMap::new(),
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Descriptor for a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type
    pub dtype: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Float64,
    Int64,
    Bool,
    String,
}

impl ColumnType {
    /// Check if arithmetic and ordering comparisons apply to this type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float64 | ColumnType::Int64 | ColumnType::Bool)
    }
}

/// A column of data
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Float64(Vec<f64>),
    Int64(Vec<i64>),
    Bool(Vec<bool>),
    String(Vec<String>),
}

impl DataColumn {
    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Float64(v) => v.len(),
            DataColumn::Int64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to f64 (for numeric types)
    ///
    /// Booleans map to 0.0 / 1.0. Returns `None` for string columns.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            DataColumn::Float64(v) => Some(v.clone()),
            DataColumn::Int64(v) => Some(v.iter().map(|&x| x as f64).collect()),
            DataColumn::Bool(v) => Some(v.iter().map(|&x| if x { 1.0 } else { 0.0 }).collect()),
            DataColumn::String(_) => None,
        }
    }

    /// Gather the values at `indices`, in the order given
    ///
    /// Callers are responsible for bounds; `Table::take` validates them.
    pub fn take(&self, indices: &[usize]) -> DataColumn {
        match self {
            DataColumn::Float64(v) => DataColumn::Float64(indices.iter().map(|&i| v[i]).collect()),
            DataColumn::Int64(v) => DataColumn::Int64(indices.iter().map(|&i| v[i]).collect()),
            DataColumn::Bool(v) => DataColumn::Bool(indices.iter().map(|&i| v[i]).collect()),
            DataColumn::String(v) => {
                DataColumn::String(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }

    /// Render a single cell as text; NaN renders as an empty cell
    pub fn format_value(&self, index: usize) -> Option<String> {
        match self {
            DataColumn::Float64(v) => v.get(index).map(|x| {
                if x.is_nan() {
                    String::new()
                } else {
                    x.to_string()
                }
            }),
            DataColumn::Int64(v) => v.get(index).map(|x| x.to_string()),
            DataColumn::Bool(v) => v.get(index).map(|x| x.to_string()),
            DataColumn::String(v) => v.get(index).cloned(),
        }
    }
}
