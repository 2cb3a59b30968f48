//! Ordered, row-aligned tables of named columns

use crate::error::{DataError, DataResult};
use crate::schema::{ColumnDescriptor, DataColumn, DataSchema};
use std::collections::HashSet;

/// A named column inside a table
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColumn {
    pub name: String,
    pub data: DataColumn,
}

/// An ordered collection of equal-length named columns
///
/// Row identity is positional. Column names are unique and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<NamedColumn>,
    num_rows: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, column)` pairs, in order
    pub fn from_columns<I, S>(columns: I) -> DataResult<Self>
    where
        I: IntoIterator<Item = (S, DataColumn)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, data) in columns {
            table.push_column(name.into(), data)?;
        }
        Ok(table)
    }

    fn push_column(&mut self, name: String, data: DataColumn) -> DataResult<()> {
        if self.contains(&name) {
            return Err(DataError::DuplicateColumn(name));
        }
        if self.columns.is_empty() {
            self.num_rows = data.len();
        } else if data.len() != self.num_rows {
            return Err(DataError::LengthMismatch {
                column: name,
                expected: self.num_rows,
                actual: data.len(),
            });
        }
        self.columns.push(NamedColumn { name, data });
        Ok(())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate over columns in table order
    pub fn columns(&self) -> impl Iterator<Item = &NamedColumn> {
        self.columns.iter()
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    /// Get a column by name, failing if absent
    pub fn require(&self, name: &str) -> DataResult<&DataColumn> {
        self.column(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// Check whether a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Return a new table with `data` appended as `name`
    pub fn with_column(&self, name: impl Into<String>, data: DataColumn) -> DataResult<Table> {
        let mut table = self.clone();
        table.push_column(name.into(), data)?;
        Ok(table)
    }

    /// Return a new table with every `(name, column)` pair appended, in order
    pub fn with_columns<I, S>(&self, columns: I) -> DataResult<Table>
    where
        I: IntoIterator<Item = (S, DataColumn)>,
        S: Into<String>,
    {
        let mut table = self.clone();
        for (name, data) in columns {
            table.push_column(name.into(), data)?;
        }
        Ok(table)
    }

    /// Return a new table with columns renamed by `rename`
    ///
    /// `rename` returns `Some(new_name)` for columns to rename and `None` to
    /// keep the existing name. Values and order are untouched. Fails with
    /// `DuplicateColumn` if two columns would end up with the same name.
    pub fn rename_columns<F>(&self, mut rename: F) -> DataResult<Table>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut seen = HashSet::with_capacity(self.columns.len());
        let mut columns = Vec::with_capacity(self.columns.len());

        for column in &self.columns {
            let name = rename(&column.name).unwrap_or_else(|| column.name.clone());
            if !seen.insert(name.clone()) {
                return Err(DataError::DuplicateColumn(name));
            }
            columns.push(NamedColumn {
                name,
                data: column.data.clone(),
            });
        }

        Ok(Table {
            columns,
            num_rows: self.num_rows,
        })
    }

    /// Return a new table holding only `names`, in the order given
    ///
    /// The row count is preserved even when `names` is empty.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> DataResult<Table> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let data = self.require(name)?;
            if columns.iter().any(|c: &NamedColumn| c.name == name) {
                return Err(DataError::DuplicateColumn(name.to_string()));
            }
            columns.push(NamedColumn {
                name: name.to_string(),
                data: data.clone(),
            });
        }

        Ok(Table {
            columns,
            num_rows: self.num_rows,
        })
    }

    /// Return a new table holding the rows at `indices`, in the order given
    pub fn take(&self, indices: &[usize]) -> DataResult<Table> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.num_rows) {
            return Err(DataError::OutOfBounds {
                index,
                size: self.num_rows,
            });
        }

        let columns = self
            .columns
            .iter()
            .map(|c| NamedColumn {
                name: c.name.clone(),
                data: c.data.take(indices),
            })
            .collect();

        Ok(Table {
            columns,
            num_rows: indices.len(),
        })
    }

    /// Describe the table's columns and row count
    pub fn schema(&self) -> DataSchema {
        let columns = self
            .columns
            .iter()
            .map(|c| ColumnDescriptor::new(c.name.clone(), c.data.dtype()))
            .collect();
        DataSchema::new(columns, self.num_rows)
    }
}
