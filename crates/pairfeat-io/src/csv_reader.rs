//! CSV file reader with type inference

use crate::error::{DataError, DataResult};
use crate::reader::TableReader;
use crate::schema::{ColumnType, DataColumn, DataSchema};
use crate::table::Table;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV file reader
///
/// The whole file is parsed on open; column types are inferred from every
/// value in the column.
pub struct CsvReader {
    path: Option<String>,
    table: Table,
    metadata: HashMap<String, String>,
}

impl CsvReader {
    /// Open a comma-separated file
    pub fn open(path: &str) -> DataResult<Self> {
        Self::open_with_options(path, b',')
    }

    /// Open a delimited file with an explicit delimiter
    pub fn open_with_options(path: &str, delimiter: u8) -> DataResult<Self> {
        if !Path::new(path).exists() {
            return Err(DataError::FileNotFound(path.to_string()));
        }

        let file = File::open(path).map_err(|e| DataError::OpenFailed(e.to_string()))?;
        let mut reader = Self::from_reader(BufReader::new(file), delimiter)?;
        reader.path = Some(path.to_string());
        Ok(reader)
    }

    /// Parse delimited text with a header row from any reader
    pub fn from_reader<R: Read>(source: R, delimiter: u8) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(source);

        let headers = reader
            .headers()
            .map_err(|e| DataError::InvalidFormat(e.to_string()))?
            .iter()
            .map(|s| s.trim().to_string())
            .collect::<Vec<_>>();

        let mut values: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for result in reader.records() {
            let record = result.map_err(|e| DataError::InvalidFormat(e.to_string()))?;
            for (i, value) in record.iter().enumerate() {
                values[i].push(value.trim().to_string());
            }
        }

        let columns = headers
            .into_iter()
            .zip(values)
            .map(|(name, raw)| {
                let dtype = infer_type(&raw);
                (name, parse_column(&raw, dtype))
            })
            .collect::<Vec<_>>();
        let table = Table::from_columns(columns)?;

        let mut metadata = HashMap::new();
        metadata.insert("format".to_string(), "CSV".to_string());
        metadata.insert("delimiter".to_string(), (delimiter as char).to_string());

        Ok(Self {
            path: None,
            table,
            metadata,
        })
    }

    /// Consume the reader, returning the parsed table
    pub fn into_table(self) -> Table {
        self.table
    }
}

impl TableReader for CsvReader {
    fn read_schema(&self) -> DataResult<DataSchema> {
        let mut schema = self.table.schema();
        schema.metadata = self.metadata.clone();
        Ok(schema)
    }

    fn read_table(&self) -> DataResult<Table> {
        Ok(self.table.clone())
    }

    fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// Infer column type from its values
///
/// Integer columns with missing cells become floats so the gaps can be NaN.
/// A column with no values at all is all-missing, hence all-NaN floats.
fn infer_type(values: &[String]) -> ColumnType {
    let non_empty: Vec<&str> = values
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    if non_empty.is_empty() {
        return ColumnType::Float64;
    }
    let has_missing = non_empty.len() < values.len();

    if non_empty.iter().all(|s| s.parse::<i64>().is_ok()) {
        return if has_missing {
            ColumnType::Float64
        } else {
            ColumnType::Int64
        };
    }

    if non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }

    if !has_missing
        && non_empty
            .iter()
            .all(|s| matches!(s.to_lowercase().as_str(), "true" | "false"))
    {
        return ColumnType::Bool;
    }

    ColumnType::String
}

/// Parse column values into a DataColumn
fn parse_column(values: &[String], dtype: ColumnType) -> DataColumn {
    match dtype {
        ColumnType::Float64 => DataColumn::Float64(
            values
                .iter()
                .map(|s| s.parse().unwrap_or(f64::NAN))
                .collect(),
        ),
        ColumnType::Int64 => {
            DataColumn::Int64(values.iter().map(|s| s.parse().unwrap_or(0)).collect())
        }
        ColumnType::Bool => {
            DataColumn::Bool(values.iter().map(|s| s.eq_ignore_ascii_case("true")).collect())
        }
        ColumnType::String => DataColumn::String(values.to_vec()),
    }
}
