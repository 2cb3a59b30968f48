//! CSV output for tables

use crate::error::{DataError, DataResult};
use crate::table::Table;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Write `table` as CSV with a header row
pub fn write_table<W: Write>(table: &Table, writer: W) -> DataResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(table.column_names())
        .map_err(|e| DataError::Io(e.to_string()))?;

    for row in 0..table.num_rows() {
        let record = table
            .columns()
            .map(|c| c.data.format_value(row).unwrap_or_default())
            .collect::<Vec<_>>();
        out.write_record(&record)
            .map_err(|e| DataError::Io(e.to_string()))?;
    }

    out.flush()?;
    Ok(())
}

/// Write `table` to a CSV file at `path`, replacing any existing file
pub fn write_csv(table: &Table, path: &str) -> DataResult<()> {
    let file = File::create(path).map_err(|e| DataError::OpenFailed(e.to_string()))?;
    write_table(table, BufWriter::new(file))
}
