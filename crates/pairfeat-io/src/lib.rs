//! pairfeat-io - Table model and I/O for paired-entity records
//!
//! This crate provides the in-memory representation that the feature
//! derivation engine operates on, plus loaders for delimited text:
//!
//! - **Table**: ordered, row-aligned named columns
//! - **DataColumn**: typed column storage (float, int, bool, string)
//! - **CSV/TSV**: reader with type inference and a matching writer
//!
//! # Design
//!
//! Tables are values. Operations that add, rename or narrow columns return
//! a new `Table` and leave the receiver untouched, so pipeline stages can be
//! composed and tested independently.

pub mod error;
pub mod reader;
pub mod schema;
pub mod table;

#[cfg(feature = "csv")]
pub mod csv_reader;

#[cfg(feature = "csv")]
pub mod csv_writer;

pub use error::*;
pub use reader::*;
pub use schema::*;
pub use table::*;

#[cfg(feature = "csv")]
pub use csv_reader::CsvReader;

#[cfg(feature = "csv")]
pub use csv_writer::{write_csv, write_table};
