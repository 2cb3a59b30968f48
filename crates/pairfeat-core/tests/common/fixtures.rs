//! Test fixture loading utilities

use pairfeat_io::{CsvReader, Table};
use std::path::PathBuf;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a CSV fixture as a table
pub fn load_table_fixture(name: &str) -> Table {
    let path = fixture_path(name);
    CsvReader::open(path.to_str().unwrap())
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
        .into_table()
}

/// The six-row influencer comparison sample
pub fn influencers() -> Table {
    load_table_fixture("influencers.csv")
}
