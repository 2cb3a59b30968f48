//! pairfeat-core - Comparative features for paired-entity records
//!
//! Each row of a paired table describes two entities, side A and side B,
//! with matching attributes prefixed `a_` and `b_`. This crate provides:
//!
//! - **Column selection**: regex-based `ColumnSelector`, usable as a
//!   fit/transform step
//! - **Feature derivation**: per-side rate features, cross-side ratio and
//!   comparison features, and generation-tagged column names
//!   (`fe0__` original, `fe1__` ratio, `fe2__` comparison)
//! - **Subsampling**: seeded, uniform draws without replacement from aligned
//!   features and labels
//!
//! # Examples
//!
//! ```ignore
//! use pairfeat_core::{data_prep, sampling, ColumnSelector, Transform};
//!
//! let derived = data_prep(&table)?;
//! let ratios = ColumnSelector::new("^fe1__")?.transform(&derived)?;
//! let (x, y) = sampling(&ratios, &labels, 500, 42)?;
//! ```

pub mod config;
pub mod derivation;
pub mod error;
pub mod sampling;
pub mod selector;

pub use config::*;
pub use derivation::*;
pub use error::*;
pub use sampling::*;
pub use selector::*;

pub use pairfeat_io::{DataColumn, Table};
