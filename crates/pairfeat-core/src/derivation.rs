//! Feature derivation engine
//!
//! Derivation runs four phases, each returning a new table:
//!
//! 1. lowercase every column name
//! 2. append per-side rate features from the configured `RateSpec` list
//! 3. for every attribute present as both `a_<name>` and `b_<name>`, append
//!    `fe1__a_ratio_b_<name>` and `fe2__a_gt_b_<name>`
//! 4. rename every remaining `a_`/`b_` column to `fe0__<name>`
//!
//! Columns are never dropped. After phase 4 every side-related column
//! carries a generation tag.

use crate::config::{DerivationConfig, RateSpec, Side};
use crate::error::{FeatureError, Result};
use crate::selector::ColumnSelector;
use lazy_static::lazy_static;
use pairfeat_io::{DataColumn, Table};
use std::collections::HashSet;

lazy_static! {
    static ref SIDE_A: ColumnSelector = ColumnSelector::new("^a_").unwrap();
    static ref SIDE_PREFIXED: ColumnSelector = ColumnSelector::new("^(a_|b_)").unwrap();
    static ref TAGGED_ORIGINAL: ColumnSelector = ColumnSelector::new("^fe0__").unwrap();
}

/// Generation tag carried by a derived column name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Input or rate column kept as-is
    Original,
    /// `a / (b + 1)` cross-side ratio
    Ratio,
    /// `a > b` cross-side indicator
    Comparison,
}

impl Generation {
    pub fn tag(&self) -> &'static str {
        match self {
            Generation::Original => "fe0__",
            Generation::Ratio => "fe1__",
            Generation::Comparison => "fe2__",
        }
    }

    /// The generation a column name is tagged with, if any
    pub fn of(name: &str) -> Option<Generation> {
        [Generation::Original, Generation::Ratio, Generation::Comparison]
            .into_iter()
            .find(|g| name.starts_with(g.tag()))
    }
}

/// Name of the cross-side ratio feature for `attribute`
pub fn ratio_column(attribute: &str) -> String {
    format!("{}a_ratio_b_{}", Generation::Ratio.tag(), attribute)
}

/// Name of the cross-side comparison feature for `attribute`
pub fn comparison_column(attribute: &str) -> String {
    format!("{}a_gt_b_{}", Generation::Comparison.tag(), attribute)
}

/// Element-wise `numerator / (denominator + 1)`
pub fn smoothed_ratio(numerator: &[f64], denominator: &[f64]) -> Vec<f64> {
    numerator
        .iter()
        .zip(denominator)
        .map(|(n, d)| n / (d + 1.0))
        .collect()
}

/// Element-wise `1` where `a > b`, else `0`; NaN compares false
pub fn strictly_greater(a: &[f64], b: &[f64]) -> Vec<i64> {
    a.iter().zip(b).map(|(x, y)| i64::from(x > y)).collect()
}

fn numeric_column(table: &Table, name: &str) -> Result<Vec<f64>> {
    table
        .require(name)?
        .to_f64()
        .ok_or_else(|| FeatureError::NonNumeric {
            column: name.to_string(),
        })
}

/// Phase 1: lowercase every column name
///
/// Fails with `NameCollision` if two names differ only by case.
pub fn normalize_column_names(table: &Table) -> Result<Table> {
    Ok(table.rename_columns(|name| Some(name.to_lowercase()))?)
}

/// Check that each declared attribute exists on both sides
pub fn validate_attributes(table: &Table, attributes: &[String]) -> Result<()> {
    for attribute in attributes {
        for side in Side::BOTH {
            let column = side.column(attribute);
            if !table.contains(&column) {
                return Err(FeatureError::MissingAttribute(column));
            }
        }
    }
    Ok(())
}

/// Phase 2: append one rate column per `RateSpec`, in order
pub fn add_rate_features(table: &Table, rates: &[RateSpec]) -> Result<Table> {
    let mut table = table.clone();

    for rate in rates {
        let output = rate.output_column();
        if table.contains(&output) {
            return Err(FeatureError::NameCollision(output));
        }

        let numerator = numeric_column(&table, &rate.numerator_column())?;
        let denominator = numeric_column(&table, &rate.denominator_column())?;
        table = table.with_column(
            output,
            DataColumn::Float64(smoothed_ratio(&numerator, &denominator)),
        )?;
    }

    tracing::debug!("Added {} rate features", rates.len());
    Ok(table)
}

/// Base attributes present as both `a_<name>` and `b_<name>`
///
/// Returned in the order the `a_` columns appear. Names in `excluded` are
/// skipped.
pub fn shared_attributes(table: &Table, excluded: &HashSet<String>) -> Result<Vec<String>> {
    let mut shared = Vec::new();

    for column in SIDE_A.select(table)? {
        let attribute = &column[Side::A.prefix().len()..];
        if excluded.contains(attribute) {
            continue;
        }
        if !table.contains(&Side::B.column(attribute)) {
            tracing::debug!("Skipping {}: no side-B counterpart", column);
            continue;
        }
        shared.push(attribute.to_string());
    }

    Ok(shared)
}

/// Phase 3: append ratio and comparison features for each shared attribute
///
/// Columns are emitted per attribute, ratio first, in the order given.
pub fn add_cross_side_features(table: &Table, attributes: &[String]) -> Result<Table> {
    let mut derived = Vec::with_capacity(attributes.len() * 2);

    for attribute in attributes {
        let a = numeric_column(table, &Side::A.column(attribute))?;
        let b = numeric_column(table, &Side::B.column(attribute))?;

        derived.push((
            ratio_column(attribute),
            DataColumn::Float64(smoothed_ratio(&a, &b)),
        ));
        derived.push((
            comparison_column(attribute),
            DataColumn::Int64(strictly_greater(&a, &b)),
        ));
    }

    tracing::debug!(
        "Derived {} cross-side features from {} shared attributes",
        derived.len(),
        attributes.len()
    );
    Ok(table.with_columns(derived)?)
}

/// Phase 4: prefix every `a_`/`b_` column with `fe0__`
///
/// Any existing `fe0__` column is refused with `NameCollision`, whether or
/// not a rename would land on it. A tagged table cannot be tagged again.
pub fn tag_originals(table: &Table) -> Result<Table> {
    if let Some(existing) = TAGGED_ORIGINAL.select(table)?.into_iter().next() {
        return Err(FeatureError::NameCollision(existing));
    }

    let originals: HashSet<String> = SIDE_PREFIXED.select(table)?.into_iter().collect();
    let tag = Generation::Original.tag();
    let tagged = table.rename_columns(|name| {
        originals
            .contains(name)
            .then(|| format!("{}{}", tag, name))
    })?;

    tracing::debug!("Tagged {} original columns", originals.len());
    Ok(tagged)
}

/// Runs the four derivation phases with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct FeatureDeriver {
    config: DerivationConfig,
}

impl FeatureDeriver {
    /// Create a deriver, validating the configuration
    pub fn new(config: DerivationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DerivationConfig {
        &self.config
    }

    /// Derive the full feature table from `table`
    pub fn derive(&self, table: &Table) -> Result<Table> {
        let table = normalize_column_names(table)?;
        validate_attributes(&table, &self.config.attributes)?;

        let table = add_rate_features(&table, &self.config.rates)?;

        let excluded: HashSet<String> = if self.config.compare_rates {
            HashSet::new()
        } else {
            self.config.rates.iter().map(|r| r.output.clone()).collect()
        };
        let shared = shared_attributes(&table, &excluded)?;
        let table = add_cross_side_features(&table, &shared)?;

        let table = tag_originals(&table)?;
        tracing::info!(
            "Derived {} columns over {} rows ({} shared attributes)",
            table.num_columns(),
            table.num_rows(),
            shared.len()
        );
        Ok(table)
    }
}

/// Derive features with the default social-network configuration
pub fn data_prep(table: &Table) -> Result<Table> {
    FeatureDeriver::default().derive(table)
}
