//! Pattern-based column selection
//!
//! A `ColumnSelector` holds a regular expression and picks the columns of a
//! table whose names contain a match. Matching uses search semantics, so
//! `"rate"` selects `a_follow_rate` and `^a_` selects only side-A columns.

use crate::error::{FeatureError, Result};
use pairfeat_io::{DataColumn, Table};
use regex::Regex;

/// What to do when a pattern matches no columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySelectionPolicy {
    /// Return an empty selection
    #[default]
    Allow,
    /// Fail with `FeatureError::EmptySelection`
    Reject,
}

/// A stateless table transform in the fit/transform style
pub trait Transform {
    /// Learn from training data; returns the fitted transform
    fn fit(self, features: &Table, labels: Option<&DataColumn>) -> Self
    where
        Self: Sized;

    /// Apply the transform, returning a new table
    fn transform(&self, features: &Table) -> Result<Table>;

    /// Fit, then transform the same data
    fn fit_transform(self, features: &Table, labels: Option<&DataColumn>) -> Result<Table>
    where
        Self: Sized,
    {
        self.fit(features, labels).transform(features)
    }
}

/// Selects columns whose names match a regular expression
#[derive(Debug, Clone)]
pub struct ColumnSelector {
    pattern: Regex,
    policy: EmptySelectionPolicy,
}

impl ColumnSelector {
    /// Create a selector; fails if `pattern` is not a valid regex
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            policy: EmptySelectionPolicy::default(),
        })
    }

    /// Set the empty-selection policy
    pub fn with_policy(mut self, policy: EmptySelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The source pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn policy(&self) -> EmptySelectionPolicy {
        self.policy
    }

    /// Check a single column name
    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    /// Names of matching columns, in table order
    pub fn select(&self, table: &Table) -> Result<Vec<String>> {
        let names: Vec<String> = table
            .column_names()
            .into_iter()
            .filter(|name| self.matches(name))
            .map(str::to_string)
            .collect();

        if names.is_empty() && self.policy == EmptySelectionPolicy::Reject {
            return Err(FeatureError::EmptySelection {
                pattern: self.pattern().to_string(),
            });
        }
        Ok(names)
    }
}

impl Transform for ColumnSelector {
    fn fit(self, _features: &Table, _labels: Option<&DataColumn>) -> Self {
        self
    }

    fn transform(&self, features: &Table) -> Result<Table> {
        let names = self.select(features)?;
        Ok(features.select(&names)?)
    }
}

/// Names of the columns of `table` matching `pattern`, in table order
pub fn extract_column_names(table: &Table, pattern: &str) -> Result<Vec<String>> {
    ColumnSelector::new(pattern)?.select(table)
}
