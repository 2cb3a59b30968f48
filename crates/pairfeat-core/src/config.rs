//! Configuration for feature derivation
//!
//! Rate features are declared, not coded: each `RateSpec` names a side, a
//! numerator attribute, a denominator attribute and an output name. The
//! derivation engine applies whatever list it is given.

use crate::error::{FeatureError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One side of a paired record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides, A first
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// Column-name prefix for this side
    pub fn prefix(&self) -> &'static str {
        match self {
            Side::A => "a_",
            Side::B => "b_",
        }
    }

    /// Side-prefixed column name for a base attribute
    pub fn column(&self, attribute: &str) -> String {
        format!("{}{}", self.prefix(), attribute)
    }
}

/// A per-side rate feature: `numerator / (denominator + 1)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSpec {
    pub side: Side,
    pub numerator: String,
    pub denominator: String,
    pub output: String,
}

impl RateSpec {
    pub fn new(
        side: Side,
        numerator: impl Into<String>,
        denominator: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            side,
            numerator: numerator.into(),
            denominator: denominator.into(),
            output: output.into(),
        }
    }

    /// The same rate declared for side A and side B
    pub fn both_sides(output: &str, numerator: &str, denominator: &str) -> [RateSpec; 2] {
        Side::BOTH.map(|side| RateSpec::new(side, numerator, denominator, output))
    }

    pub fn numerator_column(&self) -> String {
        self.side.column(&self.numerator)
    }

    pub fn denominator_column(&self) -> String {
        self.side.column(&self.denominator)
    }

    pub fn output_column(&self) -> String {
        self.side.column(&self.output)
    }
}

/// Default rate table for social-network influence records:
/// `(output, numerator, denominator)`
pub const SOCIAL_RATES: &[(&str, &str, &str)] = &[
    ("follow_rate", "following_count", "follower_count"),
    ("mention_rate", "mentions_received", "mentions_sent"),
    ("retweet_rate", "retweets_received", "retweets_sent"),
    ("popularity_rate", "listed_count", "posts"),
];

/// Expand `SOCIAL_RATES` for both sides, all side-A rates first
pub fn social_rates() -> Vec<RateSpec> {
    Side::BOTH
        .iter()
        .flat_map(|&side| {
            SOCIAL_RATES
                .iter()
                .map(move |(output, num, den)| RateSpec::new(side, *num, *den, *output))
        })
        .collect()
}

/// Feature derivation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Rate features computed before cross-side discovery
    pub rates: Vec<RateSpec>,
    /// Base attributes that must exist on both sides
    pub attributes: Vec<String>,
    /// Whether rate features also get cross-side ratio/comparison features
    pub compare_rates: bool,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            rates: social_rates(),
            attributes: Vec::new(),
            compare_rates: true,
        }
    }
}

impl DerivationConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration with no rate features
    pub fn without_rates() -> Self {
        Self {
            rates: Vec::new(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read and validate a configuration file (`.json`, otherwise TOML)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            FeatureError::InvalidConfig(format!("{}: {}", path.display(), e))
        })?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                Self::from_json(&text).map_err(|e| FeatureError::InvalidConfig(e.to_string()))?
            }
            _ => Self::from_toml(&text).map_err(|e| FeatureError::InvalidConfig(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let mut outputs = HashSet::new();

        for rate in &self.rates {
            for name in [&rate.numerator, &rate.denominator, &rate.output] {
                check_attribute_name(name)?;
            }
            if rate.numerator == rate.denominator {
                return Err(FeatureError::InvalidConfig(format!(
                    "rate {} divides {} by itself",
                    rate.output_column(),
                    rate.numerator
                )));
            }
            if !outputs.insert(rate.output_column()) {
                return Err(FeatureError::InvalidConfig(format!(
                    "rate output declared twice: {}",
                    rate.output_column()
                )));
            }
        }

        let mut declared = HashSet::new();
        for attribute in &self.attributes {
            check_attribute_name(attribute)?;
            if !declared.insert(attribute) {
                return Err(FeatureError::InvalidConfig(format!(
                    "attribute declared twice: {}",
                    attribute
                )));
            }
        }

        Ok(())
    }
}

/// Attribute names are matched after lowercasing, so they must be lowercase
fn check_attribute_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FeatureError::InvalidConfig(
            "attribute names must not be empty".to_string(),
        ));
    }
    if name != name.to_lowercase() {
        return Err(FeatureError::InvalidConfig(format!(
            "attribute names must be lowercase: {}",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates_cover_both_sides() {
        let rates = social_rates();
        assert_eq!(rates.len(), 8);
        assert_eq!(rates[0].output_column(), "a_follow_rate");
        assert_eq!(rates[0].numerator_column(), "a_following_count");
        assert_eq!(rates[0].denominator_column(), "a_follower_count");
        assert_eq!(rates[4].output_column(), "b_follow_rate");
        assert_eq!(rates[7].denominator_column(), "b_posts");
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = DerivationConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.compare_rates);
    }

    #[test]
    fn test_from_toml() {
        let config = DerivationConfig::from_toml(
            r#"
            compare_rates = false
            attributes = ["posts"]

            [[rates]]
            side = "a"
            numerator = "listed_count"
            denominator = "posts"
            output = "popularity_rate"
            "#,
        )
        .unwrap();

        assert!(!config.compare_rates);
        assert_eq!(config.attributes, vec!["posts"]);
        assert_eq!(
            config.rates,
            vec![RateSpec::new(Side::A, "listed_count", "posts", "popularity_rate")]
        );
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = DerivationConfig::from_toml("attributes = []").unwrap();
        assert_eq!(config.rates, social_rates());
    }

    #[test]
    fn test_json_round_trip() {
        let config = DerivationConfig::without_rates();
        let json = config.to_json().unwrap();
        assert_eq!(DerivationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_duplicate_outputs() {
        let mut config = DerivationConfig::default();
        config
            .rates
            .push(RateSpec::new(Side::B, "posts", "listed_count", "follow_rate"));
        assert!(matches!(
            config.validate(),
            Err(FeatureError::InvalidConfig(msg)) if msg.contains("b_follow_rate")
        ));
    }

    #[test]
    fn test_validate_rejects_uppercase_names() {
        let config = DerivationConfig {
            attributes: vec!["Posts".to_string()],
            ..DerivationConfig::without_rates()
        };
        assert!(matches!(config.validate(), Err(FeatureError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.toml");
        std::fs::write(&path, "compare_rates = false\n").unwrap();

        let config = DerivationConfig::load(&path).unwrap();
        assert!(!config.compare_rates);

        let missing = DerivationConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(FeatureError::InvalidConfig(_))));
    }
}
