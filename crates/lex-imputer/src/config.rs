//! Configuration types for the categorical imputer.
//!
//! This module provides configuration options using the builder pattern.
//! Every option is validated when the configuration is built, so an
//! invalid strategy or tie-breaking policy is reported before any data is
//! seen.

use crate::types::{Categorical, MissingValues};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the fill value is learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Use the most frequent non-missing value (mode)
    #[default]
    MostFrequent,
    /// Use the configured fill value, ignoring the data
    Constant,
}

impl Strategy {
    /// All accepted strategy names.
    pub const NAMES: [&'static str; 2] = ["constant", "most_frequent"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::MostFrequent => "most_frequent",
            Strategy::Constant => "constant",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "most_frequent" => Ok(Strategy::MostFrequent),
            "constant" => Ok(Strategy::Constant),
            other => Err(ConfigValidationError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Policy for resolving several equally frequent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaking {
    /// Fail the fit
    #[default]
    Error,
    /// Take the smallest tied value in natural order
    First,
    /// Pick uniformly at random among the tied values
    Random,
}

impl TieBreaking {
    /// All accepted tie-breaking names.
    pub const NAMES: [&'static str; 3] = ["error", "first", "random"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreaking::Error => "error",
            TieBreaking::First => "first",
            TieBreaking::Random => "random",
        }
    }
}

impl fmt::Display for TieBreaking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieBreaking {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(TieBreaking::Error),
            "first" => Ok(TieBreaking::First),
            "random" => Ok(TieBreaking::Random),
            other => Err(ConfigValidationError::UnknownTieBreaking(other.to_string())),
        }
    }
}

/// Configuration for [`CategoricalImputer`](crate::CategoricalImputer).
///
/// Use [`ImputerConfig::builder()`] to create a configuration with the
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_imputer::config::{ImputerConfig, Strategy, TieBreaking};
///
/// let config = ImputerConfig::<String>::builder()
///     .strategy(Strategy::MostFrequent)
///     .tie_breaking(TieBreaking::First)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputerConfig<T> {
    /// Sentinel identifying missing entries.
    /// Default: canonical missing marker
    pub missing_values: MissingValues<T>,

    /// How the fill value is learned.
    /// Default: MostFrequent
    pub strategy: Strategy,

    /// Replacement used only by the constant strategy.
    /// Default: "?" for strings, none for other scalars
    pub fill_value: Option<T>,

    /// Policy applied when several values tie for most frequent.
    /// Default: Error
    pub tie_breaking: TieBreaking,

    /// Whether `transform` works on a duplicate of its input.
    /// Default: true
    pub copy: bool,

    /// Seed for the random tie-breaking source.
    /// If None, the source is seeded from system entropy.
    /// Default: None
    pub random_seed: Option<u64>,
}

impl<T: Categorical> Default for ImputerConfig<T> {
    fn default() -> Self {
        Self {
            missing_values: MissingValues::Null,
            strategy: Strategy::default(),
            fill_value: T::default_fill(),
            tie_breaking: TieBreaking::default(),
            copy: true,
            random_seed: None,
        }
    }
}

impl<T: Categorical> ImputerConfig<T> {
    /// Create a new configuration builder.
    pub fn builder() -> ImputerConfigBuilder<T> {
        ImputerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.strategy == Strategy::Constant && self.fill_value.is_none() {
            return Err(ConfigValidationError::MissingFillValue);
        }

        Ok(())
    }
}

impl<T: Categorical + DeserializeOwned> ImputerConfig<T> {
    /// Parse and validate a configuration from JSON.
    ///
    /// Unknown strategy or tie-breaking names are rejected here.
    pub fn from_json(json: &str) -> Result<Self, ConfigValidationError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigValidationError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Strategy '{0}' not in {names:?}", names = Strategy::NAMES)]
    UnknownStrategy(String),

    #[error("Tie-breaking '{0}' not in {names:?}", names = TieBreaking::NAMES)]
    UnknownTieBreaking(String),

    #[error("The constant strategy requires a fill value")]
    MissingFillValue,

    #[error("Malformed configuration: {0}")]
    Malformed(String),
}

/// Builder for [`ImputerConfig`] with fluent API.
#[derive(Debug)]
pub struct ImputerConfigBuilder<T> {
    missing_values: Option<MissingValues<T>>,
    strategy: Option<Strategy>,
    fill_value: Option<T>,
    tie_breaking: Option<TieBreaking>,
    copy: Option<bool>,
    random_seed: Option<u64>,
}

impl<T> Default for ImputerConfigBuilder<T> {
    fn default() -> Self {
        Self {
            missing_values: None,
            strategy: None,
            fill_value: None,
            tie_breaking: None,
            copy: None,
            random_seed: None,
        }
    }
}

impl<T: Categorical> ImputerConfigBuilder<T> {
    /// Set the missing-value sentinel.
    pub fn missing_values(mut self, missing_values: MissingValues<T>) -> Self {
        self.missing_values = Some(missing_values);
        self
    }

    /// Treat entries equal to `value` as missing.
    ///
    /// A NaN-like value selects the canonical missing marker.
    pub fn missing_value(mut self, value: T) -> Self {
        self.missing_values = Some(MissingValues::from_value(value));
        self
    }

    /// Set the imputation strategy.
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the replacement for the constant strategy.
    pub fn fill_value(mut self, value: T) -> Self {
        self.fill_value = Some(value);
        self
    }

    /// Set the tie-breaking policy.
    pub fn tie_breaking(mut self, tie_breaking: TieBreaking) -> Self {
        self.tie_breaking = Some(tie_breaking);
        self
    }

    /// Choose between imputing a duplicate (`true`) or the input itself.
    pub fn copy(mut self, copy: bool) -> Self {
        self.copy = Some(copy);
        self
    }

    /// Seed the random tie-breaking source.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ImputerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ImputerConfig<T>, ConfigValidationError> {
        let config = ImputerConfig {
            missing_values: self.missing_values.unwrap_or_default(),
            strategy: self.strategy.unwrap_or_default(),
            fill_value: self.fill_value.or_else(T::default_fill),
            tie_breaking: self.tie_breaking.unwrap_or_default(),
            copy: self.copy.unwrap_or(true),
            random_seed: self.random_seed,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ImputerConfig::<String>::default();
        assert_eq!(config.missing_values, MissingValues::Null);
        assert_eq!(config.strategy, Strategy::MostFrequent);
        assert_eq!(config.fill_value, Some("?".to_string()));
        assert_eq!(config.tie_breaking, TieBreaking::Error);
        assert!(config.copy);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = ImputerConfig::<String>::builder().build().unwrap();
        assert_eq!(built, ImputerConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ImputerConfig::builder()
            .missing_value("?")
            .strategy(Strategy::Constant)
            .fill_value("unknown")
            .tie_breaking(TieBreaking::Random)
            .copy(false)
            .random_seed(7)
            .build()
            .unwrap();

        assert_eq!(config.missing_values, MissingValues::Value("?"));
        assert_eq!(config.strategy, Strategy::Constant);
        assert_eq!(config.fill_value, Some("unknown"));
        assert_eq!(config.tie_breaking, TieBreaking::Random);
        assert!(!config.copy);
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_builder_nan_sentinel_is_canonical() {
        let config = ImputerConfig::builder().missing_value("NaN").build().unwrap();
        assert_eq!(config.missing_values, MissingValues::Null);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("most_frequent".parse::<Strategy>().unwrap(), Strategy::MostFrequent);
        assert_eq!("constant".parse::<Strategy>().unwrap(), Strategy::Constant);

        let err = "median".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, ConfigValidationError::UnknownStrategy(ref s) if s == "median"));
        assert!(err.to_string().contains("most_frequent"));
    }

    #[test]
    fn test_tie_breaking_from_str() {
        assert_eq!("error".parse::<TieBreaking>().unwrap(), TieBreaking::Error);
        assert_eq!("first".parse::<TieBreaking>().unwrap(), TieBreaking::First);
        assert_eq!("random".parse::<TieBreaking>().unwrap(), TieBreaking::Random);
        assert!(matches!(
            "last".parse::<TieBreaking>(),
            Err(ConfigValidationError::UnknownTieBreaking(_))
        ));
    }

    #[test]
    fn test_validation_constant_without_fill_value() {
        let result = ImputerConfig::<i64>::builder()
            .strategy(Strategy::Constant)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::MissingFillValue
        ));
    }

    #[test]
    fn test_most_frequent_without_fill_value_is_valid() {
        let config = ImputerConfig::<i64>::builder().build().unwrap();
        assert_eq!(config.fill_value, None);
    }

    #[test]
    fn test_config_serialization() {
        let config = ImputerConfig::<String>::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ImputerConfig<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "missing_values": {"value": "?"},
            "strategy": "most_frequent",
            "fill_value": null,
            "tie_breaking": "first",
            "copy": false,
            "random_seed": 42
        }"#;

        let config = ImputerConfig::<String>::from_json(json).unwrap();
        assert_eq!(config.missing_values, MissingValues::Value("?".to_string()));
        assert_eq!(config.tie_breaking, TieBreaking::First);
        assert!(!config.copy);
        assert_eq!(config.random_seed, Some(42));
    }

    #[test]
    fn test_config_from_json_rejects_unknown_strategy() {
        let json = r#"{
            "missing_values": "null",
            "strategy": "mean",
            "fill_value": "?",
            "tie_breaking": "error",
            "copy": true,
            "random_seed": null
        }"#;

        let result = ImputerConfig::<String>::from_json(json);
        assert!(matches!(result, Err(ConfigValidationError::Malformed(_))));
    }
}
