//! Categorical Imputation Library
//!
//! A small, strongly-typed missing-value imputer for categorical data,
//! built to sit inside a machine-learning pipeline.
//!
//! # Overview
//!
//! [`CategoricalImputer`] follows the fit/transform lifecycle:
//!
//! - **Fit**: learn a single fill value, either the most frequent observed
//!   value or a configured constant
//! - **Transform**: replace every missing entry of a (possibly different)
//!   sequence with that value
//!
//! Missing entries are `None`, NaN-like values (the `"NaN"` string), or any
//! value equal to a configured sentinel.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_imputer::{CategoricalImputer, ImputerConfig, TieBreaking};
//!
//! let config = ImputerConfig::builder()
//!     .tie_breaking(TieBreaking::First)
//!     .build()?;
//!
//! let mut imputer = CategoricalImputer::new(config)?;
//! imputer.fit(&[Some("a"), Some("b"), Some("b"), Some("NaN")])?;
//!
//! let mut data = vec![Some("a"), Some("NaN"), Some("b")];
//! let imputed = imputer.transform(&mut data)?;
//! assert_eq!(imputed, vec![Some("a"), Some("b"), Some("b")]);
//! ```
//!
//! # Tie-breaking
//!
//! When several values share the highest frequency, [`TieBreaking`] decides:
//! `Error` fails the fit, `First` takes the smallest value in natural order,
//! and `Random` draws uniformly from the tied set using a seedable source
//! (see [`ImputerConfigBuilder::random_seed`]).
//!
//! # Polars
//!
//! String imputers also work on `polars` data directly:
//!
//! ```rust,ignore
//! use lex_imputer::CategoricalImputer;
//! use polars::prelude::*;
//!
//! let mut imputer = CategoricalImputer::<String>::default();
//! imputer.fit_series(df.column("embarked")?.as_materialized_series())?;
//! imputer.transform_column(&mut df, "embarked")?;
//! ```

pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, ImputerConfig, ImputerConfigBuilder, Strategy, TieBreaking,
};
pub use error::{ImputerError, Result as ImputerResult, ResultExt};
pub use imputers::{CategoricalImputer, series_values};
pub use pipeline::Transformer;
pub use types::{Categorical, MissingValues};
pub use utils::{missing_mask, modes};
