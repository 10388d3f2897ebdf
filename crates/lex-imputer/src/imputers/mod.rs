//! Imputation module for handling missing values.
//!
//! This module provides the categorical imputer, which fills missing entries
//! with either:
//! - the most frequent observed value (mode), or
//! - a configured constant
//!
//! A Polars adapter lets the same imputer work on `Series` and single
//! `DataFrame` columns.

mod categorical;
mod series;

pub use categorical::CategoricalImputer;
pub use series::series_values;
