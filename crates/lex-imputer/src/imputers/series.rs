//! Polars adapter for string-valued imputers.
//!
//! Series of any dtype are cast to strings first; polars nulls become absent
//! values and float NaN becomes the `"NaN"` token, so both fall under the
//! canonical missing marker.

use super::CategoricalImputer;
use crate::error::{Result, ResultExt};
use polars::prelude::*;
use tracing::debug;

impl CategoricalImputer<String> {
    /// Learn the fill value from a Series.
    pub fn fit_series(&mut self, series: &Series) -> Result<&mut Self> {
        let values = series_values(series)?;
        self.fit(&values)
            .map_err(|e| e.with_context(format!("Fitting on column '{}'", series.name())))
    }

    /// Impute a Series, returning a new String Series with the same name.
    ///
    /// Series are never imputed in place, whatever the `copy` option says.
    pub fn transform_series(&self, series: &Series) -> Result<Series> {
        let values = series_values(series)?;
        let imputed = self.transform_owned(values)?;
        Ok(Series::new(series.name().clone(), imputed))
    }

    /// Fit on a Series, then impute it.
    pub fn fit_transform_series(&mut self, series: &Series) -> Result<Series> {
        self.fit_series(series)?;
        self.transform_series(series)
    }

    /// Impute one column of a DataFrame, replacing it in place.
    ///
    /// Returns the number of filled positions.
    pub fn transform_column(&self, df: &mut DataFrame, col_name: &str) -> Result<usize> {
        let series = df
            .column(col_name)
            .context(format!("Looking up column '{}'", col_name))?
            .as_materialized_series()
            .clone();

        let mut values = series_values(&series)?;
        let filled = self.transform_in_place(&mut values)?;

        df.replace(col_name, Series::new(series.name().clone(), values))?;
        debug!("Imputed {} entries in column '{}'", filled, col_name);

        Ok(filled)
    }
}

/// Read a Series as optional strings.
pub fn series_values(series: &Series) -> Result<Vec<Option<String>>> {
    let str_series = series
        .cast(&DataType::String)
        .context(format!("Casting column '{}' to string", series.name()))?;

    let values = str_series
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImputerConfig, Strategy, TieBreaking};

    fn str_values(series: &Series) -> Vec<Option<String>> {
        series_values(series).unwrap()
    }

    #[test]
    fn test_series_values_nulls_become_none() {
        let series = Series::new("color".into(), &[Some("red"), None, Some("NaN")]);
        assert_eq!(
            str_values(&series),
            vec![Some("red".to_string()), None, Some("NaN".to_string())]
        );
    }

    #[test]
    fn test_fit_series_mode() {
        let series = Series::new(
            "color".into(),
            &[Some("red"), Some("blue"), None, Some("red")],
        );
        let mut imputer = CategoricalImputer::<String>::default();
        imputer.fit_series(&series).unwrap();
        assert_eq!(imputer.fill_value(), Some(&"red".to_string()));
    }

    #[test]
    fn test_fit_series_numeric_column() {
        let series = Series::new("code".into(), &[Some(1i64), Some(2), Some(2), None]);
        let mut imputer = CategoricalImputer::<String>::default();
        imputer.fit_series(&series).unwrap();
        assert_eq!(imputer.fill_value(), Some(&"2".to_string()));
    }

    #[test]
    fn test_fit_series_all_null_has_context() {
        let series = Series::new("color".into(), &[Option::<&str>::None, None]);
        let mut imputer = CategoricalImputer::<String>::default();
        let err = imputer.fit_series(&series).unwrap_err();

        assert_eq!(err.error_code(), "NO_VALID_VALUES");
        assert!(err.to_string().contains("color"));
    }

    #[test]
    fn test_transform_series_keeps_name() {
        let train = Series::new("color".into(), &[Some("red"), Some("red"), Some("blue")]);
        let mut imputer = CategoricalImputer::<String>::default();
        imputer.fit_series(&train).unwrap();

        let test = Series::new("color".into(), &[None, Some("blue"), Some("NaN")]);
        let imputed = imputer.transform_series(&test).unwrap();

        assert_eq!(imputed.name().as_str(), "color");
        assert_eq!(imputed.null_count(), 0);
        assert_eq!(
            str_values(&imputed),
            vec![
                Some("red".to_string()),
                Some("blue".to_string()),
                Some("red".to_string())
            ]
        );
    }

    #[test]
    fn test_transform_series_before_fit() {
        let imputer = CategoricalImputer::<String>::default();
        let series = Series::new("color".into(), &[Some("red")]);
        assert!(imputer.transform_series(&series).unwrap_err().is_not_fitted());
    }

    #[test]
    fn test_fit_transform_series_constant() {
        let config = ImputerConfig::builder()
            .strategy(Strategy::Constant)
            .build()
            .unwrap();
        let mut imputer = CategoricalImputer::new(config).unwrap();

        let series = Series::new("x".into(), &[Some("x"), None, Some("y")]);
        let imputed = imputer.fit_transform_series(&series).unwrap();
        assert_eq!(
            str_values(&imputed),
            vec![
                Some("x".to_string()),
                Some("?".to_string()),
                Some("y".to_string())
            ]
        );
    }

    #[test]
    fn test_transform_column() {
        let mut df = df![
            "id" => [1, 2, 3, 4],
            "color" => [Some("red"), None, Some("blue"), Some("blue")],
        ]
        .unwrap();

        let config = ImputerConfig::builder()
            .tie_breaking(TieBreaking::First)
            .build()
            .unwrap();
        let mut imputer = CategoricalImputer::new(config).unwrap();
        imputer
            .fit_series(df.column("color").unwrap().as_materialized_series())
            .unwrap();

        let filled = imputer.transform_column(&mut df, "color").unwrap();
        assert_eq!(filled, 1);

        let color = df.column("color").unwrap();
        assert_eq!(color.null_count(), 0);
        assert_eq!(color.get(1).unwrap().to_string(), "\"blue\"");
        assert_eq!(df.height(), 4);
    }

    #[test]
    fn test_transform_column_counts_null_and_nan_token() {
        let mut df = df![
            "color" => [None, Some("NaN"), Some("red"), Some("red")],
        ]
        .unwrap();
        let mut imputer = CategoricalImputer::<String>::default();
        imputer.fit(&[Some("red".to_string())]).unwrap();

        let filled = imputer.transform_column(&mut df, "color").unwrap();
        assert_eq!(filled, 2);
        assert_eq!(
            str_values(df.column("color").unwrap().as_materialized_series()),
            vec![Some("red".to_string()); 4]
        );
    }

    #[test]
    fn test_transform_column_before_fit_leaves_frame() {
        let mut df = df!["color" => [None, Some("red")]].unwrap();
        let imputer = CategoricalImputer::<String>::default();

        let err = imputer.transform_column(&mut df, "color").unwrap_err();
        assert!(err.is_not_fitted());
        assert_eq!(df.column("color").unwrap().null_count(), 1);
    }

    #[test]
    fn test_transform_column_missing_column() {
        let mut df = df!["id" => [1, 2]].unwrap();
        let mut imputer = CategoricalImputer::<String>::default();
        imputer.fit(&[Some("a".to_string())]).unwrap();

        let err = imputer.transform_column(&mut df, "color").unwrap_err();
        assert_eq!(err.error_code(), "POLARS_ERROR");
    }
}
