//! Most-frequent / constant imputation for one-dimensional categorical data.
//!
//! The imputer follows the fit/transform lifecycle of a pipeline stage:
//! [`CategoricalImputer::fit`] learns a single fill value, and
//! [`CategoricalImputer::transform`] writes it at every missing position of
//! any later sequence.

use crate::config::{ImputerConfig, Strategy, TieBreaking};
use crate::error::{ImputerError, Result};
use crate::types::Categorical;
use crate::utils::{count_missing, missing_mask, modes, observed_values};
use rand::prelude::*;
use std::fmt;
use tracing::{debug, info, warn};

/// Impute missing entries with the most frequent value of the training
/// data, or with a fixed constant.
///
/// # Example
///
/// ```rust,ignore
/// use lex_imputer::{CategoricalImputer, ImputerConfig, TieBreaking};
///
/// let config = ImputerConfig::builder().tie_breaking(TieBreaking::First).build()?;
/// let mut imputer = CategoricalImputer::new(config)?;
///
/// let mut data = vec![Some("a"), Some("b"), Some("b"), None];
/// let imputed = imputer.fit_transform(&mut data)?;
/// assert_eq!(imputed, vec![Some("a"), Some("b"), Some("b"), Some("b")]);
/// ```
pub struct CategoricalImputer<T> {
    config: ImputerConfig<T>,
    fill: Option<T>,
    rng: StdRng,
}

impl<T: Categorical> CategoricalImputer<T> {
    /// Create an unfitted imputer from a configuration.
    ///
    /// The configuration is validated here, before any data is seen.
    pub fn new(config: ImputerConfig<T>) -> Result<Self> {
        config.validate()?;

        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            fill: None,
            rng,
        })
    }

    /// The configuration this imputer was built with.
    pub fn config(&self) -> &ImputerConfig<T> {
        &self.config
    }

    /// The learned fill value, if the imputer has been fitted.
    pub fn fill_value(&self) -> Option<&T> {
        self.fill.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.fill.is_some()
    }

    /// Learn the fill value from `data`.
    ///
    /// The random tie-breaking policy draws from the imputer's own source,
    /// seeded from the configuration. On failure the previously learned
    /// value, if any, is kept.
    pub fn fit(&mut self, data: &[Option<T>]) -> Result<&mut Self> {
        let fill = Self::learn(&self.config, data, &mut self.rng)?;
        self.fill = Some(fill);
        Ok(self)
    }

    /// Learn the fill value from `data`, drawing random tie-breaks from
    /// `rng` instead of the imputer's own source.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        data: &[Option<T>],
        rng: &mut R,
    ) -> Result<&mut Self> {
        let fill = Self::learn(&self.config, data, rng)?;
        self.fill = Some(fill);
        Ok(self)
    }

    /// Replace every missing entry of `data` with the learned fill value.
    ///
    /// With `copy` enabled the input is left untouched and a new vector is
    /// returned. With `copy` disabled the input is imputed in place and the
    /// returned vector is a snapshot of it.
    pub fn transform(&self, data: &mut [Option<T>]) -> Result<Vec<Option<T>>> {
        let fill = self.fitted()?;

        if self.config.copy {
            let mut imputed = data.to_vec();
            self.fill_masked(&mut imputed, fill);
            Ok(imputed)
        } else {
            self.fill_masked(data, fill);
            Ok(data.to_vec())
        }
    }

    /// Impute `data` in place regardless of the `copy` option.
    ///
    /// Returns the number of filled positions.
    pub fn transform_in_place(&self, data: &mut [Option<T>]) -> Result<usize> {
        let fill = self.fitted()?;
        Ok(self.fill_masked(data, fill))
    }

    /// Impute an owned sequence and hand it back.
    pub fn transform_owned(&self, mut data: Vec<Option<T>>) -> Result<Vec<Option<T>>> {
        let fill = self.fitted()?;
        self.fill_masked(&mut data, fill);
        Ok(data)
    }

    /// Fit on `data`, then transform it.
    pub fn fit_transform(&mut self, data: &mut [Option<T>]) -> Result<Vec<Option<T>>> {
        self.fit(data)?;
        self.transform(data)
    }

    fn fitted(&self) -> Result<&T> {
        self.fill.as_ref().ok_or(ImputerError::NotFitted)
    }

    /// Write `fill` at every masked position, returning how many were filled.
    fn fill_masked(&self, data: &mut [Option<T>], fill: &T) -> usize {
        // Recomputed per call: transform never assumes it sees the fit data.
        let mask = missing_mask(data, &self.config.missing_values);
        let filled = count_missing(&mask);

        for (entry, missing) in data.iter_mut().zip(mask) {
            if missing {
                *entry = Some(fill.clone());
            }
        }

        debug!("Filled {} of {} entries with {}", filled, data.len(), fill);
        filled
    }

    fn learn<R: Rng + ?Sized>(
        config: &ImputerConfig<T>,
        data: &[Option<T>],
        rng: &mut R,
    ) -> Result<T> {
        if config.strategy == Strategy::Constant {
            let fill = config.fill_value.clone().ok_or_else(|| {
                ImputerError::InvalidConfig("constant strategy without a fill value".to_string())
            })?;
            info!("Learned constant fill value: {}", fill);
            return Ok(fill);
        }

        let observed = observed_values(data, &config.missing_values);
        debug!(
            "Fitting on {} observed of {} entries",
            observed.len(),
            data.len()
        );

        let (mut candidates, count) = modes(observed);
        let fill = match (candidates.len(), config.tie_breaking) {
            (0, _) => return Err(ImputerError::NoValidValues),
            (1, _) => candidates.swap_remove(0),
            (_, TieBreaking::Error) => {
                return Err(ImputerError::UnresolvedTie {
                    candidates: candidates.iter().map(ToString::to_string).collect(),
                    count,
                });
            }
            (n, TieBreaking::Random) => {
                warn!("{} values tied at {} occurrences, picking at random", n, count);
                candidates.swap_remove(rng.gen_range(0..n))
            }
            (n, TieBreaking::First) => {
                warn!("{} values tied at {} occurrences, taking the first", n, count);
                candidates.swap_remove(0)
            }
        };

        info!("Learned most frequent fill value: {} ({} occurrences)", fill, count);
        Ok(fill)
    }
}

impl<T: Categorical> Default for CategoricalImputer<T> {
    fn default() -> Self {
        Self {
            config: ImputerConfig::default(),
            fill: None,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<T: Categorical> fmt::Debug for CategoricalImputer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoricalImputer")
            .field("config", &self.config)
            .field("fill", &self.fill)
            .finish_non_exhaustive()
    }
}
