//! Pipeline-stage interface.
//!
//! A surrounding orchestrator drives stages through [`Transformer`] and can
//! hold them as `Box<dyn Transformer<T>>`. Stages receive shared slices, so
//! the trait-level `transform` never mutates its input.

use crate::error::Result;
use crate::imputers::CategoricalImputer;
use crate::types::Categorical;

/// Trait for fit/transform pipeline stages over one-dimensional data.
pub trait Transformer<T>: Send {
    /// Learn whatever state the stage needs from training data.
    fn fit(&mut self, data: &[Option<T>]) -> Result<()>;

    /// Apply the learned state to `data`, returning a new sequence.
    fn transform(&self, data: &[Option<T>]) -> Result<Vec<Option<T>>>;

    /// Fit on `data`, then transform it.
    fn fit_transform(&mut self, data: &[Option<T>]) -> Result<Vec<Option<T>>> {
        self.fit(data)?;
        self.transform(data)
    }
}

impl<T: Categorical + Send> Transformer<T> for CategoricalImputer<T> {
    fn fit(&mut self, data: &[Option<T>]) -> Result<()> {
        CategoricalImputer::fit(self, data).map(|_| ())
    }

    fn transform(&self, data: &[Option<T>]) -> Result<Vec<Option<T>>> {
        self.transform_owned(data.to_vec())
    }
}
