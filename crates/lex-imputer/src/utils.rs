//! Shared helpers for the imputer: the missing-value mask and the mode
//! computation.

use crate::types::{Categorical, MissingValues};
use std::collections::HashMap;

// =============================================================================
// Mask Utilities
// =============================================================================

/// Compute the boolean mask of entries matched by `missing_values`.
///
/// The mask has the same length as `values`.
pub fn missing_mask<T: Categorical>(
    values: &[Option<T>],
    missing_values: &MissingValues<T>,
) -> Vec<bool> {
    values
        .iter()
        .map(|entry| missing_values.matches(entry.as_ref()))
        .collect()
}

/// Collect the observed values, in their original relative order.
///
/// Masked entries are dropped, and so are absent values a non-canonical
/// sentinel leaves unmasked: they carry nothing to count.
pub fn observed_values<'a, T: Categorical>(
    values: &'a [Option<T>],
    missing_values: &MissingValues<T>,
) -> Vec<&'a T> {
    values
        .iter()
        .filter(|&entry| !missing_values.matches(entry.as_ref()))
        .filter_map(Option::as_ref)
        .collect()
}

// =============================================================================
// Frequency Utilities
// =============================================================================

/// Count occurrences of every distinct value.
pub fn value_counts<'a, T, I>(values: I) -> HashMap<&'a T, usize>
where
    T: Categorical + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// The set of values sharing the highest frequency.
///
/// Returns the mode set in ascending natural order together with the shared
/// count. Ties are kept, not collapsed. An empty input yields an empty set
/// and a count of zero.
pub fn modes<'a, T, I>(values: I) -> (Vec<T>, usize)
where
    T: Categorical + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let counts = value_counts(values);
    let max_count = counts.values().copied().max().unwrap_or(0);

    let mut tied: Vec<T> = counts
        .into_iter()
        .filter(|(_, count)| *count == max_count)
        .map(|(value, _)| value.clone())
        .collect();
    tied.sort();

    (tied, max_count)
}

/// Count the `true` entries of a mask.
#[inline]
pub fn count_missing(mask: &[bool]) -> usize {
    mask.iter().filter(|&&m| m).count()
}

// =============================================================================
// Tests
// =============================================================================
