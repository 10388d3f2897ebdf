//! Core types shared by the imputer: the scalar trait and the missing-value
//! sentinel.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Token that selects the canonical missing marker when parsed as a sentinel.
pub const NAN_TOKEN: &str = "NaN";

/// Default replacement for string columns under the constant strategy.
pub const DEFAULT_STRING_FILL: &str = "?";

/// A scalar that can be counted, ordered and imputed.
///
/// `Ord` defines the canonical ordering used by the `First` tie-breaking
/// policy; `Hash + Eq` drive the frequency count.
pub trait Categorical: Clone + Eq + Hash + Ord + Debug + Display {
    /// Whether this value stands for "no value" under the canonical marker.
    fn is_nan_like(&self) -> bool {
        false
    }

    /// Fill value used by the constant strategy when none is configured.
    fn default_fill() -> Option<Self> {
        None
    }
}

impl Categorical for String {
    fn is_nan_like(&self) -> bool {
        self == NAN_TOKEN
    }

    fn default_fill() -> Option<Self> {
        Some(DEFAULT_STRING_FILL.to_string())
    }
}

impl Categorical for &str {
    fn is_nan_like(&self) -> bool {
        *self == NAN_TOKEN
    }

    fn default_fill() -> Option<Self> {
        Some(DEFAULT_STRING_FILL)
    }
}

macro_rules! impl_categorical {
    ($($t:ty),*) => {
        $(impl Categorical for $t {})*
    };
}

impl_categorical!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, bool, char);

/// The sentinel identifying which entries are missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValues<T> {
    /// Canonical marker: absent values and NaN-like values.
    Null,
    /// Entries equal to this value.
    Value(T),
}

impl<T> Default for MissingValues<T> {
    fn default() -> Self {
        MissingValues::Null
    }
}

impl<T: Categorical> MissingValues<T> {
    /// Build a sentinel from a value, mapping NaN-like values to the
    /// canonical marker.
    pub fn from_value(value: T) -> Self {
        if value.is_nan_like() {
            MissingValues::Null
        } else {
            MissingValues::Value(value)
        }
    }

    /// Whether a single entry counts as missing under this sentinel.
    ///
    /// A NaN-like `Value` sentinel behaves exactly like `Null`.
    #[inline]
    pub fn matches(&self, entry: Option<&T>) -> bool {
        match (self, entry) {
            (MissingValues::Null, None) => true,
            (MissingValues::Null, Some(v)) => v.is_nan_like(),
            (MissingValues::Value(s), None) if s.is_nan_like() => true,
            (MissingValues::Value(s), Some(v)) if s.is_nan_like() => v.is_nan_like(),
            (MissingValues::Value(_), None) => false,
            (MissingValues::Value(sentinel), Some(v)) => v == sentinel,
        }
    }
}

impl MissingValues<String> {
    /// Parse a sentinel token. `"NaN"` and the empty string select the
    /// canonical marker.
    pub fn parse(token: &str) -> Self {
        if token.is_empty() || token == NAN_TOKEN {
            MissingValues::Null
        } else {
            MissingValues::Value(token.to_string())
        }
    }
}
