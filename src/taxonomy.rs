//! Bidirectional lookup tables between a provider's native vocabulary and
//! the canonical enums of [`crate::models`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Which taxonomy a codec translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Genre,
    Status,
    Type,
    Sort,
    Order,
    Language,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Genre => "genre",
            Axis::Status => "status",
            Axis::Type => "type",
            Axis::Sort => "sort",
            Axis::Order => "order",
            Axis::Language => "language",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("{axis} `{value}` is not known to this source")]
    UnknownNative { axis: Axis, value: String },

    #[error("{axis} `{value}` is not supported by this source")]
    Unsupported { axis: Axis, value: String },

    #[error("{axis} table lists native key `{native}` more than once")]
    DuplicateNative { axis: Axis, native: String },

    #[error("{axis} table maps both `{first}` and `{second}` to `{canonical}`")]
    DuplicateCanonical {
        axis: Axis,
        canonical: String,
        first: String,
        second: String,
    },
}

/// Finite one-to-one association between native keys and canonical values.
#[derive(Debug, Clone)]
pub struct Codec<C> {
    axis: Axis,
    order: Vec<C>,
    forward: HashMap<&'static str, C>,
    reverse: HashMap<C, &'static str>,
}

impl<C> Codec<C>
where
    C: Copy + Eq + Hash + fmt::Display,
{
    /// Builds the codec, refusing any table that is not injective in both
    /// directions.
    pub fn new(axis: Axis, table: &[(&'static str, C)]) -> Result<Self, TaxonomyError> {
        let mut order = Vec::with_capacity(table.len());
        let mut forward = HashMap::with_capacity(table.len());
        let mut reverse = HashMap::with_capacity(table.len());

        for &(native, canonical) in table {
            if forward.insert(native, canonical).is_some() {
                return Err(TaxonomyError::DuplicateNative {
                    axis,
                    native: native.to_string(),
                });
            }
            if let Some(first) = reverse.insert(canonical, native) {
                return Err(TaxonomyError::DuplicateCanonical {
                    axis,
                    canonical: canonical.to_string(),
                    first: first.to_string(),
                    second: native.to_string(),
                });
            }
            order.push(canonical);
        }

        Ok(Self {
            axis,
            order,
            forward,
            reverse,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn to_canonical(&self, native: &str) -> Result<C, TaxonomyError> {
        self.forward
            .get(native)
            .copied()
            .ok_or_else(|| TaxonomyError::UnknownNative {
                axis: self.axis,
                value: native.to_string(),
            })
    }

    pub fn to_native(&self, canonical: C) -> Result<&'static str, TaxonomyError> {
        self.reverse
            .get(&canonical)
            .copied()
            .ok_or_else(|| TaxonomyError::Unsupported {
                axis: self.axis,
                value: canonical.to_string(),
            })
    }

    /// Converts every value or fails on the first unsupported one.
    pub fn to_natives(&self, values: &[C]) -> Result<Vec<&'static str>, TaxonomyError> {
        values.iter().map(|v| self.to_native(*v)).collect()
    }

    /// Canonical values this codec round-trips, in table order.
    pub fn supported(&self) -> Vec<C> {
        self.order.clone()
    }

    pub fn natives(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().filter_map(|c| self.reverse.get(c).copied())
    }
}
