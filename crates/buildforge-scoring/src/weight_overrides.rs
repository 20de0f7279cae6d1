//! Runtime scoring weight configuration.
//!
//! Allows weights to be tuned by name between searches without rebuilding
//! the request's [`Weights`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use buildforge_core::Weights;
use thiserror::Error;

/// A weight name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown weight: {0}")]
pub struct UnknownWeight(pub String);

/// Holds runtime overrides for named scoring weights.
///
/// # Example
///
/// ```
/// use buildforge_core::Weights;
/// use buildforge_scoring::WeightOverrides;
///
/// let overrides = WeightOverrides::from_pairs([("walk_speed", 2.0), ("ehp", 0.0)]);
/// let weights = overrides.apply(&Weights::default());
///
/// assert_eq!(weights.walk_speed, 2.0);
/// assert_eq!(weights.ehp, 0.0);
/// assert_eq!(weights.melee_dps, Weights::default().melee_dps);
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct WeightOverrides {
    weights: HashMap<String, f64>,
}

impl Debug for WeightOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightOverrides")
            .field("count", &self.weights.len())
            .finish()
    }
}

impl WeightOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates overrides from `(name, weight)` pairs.
    pub fn from_pairs<I, N>(iter: I) -> Self
    where
        I: IntoIterator<Item = (N, f64)>,
        N: Into<String>,
    {
        let weights = iter.into_iter().map(|(n, w)| (n.into(), w)).collect();
        Self { weights }
    }

    pub fn put<N: Into<String>>(&mut self, name: N, weight: f64) {
        self.weights.insert(name.into(), weight);
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.weights.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn clear(&mut self) {
        self.weights.clear();
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Fails on the first name that is not a [`Weights`] field, in name order.
    pub fn validate(&self) -> Result<(), UnknownWeight> {
        let mut names: Vec<&String> = self.weights.keys().collect();
        names.sort();
        match names.into_iter().find(|n| !Weights::NAMES.contains(&n.as_str())) {
            Some(name) => Err(UnknownWeight(name.clone())),
            None => Ok(()),
        }
    }

    /// Returns `base` with every known override applied. Unknown names are
    /// skipped.
    pub fn apply(&self, base: &Weights) -> Weights {
        let mut out = *base;
        for name in Weights::NAMES {
            if let Some(value) = self.get(name) {
                out.set(name, value);
            }
        }
        out
    }
}

/// Looks up scoring weights by name.
pub trait WeightProvider: Send + Sync {
    fn weight(&self, name: &str) -> Option<f64>;

    fn weight_or_default(&self, name: &str, default: f64) -> f64 {
        self.weight(name).unwrap_or(default)
    }
}

impl WeightProvider for Weights {
    fn weight(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

impl WeightProvider for WeightOverrides {
    fn weight(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

impl WeightProvider for Arc<WeightOverrides> {
    fn weight(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests;
