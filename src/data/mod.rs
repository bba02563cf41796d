//! Sample store for decision tree training.
//!
//! Provides [`Sample`] (one labeled feature vector with a numeric and a
//! categorical part) and [`SampleSet`], the ordered mutable sequence the
//! tree engine trains on. The engine reorders a `SampleSet` in place during
//! training, so the store hands out `&mut [Sample]` views.

use crate::error::{ArbolError, Result};
use serde::{Deserialize, Serialize};

/// One labeled training or inference sample.
///
/// The numeric part and the categorical part have fixed lengths declared by
/// the [`SampleSet`] (and by the engine); mismatched lengths are rejected at
/// append time rather than discovered mid-training.
///
/// # Examples
///
/// ```
/// use arbol::data::Sample;
///
/// let s = Sample::new(1, vec![0.5, 2.0], vec![0]);
/// assert_eq!(s.label, 1);
/// assert_eq!(s.numeric.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Class label, in `[0, n_labels)` of the engine it is used with
    pub label: usize,
    /// Numeric feature values
    pub numeric: Vec<f64>,
    /// Categorical feature values
    pub categorical: Vec<i32>,
}

impl Sample {
    /// Creates a sample from a label and its two feature vectors.
    #[must_use]
    pub fn new(label: usize, numeric: Vec<f64>, categorical: Vec<i32>) -> Self {
        Self {
            label,
            numeric,
            categorical,
        }
    }
}

/// An ordered, mutable sequence of samples with declared feature dimensions.
///
/// Every appended sample must match the declared numeric and categorical
/// lengths. Training reorders the set in place (the partitioning step swaps
/// samples within sub-ranges); the multiset of samples is unchanged, their
/// order is not.
///
/// # Examples
///
/// ```
/// use arbol::data::{Sample, SampleSet};
///
/// let mut set = SampleSet::new(1, 2);
/// set.push(Sample::new(0, vec![1.0], vec![0, 1])).expect("push should succeed");
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSet {
    numeric_features: usize,
    categorical_features: usize,
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Creates an empty set with the given declared feature lengths.
    #[must_use]
    pub fn new(numeric_features: usize, categorical_features: usize) -> Self {
        Self {
            numeric_features,
            categorical_features,
            samples: Vec::new(),
        }
    }

    /// Declared numeric feature count.
    #[must_use]
    pub fn numeric_features(&self) -> usize {
        self.numeric_features
    }

    /// Declared categorical feature count.
    #[must_use]
    pub fn categorical_features(&self) -> usize {
        self.categorical_features
    }

    /// Number of samples in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the set holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Appends a sample.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if either feature vector's length differs
    /// from the declared count.
    pub fn push(&mut self, sample: Sample) -> Result<()> {
        if sample.numeric.len() != self.numeric_features {
            return Err(ArbolError::dimension_mismatch(
                "numeric len",
                self.numeric_features,
                sample.numeric.len(),
            ));
        }
        if sample.categorical.len() != self.categorical_features {
            return Err(ArbolError::dimension_mismatch(
                "categorical len",
                self.categorical_features,
                sample.categorical.len(),
            ));
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Read-only view of the samples in their current order.
    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Mutable view of the samples; the tree engine partitions through this.
    pub fn as_mut_slice(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    /// Iterates over the samples in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}
