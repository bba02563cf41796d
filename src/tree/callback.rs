//! Training observation hooks.
//!
//! The grow loop notifies an injectable callback at well-defined points:
//! split evaluated, split chosen, leaf created. Disabled by default via
//! [`NoopCallback`]; the callback never influences control flow.

/// A candidate or chosen split, as reported to [`FitCallback`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitCandidate {
    /// Numeric threshold split: feature value `<= threshold` routes left.
    Numeric {
        /// Index of the numeric feature
        feature_idx: usize,
        /// Threshold at the evaluated boundary
        threshold: f64,
    },
    /// One-vs-rest categorical split: feature value `== category` routes left.
    Categorical {
        /// Index of the categorical feature
        feature_idx: usize,
        /// Category value of the evaluated run
        category: i32,
    },
}

/// Callback trait for observing tree growth.
///
/// Implement this to receive notifications during training for logging or
/// diagnostics. All methods default to no-ops, so implementations override
/// only what they need.
pub trait FitCallback {
    /// Called for every candidate split boundary, with its weighted entropy.
    fn on_split_evaluated(&mut self, _depth: usize, _candidate: &SplitCandidate, _loss: f64) {}

    /// Called when a split wins and becomes an internal node.
    fn on_split_chosen(&mut self, _depth: usize, _candidate: &SplitCandidate, _loss: f64) {}

    /// Called when a range becomes a leaf.
    fn on_leaf_created(&mut self, _depth: usize, _label: usize, _n_samples: usize) {}
}

/// The default observer: ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallback;

impl FitCallback for NoopCallback {}
