//! Typed-handle adapter over the core.
//!
//! A [`HandleStore`] owns engines, sample sets, and configs in id-keyed
//! maps and exposes create/fit/predict/show/drop entry points over
//! copyable typed ids, for callers that work with opaque resource ids
//! rather than owned values. The core never sees handles; this layer
//! translates ids to owned values at the edge. Stale ids are a typed
//! error.

use std::collections::HashMap;

use crate::data::{Sample, SampleSet};
use crate::error::{ArbolError, Result};
use crate::tree::{DecisionTreeClassifier, FitConfig};

/// Opaque id for a tree engine owned by a [`HandleStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeHandle(u64);

/// Opaque id for a sample set owned by a [`HandleStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleSetHandle(u64);

/// Opaque id for a fit config owned by a [`HandleStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigHandle(u64);

/// Registry owning every resource created through the adapter boundary.
///
/// # Examples
///
/// ```
/// use arbol::handle::HandleStore;
///
/// let mut store = HandleStore::new();
/// let tree = store.create_tree(1, 0, 2);
/// let config = store.create_fit_options(3, 1, 1, 0.0).expect("valid config");
/// let set = store.create_sampleset(1, 0);
/// store.add_sample(set, 0, &[1.0], &[]).expect("add");
/// store.add_sample(set, 1, &[10.0], &[]).expect("add");
/// store.tree_fit(tree, set, config).expect("fit");
/// assert_eq!(store.tree_predict(tree, set).expect("predict"), 0);
/// ```
#[derive(Debug, Default)]
pub struct HandleStore {
    trees: HashMap<u64, DecisionTreeClassifier>,
    sample_sets: HashMap<u64, SampleSet>,
    configs: HashMap<u64, FitConfig>,
    next_id: u64,
}

impl HandleStore {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Creates an unfit engine with the declared cardinalities.
    pub fn create_tree(
        &mut self,
        numeric_features: usize,
        categorical_features: usize,
        n_labels: usize,
    ) -> TreeHandle {
        let id = self.next_id();
        self.trees.insert(
            id,
            DecisionTreeClassifier::new(numeric_features, categorical_features, n_labels),
        );
        TreeHandle(id)
    }

    /// Creates a validated fit config.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` as [`FitConfig::new`] does.
    pub fn create_fit_options(
        &mut self,
        max_depth: usize,
        min_samples_leaf: usize,
        min_samples_split: usize,
        min_purity_decrease: f64,
    ) -> Result<ConfigHandle> {
        let config = FitConfig::new(
            max_depth,
            min_samples_leaf,
            min_samples_split,
            min_purity_decrease,
        )?;
        let id = self.next_id();
        self.configs.insert(id, config);
        Ok(ConfigHandle(id))
    }

    /// Creates an empty sample set with the declared feature lengths.
    pub fn create_sampleset(
        &mut self,
        numeric_features: usize,
        categorical_features: usize,
    ) -> SampleSetHandle {
        let id = self.next_id();
        self.sample_sets
            .insert(id, SampleSet::new(numeric_features, categorical_features));
        SampleSetHandle(id)
    }

    /// Builds one sample from raw arrays and appends it to the set.
    ///
    /// # Errors
    ///
    /// Returns `StaleHandle` for a dead set id and `DimensionMismatch` when
    /// the array lengths disagree with the set's declared counts.
    pub fn add_sample(
        &mut self,
        set: SampleSetHandle,
        label: usize,
        numeric: &[f64],
        categorical: &[i32],
    ) -> Result<()> {
        let set_ref = self
            .sample_sets
            .get_mut(&set.0)
            .ok_or(ArbolError::StaleHandle { id: set.0 })?;
        set_ref.push(Sample::new(label, numeric.to_vec(), categorical.to_vec()))
    }

    /// Trains the engine on the sample set, reordering the set in place.
    ///
    /// # Errors
    ///
    /// Returns `StaleHandle` for any dead id, plus everything
    /// [`DecisionTreeClassifier::fit`] can return.
    pub fn tree_fit(
        &mut self,
        tree: TreeHandle,
        set: SampleSetHandle,
        config: ConfigHandle,
    ) -> Result<()> {
        let config = self
            .configs
            .get(&config.0)
            .cloned()
            .ok_or(ArbolError::StaleHandle { id: config.0 })?;
        let set_ref = self
            .sample_sets
            .get_mut(&set.0)
            .ok_or(ArbolError::StaleHandle { id: set.0 })?;
        let tree_ref = self
            .trees
            .get_mut(&tree.0)
            .ok_or(ArbolError::StaleHandle { id: tree.0 })?;
        tree_ref.fit(set_ref, &config)
    }

    /// Classifies the first sample of the set.
    ///
    /// # Errors
    ///
    /// Returns `StaleHandle` for any dead id, an error for an empty set, and
    /// everything [`DecisionTreeClassifier::predict`] can return.
    pub fn tree_predict(&self, tree: TreeHandle, set: SampleSetHandle) -> Result<usize> {
        let tree_ref = self
            .trees
            .get(&tree.0)
            .ok_or(ArbolError::StaleHandle { id: tree.0 })?;
        let set_ref = self
            .sample_sets
            .get(&set.0)
            .ok_or(ArbolError::StaleHandle { id: set.0 })?;
        let sample = set_ref
            .as_slice()
            .first()
            .ok_or_else(|| ArbolError::Other("cannot predict from an empty sample set".to_string()))?;
        tree_ref.predict(sample)
    }

    /// Renders the engine's tree as indented text.
    ///
    /// # Errors
    ///
    /// Returns `StaleHandle` for a dead id and `NotFitted` for an unfit
    /// engine.
    pub fn show_tree(&self, tree: TreeHandle) -> Result<String> {
        let tree_ref = self
            .trees
            .get(&tree.0)
            .ok_or(ArbolError::StaleHandle { id: tree.0 })?;
        tree_ref.show()
    }

    /// Destroys the engine behind the handle.
    ///
    /// # Errors
    ///
    /// Returns `StaleHandle` if the id is already dead.
    pub fn drop_tree(&mut self, tree: TreeHandle) -> Result<()> {
        self.trees
            .remove(&tree.0)
            .map(|_| ())
            .ok_or(ArbolError::StaleHandle { id: tree.0 })
    }

    /// Destroys the sample set behind the handle.
    ///
    /// # Errors
    ///
    /// Returns `StaleHandle` if the id is already dead.
    pub fn drop_sampleset(&mut self, set: SampleSetHandle) -> Result<()> {
        self.sample_sets
            .remove(&set.0)
            .map(|_| ())
            .ok_or(ArbolError::StaleHandle { id: set.0 })
    }

    /// Destroys the config behind the handle.
    ///
    /// # Errors
    ///
    /// Returns `StaleHandle` if the id is already dead.
    pub fn drop_fit_options(&mut self, config: ConfigHandle) -> Result<()> {
        self.configs
            .remove(&config.0)
            .map(|_| ())
            .ok_or(ArbolError::StaleHandle { id: config.0 })
    }
}
