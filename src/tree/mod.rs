//! Decision tree classification via CART-style recursive partitioning.
//!
//! This module implements greedy entropy-based split search over numeric and
//! categorical features, in-place sample partitioning, recursive subtree
//! construction, and the traversal used for prediction.
//!
//! # Example
//!
//! ```
//! use arbol::data::{Sample, SampleSet};
//! use arbol::tree::{DecisionTreeClassifier, FitConfig};
//!
//! // One numeric feature, no categorical features, two labels.
//! let mut samples = SampleSet::new(1, 0);
//! for (value, label) in [(0.0, 0), (1.0, 0), (10.0, 1), (11.0, 1)] {
//!     samples.push(Sample::new(label, vec![value], vec![])).expect("push should succeed");
//! }
//!
//! let config = FitConfig::new(3, 1, 1, 0.0).expect("valid config");
//! let mut tree = DecisionTreeClassifier::new(1, 0, 2);
//! tree.fit(&mut samples, &config).expect("fit should succeed");
//!
//! let probe = Sample::new(0, vec![0.5], vec![]);
//! assert_eq!(tree.predict(&probe).expect("predict should succeed"), 0);
//! ```

use crate::data::{Sample, SampleSet};
use crate::error::{ArbolError, Result};
use serde::{Deserialize, Serialize};

mod callback;
pub use callback::{FitCallback, NoopCallback, SplitCandidate};

#[cfg(test)]
mod tests_dt_contract;
#[cfg(test)]
mod proptests;

/// Leaf node in a decision tree.
///
/// Contains the predicted class label and number of training samples
/// that reached this leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label for this leaf
    pub label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// Internal node splitting on a numeric feature.
///
/// Routes to `left` when the sample's numeric feature at `feature_idx` is
/// `<= threshold`, else to `right`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumSplit {
    /// Index of the numeric feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f64,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Internal node splitting on a categorical feature, one category versus
/// all other categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatSplit {
    /// Index of the categorical feature to split on
    pub feature_idx: usize,
    /// Category value routed left
    pub category: i32,
    /// Left subtree (samples where feature == category)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature != category)
    pub right: Box<TreeNode>,
}

/// A node in a decision tree.
///
/// Internal nodes exclusively own their two children; the structure is a
/// strict binary tree with no sharing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node with class prediction
    Leaf(Leaf),
    /// Internal node with a numeric threshold split
    NumSplit(NumSplit),
    /// Internal node with a one-vs-rest categorical split
    CatSplit(CatSplit),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::NumSplit(node) => 1 + node.left.depth().max(node.right.depth()),
            TreeNode::CatSplit(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }
}

/// Stopping thresholds consumed by every recursive call during training.
///
/// Immutable once training starts; the engine stores a copy of the config
/// used by the last `fit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Maximum tree depth; 0 always yields a single majority leaf
    pub max_depth: usize,
    /// Minimum samples on each side of an accepted split
    pub min_samples_leaf: usize,
    /// Ranges of this size or smaller are never split
    pub min_samples_split: usize,
    /// Minimum relative entropy decrease an accepted split must achieve
    pub min_purity_decrease: f64,
}

impl FitConfig {
    /// Creates a config, validating each threshold.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` unless `min_samples_leaf >= 1`,
    /// `min_samples_split >= 1`, and `min_purity_decrease` is in `[0, 1)`.
    pub fn new(
        max_depth: usize,
        min_samples_leaf: usize,
        min_samples_split: usize,
        min_purity_decrease: f64,
    ) -> Result<Self> {
        if min_samples_leaf < 1 {
            return Err(ArbolError::invalid_hyperparameter(
                "min_samples_leaf",
                min_samples_leaf,
                ">= 1",
            ));
        }
        if min_samples_split < 1 {
            return Err(ArbolError::invalid_hyperparameter(
                "min_samples_split",
                min_samples_split,
                ">= 1",
            ));
        }
        if !(0.0..1.0).contains(&min_purity_decrease) {
            return Err(ArbolError::invalid_hyperparameter(
                "min_purity_decrease",
                min_purity_decrease,
                "in [0, 1)",
            ));
        }
        Ok(Self {
            max_depth,
            min_samples_leaf,
            min_samples_split,
            min_purity_decrease,
        })
    }
}

/// Decision tree classifier over numeric and categorical features.
///
/// Created with declared feature and label cardinalities; `fit` grows the
/// tree and replaces any prior one, `predict` classifies a single sample by
/// traversal.
///
/// Training requires temporary exclusive mutable access to the sample store
/// (partitioning physically rearranges samples); the single-writer,
/// non-reentrant contract is expressed by the `&mut` receivers rather than
/// locks. `predict` and `show` only read, so any number of them may run
/// between fits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    numeric_features: usize,
    categorical_features: usize,
    n_labels: usize,
    config: Option<FitConfig>,
    tree: Option<TreeNode>,
}

impl DecisionTreeClassifier {
    /// Creates an unfit engine with the declared cardinalities.
    #[must_use]
    pub fn new(numeric_features: usize, categorical_features: usize, n_labels: usize) -> Self {
        Self {
            numeric_features,
            categorical_features,
            n_labels,
            config: None,
            tree: None,
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

    /// Declared number of labels.
    #[must_use]
    pub fn n_labels(&self) -> usize {
        self.n_labels
    }

    /// Config stored by the last successful `fit`, if any.
    #[must_use]
    pub fn config(&self) -> Option<&FitConfig> {
        self.config.as_ref()
    }

    /// Root of the fitted tree, if any.
    #[must_use]
    pub fn tree(&self) -> Option<&TreeNode> {
        self.tree.as_ref()
    }

    /// Returns true once a `fit` has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    /// Fits the tree to the sample set, replacing any prior tree.
    ///
    /// Training reorders `samples` in place: the partitioning step swaps
    /// samples within sub-ranges. The multiset of samples is unchanged.
    /// Calling `fit` again retrains from scratch.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTrainingSet` for a zero-sample set, `DimensionMismatch`
    /// when the set's declared feature lengths disagree with the engine's,
    /// and `LabelOutOfRange` when any sample's label is `>= n_labels`.
    pub fn fit(&mut self, samples: &mut SampleSet, config: &FitConfig) -> Result<()> {
        self.fit_with_callback(samples, config, &mut NoopCallback)
    }

    /// Fits like [`fit`](Self::fit), reporting split evaluations, chosen
    /// splits, and created leaves to `callback`.
    ///
    /// The callback observes training; it never influences control flow.
    ///
    /// # Errors
    ///
    /// Same as [`fit`](Self::fit).
    pub fn fit_with_callback(
        &mut self,
        samples: &mut SampleSet,
        config: &FitConfig,
        callback: &mut dyn FitCallback,
    ) -> Result<()> {
        if samples.is_empty() {
            return Err(ArbolError::EmptyTrainingSet);
        }
        if samples.numeric_features() != self.numeric_features {
            return Err(ArbolError::dimension_mismatch(
                "numeric len",
                self.numeric_features,
                samples.numeric_features(),
            ));
        }
        if samples.categorical_features() != self.categorical_features {
            return Err(ArbolError::dimension_mismatch(
                "categorical len",
                self.categorical_features,
                samples.categorical_features(),
            ));
        }
        for sample in samples.iter() {
            if sample.label >= self.n_labels {
                return Err(ArbolError::LabelOutOfRange {
                    label: sample.label,
                    n_labels: self.n_labels,
                });
            }
        }

        self.config = Some(config.clone());
        let root = self.grow(config, samples.as_mut_slice(), 0, callback);
        self.tree = Some(root);
        Ok(())
    }

    /// Predicts the class label for a single sample.
    ///
    /// Only the sample's features are read; its `label` field is ignored.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before any successful `fit`, and
    /// `DimensionMismatch` when the sample's feature vector lengths disagree
    /// with the engine's declared counts.
    pub fn predict(&self, sample: &Sample) -> Result<usize> {
        let tree = self.tree.as_ref().ok_or(ArbolError::NotFitted)?;
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

        let mut node = tree;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return Ok(leaf.label),
                TreeNode::NumSplit(split) => {
                    node = if sample.numeric[split.feature_idx] <= split.threshold {
                        &split.left
                    } else {
                        &split.right
                    };
                }
                TreeNode::CatSplit(split) => {
                    node = if sample.categorical[split.feature_idx] == split.category {
                        &split.left
                    } else {
                        &split.right
                    };
                }
            }
        }
    }

    /// Predicts class labels for every sample in the set, in order.
    ///
    /// # Errors
    ///
    /// Same as [`predict`](Self::predict).
    pub fn predict_set(&self, samples: &SampleSet) -> Result<Vec<usize>> {
        samples.iter().map(|s| self.predict(s)).collect()
    }

    /// Computes the accuracy against the sample labels.
    ///
    /// # Errors
    ///
    /// Fails on an empty set, an unfit engine, or mismatched dimensions.
    pub fn score(&self, samples: &SampleSet) -> Result<f32> {
        if samples.is_empty() {
            return Err("cannot score an empty sample set".into());
        }
        let predictions = self.predict_set(samples)?;
        let correct = predictions
            .iter()
            .zip(samples.iter())
            .filter(|(pred, sample)| **pred == sample.label)
            .count();
        Ok(correct as f32 / samples.len() as f32)
    }

    /// Renders the tree as indented text, one line per node, depth-first
    /// with the left child before the right.
    ///
    /// # Errors
    ///
    /// Returns `NotFitted` before any successful `fit`.
    pub fn show(&self) -> Result<String> {
        let tree = self.tree.as_ref().ok_or(ArbolError::NotFitted)?;
        let mut out = String::new();
        show_node(tree, 0, &mut out);
        Ok(out)
    }

    /// Grows the subtree for one contiguous sub-range of the sample store.
    fn grow(
        &self,
        config: &FitConfig,
        samples: &mut [Sample],
        depth: usize,
        callback: &mut dyn FitCallback,
    ) -> TreeNode {
        let n = samples.len();
        let mut counts = vec![0usize; self.n_labels];
        for sample in samples.iter() {
            counts[sample.label] += 1;
        }

        // Pure ranges become leaves; otherwise track the majority label,
        // first-seen on ties.
        let mut majority = 0;
        for (label, &count) in counts.iter().enumerate() {
            if count == n {
                callback.on_leaf_created(depth, label, n);
                return TreeNode::Leaf(Leaf { label, n_samples: n });
            }
            if count > counts[majority] {
                majority = label;
            }
        }

        if depth >= config.max_depth || n <= config.min_samples_split {
            callback.on_leaf_created(depth, majority, n);
            return TreeNode::Leaf(Leaf {
                label: majority,
                n_samples: n,
            });
        }

        let init_loss = entropy(&counts, n);
        let best = self.find_best_split(samples, &counts, depth, callback);

        let Some((candidate, min_loss)) = best else {
            // No evaluable boundary (e.g. every feature constant).
            callback.on_leaf_created(depth, majority, n);
            return TreeNode::Leaf(Leaf {
                label: majority,
                n_samples: n,
            });
        };

        if init_loss <= 0.0 || (init_loss - min_loss) / init_loss <= config.min_purity_decrease {
            callback.on_leaf_created(depth, majority, n);
            return TreeNode::Leaf(Leaf {
                label: majority,
                n_samples: n,
            });
        }

        let p = match candidate {
            SplitCandidate::Numeric {
                feature_idx,
                threshold,
            } => partition_in_place(samples, |s| s.numeric[feature_idx] <= threshold),
            SplitCandidate::Categorical {
                feature_idx,
                category,
            } => partition_in_place(samples, |s| s.categorical[feature_idx] == category),
        };

        if p < config.min_samples_leaf || n - p < config.min_samples_leaf {
            // The winning split is discarded when either side is too small.
            callback.on_leaf_created(depth, majority, n);
            return TreeNode::Leaf(Leaf {
                label: majority,
                n_samples: n,
            });
        }

        callback.on_split_chosen(depth, &candidate, min_loss);
        let (left_samples, right_samples) = samples.split_at_mut(p);
        let left = Box::new(self.grow(config, left_samples, depth + 1, callback));
        let right = Box::new(self.grow(config, right_samples, depth + 1, callback));

        match candidate {
            SplitCandidate::Numeric {
                feature_idx,
                threshold,
            } => TreeNode::NumSplit(NumSplit {
                feature_idx,
                threshold,
                left,
                right,
            }),
            SplitCandidate::Categorical {
                feature_idx,
                category,
            } => TreeNode::CatSplit(CatSplit {
                feature_idx,
                category,
                left,
                right,
            }),
        }
    }

    /// Scans every numeric boundary and every categorical run in the range
    /// and returns the candidate with the globally minimal weighted entropy,
    /// or `None` when no boundary is evaluable.
    ///
    /// Sorts the range once per feature; the caller repartitions afterwards,
    /// so the order left behind here does not matter.
    fn find_best_split(
        &self,
        samples: &mut [Sample],
        counts: &[usize],
        depth: usize,
        callback: &mut dyn FitCallback,
    ) -> Option<(SplitCandidate, f64)> {
        let n = samples.len();
        let mut best: Option<(SplitCandidate, f64)> = None;
        let mut now_counts = vec![0usize; self.n_labels];

        for feature_idx in 0..self.numeric_features {
            samples.sort_by(|a, b| a.numeric[feature_idx].total_cmp(&b.numeric[feature_idx]));
            now_counts.fill(0);
            let mut i = 0;
            while i < n {
                // Candidate boundaries fall between runs of equal values;
                // ties on the split value are never separated.
                now_counts[samples[i].label] += 1;
                while i + 1 < n
                    && samples[i + 1].numeric[feature_idx] == samples[i].numeric[feature_idx]
                {
                    i += 1;
                    now_counts[samples[i].label] += 1;
                }
                if i + 1 >= n {
                    // Last unique value: the right side would be empty.
                    break;
                }
                let loss = split_loss(counts, &now_counts, i + 1, n);
                let candidate = SplitCandidate::Numeric {
                    feature_idx,
                    threshold: samples[i].numeric[feature_idx],
                };
                callback.on_split_evaluated(depth, &candidate, loss);
                if best.as_ref().map_or(true, |(_, b)| loss < *b) {
                    best = Some((candidate, loss));
                }
                i += 1;
            }
        }

        for feature_idx in 0..self.categorical_features {
            samples.sort_by(|a, b| {
                a.categorical[feature_idx].cmp(&b.categorical[feature_idx])
            });
            let mut i = 0;
            while i < n {
                // One-vs-rest: this run of equal categories against all
                // other samples in the range.
                now_counts.fill(0);
                now_counts[samples[i].label] += 1;
                let mut to = i;
                while to + 1 < n
                    && samples[to + 1].categorical[feature_idx]
                        == samples[to].categorical[feature_idx]
                {
                    to += 1;
                    now_counts[samples[to].label] += 1;
                }
                let loss = split_loss(counts, &now_counts, to - i + 1, n);
                let candidate = SplitCandidate::Categorical {
                    feature_idx,
                    category: samples[i].categorical[feature_idx],
                };
                callback.on_split_evaluated(depth, &candidate, loss);
                if best.as_ref().map_or(true, |(_, b)| loss < *b) {
                    best = Some((candidate, loss));
                }
                i = to + 1;
            }
        }

        best
    }
}

/// Shannon entropy, in natural log units, of a label histogram summing to `n`.
///
/// Labels with zero count contribute nothing.
fn entropy(counts: &[usize], n: usize) -> f64 {
    let mut h = 0.0;
    for &count in counts {
        if count > 0 {
            let p = count as f64 / n as f64;
            h -= p * p.ln();
        }
    }
    h
}

/// Weighted entropy of the two sides of a candidate binary split.
///
/// `left_counts` is the label histogram of the left side (of size
/// `left_size`); the right side is its complement against `total_counts`.
fn split_loss(total_counts: &[usize], left_counts: &[usize], left_size: usize, n: usize) -> f64 {
    let right_size = n - left_size;
    let mut loss = 0.0;
    for (k, &left_k) in left_counts.iter().enumerate() {
        if left_k > 0 {
            let p = left_k as f64 / left_size as f64;
            loss -= left_size as f64 / n as f64 * p * p.ln();
        }
        let right_k = total_counts[k] - left_k;
        if right_k > 0 {
            let p = right_k as f64 / right_size as f64;
            loss -= right_size as f64 / n as f64 * p * p.ln();
        }
    }
    loss
}

/// Two-pointer in-place partition: moves samples satisfying `pred` to the
/// front and returns the size of that prefix. Not stable.
fn partition_in_place<F>(samples: &mut [Sample], pred: F) -> usize
where
    F: Fn(&Sample) -> bool,
{
    let mut p = 0;
    for q in 0..samples.len() {
        if pred(&samples[q]) {
            samples.swap(p, q);
            p += 1;
        }
    }
    p
}

fn show_node(node: &TreeNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push(' ');
    }
    match node {
        TreeNode::Leaf(leaf) => {
            out.push_str(&format!("LEAF label {}\n", leaf.label));
        }
        TreeNode::NumSplit(split) => {
            out.push_str(&format!(
                "NUM feat {} <= {}\n",
                split.feature_idx, split.threshold
            ));
            show_node(&split.left, depth + 1, out);
            show_node(&split.right, depth + 1, out);
        }
        TreeNode::CatSplit(split) => {
            out.push_str(&format!(
                "CAT feat {} == {}\n",
                split.feature_idx, split.category
            ));
            show_node(&split.left, depth + 1, out);
            show_node(&split.right, depth + 1, out);
        }
    }
}
