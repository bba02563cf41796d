//! Property tests for tree training invariants.

use super::*;
use crate::data::{Sample, SampleSet};
use proptest::prelude::*;

const N_LABELS: usize = 3;

fn build_set(rows: &[(i32, i32, usize)]) -> SampleSet {
    let mut set = SampleSet::new(1, 1);
    for &(value, category, label) in rows {
        set.push(Sample::new(label, vec![f64::from(value)], vec![category]))
            .expect("valid sample");
    }
    set
}

fn sample_key(sample: &Sample) -> (usize, Vec<u64>, Vec<i32>) {
    (
        sample.label,
        sample.numeric.iter().map(|v| v.to_bits()).collect(),
        sample.categorical.clone(),
    )
}

prop_compose! {
    fn arb_rows()(rows in prop::collection::vec(
        (-50..50_i32, 0..4_i32, 0..N_LABELS),
        1..40,
    )) -> Vec<(i32, i32, usize)> {
        rows
    }
}

prop_compose! {
    fn arb_config()(
        max_depth in 0..6_usize,
        min_samples_leaf in 1..4_usize,
        min_samples_split in 1..6_usize,
        min_purity_decrease in 0.0..0.5_f64,
    ) -> FitConfig {
        FitConfig::new(max_depth, min_samples_leaf, min_samples_split, min_purity_decrease)
            .expect("generated config is valid")
    }
}

proptest! {
    /// No root-to-leaf path ever exceeds the configured depth.
    #[test]
    fn prop_depth_bound(rows in arb_rows(), config in arb_config()) {
        let mut set = build_set(&rows);
        let mut tree = DecisionTreeClassifier::new(1, 1, N_LABELS);
        tree.fit(&mut set, &config).expect("fit should succeed");
        prop_assert!(tree.tree().expect("fitted").depth() <= config.max_depth);
    }

    /// Training reorders the store but never adds, drops, or edits samples.
    #[test]
    fn prop_fit_preserves_multiset(rows in arb_rows(), config in arb_config()) {
        let mut set = build_set(&rows);
        let mut before: Vec<_> = set.iter().map(sample_key).collect();
        before.sort();

        let mut tree = DecisionTreeClassifier::new(1, 1, N_LABELS);
        tree.fit(&mut set, &config).expect("fit should succeed");

        let mut after: Vec<_> = set.iter().map(sample_key).collect();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// Every prediction on a fitted tree lands in the declared label range.
    #[test]
    fn prop_predictions_in_label_range(rows in arb_rows(), config in arb_config()) {
        let mut set = build_set(&rows);
        let mut tree = DecisionTreeClassifier::new(1, 1, N_LABELS);
        tree.fit(&mut set, &config).expect("fit should succeed");

        for label in tree.predict_set(&set).expect("predict should succeed") {
            prop_assert!(label < N_LABELS);
        }
    }

    /// A single-label training set always refits to that label, whatever
    /// the config.
    #[test]
    fn prop_pure_set_predicts_that_label(
        features in prop::collection::vec((-50..50_i32, 0..4_i32), 1..20),
        label in 0..N_LABELS,
        config in arb_config(),
    ) {
        let rows: Vec<_> = features
            .iter()
            .map(|&(value, category)| (value, category, label))
            .collect();
        let mut set = build_set(&rows);
        let mut tree = DecisionTreeClassifier::new(1, 1, N_LABELS);
        tree.fit(&mut set, &config).expect("fit should succeed");

        for sample in set.iter() {
            prop_assert_eq!(tree.predict(sample).expect("predict"), label);
        }
    }

    /// Prediction is read-only: repeating it yields identical labels.
    #[test]
    fn prop_predict_idempotent(rows in arb_rows(), config in arb_config()) {
        let mut set = build_set(&rows);
        let mut tree = DecisionTreeClassifier::new(1, 1, N_LABELS);
        tree.fit(&mut set, &config).expect("fit should succeed");

        let first = tree.predict_set(&set).expect("predict");
        let second = tree.predict_set(&set).expect("predict");
        prop_assert_eq!(first, second);
    }
}
