// =========================================================================
// FALSIFY-DT: decision tree classifier contract (arbol DecisionTreeClassifier)
//
// Each test tries to falsify one clause of the classifier's contract; the
// assertion message names the clause that would have been violated.
// =========================================================================

use super::*;
use crate::data::{Sample, SampleSet};
use crate::error::ArbolError;

fn two_feature_set(rows: &[(f64, i32, usize)]) -> SampleSet {
    let mut set = SampleSet::new(1, 1);
    for &(value, category, label) in rows {
        set.push(Sample::new(label, vec![value], vec![category]))
            .expect("valid sample");
    }
    set
}

/// FALSIFY-DT-001: predict(x) stays in [0, n_labels)
#[test]
fn falsify_dt_001_predictions_in_label_range() {
    let mut set = two_feature_set(&[
        (0.0, 0, 0),
        (1.0, 1, 0),
        (2.0, 0, 1),
        (3.0, 1, 1),
        (4.0, 0, 2),
        (5.0, 1, 2),
    ]);

    let mut dt = DecisionTreeClassifier::new(1, 1, 3);
    let config = FitConfig::new(5, 1, 1, 0.0).expect("valid config");
    dt.fit(&mut set, &config).expect("fit succeeds");

    for (i, sample) in set.iter().enumerate() {
        let p = dt.predict(sample).expect("predict succeeds");
        assert!(p <= 2, "FALSIFIED DT-001: prediction[{i}] = {p}, not in [0, 2]");
    }
}

/// FALSIFY-DT-002: same input produces same output
#[test]
fn falsify_dt_002_deterministic() {
    let mut set = two_feature_set(&[(0.0, 0, 0), (1.0, 0, 0), (2.0, 1, 1), (3.0, 1, 1)]);

    let mut dt = DecisionTreeClassifier::new(1, 1, 2);
    let config = FitConfig::new(4, 1, 1, 0.1).expect("valid config");
    dt.fit(&mut set, &config).expect("fit");

    let p1 = dt.predict_set(&set).expect("predict");
    let p2 = dt.predict_set(&set).expect("predict");
    assert_eq!(p1, p2, "FALSIFIED DT-002: predictions differ on same input");
}

/// FALSIFY-DT-003: Perfect fit on separable data
#[test]
fn falsify_dt_003_perfect_separable() {
    let mut set = two_feature_set(&[(0.0, 0, 0), (1.0, 0, 0), (10.0, 0, 1), (11.0, 0, 1)]);

    let mut dt = DecisionTreeClassifier::new(1, 1, 2);
    let config = FitConfig::new(4, 1, 1, 0.0).expect("valid config");
    dt.fit(&mut set, &config).expect("fit");

    let preds = dt.predict_set(&set).expect("predict");
    let labels: Vec<usize> = set.iter().map(|s| s.label).collect();
    assert_eq!(
        preds, labels,
        "FALSIFIED DT-003: tree cannot perfectly fit separable data"
    );
}

/// FALSIFY-DT-004: no path exceeds max_depth
#[test]
fn falsify_dt_004_depth_bound() {
    for max_depth in 0..5 {
        let mut set = two_feature_set(&[
            (0.0, 0, 0),
            (1.0, 1, 1),
            (2.0, 0, 1),
            (3.0, 1, 0),
            (4.0, 0, 0),
            (5.0, 1, 1),
        ]);
        let mut dt = DecisionTreeClassifier::new(1, 1, 2);
        let config = FitConfig::new(max_depth, 1, 1, 0.0).expect("valid config");
        dt.fit(&mut set, &config).expect("fit");

        let depth = dt.tree().expect("fitted").depth();
        assert!(
            depth <= max_depth,
            "FALSIFIED DT-004: depth {depth} exceeds max_depth {max_depth}"
        );
    }
}

/// FALSIFY-DT-005: mismatched sample construction fails
#[test]
fn falsify_dt_005_rejects_mismatched_sample() {
    let mut set = SampleSet::new(2, 1);
    let err = set
        .push(Sample::new(0, vec![1.0], vec![0]))
        .expect_err("FALSIFIED DT-005: short numeric vector was accepted");
    assert!(
        matches!(err, ArbolError::DimensionMismatch { .. }),
        "FALSIFIED DT-005: wrong error kind {err:?}"
    );
}

/// FALSIFY-DT-006: Unfit prediction fails with the distinct error
#[test]
fn falsify_dt_006_unfit_predict_error() {
    let dt = DecisionTreeClassifier::new(1, 1, 2);
    let err = dt
        .predict(&Sample::new(0, vec![0.0], vec![0]))
        .expect_err("FALSIFIED DT-006: unfit predict succeeded");
    assert!(
        matches!(err, ArbolError::NotFitted),
        "FALSIFIED DT-006: wrong error kind {err:?}"
    );
}
