//! Arbol: CART-style decision tree classification in pure Rust.
//!
//! Arbol trains a classification decision tree over samples with numeric
//! and categorical features via greedy entropy-based recursive partitioning,
//! and classifies new samples by tree traversal.
//!
//! # Quick Start
//!
//! ```
//! use arbol::prelude::*;
//!
//! // One numeric feature, one categorical feature, two labels.
//! let mut samples = SampleSet::new(1, 1);
//! for (value, category, label) in [
//!     (0.0, 0, 0),
//!     (1.0, 1, 0),
//!     (10.0, 0, 1),
//!     (11.0, 1, 1),
//! ] {
//!     samples
//!         .push(Sample::new(label, vec![value], vec![category]))
//!         .unwrap();
//! }
//!
//! // Train, then classify. Training partitions the store in place.
//! let config = FitConfig::new(4, 1, 1, 0.0).unwrap();
//! let mut tree = DecisionTreeClassifier::new(1, 1, 2);
//! tree.fit(&mut samples, &config).unwrap();
//!
//! let probe = Sample::new(0, vec![10.5], vec![0]);
//! assert_eq!(tree.predict(&probe).unwrap(), 1);
//! ```
//!
//! # Modules
//!
//! - [`data`]: `Sample` and `SampleSet`, the mutable sample store
//! - [`tree`]: the tree engine (training, inference, diagnostics)
//! - [`handle`]: typed-handle adapter over the core
//! - [`error`]: error types

pub mod data;
pub mod error;
pub mod handle;
pub mod prelude;
pub mod tree;

pub use error::{ArbolError, Result};
