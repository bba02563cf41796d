//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use arbol::prelude::*;
//! ```

pub use crate::data::{Sample, SampleSet};
pub use crate::error::{ArbolError, Result};
pub use crate::tree::{DecisionTreeClassifier, FitConfig, TreeNode};
