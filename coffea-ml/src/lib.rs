//! Entropy decision tree for coffee price-level forecasting.
//!
//! - **Entropy** — Shannon entropy of label distributions
//! - **Split search** — information-gain threshold selection over numeric features
//! - **Decision tree** — recursive ID3-style builder and predictor
//! - **Evaluation** — training-set accuracy of a fitted tree
//! - **Coffee data** — market observations, feature vectors, and the bundled 2015–2023 history
//!
//! ```
//! use coffea_ml::dataset::{Feature, PriceLevel};
//! use coffea_ml::history::{coffee_history, sample_2024};
//! use coffea_ml::tree::{DecisionTree, TreeConfig};
//!
//! let history = coffee_history();
//! let tree = DecisionTree::fit(&history, &Feature::ALL, &TreeConfig::default()).unwrap();
//! assert_eq!(*tree.predict(&sample_2024()).unwrap(), PriceLevel::High);
//! ```

pub mod dataset;
pub mod entropy;
pub mod evaluate;
pub mod history;
pub mod split;
pub mod tree;

pub use dataset::{Feature, FeatureVector, Observation, PriceLevel};
pub use tree::{DecisionTree, TreeConfig, TreeNode};
