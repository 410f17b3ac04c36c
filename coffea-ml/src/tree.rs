//! Decision tree classifier using entropy / information gain.
//!
//! An ID3-style learner over continuous features: every internal node tests
//! `feature <= threshold`, where the threshold is one of the values observed
//! in the training data. Records are any type implementing
//! [`FeatureSource`] and [`Labeled`].
//!
//! Leaves hold the *first-encountered* label of the records that reached
//! them, not a majority vote. On pure leaves the two agree; they only differ
//! at the depth cap, and keeping first-encountered reproduces the reference
//! forecasts exactly.

use std::fmt::Debug;

use coffea_core::{CoffeaError, FeatureSource, Labeled, Result, Summarizable};
use tracing::debug;

use crate::entropy::distinct_labels;
use crate::split::{best_split_at, partition_at, required_value};

/// Default maximum tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 15;

// ---------------------------------------------------------------------------
// Tree node representation
// ---------------------------------------------------------------------------

/// A single node in the decision tree.
///
/// Children are owned, so the tree is strictly binary and acyclic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum TreeNode<F, L> {
    /// Terminal leaf node.
    Leaf { label: L },
    /// Internal split node: `left` for values `<= threshold`, `right` otherwise.
    Decision {
        feature: F,
        threshold: f64,
        left: Box<TreeNode<F, L>>,
        right: Box<TreeNode<F, L>>,
    },
}

impl<F, L> TreeNode<F, L>
where
    F: Copy + Debug,
{
    /// Walk from this node to a leaf and return its label.
    ///
    /// # Errors
    ///
    /// Returns [`CoffeaError::TypeMismatch`] if a feature tested on the path is
    /// missing from `sample` or is NaN.
    pub fn predict<S>(&self, sample: &S) -> Result<&L>
    where
        S: FeatureSource<F> + ?Sized,
    {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { label } => return Ok(label),
                TreeNode::Decision {
                    feature,
                    threshold,
                    left,
                    right,
                } => match sample.feature(*feature) {
                    Some(v) if v <= *threshold => node = left.as_ref(),
                    Some(v) if v > *threshold => node = right.as_ref(),
                    _ => {
                        return Err(CoffeaError::TypeMismatch(format!(
                            "cannot compare a non-numeric value for feature {feature:?}"
                        )))
                    }
                },
            }
        }
    }
}

impl<F, L> TreeNode<F, L> {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Number of decision levels below this node (a lone leaf has depth 0).
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Decision { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Decision { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    pub fn n_decisions(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Decision { left, right, .. } => {
                1 + left.n_decisions() + right.n_decisions()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// DecisionTree
// ---------------------------------------------------------------------------

/// Configuration for [`DecisionTree::fit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum tree depth (0 = only root leaf).
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TreeConfig {
    /// A configuration that never stops on depth.
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// A trained decision tree classifier.
///
/// Immutable after [`fit`](Self::fit); predictions borrow it immutably, so
/// one tree can serve any number of callers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecisionTree<F, L> {
    root: TreeNode<F, L>,
    features: Vec<F>,
}

impl<F, L> DecisionTree<F, L>
where
    F: Copy + Debug,
    L: Clone + PartialEq,
{
    /// Fit a decision tree on labeled records.
    ///
    /// * `data` — training records
    /// * `features` — candidate features, in tie-break priority order
    /// * `config` — depth limit
    ///
    /// # Errors
    ///
    /// Returns [`CoffeaError::InvalidArgument`] if the data is empty or any
    /// record lacks a numeric value for a requested feature.
    pub fn fit<R>(data: &[R], features: &[F], config: &TreeConfig) -> Result<Self>
    where
        R: Labeled<Label = L> + FeatureSource<F>,
    {
        if data.is_empty() {
            return Err(CoffeaError::InvalidArgument("empty dataset".into()));
        }
        for (row, record) in data.iter().enumerate() {
            for &feature in features {
                required_value(record, row, feature)?;
            }
        }

        let root = build_tree(data, features, 0, config.max_depth)?;
        debug!(
            records = data.len(),
            depth = root.depth(),
            leaves = root.n_leaves(),
            "decision tree fitted"
        );

        Ok(Self {
            root,
            features: features.to_vec(),
        })
    }

    /// Predict the label for a single sample.
    ///
    /// The sample only needs the features tested along its path.
    pub fn predict<S>(&self, sample: &S) -> Result<&L>
    where
        S: FeatureSource<F> + ?Sized,
    {
        self.root.predict(sample)
    }

    /// Predict labels for multiple samples, failing on the first error.
    pub fn predict_batch<S>(&self, samples: &[S]) -> Result<Vec<L>>
    where
        S: FeatureSource<F>,
    {
        samples
            .iter()
            .map(|s| self.predict(s).cloned())
            .collect()
    }
}

impl<F, L> DecisionTree<F, L> {
    pub fn root(&self) -> &TreeNode<F, L> {
        &self.root
    }

    /// Candidate features the tree was fitted with.
    pub fn features(&self) -> &[F] {
        &self.features
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }

    pub fn n_decisions(&self) -> usize {
        self.root.n_decisions()
    }
}

impl<F, L> Summarizable for DecisionTree<F, L> {
    fn summary(&self) -> String {
        format!(
            "decision tree: depth {}, {} decisions, {} leaves over {} features",
            self.depth(),
            self.n_decisions(),
            self.n_leaves(),
            self.features.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Tree building helpers
// ---------------------------------------------------------------------------

/// Recursively build a tree starting at `depth`.
///
/// # Errors
///
/// Returns [`CoffeaError::InvalidArgument`] if `data` is empty or a record
/// reaching a split lacks a numeric value for a candidate feature.
pub fn build_tree<R, F>(
    data: &[R],
    features: &[F],
    depth: usize,
    max_depth: usize,
) -> Result<TreeNode<F, R::Label>>
where
    R: Labeled + FeatureSource<F>,
    R::Label: Clone + PartialEq,
    F: Copy + Debug,
{
    if data.is_empty() {
        return Err(CoffeaError::InvalidArgument("empty dataset".into()));
    }
    let indices: Vec<usize> = (0..data.len()).collect();
    grow(data, &indices, features, depth, max_depth)
}

/// Build the subtree for the records at `indices` (never empty).
fn grow<R, F>(
    data: &[R],
    indices: &[usize],
    features: &[F],
    depth: usize,
    max_depth: usize,
) -> Result<TreeNode<F, R::Label>>
where
    R: Labeled + FeatureSource<F>,
    R::Label: Clone + PartialEq,
    F: Copy + Debug,
{
    let labels = distinct_labels(indices.iter().map(|&i| data[i].label()));
    let leaf = || TreeNode::Leaf {
        label: labels[0].clone(),
    };

    // Stop conditions: max depth or pure node
    if depth >= max_depth || labels.len() == 1 {
        return Ok(leaf());
    }

    let Some(split) = best_split_at(data, indices, features)? else {
        return Ok(leaf());
    };

    let (left, right) = partition_at(data, indices, split.feature, split.threshold)?;

    // Only reachable with zero gain everywhere (e.g. duplicated rows with
    // conflicting labels): splitting would recurse on the same records.
    if left.is_empty() || right.is_empty() {
        return Ok(leaf());
    }

    debug!(
        feature = ?split.feature,
        threshold = split.threshold,
        gain = split.gain,
        depth,
        left = left.len(),
        right = right.len(),
        "split chosen"
    );

    Ok(TreeNode::Decision {
        feature: split.feature,
        threshold: split.threshold,
        left: Box::new(grow(data, &left, features, depth + 1, max_depth)?),
        right: Box::new(grow(data, &right, features, depth + 1, max_depth)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A row of `f64` features with a `usize` class, indexed by column.
    struct Row {
        values: Vec<f64>,
        class: usize,
    }

    impl FeatureSource<usize> for Row {
        fn feature(&self, col: usize) -> Option<f64> {
            self.values.get(col).copied()
        }
    }

    impl Labeled for Row {
        type Label = usize;

        fn label(&self) -> &usize {
            &self.class
        }
    }

    fn rows(data: &[&[f64]], labels: &[usize]) -> Vec<Row> {
        data.iter()
            .zip(labels)
            .map(|(v, &class)| Row {
                values: v.to_vec(),
                class,
            })
            .collect()
    }

    /// An unlabeled query row.
    fn query(values: &[f64]) -> Row {
        Row {
            values: values.to_vec(),
            class: usize::MAX,
        }
    }

    #[test]
    fn fit_linearly_separable() {
        // 2D data: class 0 = low x, class 1 = high x
        let data = rows(
            &[
                &[0.0, 0.0],
                &[1.0, 0.0],
                &[2.0, 0.0],
                &[10.0, 0.0],
                &[11.0, 0.0],
                &[12.0, 0.0],
            ],
            &[0, 0, 0, 1, 1, 1],
        );
        let tree = DecisionTree::fit(&data, &[0usize, 1], &TreeConfig::default()).unwrap();

        for (i, row) in data.iter().enumerate() {
            assert_eq!(*tree.predict(row).unwrap(), row.class, "mismatch at sample {i}");
        }
        match tree.root() {
            TreeNode::Decision {
                feature, threshold, ..
            } => {
                assert_eq!(*feature, 0);
                assert_eq!(*threshold, 2.0);
            }
            TreeNode::Leaf { .. } => panic!("expected a split at the root"),
        }
    }

    #[test]
    fn predict_batch_works() {
        let data = rows(&[&[0.0, 1.0], &[10.0, 1.0]], &[0, 1]);
        let tree = DecisionTree::fit(&data, &[0usize, 1], &TreeConfig::default()).unwrap();

        // Thresholds are observed values, not midpoints: the split is x <= 0.0,
        // so 0.5 already falls on the right.
        let test_data = rows(&[&[0.0, 1.0], &[0.5, 1.0], &[9.5, 1.0]], &[0, 0, 0]);
        let preds = tree.predict_batch(&test_data).unwrap();
        assert_eq!(preds, vec![0, 1, 1]);
    }

    #[test]
    fn pure_node_stops() {
        // All same class — tree should be a single leaf
        let data = rows(&[&[0.0], &[1.0], &[2.0], &[3.0]], &[0, 0, 0, 0]);
        let tree = DecisionTree::fit(&data, &[0usize], &TreeConfig::default()).unwrap();
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(*tree.predict(&query(&[999.0])).unwrap(), 0);
    }

    #[test]
    fn single_sample() {
        let data = rows(&[&[5.0, 3.0]], &[2]);
        let tree = DecisionTree::fit(&data, &[0usize, 1], &TreeConfig::default()).unwrap();
        assert_eq!(*tree.predict(&query(&[5.0, 3.0])).unwrap(), 2);
    }

    #[test]
    fn max_depth_zero_takes_first_label() {
        // No true majority: the first-encountered label wins even though
        // class 1 outnumbers class 0.
        let data = rows(&[&[0.0], &[10.0], &[11.0]], &[0, 1, 1]);
        let tree = DecisionTree::fit(&data, &[0usize], &TreeConfig { max_depth: 0 }).unwrap();
        assert_eq!(tree.n_leaves(), 1);
        assert_eq!(*tree.predict(&query(&[10.5])).unwrap(), 0);
    }

    #[test]
    fn depth_is_capped() {
        let data = rows(&[&[0.0], &[1.0], &[2.0], &[3.0]], &[0, 1, 0, 1]);
        let full = DecisionTree::fit(&data, &[0usize], &TreeConfig::unbounded()).unwrap();
        assert!(full.depth() > 1);
        let capped = DecisionTree::fit(&data, &[0usize], &TreeConfig { max_depth: 1 }).unwrap();
        assert_eq!(capped.depth(), 1);
    }

    #[test]
    fn empty_data_error() {
        let data: Vec<Row> = Vec::new();
        assert!(matches!(
            DecisionTree::fit(&data, &[0usize], &TreeConfig::default()),
            Err(CoffeaError::InvalidArgument(_))
        ));
        assert!(build_tree(&data, &[0usize], 0, 15).is_err());
    }

    #[test]
    fn missing_training_feature_error() {
        let data = rows(&[&[1.0, 2.0], &[3.0]], &[0, 1]);
        assert!(matches!(
            DecisionTree::fit(&data, &[0usize, 1], &TreeConfig::default()),
            Err(CoffeaError::InvalidArgument(_))
        ));
        assert!(DecisionTree::fit(&data, &[0usize], &TreeConfig::default()).is_ok());
    }

    #[test]
    fn nan_training_value_error() {
        let data = rows(&[&[1.0], &[f64::NAN]], &[0, 1]);
        assert!(DecisionTree::fit(&data, &[0usize], &TreeConfig::default()).is_err());
    }

    #[test]
    fn no_features_gives_leaf() {
        let data = rows(&[&[1.0], &[2.0]], &[3, 4]);
        let no_features: [usize; 0] = [];
        let tree = DecisionTree::fit(&data, &no_features, &TreeConfig::default()).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(*tree.predict(&query(&[])).unwrap(), 3);
    }

    #[test]
    fn conflicting_duplicates_become_leaf() {
        let data = rows(&[&[1.0, 1.0], &[1.0, 1.0], &[5.0, 5.0]], &[0, 1, 2]);
        let tree = DecisionTree::fit(&data, &[0usize, 1], &TreeConfig::unbounded()).unwrap();
        assert_eq!(*tree.predict(&query(&[1.0, 1.0])).unwrap(), 0);
        assert_eq!(*tree.predict(&query(&[5.0, 5.0])).unwrap(), 2);
    }

    #[test]
    fn threshold_value_routes_left() {
        let data = rows(&[&[1.0], &[2.0]], &[7, 8]);
        let tree = DecisionTree::fit(&data, &[0usize], &TreeConfig::default()).unwrap();
        assert_eq!(*tree.predict(&query(&[1.0])).unwrap(), 7);
        assert_eq!(*tree.predict(&query(&[1.000001])).unwrap(), 8);
    }

    #[test]
    fn missing_or_nan_predict_value_is_type_mismatch() {
        let data = rows(&[&[1.0], &[2.0]], &[7, 8]);
        let tree = DecisionTree::fit(&data, &[0usize], &TreeConfig::default()).unwrap();
        assert!(matches!(
            tree.predict(&query(&[])),
            Err(CoffeaError::TypeMismatch(_))
        ));
        assert!(matches!(
            tree.predict(&query(&[f64::NAN])),
            Err(CoffeaError::TypeMismatch(_))
        ));
    }

    #[test]
    fn multiclass() {
        // Three classes, separated on a single feature
        let data = rows(
            &[&[0.0], &[5.0], &[10.0], &[0.1], &[5.1], &[10.1]],
            &[0, 1, 2, 0, 1, 2],
        );
        let tree = DecisionTree::fit(&data, &[0usize], &TreeConfig::default()).unwrap();
        assert_eq!(*tree.predict(&query(&[0.05])).unwrap(), 0);
        assert_eq!(*tree.predict(&query(&[5.05])).unwrap(), 1);
        assert_eq!(*tree.predict(&query(&[10.05])).unwrap(), 2);
    }

    #[test]
    fn summary_reports_shape() {
        let data = rows(&[&[1.0], &[2.0]], &[7, 8]);
        let tree = DecisionTree::fit(&data, &[0usize], &TreeConfig::default()).unwrap();
        assert_eq!(
            tree.summary(),
            "decision tree: depth 1, 1 decisions, 2 leaves over 1 features"
        );
    }
}
