//! Fit quality of a trained tree.

use std::fmt::Debug;

use coffea_core::{CoffeaError, FeatureSource, Labeled, Result};

use crate::tree::DecisionTree;

/// Fraction of `data` whose predicted label equals its own label.
///
/// # Errors
///
/// Returns an error if `data` is empty or a prediction fails.
pub fn accuracy<R, F, L>(tree: &DecisionTree<F, L>, data: &[R]) -> Result<f64>
where
    R: Labeled<Label = L> + FeatureSource<F>,
    F: Copy + Debug,
    L: Clone + PartialEq,
{
    if data.is_empty() {
        return Err(CoffeaError::InvalidArgument("empty dataset".into()));
    }
    let mut correct = 0usize;
    for record in data {
        if tree.predict(record)? == record.label() {
            correct += 1;
        }
    }
    Ok(correct as f64 / data.len() as f64)
}

/// Records whose predicted label differs from their own, with the prediction.
pub fn misclassified<'a, R, F, L>(
    tree: &'a DecisionTree<F, L>,
    data: &'a [R],
) -> Result<Vec<(&'a R, &'a L)>>
where
    R: Labeled<Label = L> + FeatureSource<F>,
    F: Copy + Debug,
    L: Clone + PartialEq,
{
    let mut out = Vec::new();
    for record in data {
        let predicted = tree.predict(record)?;
        if predicted != record.label() {
            out.push((record, predicted));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Feature, Observation, PriceLevel};
    use crate::tree::TreeConfig;

    fn obs(year: i32, rainfall: f64, price: PriceLevel) -> Observation {
        Observation {
            year,
            rainfall,
            temperature: 24.0,
            supply: 1.0,
            demand: 1.0,
            price,
        }
    }

    #[test]
    fn depth_capped_tree_misses_records() {
        let data = vec![
            obs(1, 1.0, PriceLevel::Low),
            obs(2, 2.0, PriceLevel::Medium),
            obs(3, 3.0, PriceLevel::High),
            obs(4, 4.0, PriceLevel::High),
        ];
        let stump = DecisionTree::fit(&data, &[Feature::Rainfall], &TreeConfig { max_depth: 0 })
            .unwrap();
        assert!((accuracy(&stump, &data).unwrap() - 0.25).abs() < 1e-12);
        let wrong = misclassified(&stump, &data).unwrap();
        assert_eq!(wrong.len(), 3);
        assert!(wrong.iter().all(|(_, p)| **p == PriceLevel::Low));

        let full = DecisionTree::fit(&data, &[Feature::Rainfall], &TreeConfig::default()).unwrap();
        assert_eq!(accuracy(&full, &data).unwrap(), 1.0);
        assert!(misclassified(&full, &data).unwrap().is_empty());
    }

    #[test]
    fn empty_is_error() {
        let data = vec![obs(1, 1.0, PriceLevel::Low)];
        let tree = DecisionTree::fit(&data, &[Feature::Rainfall], &TreeConfig::default()).unwrap();
        let none: Vec<Observation> = Vec::new();
        assert!(accuracy(&tree, &none).is_err());
    }
}
