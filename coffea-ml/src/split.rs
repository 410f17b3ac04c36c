//! Best-split search by information gain.
//!
//! Every distinct value of every candidate feature is tried as a `<=`
//! threshold. Candidates are visited in feature-list order and, within a
//! feature, in the order values are first seen in the data; the first
//! candidate reaching the maximum gain wins.

use std::fmt::Debug;

use coffea_core::{CoffeaError, FeatureSource, Labeled, Result};

use crate::entropy::subset_entropy;

/// A chosen `feature <= threshold` partition and the gain it achieves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split<F> {
    pub feature: F,
    pub threshold: f64,
    /// Information gain over not splitting.
    pub gain: f64,
}

/// Find the (feature, threshold) pair with maximal information gain.
///
/// Returns `Ok(None)` only when `features` is empty: the initial best gain is
/// `-inf`, so the first candidate always replaces it.
///
/// # Errors
///
/// Returns [`CoffeaError::InvalidArgument`] if `data` is empty or a record
/// has no numeric value for a candidate feature.
pub fn best_split<R, F>(data: &[R], features: &[F]) -> Result<Option<Split<F>>>
where
    R: Labeled + FeatureSource<F>,
    R::Label: PartialEq,
    F: Copy + Debug,
{
    let indices: Vec<usize> = (0..data.len()).collect();
    best_split_at(data, &indices, features)
}

/// Partition `data` into `(left, right)` with `left = {x | x[feature] <= threshold}`.
///
/// Relative order of records is preserved on both sides.
pub fn partition<'a, R, F>(
    data: &'a [R],
    feature: F,
    threshold: f64,
) -> Result<(Vec<&'a R>, Vec<&'a R>)>
where
    R: FeatureSource<F>,
    F: Copy + Debug,
{
    let indices: Vec<usize> = (0..data.len()).collect();
    let (left, right) = partition_at(data, &indices, feature, threshold)?;
    Ok((
        left.into_iter().map(|i| &data[i]).collect(),
        right.into_iter().map(|i| &data[i]).collect(),
    ))
}

pub(crate) fn best_split_at<R, F>(
    data: &[R],
    indices: &[usize],
    features: &[F],
) -> Result<Option<Split<F>>>
where
    R: Labeled + FeatureSource<F>,
    R::Label: PartialEq,
    F: Copy + Debug,
{
    let parent_entropy = subset_entropy(data, indices)?;
    let n = indices.len() as f64;

    let mut best: Option<Split<F>> = None;
    let mut best_gain = f64::NEG_INFINITY;

    for &feature in features {
        for threshold in distinct_values(data, indices, feature)? {
            let (left, right) = partition_at(data, indices, feature, threshold)?;
            let weighted = weighted_entropy(data, &left, n)? + weighted_entropy(data, &right, n)?;
            let gain = parent_entropy - weighted;

            if gain > best_gain {
                best_gain = gain;
                best = Some(Split {
                    feature,
                    threshold,
                    gain,
                });
            }
        }
    }

    Ok(best)
}

pub(crate) fn partition_at<R, F>(
    data: &[R],
    indices: &[usize],
    feature: F,
    threshold: f64,
) -> Result<(Vec<usize>, Vec<usize>)>
where
    R: FeatureSource<F>,
    F: Copy + Debug,
{
    let mut left = Vec::new();
    let mut right = Vec::new();
    for &i in indices {
        if required_value(&data[i], i, feature)? <= threshold {
            left.push(i);
        } else {
            right.push(i);
        }
    }
    Ok((left, right))
}

/// The numeric value of `feature` on a training record.
pub(crate) fn required_value<R, F>(record: &R, row: usize, feature: F) -> Result<f64>
where
    R: FeatureSource<F>,
    F: Copy + Debug,
{
    match record.feature(feature) {
        Some(v) if !v.is_nan() => Ok(v),
        _ => Err(CoffeaError::InvalidArgument(format!(
            "record {row} has no numeric value for feature {feature:?}"
        ))),
    }
}

/// Distinct values of `feature`, in first-seen order.
fn distinct_values<R, F>(data: &[R], indices: &[usize], feature: F) -> Result<Vec<f64>>
where
    R: FeatureSource<F>,
    F: Copy + Debug,
{
    let mut values: Vec<f64> = Vec::with_capacity(indices.len());
    for &i in indices {
        let v = required_value(&data[i], i, feature)?;
        if !values.contains(&v) {
            values.push(v);
        }
    }
    Ok(values)
}

/// `|side| / n * entropy(side)`; an empty side weighs nothing.
fn weighted_entropy<R>(data: &[R], side: &[usize], n: f64) -> Result<f64>
where
    R: Labeled,
    R::Label: PartialEq,
{
    if side.is_empty() {
        return Ok(0.0);
    }
    Ok(side.len() as f64 / n * subset_entropy(data, side)?)
}
