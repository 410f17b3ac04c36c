//! Shannon entropy of label distributions.
//!
//! Labels are counted in first-seen order and the entropy terms are summed in
//! that same order, so the result for a given dataset is reproducible to the
//! last bit. Split selection compares gains with `>`, which makes this matter.

use coffea_core::{CoffeaError, Labeled, Result};

/// Count the distinct labels yielded by `labels`, in first-seen order.
///
/// Label sets are tiny (low/medium/high), so a linear scan beats hashing and
/// keeps the ordering stable.
pub fn label_counts<'a, L, I>(labels: I) -> Vec<(&'a L, usize)>
where
    L: PartialEq + 'a,
    I: IntoIterator<Item = &'a L>,
{
    let mut counts: Vec<(&'a L, usize)> = Vec::new();
    for label in labels {
        match counts.iter().position(|(seen, _)| *seen == label) {
            Some(i) => counts[i].1 += 1,
            None => counts.push((label, 1)),
        }
    }
    counts
}

/// Distinct labels in first-seen order.
pub fn distinct_labels<'a, L, I>(labels: I) -> Vec<&'a L>
where
    L: PartialEq + 'a,
    I: IntoIterator<Item = &'a L>,
{
    label_counts(labels).into_iter().map(|(label, _)| label).collect()
}

/// Shannon entropy (base 2) of the labels in `data`.
///
/// # Errors
///
/// Returns [`CoffeaError::InvalidArgument`] if `data` is empty: the entropy of
/// an empty set is undefined, and a silent 0 would skew gain comparisons.
pub fn entropy<R>(data: &[R]) -> Result<f64>
where
    R: Labeled,
    R::Label: PartialEq,
{
    shannon(data.iter().map(|record| record.label()))
}

/// Entropy of the records of `data` selected by `indices`.
pub(crate) fn subset_entropy<R>(data: &[R], indices: &[usize]) -> Result<f64>
where
    R: Labeled,
    R::Label: PartialEq,
{
    shannon(indices.iter().map(|&i| data[i].label()))
}

fn shannon<'a, L, I>(labels: I) -> Result<f64>
where
    L: PartialEq + 'a,
    I: IntoIterator<Item = &'a L>,
{
    let counts = label_counts(labels);
    let total: usize = counts.iter().map(|&(_, c)| c).sum();
    if total == 0 {
        return Err(CoffeaError::InvalidArgument(
            "entropy of an empty dataset is undefined".into(),
        ));
    }

    let n = total as f64;
    let mut result = 0.0;
    for &(_, count) in &counts {
        let p = count as f64 / n;
        result -= p * p.log2();
    }
    Ok(result)
}
