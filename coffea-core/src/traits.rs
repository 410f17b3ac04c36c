//! Core trait definitions for the coffea crates.
//!
//! These traits define the contracts records implement so the learner can be
//! trained on any labeled dataset, not only the bundled coffee history.

/// A record exposing numeric values by feature identifier.
pub trait FeatureSource<F> {
    /// The value of `feature`, or `None` when the record does not carry it.
    ///
    /// A returned NaN is treated the same as `None`: it cannot be compared
    /// against a threshold.
    fn feature(&self, feature: F) -> Option<f64>;
}

/// A record carrying a categorical target value.
pub trait Labeled {
    /// The label type (a small closed set such as low/medium/high).
    type Label;

    /// The label of this record.
    fn label(&self) -> &Self::Label;
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}

impl<F, T: FeatureSource<F> + ?Sized> FeatureSource<F> for &T {
    fn feature(&self, feature: F) -> Option<f64> {
        (**self).feature(feature)
    }
}

impl<T: Labeled + ?Sized> Labeled for &T {
    type Label = T::Label;

    fn label(&self) -> &Self::Label {
        (**self).label()
    }
}
