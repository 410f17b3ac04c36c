//! Shared primitives and traits for the coffea forecasting crates.
//!
//! `coffea-core` provides the foundation the learner and the CLI build on:
//!
//! - **Error types** — [`CoffeaError`] and [`Result`] for structured error handling
//! - **Traits** — Record abstractions like [`FeatureSource`], [`Labeled`], [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{CoffeaError, Result};
pub use traits::*;
