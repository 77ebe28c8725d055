//! Hypothesis tests.
//!
//! - [`parametric`]: two-sample t-test with pooled variance
//! - [`anova`]: one-way and repeated-measures analysis of variance

pub mod anova;

pub mod parametric;

pub use anova::{one_way_anova, repeated_measures_anova, repeated_measures_from_rows};
pub use parametric::t_test;
