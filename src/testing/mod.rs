//! Inferential statistics: two-sample t-tests, effect sizes and analysis of variance.
//!
//! The tests report p-values through one of two [`PValueMethod`]s. The default
//! [`PValueMethod::Approximate`] reproduces the growth dashboard's numbers: a normal
//! approximation for the t-test and a truncated incomplete-beta series for the F-test. Because
//! that series leaves out the `B(a, b)` normalising constant, its "p-values" are not confined to
//! `[0, 1]` in general. [`PValueMethod::Exact`] uses Student's t and the Fisher-Snedecor
//! distribution from `statrs` instead.

use std::fmt;

pub mod effect;
pub mod inference;

pub mod utils;

/// Significance threshold applied by every test in this crate.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PValueMethod {
    /// Normal approximation for t, truncated incomplete-beta series for F
    #[default]
    Approximate,
    /// Student's t and Fisher-Snedecor CDFs
    Exact,
}

/// Result of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub t_value: f64,
    pub p_value: f64,
    /// `p_value < SIGNIFICANCE_LEVEL`; always false for a NaN p-value
    pub significant: bool,
}

impl TTestResult {
    pub fn new(t_value: f64, p_value: f64) -> Self {
        TTestResult {
            t_value,
            p_value,
            significant: is_significant(p_value),
        }
    }
}

/// Qualitative reading of Cohen's d.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    /// Classify a Cohen's d value using the conventional 0.2 / 0.5 / 0.8 cut points.
    ///
    /// Each threshold is exclusive, so `d == 0.2` is already a small effect. A NaN fails every
    /// comparison and lands in [`EffectMagnitude::Large`].
    pub fn classify(d: f64) -> Self {
        if d < 0.2 {
            EffectMagnitude::Negligible
        } else if d < 0.5 {
            EffectMagnitude::Small
        } else if d < 0.8 {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectMagnitude::Negligible => "negligible effect",
            EffectMagnitude::Small => "small effect",
            EffectMagnitude::Medium => "medium effect",
            EffectMagnitude::Large => "large effect",
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cohen's d together with its interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSize {
    /// Absolute standardised mean difference
    pub cohens_d: f64,
    pub interpretation: EffectMagnitude,
}

impl EffectSize {
    pub fn new(cohens_d: f64) -> Self {
        EffectSize {
            cohens_d,
            interpretation: EffectMagnitude::classify(cohens_d),
        }
    }
}

/// Result of a one-way ANOVA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaResult {
    pub f_value: f64,
    pub p_value: f64,
    pub significant: bool,
}

impl AnovaResult {
    pub fn new(f_value: f64, p_value: f64) -> Self {
        AnovaResult {
            f_value,
            p_value,
            significant: is_significant(p_value),
        }
    }
}

/// Result of a repeated-measures ANOVA over the time factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatedMeasuresResult {
    pub f_value: f64,
    pub p_value: f64,
    pub significant: bool,
    /// Partial eta-squared, `SS_time / (SS_time + SS_error)`
    pub effect_size: f64,
    /// Between-subject sum of squares. Reported only, it does not enter the F statistic.
    pub ss_subjects: f64,
}

impl RepeatedMeasuresResult {
    pub fn new(f_value: f64, p_value: f64, effect_size: f64, ss_subjects: f64) -> Self {
        RepeatedMeasuresResult {
            f_value,
            p_value,
            significant: is_significant(p_value),
            effect_size,
            ss_subjects,
        }
    }
}

#[inline]
fn is_significant(p_value: f64) -> bool {
    p_value < SIGNIFICANCE_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_magnitude_thresholds() {
        assert_eq!(EffectMagnitude::classify(0.0), EffectMagnitude::Negligible);
        assert_eq!(EffectMagnitude::classify(0.19), EffectMagnitude::Negligible);
        assert_eq!(EffectMagnitude::classify(0.2), EffectMagnitude::Small);
        assert_eq!(EffectMagnitude::classify(0.49), EffectMagnitude::Small);
        assert_eq!(EffectMagnitude::classify(0.5), EffectMagnitude::Medium);
        assert_eq!(EffectMagnitude::classify(0.8), EffectMagnitude::Large);
        assert_eq!(EffectMagnitude::classify(f64::NAN), EffectMagnitude::Large);
    }

    #[test]
    fn test_effect_magnitude_display() {
        assert_eq!(EffectMagnitude::Negligible.to_string(), "negligible effect");
        assert_eq!(EffectMagnitude::Small.to_string(), "small effect");
        assert_eq!(EffectMagnitude::Medium.to_string(), "medium effect");
        assert_eq!(EffectMagnitude::Large.to_string(), "large effect");
    }

    #[test]
    fn test_significance() {
        assert!(TTestResult::new(3.0, 0.01).significant);
        assert!(!TTestResult::new(1.0, 0.05).significant);
        assert!(!AnovaResult::new(f64::NAN, f64::NAN).significant);
    }
}
