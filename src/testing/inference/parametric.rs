//! Parametric two-sample tests.
//!
//! The t-test here pools variances the way the growth dashboard does: each sample's variance is
//! the *population* variance (divided by N), and the pooled estimate then re-weights them by
//! `n - 1`. Degenerate samples are not rejected; a sample of size one or an empty sample yields
//! NaN or infinite statistics that flow through to the result.

use crate::descriptive::{mean, normal_cdf, standard_deviation};
use crate::testing::{PValueMethod, TTestResult};
use single_utilities::traits::FloatOps;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::debug;

/// Perform a two-sample t-test comparing the means of two samples.
///
/// The p-value is two-tailed and uses the normal approximation
/// `2 * (1 - Φ(|t|))` regardless of sample size, which understates uncertainty for small
/// samples. Use [`t_test_with`] and [`PValueMethod::Exact`] for Student's t.
///
/// # Arguments
///
/// * `sample1` - First sample (e.g. heights before an intervention)
/// * `sample2` - Second sample (e.g. heights during the intervention)
///
/// # Returns
///
/// `TTestResult` containing the t-statistic, p-value and significance at the 0.05 level.
///
/// # Example
/// ```
/// use growth_statistics::testing::inference::t_test;
/// let result = t_test(&[1.0, 2.0, 3.0], &[7.0, 8.0, 9.0]);
/// assert!(result.significant);
/// ```
pub fn t_test<T>(sample1: &[T], sample2: &[T]) -> TTestResult
where
    T: FloatOps,
{
    t_test_with(sample1, sample2, PValueMethod::Approximate)
}

/// Perform a two-sample t-test with an explicit p-value method.
///
/// The t-statistic is identical for both methods; only the p-value differs.
///
/// # Arguments
///
/// * `sample1` - First sample
/// * `sample2` - Second sample
/// * `method` - How to turn the t-statistic into a p-value
pub fn t_test_with<T>(sample1: &[T], sample2: &[T], method: PValueMethod) -> TTestResult
where
    T: FloatOps,
{
    let n1 = sample1.len() as f64;
    let n2 = sample2.len() as f64;
    let mean1 = mean(sample1).to_f64().unwrap_or(f64::NAN);
    let mean2 = mean(sample2).to_f64().unwrap_or(f64::NAN);
    let var1 = standard_deviation(sample1).to_f64().unwrap_or(f64::NAN).powi(2);
    let var2 = standard_deviation(sample2).to_f64().unwrap_or(f64::NAN).powi(2);

    let df = n1 + n2 - 2.0;
    if df <= 0.0 {
        debug!(n1, n2, "t-test with no residual degrees of freedom");
    }

    let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
    let standard_error = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();
    let t_value = (mean1 - mean2) / standard_error;

    let p_value = match method {
        PValueMethod::Approximate => normal_two_tailed_p_value(t_value),
        PValueMethod::Exact => students_t_two_tailed_p_value(t_value, df),
    };

    TTestResult::new(t_value, p_value)
}

/// Two-tailed p-value from the standard normal distribution.
#[inline]
pub fn normal_two_tailed_p_value(t_value: f64) -> f64 {
    2.0 * (1.0 - normal_cdf(t_value.abs()))
}

/// Two-tailed p-value from Student's t with `df` degrees of freedom.
///
/// Returns NaN when the distribution cannot be constructed (`df <= 0` or not finite) or the
/// statistic itself is NaN.
#[inline]
pub fn students_t_two_tailed_p_value(t_value: f64, df: f64) -> f64 {
    if t_value.is_nan() {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => 2.0 * (1.0 - t_dist.cdf(t_value.abs())),
        Err(_) => {
            debug!(df, "invalid degrees of freedom for Student's t");
            f64::NAN
        }
    }
}
