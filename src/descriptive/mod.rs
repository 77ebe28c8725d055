//! Descriptive statistics primitives.
//!
//! These are the leaf-level functions every test and growth metric is built on. None of them
//! guard against degenerate input: an empty sample has a NaN mean and a zero standard deviation
//! turns a z-score into an infinity. Callers that need a defined value must check sample sizes
//! themselves.

use num_traits::{Float, NumCast};
use single_utilities::traits::FloatOps;

/// Arithmetic mean of a sample.
///
/// An empty sample divides zero by zero and returns NaN.
///
/// # Example
/// ```
/// use growth_statistics::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert!(mean::<f64>(&[]).is_nan());
/// ```
pub fn mean<T>(values: &[T]) -> T
where
    T: FloatOps,
{
    let sum = values.iter().fold(T::zero(), |acc, &val| acc + val);
    let n = <T as NumCast>::from(values.len()).unwrap_or_else(<T as Float>::nan);
    sum / n
}

/// Population variance (divides by N, not N - 1).
pub fn variance<T>(values: &[T]) -> T
where
    T: FloatOps,
{
    let m = mean(values);
    let squared_diffs: Vec<T> = values
        .iter()
        .map(|&v| <T as Float>::powi(v - m, 2))
        .collect();
    mean(&squared_diffs)
}

/// Population standard deviation, `sqrt(mean((v - mean(v))^2))`.
pub fn standard_deviation<T>(values: &[T]) -> T
where
    T: FloatOps,
{
    <T as Float>::sqrt(variance(values))
}

/// Number of standard deviations `value` lies from `mean`.
///
/// `sd == 0` is not special-cased and yields an infinity (or NaN when `value == mean`).
pub fn z_score(value: f64, mean: f64, sd: f64) -> f64 {
    (value - mean) / sd
}

/// Standard normal cumulative distribution function.
///
/// Zelen & Severo polynomial approximation (Abramowitz & Stegun 26.2.17), absolute error below
/// 7.5e-8. Every p-value and percentile in this crate goes through this function.
pub fn normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let prob =
        d * t * (0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));
    if x > 0.0 { 1.0 - prob } else { prob }
}

/// Upper-middle element of the sorted sample (`sorted[n / 2]`).
///
/// For even-sized samples this is not the average of the two middle values. NaN when empty.
pub fn median<T>(values: &[T]) -> T
where
    T: FloatOps,
{
    if values.is_empty() {
        return <T as Float>::nan();
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted[sorted.len() / 2]
}
