//! Analysis of variance.
//!
//! Both tests compute an F statistic and turn it into a p-value through
//! [`f_distribution_cdf`], a truncated power series for the incomplete beta function. The series
//! omits the `1 / (a * B(a, b))` normalising factor of the regularised incomplete beta
//! function, so the approximate p-values do not behave like a proper upper-tail probability:
//! strongly separated groups can still report `p ≈ 1`. The behaviour is kept for parity with the
//! growth dashboard's reports; pass [`PValueMethod::Exact`] to get Fisher-Snedecor p-values.

use crate::descriptive::mean;
use crate::testing::{AnovaResult, PValueMethod, RepeatedMeasuresResult};
use anyhow::anyhow;
use ndarray::{Array2, ArrayView2, Axis};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use tracing::{debug, trace};

/// Maximum number of terms summed by [`incomplete_beta_series`].
pub const BETA_MAX_ITERATIONS: usize = 100;

/// The series stops once the next term falls below this magnitude.
pub const BETA_EPSILON: f64 = 1e-8;

/// One-way analysis of variance across `k` independent groups.
///
/// `F = (SSB / (k - 1)) / (SSW / (N - k))`. A single group, or groups without within-group
/// spread, produce NaN or infinite statistics.
///
/// # Example
/// ```
/// use growth_statistics::testing::inference::one_way_anova;
/// let result = one_way_anova(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]);
/// assert_eq!(result.f_value, 0.0);
/// assert!(!result.significant);
/// ```
pub fn one_way_anova<G>(groups: &[G]) -> AnovaResult
where
    G: AsRef<[f64]>,
{
    one_way_anova_with(groups, PValueMethod::Approximate)
}

/// One-way ANOVA with an explicit p-value method.
pub fn one_way_anova_with<G>(groups: &[G], method: PValueMethod) -> AnovaResult
where
    G: AsRef<[f64]>,
{
    let group_means: Vec<f64> = groups.iter().map(|g| mean(g.as_ref())).collect();

    let all_values: Vec<f64> = groups
        .iter()
        .flat_map(|g| g.as_ref().iter().copied())
        .collect();
    let grand_mean = mean(&all_values);

    let ssb: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &group_mean)| g.as_ref().len() as f64 * (group_mean - grand_mean).powi(2))
        .sum();

    let ssw: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &group_mean)| {
            g.as_ref()
                .iter()
                .map(|&v| (v - group_mean).powi(2))
                .sum::<f64>()
        })
        .sum();

    let df_between = groups.len() as f64 - 1.0;
    let df_within = all_values.len() as f64 - groups.len() as f64;

    let ms_between = ssb / df_between;
    let ms_within = ssw / df_within;
    let f_value = ms_between / ms_within;

    trace!(ssb, ssw, df_between, df_within, f_value, "one-way anova");
    if !f_value.is_finite() {
        debug!(f_value, groups = groups.len(), "one-way anova produced a non-finite F");
    }

    let p_value = f_test_p_value(f_value, df_between, df_within, method);
    AnovaResult::new(f_value, p_value)
}

/// Repeated-measures ANOVA over the time factor.
///
/// `measurements` holds one row per subject and one column per timepoint. The between-subject
/// variation is removed from the error term; the F statistic tests whether timepoint means
/// differ. The effect size is partial eta-squared.
///
/// # Arguments
///
/// * `measurements` - Matrix of shape (subjects × timepoints)
///
/// # Returns
///
/// `RepeatedMeasuresResult` with the F statistic, p-value, significance, partial eta-squared and
/// the between-subject sum of squares.
pub fn repeated_measures_anova(measurements: ArrayView2<f64>) -> RepeatedMeasuresResult {
    repeated_measures_anova_with(measurements, PValueMethod::Approximate)
}

/// Repeated-measures ANOVA with an explicit p-value method.
pub fn repeated_measures_anova_with(
    measurements: ArrayView2<f64>,
    method: PValueMethod,
) -> RepeatedMeasuresResult {
    let (n_subjects, n_timepoints) = measurements.dim();
    let n = n_subjects as f64;
    let k = n_timepoints as f64;

    let subject_means: Vec<f64> = measurements
        .axis_iter(Axis(0))
        .map(|subject| subject.iter().sum::<f64>() / k)
        .collect();
    let timepoint_means: Vec<f64> = measurements
        .axis_iter(Axis(1))
        .map(|timepoint| timepoint.iter().sum::<f64>() / n)
        .collect();
    let grand_mean = subject_means.iter().sum::<f64>() / n;

    let mut ss_subjects = 0.0;
    let mut ss_time = 0.0;
    let mut ss_error = 0.0;

    for (i, subject_mean) in subject_means.iter().enumerate() {
        ss_subjects += k * (subject_mean - grand_mean).powi(2);
        for (j, timepoint_mean) in timepoint_means.iter().enumerate() {
            ss_time += (timepoint_mean - grand_mean).powi(2);
            ss_error +=
                (measurements[[i, j]] - subject_mean - timepoint_mean + grand_mean).powi(2);
        }
    }

    let df_time = k - 1.0;
    let df_error = (n - 1.0) * (k - 1.0);

    let ms_time = ss_time / df_time;
    let ms_error = ss_error / df_error;
    let f_value = ms_time / ms_error;

    trace!(ss_subjects, ss_time, ss_error, df_time, df_error, f_value, "repeated-measures anova");
    if !f_value.is_finite() {
        debug!(f_value, n_subjects, n_timepoints, "repeated-measures anova produced a non-finite F");
    }

    let p_value = f_test_p_value(f_value, df_time, df_error, method);
    let effect_size = ss_time / (ss_time + ss_error);

    RepeatedMeasuresResult::new(f_value, p_value, effect_size, ss_subjects)
}

/// Build a subjects × timepoints matrix from per-subject rows.
///
/// Every row must have the same, non-zero number of timepoints.
pub fn repeated_measures_from_rows<R>(rows: &[R]) -> anyhow::Result<Array2<f64>>
where
    R: AsRef<[f64]>,
{
    let Some(first) = rows.first() else {
        return Err(anyhow!("Repeated-measures data needs at least one subject"));
    };
    let n_timepoints = first.as_ref().len();
    if n_timepoints == 0 {
        return Err(anyhow!("Repeated-measures data needs at least one timepoint"));
    }

    let mut flat = Vec::with_capacity(rows.len() * n_timepoints);
    for (i, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != n_timepoints {
            return Err(anyhow!(
                "Subject {} has {} timepoints, expected {}",
                i,
                row.len(),
                n_timepoints
            ));
        }
        flat.extend_from_slice(row);
    }

    Ok(Array2::from_shape_vec((rows.len(), n_timepoints), flat)?)
}

/// Approximate F-distribution CDF via [`incomplete_beta_series`].
///
/// `x = df1 * F / (df1 * F + df2)`, evaluated at `a = df1 / 2`, `b = df2 / 2`.
pub fn f_distribution_cdf(f: f64, df1: f64, df2: f64) -> f64 {
    let x = df1 * f / (df1 * f + df2);
    incomplete_beta_series(df1 / 2.0, df2 / 2.0, x)
}

/// Truncated power series `Σ term_i` with `term_0 = x^a (1 - x)^b` and
/// `term_{i+1} = term_i * (a + i) * x / (a + b + i)`.
///
/// This is the series part of the regularised incomplete beta function without its
/// `1 / (a * B(a, b))` prefactor.
pub fn incomplete_beta_series(a: f64, b: f64, x: f64) -> f64 {
    let mut sum = 0.0;
    let mut term = x.powf(a) * (1.0 - x).powf(b);

    for i in 0..BETA_MAX_ITERATIONS {
        sum += term;
        term *= (a + i as f64) * x / (a + b + i as f64);
        if term.abs() < BETA_EPSILON {
            break;
        }
    }

    sum
}

fn f_test_p_value(f_value: f64, df1: f64, df2: f64, method: PValueMethod) -> f64 {
    match method {
        PValueMethod::Approximate => 1.0 - f_distribution_cdf(f_value, df1, df2),
        PValueMethod::Exact => {
            if f_value.is_nan() {
                return f64::NAN;
            }
            match FisherSnedecor::new(df1, df2) {
                Ok(dist) => 1.0 - dist.cdf(f_value),
                Err(_) => {
                    debug!(df1, df2, "invalid degrees of freedom for the F distribution");
                    f64::NAN
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_identical_groups() {
        let groups = vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]];
        let result = one_way_anova(&groups);

        assert_eq!(result.f_value, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert!(!result.significant);
    }

    #[test]
    fn test_separated_groups() {
        let groups = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];

        let approx = one_way_anova(&groups);
        assert_abs_diff_eq!(approx.f_value, 27.0, epsilon = 1e-10);
        // the unnormalised series barely moves away from zero
        assert_abs_diff_eq!(approx.p_value, 0.998748102, epsilon = 1e-6);
        assert!(!approx.significant);

        // for df1 = 2 the upper tail is (1 + 2F/df2)^(-df2/2) = 10^-3
        let exact = one_way_anova_with(&groups, PValueMethod::Exact);
        assert_eq!(exact.f_value, approx.f_value);
        assert_abs_diff_eq!(exact.p_value, 0.001, epsilon = 1e-6);
        assert!(exact.significant);
    }

    #[test]
    fn test_single_group_is_degenerate() {
        let result = one_way_anova(&[vec![1.0, 2.0, 3.0]]);
        assert!(result.f_value.is_nan());
        assert!(!result.significant);
    }

    #[test]
    fn test_incomplete_beta_series() {
        assert_eq!(incomplete_beta_series(1.0, 3.0, 0.0), 0.0);
        // a single term when the recurrence collapses immediately
        assert_abs_diff_eq!(incomplete_beta_series(1.0, 1.0, 1e-9), 1e-9, epsilon = 1e-15);
        assert!(f_distribution_cdf(0.0, 2.0, 6.0) >= 0.0);
    }

    #[test]
    fn test_repeated_measures() {
        let data = array![[10.0, 12.0, 15.0], [11.0, 14.0, 16.0], [9.0, 11.0, 15.0]];
        let result = repeated_measures_anova(data.view());

        assert_abs_diff_eq!(result.f_value, 77.2, epsilon = 1e-9);
        assert_abs_diff_eq!(result.p_value, 0.998846410, epsilon = 1e-6);
        assert_abs_diff_eq!(result.effect_size, 0.974747475, epsilon = 1e-8);
        assert_abs_diff_eq!(result.ss_subjects, 6.222222222, epsilon = 1e-8);

        let exact = repeated_measures_anova_with(data.view(), PValueMethod::Exact);
        assert!(exact.significant);
        assert!(exact.p_value < 0.001);
    }

    #[test]
    fn test_repeated_measures_from_rows() {
        let rows = vec![vec![5.0, 5.0, 5.0], vec![6.0, 6.0, 6.0], vec![7.0, 7.0, 7.5]];
        let matrix = repeated_measures_from_rows(&rows).unwrap();
        assert_eq!(matrix.dim(), (3, 3));

        let result = repeated_measures_anova(matrix.view());
        assert_abs_diff_eq!(result.f_value, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.effect_size, 1.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.p_value, 0.831937974, epsilon = 1e-6);
    }

    #[test]
    fn test_repeated_measures_from_rows_rejects_bad_shapes() {
        let empty: Vec<Vec<f64>> = vec![];
        assert!(repeated_measures_from_rows(&empty).is_err());
        assert!(repeated_measures_from_rows(&[Vec::<f64>::new()]).is_err());
        assert!(repeated_measures_from_rows(&[vec![1.0, 2.0], vec![1.0]]).is_err());
    }

    #[test]
    fn test_repeated_measures_single_subject() {
        // (n - 1) * (k - 1) = 0 error degrees of freedom
        let data = array![[3.0, 6.0, 9.0]];
        let result = repeated_measures_anova(data.view());

        assert!(result.f_value.is_nan());
        assert!(result.p_value.is_nan());
        assert!(!result.significant);
        assert_eq!(result.effect_size, 1.0);
        assert_eq!(result.ss_subjects, 0.0);

        let exact = repeated_measures_anova_with(data.view(), PValueMethod::Exact);
        assert!(exact.p_value.is_nan());
    }
}
