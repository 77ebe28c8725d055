use crate::growth::{Measurement, Metric, months_between};
use crate::who::{LmsStandard, who_z_score};
use tracing::debug;

/// Catch-up growth index: change in WHO z-score per month between the first and last
/// measurement.
///
/// Positive values mean the child is moving up through the reference percentiles. Each z-score
/// uses the LMS row nearest to the measurement's recorded age. Returns 0 for fewer than two
/// measurements; measurements on the same day divide by zero and the infinity (or NaN)
/// propagates.
///
/// # Arguments
///
/// * `measurements` - Measurements ordered by date
/// * `standards` - LMS rows for the child's sex and the chosen metric
/// * `metric` - Height or weight
///
/// # Errors
///
/// Fails when `standards` is empty and there are at least two measurements.
pub fn catch_up_index(
    measurements: &[Measurement],
    standards: &[LmsStandard],
    metric: Metric,
) -> anyhow::Result<f64> {
    let [first, .., last] = measurements else {
        return Ok(0.0);
    };

    let initial_z = who_z_score(first.value(metric), first.age, standards)?;
    let final_z = who_z_score(last.value(metric), last.age, standards)?;
    let months_diff = months_between(first.date, last.date);

    if months_diff == 0.0 {
        debug!(date = %first.date, "catch-up index over a zero-length interval");
    }

    Ok((final_z - initial_z) / months_diff)
}
