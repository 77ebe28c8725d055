use crate::growth::{Measurement, Metric, months_between};
use tracing::trace;

/// Growth velocity in metric units per month between the first and last measurement.
///
/// Intermediate measurements are ignored, so this is the slope of the chord, not an average
/// of consecutive rates. Returns 0 for fewer than two measurements or when the last
/// measurement is not later than the first.
pub fn growth_velocity(measurements: &[Measurement], metric: Metric) -> f64 {
    let [first, .., last] = measurements else {
        return 0.0;
    };

    let months_diff = months_between(first.date, last.date);
    let value_diff = last.value(metric) - first.value(metric);

    if months_diff > 0.0 {
        value_diff / months_diff
    } else {
        0.0
    }
}

/// Velocity of each consecutive measurement interval, in units per month.
///
/// One value per pair of neighbouring measurements, so the series is one shorter than the
/// input (empty for fewer than two). Same-day pairs divide by zero and yield ±∞ or NaN.
pub fn interval_velocities(measurements: &[Measurement], metric: Metric) -> Vec<f64> {
    measurements
        .windows(2)
        .map(|pair| {
            let time_diff = months_between(pair[0].date, pair[1].date);
            (pair[1].value(metric) - pair[0].value(metric)) / time_diff
        })
        .collect()
}

/// Mean change in velocity between consecutive measurement intervals, in units per month
/// per interval.
///
/// Velocities are computed for every consecutive pair of measurements; the result is the mean
/// of their first differences. Returns 0 for fewer than three measurements. Two measurements
/// on the same day divide by zero and the infinity propagates.
pub fn growth_acceleration(measurements: &[Measurement], metric: Metric) -> f64 {
    if measurements.len() < 3 {
        return 0.0;
    }

    let velocities = interval_velocities(measurements, metric);
    let total_acceleration: f64 = velocities.windows(2).map(|v| v[1] - v[0]).sum();
    trace!(intervals = velocities.len(), total_acceleration, "growth acceleration");

    total_acceleration / (velocities.len() - 1) as f64
}

/// Velocity from the recorded ages instead of the calendar dates.
///
/// `(last - first) / (last.age - first.age)`, used for cohort averages where ages are exact
/// month counts. A single measurement is its own first and last, giving `0 / 0 = NaN`; an empty
/// series is NaN too. Equal ages on distinct values divide by zero.
pub fn age_based_velocity(measurements: &[Measurement], metric: Metric) -> f64 {
    let (Some(first), Some(last)) = (measurements.first(), measurements.last()) else {
        return f64::NAN;
    };
    (last.value(metric) - first.value(metric)) / (last.age - first.age)
}
