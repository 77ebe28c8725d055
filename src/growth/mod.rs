//! Growth-domain analytics over dated measurements.
//!
//! All functions take measurements ordered by date and never modify them. Elapsed time is
//! converted to months with a fixed 30.44-day month, the average Gregorian month length.
//!
//! The [`GrowthSeries`] trait exposes the same analytics as methods on a measurement slice.
//!
//! ## Quick Example
//!
//! ```
//! use chrono::NaiveDate;
//! use growth_statistics::growth::{GrowthSeries, Measurement, Metric};
//!
//! let measurements = vec![
//!     Measurement::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 12.0, 75.0, 9.6),
//!     Measurement::new(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(), 18.0, 81.0, 10.9),
//! ];
//! let velocity = measurements.velocity(Metric::Height);
//! assert!((velocity - 1.0).abs() < 0.01);
//! ```

use crate::testing::TTestResult;
use crate::testing::inference::t_test;
use crate::who::LmsStandard;
use chrono::NaiveDate;
use std::fmt;

pub mod catch_up;
pub mod intervention;
pub mod seasonal;
pub mod velocity;

pub use catch_up::catch_up_index;
pub use seasonal::{Season, SeasonalEffects, seasonal_effects};
pub use velocity::{age_based_velocity, growth_acceleration, growth_velocity, interval_velocities};

/// Days per month used for every date-to-month conversion.
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Which anthropometric value of a [`Measurement`] to analyse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Length/height in centimetres
    Height,
    /// Weight in kilograms
    Weight,
}

impl Metric {
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Height => "cm",
            Metric::Weight => "kg",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Height => f.write_str("height"),
            Metric::Weight => f.write_str("weight"),
        }
    }
}

/// A single anthropometric measurement of a child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub date: NaiveDate,
    /// Age in months, possibly fractional
    pub age: f64,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
}

impl Measurement {
    pub fn new(date: NaiveDate, age: f64, height: f64, weight: f64) -> Self {
        Measurement {
            date,
            age,
            height,
            weight,
        }
    }

    /// Value of the selected metric.
    #[inline]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Height => self.height,
            Metric::Weight => self.weight,
        }
    }
}

/// Elapsed months from `from` to `to` (negative when `to` is earlier).
#[inline]
pub fn months_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_MONTH
}

/// Extract one metric from a series of measurements as a plain sample.
pub fn metric_values(measurements: &[Measurement], metric: Metric) -> Vec<f64> {
    measurements.iter().map(|m| m.value(metric)).collect()
}

/// t-test of the first half of a series against the second half.
///
/// The split is at `len / 2`, so for an odd length the middle measurement belongs to the
/// second half. This is the significance check printed in the child growth report.
pub fn half_split_t_test(measurements: &[Measurement], metric: Metric) -> TTestResult {
    let (first_half, second_half) = measurements.split_at(measurements.len() / 2);
    t_test(
        &metric_values(first_half, metric),
        &metric_values(second_half, metric),
    )
}

/// Growth analytics as methods on an ordered measurement series.
pub trait GrowthSeries {
    fn velocity(&self, metric: Metric) -> f64;

    fn acceleration(&self, metric: Metric) -> f64;

    fn interval_velocities(&self, metric: Metric) -> Vec<f64>;

    fn seasonal_effects(&self, metric: Metric) -> SeasonalEffects;

    fn catch_up_index(&self, standards: &[LmsStandard], metric: Metric) -> anyhow::Result<f64>;
}

impl GrowthSeries for [Measurement] {
    fn velocity(&self, metric: Metric) -> f64 {
        growth_velocity(self, metric)
    }

    fn acceleration(&self, metric: Metric) -> f64 {
        growth_acceleration(self, metric)
    }

    fn interval_velocities(&self, metric: Metric) -> Vec<f64> {
        interval_velocities(self, metric)
    }

    fn seasonal_effects(&self, metric: Metric) -> SeasonalEffects {
        seasonal_effects(self, metric)
    }

    fn catch_up_index(&self, standards: &[LmsStandard], metric: Metric) -> anyhow::Result<f64> {
        catch_up_index(self, standards, metric)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Measurement;
    use chrono::NaiveDate;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn measurement(d: &str, age: f64, height: f64, weight: f64) -> Measurement {
        Measurement::new(date(d), age, height, weight)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{date, measurement};
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_months_between() {
        assert_abs_diff_eq!(
            months_between(date("2024-01-01"), date("2024-07-01")),
            182.0 / 30.44,
            epsilon = 1e-12
        );
        assert!(months_between(date("2024-07-01"), date("2024-01-01")) < 0.0);
        assert_eq!(months_between(date("2024-07-01"), date("2024-07-01")), 0.0);
    }

    #[test]
    fn test_metric_selection() {
        let m = measurement("2024-01-01", 6.0, 67.5, 7.9);
        assert_eq!(m.value(Metric::Height), 67.5);
        assert_eq!(m.value(Metric::Weight), 7.9);
        assert_eq!(Metric::Height.unit(), "cm");
        assert_eq!(Metric::Weight.to_string(), "weight");
    }

    #[test]
    fn test_metric_values() {
        let series = vec![
            measurement("2023-11-01", 6.0, 67.0, 7.8),
            measurement("2024-02-01", 9.0, 71.0, 8.6),
            measurement("2024-05-01", 12.0, 74.5, 9.4),
        ];
        assert_eq!(metric_values(&series, Metric::Height), vec![67.0, 71.0, 74.5]);
        assert_eq!(metric_values(&series, Metric::Weight), vec![7.8, 8.6, 9.4]);
    }

    #[test]
    fn test_growth_series_trait() {
        let series = vec![
            measurement("2024-01-01", 12.0, 75.0, 9.6),
            measurement("2024-07-01", 18.0, 81.0, 10.9),
        ];
        assert_eq!(series.velocity(Metric::Height), growth_velocity(&series, Metric::Height));
        assert_eq!(series.acceleration(Metric::Height), 0.0);
        assert_eq!(
            series.interval_velocities(Metric::Height),
            vec![growth_velocity(&series, Metric::Height)]
        );
    }

    #[test]
    fn test_half_split_t_test() {
        let heights = [60.0, 61.0, 62.0, 70.0, 71.0, 72.0];
        let series: Vec<Measurement> = heights
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let visit = date("2024-01-01") + chrono::Days::new(30 * i as u64);
                Measurement::new(visit, i as f64, h, 8.0)
            })
            .collect();

        let result = half_split_t_test(&series, Metric::Height);
        assert_eq!(result, t_test(&[60.0, 61.0, 62.0], &[70.0, 71.0, 72.0]));
        assert!(result.t_value < 0.0);
        assert!(result.significant);

        // odd length: the middle visit goes to the second half
        let odd = half_split_t_test(&series[..5], Metric::Height);
        assert_eq!(odd, t_test(&[60.0, 61.0], &[62.0, 70.0, 71.0]));
    }
}
