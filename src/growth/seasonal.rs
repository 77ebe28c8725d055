use crate::growth::{Measurement, Metric};
use chrono::Datelike;
use std::fmt;

/// Meteorological season of the northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Season for a zero-based month index (January = 0).
    ///
    /// March-May is spring, June-August summer, September-November fall and everything else
    /// winter.
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            2..=4 => Season::Spring,
            5..=7 => Season::Summer,
            8..=10 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        };
        f.write_str(name)
    }
}

/// Mean growth per measurement interval, by season.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeasonalEffects {
    pub spring_growth: f64,
    pub summer_growth: f64,
    pub fall_growth: f64,
    pub winter_growth: f64,
}

impl SeasonalEffects {
    pub fn get(&self, season: Season) -> f64 {
        match season {
            Season::Spring => self.spring_growth,
            Season::Summer => self.summer_growth,
            Season::Fall => self.fall_growth,
            Season::Winter => self.winter_growth,
        }
    }
}

/// Average raw growth between consecutive measurements, bucketed by season.
///
/// Each interval contributes its unnormalised difference (not a rate) to the season of the
/// interval's *earlier* measurement date. A season with no intervals reports 0.
pub fn seasonal_effects(measurements: &[Measurement], metric: Metric) -> SeasonalEffects {
    let mut spring = Vec::new();
    let mut summer = Vec::new();
    let mut fall = Vec::new();
    let mut winter = Vec::new();

    for pair in measurements.windows(2) {
        let growth = pair[1].value(metric) - pair[0].value(metric);
        match Season::from_month0(pair[0].date.month0()) {
            Season::Spring => spring.push(growth),
            Season::Summer => summer.push(growth),
            Season::Fall => fall.push(growth),
            Season::Winter => winter.push(growth),
        }
    }

    SeasonalEffects {
        spring_growth: mean_or_zero(&spring),
        summer_growth: mean_or_zero(&summer),
        fall_growth: mean_or_zero(&fall),
        winter_growth: mean_or_zero(&winter),
    }
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        crate::descriptive::mean(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::test_support::measurement;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_month_mapping() {
        let expected = [
            Season::Winter,
            Season::Winter,
            Season::Spring,
            Season::Spring,
            Season::Spring,
            Season::Summer,
            Season::Summer,
            Season::Summer,
            Season::Fall,
            Season::Fall,
            Season::Fall,
            Season::Winter,
        ];
        for (month0, season) in expected.iter().enumerate() {
            assert_eq!(Season::from_month0(month0 as u32), *season, "month {}", month0);
        }
    }

    #[test]
    fn test_every_month_lands_in_one_bucket() {
        let all = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];
        for month in 1..=12u32 {
            let start = format!("2023-{:02}-10", month);
            let series = vec![
                measurement(&start, 10.0, 70.0, 8.0),
                measurement("2024-06-15", 20.0, 72.5, 9.0),
            ];
            let effects = seasonal_effects(&series, Metric::Height);
            let season = Season::from_month0(month - 1);

            assert_eq!(effects.get(season), 2.5, "month {}", month);
            for other in all.iter().filter(|s| **s != season) {
                assert_eq!(effects.get(*other), 0.0, "month {} leaked into {}", month, other);
            }
        }
    }

    #[test]
    fn test_seasonal_means() {
        let series = vec![
            measurement("2024-03-01", 12.0, 75.0, 9.0),
            measurement("2024-04-01", 13.0, 76.0, 9.2),
            measurement("2024-05-01", 14.0, 78.0, 9.5),
            measurement("2024-07-01", 16.0, 79.0, 9.9),
            measurement("2024-12-01", 21.0, 82.0, 10.6),
        ];
        let effects = seasonal_effects(&series, Metric::Height);

        // March -> April +1 and April -> May +2 are spring; May -> July +1 is spring too
        assert_abs_diff_eq!(effects.spring_growth, 4.0 / 3.0, epsilon = 1e-12);
        assert_eq!(effects.summer_growth, 3.0);
        assert_eq!(effects.fall_growth, 0.0);
        assert_eq!(effects.winter_growth, 0.0);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(seasonal_effects(&[], Metric::Weight), SeasonalEffects::default());
    }
}
