use crate::growth::{Measurement, Metric};
use crate::who::{LmsStandard, SdBandStandard, Sex, percentile, sd_band_z_score, who_z_score};
use anyhow::anyhow;
use std::collections::HashMap;

/// WHO reference tables keyed by sex and metric.
///
/// Built once by the caller (typically from the WHO spreadsheets) and passed by reference to
/// every computation that needs it.
///
/// # Example
/// ```
/// use growth_statistics::growth::Metric;
/// use growth_statistics::who::{LmsStandard, Sex, WhoStandardsTable};
///
/// let table = WhoStandardsTable::new().with_lms(
///     Sex::Male,
///     Metric::Height,
///     vec![LmsStandard::new(12.0, 1.0, 75.7488, 0.03137)],
/// );
/// assert!(table.lms(Sex::Male, Metric::Height).is_ok());
/// assert!(table.lms(Sex::Female, Metric::Height).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WhoStandardsTable {
    lms: HashMap<(Sex, Metric), Vec<LmsStandard>>,
    sd_bands: HashMap<(Sex, Metric), Vec<SdBandStandard>>,
}

impl WhoStandardsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the LMS rows for a sex/metric pair. Rows are kept sorted by age.
    pub fn with_lms(mut self, sex: Sex, metric: Metric, mut rows: Vec<LmsStandard>) -> Self {
        rows.sort_by(|a, b| a.age.total_cmp(&b.age));
        self.lms.insert((sex, metric), rows);
        self
    }

    /// Add (or replace) the SD-band rows for a sex/metric pair. Rows are kept sorted by age.
    pub fn with_sd_bands(mut self, sex: Sex, metric: Metric, mut rows: Vec<SdBandStandard>) -> Self {
        rows.sort_by(|a, b| a.age.total_cmp(&b.age));
        self.sd_bands.insert((sex, metric), rows);
        self
    }

    pub fn lms(&self, sex: Sex, metric: Metric) -> anyhow::Result<&[LmsStandard]> {
        self.lms
            .get(&(sex, metric))
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow!("No LMS standard loaded for {} {}", sex, metric))
    }

    pub fn sd_bands(&self, sex: Sex, metric: Metric) -> anyhow::Result<&[SdBandStandard]> {
        self.sd_bands
            .get(&(sex, metric))
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow!("No SD-band standard loaded for {} {}", sex, metric))
    }

    /// LMS z-score of a measurement for a child of the given sex.
    pub fn z_score(&self, sex: Sex, metric: Metric, measurement: &Measurement) -> anyhow::Result<f64> {
        who_z_score(measurement.value(metric), measurement.age, self.lms(sex, metric)?)
    }

    /// Percentile of a measurement for a child of the given sex.
    pub fn percentile(&self, sex: Sex, metric: Metric, measurement: &Measurement) -> anyhow::Result<f64> {
        self.z_score(sex, metric, measurement).map(percentile)
    }

    /// SD-band z-score, `None` when no row matches the completed month of age.
    pub fn sd_band_z_score(
        &self,
        sex: Sex,
        metric: Metric,
        measurement: &Measurement,
    ) -> anyhow::Result<Option<f64>> {
        let rows = self.sd_bands(sex, metric)?;
        Ok(sd_band_z_score(measurement.value(metric), measurement.age, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::test_support::measurement;
    use approx::assert_abs_diff_eq;

    fn table() -> WhoStandardsTable {
        WhoStandardsTable::new()
            .with_lms(
                Sex::Male,
                Metric::Weight,
                vec![
                    LmsStandard::new(12.0, 0.1257, 9.6479, 0.11316),
                    LmsStandard::new(0.0, 0.3487, 3.3464, 0.14602),
                ],
            )
            .with_sd_bands(
                Sex::Female,
                Metric::Height,
                vec![SdBandStandard::from_bands(
                    12.0,
                    [63.4, 66.3, 68.9, 71.4, 74.0, 76.6, 79.2, 81.7, 84.3],
                )],
            )
    }

    #[test]
    fn test_rows_are_sorted() {
        let table = table();
        let rows = table.lms(Sex::Male, Metric::Weight).unwrap();
        assert_eq!(rows[0].age, 0.0);
        assert_eq!(rows[1].age, 12.0);
    }

    #[test]
    fn test_z_score_and_percentile() {
        let table = table();
        let at_median = measurement("2024-06-01", 12.0, 75.0, 9.6479);

        assert_abs_diff_eq!(
            table.z_score(Sex::Male, Metric::Weight, &at_median).unwrap(),
            0.0,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            table.percentile(Sex::Male, Metric::Weight, &at_median).unwrap(),
            50.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_sd_band_lookup() {
        let table = table();
        let girl = measurement("2024-06-01", 12.4, 71.4, 8.9);
        let z = table.sd_band_z_score(Sex::Female, Metric::Height, &girl).unwrap();
        assert_abs_diff_eq!(z.unwrap(), -1.0, epsilon = 1e-9);

        let younger = measurement("2024-01-01", 6.0, 65.0, 7.3);
        assert_eq!(table.sd_band_z_score(Sex::Female, Metric::Height, &younger).unwrap(), None);
    }

    #[test]
    fn test_missing_entries() {
        let table = table();
        let m = measurement("2024-06-01", 12.0, 75.0, 9.6);
        assert!(table.z_score(Sex::Female, Metric::Weight, &m).is_err());
        assert!(table.sd_band_z_score(Sex::Male, Metric::Height, &m).is_err());
    }
}
