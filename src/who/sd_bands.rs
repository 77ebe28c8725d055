use crate::who::LmsStandard;

/// One age row of a WHO growth chart expressed as standard-deviation curves.
///
/// This is the layout of the WHO "z-score" spreadsheets: the measurement value at -4 SD through
/// +4 SD for each completed month of age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdBandStandard {
    /// Age in completed months
    pub age: f64,
    pub sd4neg: f64,
    pub sd3neg: f64,
    pub sd2neg: f64,
    pub sd1neg: f64,
    pub sd0: f64,
    pub sd1: f64,
    pub sd2: f64,
    pub sd3: f64,
    pub sd4: f64,
}

impl SdBandStandard {
    /// Build the nine band values from `[-4 SD, ..., +4 SD]`.
    pub fn from_bands(age: f64, bands: [f64; 9]) -> Self {
        let [sd4neg, sd3neg, sd2neg, sd1neg, sd0, sd1, sd2, sd3, sd4] = bands;
        SdBandStandard {
            age,
            sd4neg,
            sd3neg,
            sd2neg,
            sd1neg,
            sd0,
            sd1,
            sd2,
            sd3,
            sd4,
        }
    }

    /// Derive the SD curves of an LMS row.
    pub fn from_lms(lms: &LmsStandard) -> Self {
        let mut bands = [0.0; 9];
        for (slot, z) in bands.iter_mut().zip(-4..=4) {
            *slot = lms.value_at(z as f64);
        }
        SdBandStandard::from_bands(lms.age, bands)
    }

    /// Band values ordered from -4 SD to +4 SD.
    pub fn bands(&self) -> [f64; 9] {
        [
            self.sd4neg,
            self.sd3neg,
            self.sd2neg,
            self.sd1neg,
            self.sd0,
            self.sd1,
            self.sd2,
            self.sd3,
            self.sd4,
        ]
    }

    /// Linear z-score taking the median-to-+1 SD gap as one standard deviation.
    pub fn z_score(&self, measurement: f64) -> f64 {
        let sd = self.sd1 - self.sd0;
        (measurement - self.sd0) / sd
    }
}

/// Z-score against the row for the completed month of age (`floor(age)`).
///
/// Returns `None` when the table has no row for that month.
pub fn sd_band_z_score(measurement: f64, age: f64, standards: &[SdBandStandard]) -> Option<f64> {
    let month = age.floor();
    standards
        .iter()
        .find(|s| s.age == month)
        .map(|s| s.z_score(measurement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn girls_height() -> Vec<SdBandStandard> {
        vec![
            SdBandStandard::from_bands(
                0.0,
                [41.7, 43.6, 45.4, 47.3, 49.1, 51.0, 52.9, 54.7, 56.6],
            ),
            SdBandStandard::from_bands(
                12.0,
                [63.4, 66.3, 68.9, 71.4, 74.0, 76.6, 79.2, 81.7, 84.3],
            ),
        ]
    }

    #[test]
    fn test_floor_age_lookup() {
        let table = girls_height();
        assert_abs_diff_eq!(sd_band_z_score(76.6, 12.7, &table).unwrap(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sd_band_z_score(74.0, 12.0, &table).unwrap(), 0.0, epsilon = 1e-12);
        assert!(sd_band_z_score(74.0, 11.9, &table).is_none());
        assert!(sd_band_z_score(74.0, 12.0, &[]).is_none());
    }

    #[test]
    fn test_from_lms() {
        let lms = LmsStandard::new(12.0, 1.0, 75.7488, 0.03137);
        let bands = SdBandStandard::from_lms(&lms);
        assert_eq!(bands.sd0, 75.7488);
        assert_abs_diff_eq!(bands.sd1 - bands.sd0, 75.7488 * 0.03137, epsilon = 1e-9);
        assert_abs_diff_eq!(bands.z_score(bands.sd2), 2.0, epsilon = 1e-9);

        let values = bands.bands();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }
}
