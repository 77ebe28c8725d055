use anyhow::anyhow;
use tracing::trace;

/// One age row of a WHO growth standard in LMS form.
///
/// The distribution of the measurement at `age` is described by a Box-Cox power `l`, a median
/// `m` and a coefficient of variation `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmsStandard {
    /// Age in months
    pub age: f64,
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl LmsStandard {
    pub fn new(age: f64, l: f64, m: f64, s: f64) -> Self {
        LmsStandard { age, l, m, s }
    }

    /// Z-score of `measurement` under this row.
    ///
    /// `((x / M)^L - 1) / (L * S)`, or `ln(x / M) / S` when `L == 0`.
    pub fn z_score(&self, measurement: f64) -> f64 {
        if self.l == 0.0 {
            (measurement / self.m).ln() / self.s
        } else {
            ((measurement / self.m).powf(self.l) - 1.0) / (self.l * self.s)
        }
    }

    /// Measurement value that sits at `z` standard deviations, the inverse of [`z_score`].
    ///
    /// Used to draw the -3 SD ..= +3 SD reference curves.
    ///
    /// [`z_score`]: LmsStandard::z_score
    pub fn value_at(&self, z: f64) -> f64 {
        if self.l == 0.0 {
            self.m * (self.s * z).exp()
        } else {
            self.m * (1.0 + self.l * self.s * z).powf(1.0 / self.l)
        }
    }
}

/// Row whose age is closest to `age`. On ties the earlier row wins.
pub fn nearest_standard(age: f64, standards: &[LmsStandard]) -> anyhow::Result<&LmsStandard> {
    let mut iter = standards.iter();
    let Some(first) = iter.next() else {
        return Err(anyhow!("WHO standard table is empty"));
    };

    let nearest = iter.fold(first, |prev, curr| {
        if (curr.age - age).abs() < (prev.age - age).abs() {
            curr
        } else {
            prev
        }
    });
    trace!(age, standard_age = nearest.age, "nearest WHO standard row");
    Ok(nearest)
}

/// WHO z-score of a measurement taken at `age` months, using the LMS method on the row with the
/// nearest age.
///
/// # Arguments
///
/// * `measurement` - Height in cm or weight in kg
/// * `age` - Age in months at the time of measurement
/// * `standards` - LMS rows for the child's sex and the measured indicator
///
/// # Returns
///
/// The z-score, or an error when `standards` is empty.
pub fn who_z_score(measurement: f64, age: f64, standards: &[LmsStandard]) -> anyhow::Result<f64> {
    let standard = nearest_standard(age, standards)?;
    Ok(standard.z_score(measurement))
}
