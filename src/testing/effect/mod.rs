use crate::descriptive::{mean, standard_deviation};
use crate::testing::EffectSize;
use single_utilities::traits::FloatOps;

/// Calculate Cohen's d between two samples and classify its magnitude.
///
/// The pooled standard deviation weights each sample's *population* standard deviation by
/// `n - 1`. The difference of means is taken in absolute value, so the direction of the effect
/// is not reported. Two constant, equal samples give `0 / 0 = NaN`.
pub fn effect_size<T>(sample1: &[T], sample2: &[T]) -> EffectSize
where
    T: FloatOps,
{
    EffectSize::new(cohens_d(sample1, sample2))
}

/// Absolute Cohen's d between two samples.
pub fn cohens_d<T>(sample1: &[T], sample2: &[T]) -> f64
where
    T: FloatOps,
{
    let mean1 = mean(sample1).to_f64().unwrap_or(f64::NAN);
    let mean2 = mean(sample2).to_f64().unwrap_or(f64::NAN);
    let sd1 = standard_deviation(sample1).to_f64().unwrap_or(f64::NAN);
    let sd2 = standard_deviation(sample2).to_f64().unwrap_or(f64::NAN);

    let n1 = sample1.len() as f64;
    let n2 = sample2.len() as f64;

    let pooled_sd =
        (((n1 - 1.0) * sd1 * sd1 + (n2 - 1.0) * sd2 * sd2) / (n1 + n2 - 2.0)).sqrt();

    (mean1 - mean2).abs() / pooled_sd
}
