//! WHO Child Growth Standards.
//!
//! Reference tables come in two shapes: LMS rows ([`LmsStandard`]), from which an exact z-score
//! can be computed for any measurement, and SD-band rows ([`SdBandStandard`]) listing the
//! measurement at each whole standard deviation. Tables are plain values owned by the caller and
//! collected in a [`WhoStandardsTable`]; this crate never loads or caches them itself.

use crate::descriptive::normal_cdf;
use std::fmt;

mod lms;
mod sd_bands;
mod table;

pub use lms::{LmsStandard, nearest_standard, who_z_score};
pub use sd_bands::{SdBandStandard, sd_band_z_score};
pub use table::WhoStandardsTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("male"),
            Sex::Female => f.write_str("female"),
        }
    }
}

/// Percentile (0-100) corresponding to a z-score.
pub fn percentile(z_score: f64) -> f64 {
    normal_cdf(z_score) * 100.0
}
