//! Intervention impact: compares growth before, during and after an intervention window.

use crate::growth::{Measurement, Metric, growth_velocity, metric_values};
use crate::testing::effect::effect_size;
use crate::testing::inference::t_test;
use crate::testing::{EffectSize, TTestResult};
use crate::who::{Sex, WhoStandardsTable};
use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InterventionKind {
    Nutrition,
    Deworming,
    VitaminSupplementation,
    Immunization,
    DietaryCounseling,
    Other,
}

impl fmt::Display for InterventionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterventionKind::Nutrition => "nutrition",
            InterventionKind::Deworming => "deworming",
            InterventionKind::VitaminSupplementation => "vitamin_supplementation",
            InterventionKind::Immunization => "immunization",
            InterventionKind::DietaryCounseling => "dietary_counseling",
            InterventionKind::Other => "other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterventionStatus {
    Ongoing,
    Completed,
    Discontinued,
}

/// An intervention applied to a child over an inclusive date window.
#[derive(Debug, Clone, PartialEq)]
pub struct Intervention {
    pub id: String,
    pub kind: InterventionKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: InterventionStatus,
}

impl Intervention {
    pub fn new(
        id: impl Into<String>,
        kind: InterventionKind,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Intervention {
            id: id.into(),
            kind,
            start_date,
            end_date,
            status: InterventionStatus::Ongoing,
        }
    }

    pub fn with_status(mut self, status: InterventionStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether `date` falls inside the window, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A value for each of the three periods around an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Periods<T> {
    pub pre: T,
    pub during: T,
    pub post: T,
}

impl<T> Periods<T> {
    pub fn map<U, F>(&self, mut f: F) -> Periods<U>
    where
        F: FnMut(&T) -> U,
    {
        Periods {
            pre: f(&self.pre),
            during: f(&self.during),
            post: f(&self.post),
        }
    }
}

/// Split measurements into those taken before, during and after the intervention window.
///
/// Input order is preserved within each period.
pub fn split_periods(
    measurements: &[Measurement],
    intervention: &Intervention,
) -> Periods<Vec<Measurement>> {
    let mut periods: Periods<Vec<Measurement>> = Periods::default();
    for m in measurements {
        if m.date < intervention.start_date {
            periods.pre.push(*m);
        } else if m.date > intervention.end_date {
            periods.post.push(*m);
        } else {
            periods.during.push(*m);
        }
    }
    periods
}

/// Summary of how a child's growth changed around an intervention.
#[derive(Debug, Clone, PartialEq)]
pub struct InterventionImpact {
    pub intervention_id: String,
    /// cm/month in each period
    pub height_velocity: Periods<f64>,
    /// kg/month in each period
    pub weight_velocity: Periods<f64>,
    /// Pre vs. during heights
    pub height_test: TTestResult,
    /// Pre vs. during weights
    pub weight_test: TTestResult,
    pub height_effect: EffectSize,
    pub weight_effect: EffectSize,
    /// Height-for-age z at the last measurement of each period, when a reference was given
    pub height_for_age_z: Option<Periods<Option<f64>>>,
    /// Weight-for-age z at the last measurement of each period, when a reference was given
    pub weight_for_age_z: Option<Periods<Option<f64>>>,
}

impl InterventionImpact {
    /// Assess an intervention against a child's measurement history.
    ///
    /// Periods with fewer than two measurements report a velocity of 0; the t-tests and effect
    /// sizes follow the usual NaN propagation for small samples. With a WHO reference, z-scores
    /// are taken at the last measurement of each non-empty period.
    ///
    /// # Errors
    ///
    /// Fails when a reference is given but lacks the LMS table for the child's sex and a metric.
    pub fn assess(
        intervention: &Intervention,
        measurements: &[Measurement],
        reference: Option<(&WhoStandardsTable, Sex)>,
    ) -> anyhow::Result<Self> {
        let periods = split_periods(measurements, intervention);
        debug!(
            intervention = %intervention.id,
            pre = periods.pre.len(),
            during = periods.during.len(),
            post = periods.post.len(),
            "assessing intervention impact"
        );

        let height_velocity = periods.map(|p| growth_velocity(p, Metric::Height));
        let weight_velocity = periods.map(|p| growth_velocity(p, Metric::Weight));

        let pre_heights = metric_values(&periods.pre, Metric::Height);
        let during_heights = metric_values(&periods.during, Metric::Height);
        let pre_weights = metric_values(&periods.pre, Metric::Weight);
        let during_weights = metric_values(&periods.during, Metric::Weight);

        let (height_for_age_z, weight_for_age_z) = match reference {
            Some((table, sex)) => (
                Some(period_z_scores(&periods, table, sex, Metric::Height)?),
                Some(period_z_scores(&periods, table, sex, Metric::Weight)?),
            ),
            None => (None, None),
        };

        Ok(InterventionImpact {
            intervention_id: intervention.id.clone(),
            height_velocity,
            weight_velocity,
            height_test: t_test(&pre_heights, &during_heights),
            weight_test: t_test(&pre_weights, &during_weights),
            height_effect: effect_size(&pre_heights, &during_heights),
            weight_effect: effect_size(&pre_weights, &during_weights),
            height_for_age_z,
            weight_for_age_z,
        })
    }
}

fn period_z_scores(
    periods: &Periods<Vec<Measurement>>,
    table: &WhoStandardsTable,
    sex: Sex,
    metric: Metric,
) -> anyhow::Result<Periods<Option<f64>>> {
    let z_at_end = |period: &Vec<Measurement>| -> anyhow::Result<Option<f64>> {
        period
            .last()
            .map(|m| table.z_score(sex, metric, m))
            .transpose()
    };

    Ok(Periods {
        pre: z_at_end(&periods.pre)?,
        during: z_at_end(&periods.during)?,
        post: z_at_end(&periods.post)?,
    })
}
