//! Cohort-level analysis across many children.
//!
//! Per-child work (velocities, outlier checks) is independent and runs on the rayon thread
//! pool; results are collected back in input order, so every function here is deterministic.
//!
//! Functions accept any slice of owned or borrowed records, so filters chain:
//! `filter_outliers(&filter_by_age_range(&children, 12.0, 24.0), ..)`.

use crate::descriptive::{mean, median, standard_deviation};
use crate::growth::intervention::InterventionKind;
use crate::growth::{Measurement, Metric, age_based_velocity};
use crate::testing::AnovaResult;
use crate::testing::inference::one_way_anova;
use crate::testing::utils::{extract_unique_groups, group_values};
use crate::who::Sex;
use rayon::prelude::*;
use std::borrow::Borrow;
use tracing::debug;

/// Children further than this many standard deviations from the pooled mean are outliers.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 2.0;

/// A child and their measurement history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildRecord {
    pub id: String,
    pub sex: Sex,
    /// Every intervention the child received; empty for the control group
    pub interventions: Vec<InterventionKind>,
    /// Measurements ordered by date
    pub measurements: Vec<Measurement>,
}

impl ChildRecord {
    pub fn new(id: impl Into<String>, sex: Sex, measurements: Vec<Measurement>) -> Self {
        ChildRecord {
            id: id.into(),
            sex,
            interventions: Vec::new(),
            measurements,
        }
    }

    pub fn with_intervention(mut self, kind: InterventionKind) -> Self {
        self.interventions.push(kind);
        self
    }

    pub fn received(&self, kind: InterventionKind) -> bool {
        self.interventions.contains(&kind)
    }

    pub fn is_control(&self) -> bool {
        self.interventions.is_empty()
    }

    /// Cohort labels this child belongs to: each distinct intervention, or `None` for control.
    pub fn cohorts(&self) -> Vec<Option<InterventionKind>> {
        if self.is_control() {
            return vec![None];
        }
        extract_unique_groups(&self.interventions)
            .into_iter()
            .map(Some)
            .collect()
    }
}

fn record<C: Borrow<ChildRecord>>(child: &C) -> &ChildRecord {
    Borrow::<ChildRecord>::borrow(child)
}

/// Summary of one metric pooled over every measurement of a set of children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopulationSummary {
    pub mean: f64,
    /// Upper-middle value of the sorted measurements
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Number of children, not measurements
    pub count: usize,
}

fn pooled_values<C: Borrow<ChildRecord>>(children: &[C], metric: Metric) -> Vec<f64> {
    children
        .iter()
        .flat_map(|c| record(c).measurements.iter().map(move |m| m.value(metric)))
        .collect()
}

/// Pool every measurement of `children` and summarise the chosen metric.
///
/// An empty cohort summarises to all zeros. Children without any measurement are counted but
/// contribute no values; if no values remain at all the statistics are zero as well.
pub fn population_summary<C: Borrow<ChildRecord>>(
    children: &[C],
    metric: Metric,
) -> PopulationSummary {
    let values = pooled_values(children, metric);
    if values.is_empty() {
        return PopulationSummary {
            count: children.len(),
            ..PopulationSummary::default()
        };
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    PopulationSummary {
        mean: mean(&values),
        median: median(&values),
        min,
        max,
        count: children.len(),
    }
}

/// Children that received `kind`, in input order.
pub fn filter_by_intervention<C: Borrow<ChildRecord>>(
    children: &[C],
    kind: InterventionKind,
) -> Vec<&ChildRecord> {
    children
        .iter()
        .map(record)
        .filter(|child| child.received(kind))
        .collect()
}

/// Children in the control group (no interventions), in input order.
pub fn control_group<C: Borrow<ChildRecord>>(children: &[C]) -> Vec<&ChildRecord> {
    children
        .iter()
        .map(record)
        .filter(|child| child.is_control())
        .collect()
}

/// Children whose latest measurement age lies in `[min_age, max_age]` months, both ends
/// included. Children without measurements are dropped.
pub fn filter_by_age_range<C: Borrow<ChildRecord>>(
    children: &[C],
    min_age: f64,
    max_age: f64,
) -> Vec<&ChildRecord> {
    children
        .iter()
        .map(record)
        .filter(|child| {
            child
                .measurements
                .last()
                .is_some_and(|m| m.age >= min_age && m.age <= max_age)
        })
        .collect()
}

/// Keep the children whose every measurement lies within `threshold` population standard
/// deviations of the pooled mean.
pub fn filter_outliers<C>(children: &[C], metric: Metric, threshold: f64) -> Vec<&ChildRecord>
where
    C: Borrow<ChildRecord> + Sync,
{
    let values = pooled_values(children, metric);
    let pooled_mean = mean(&values);
    let pooled_sd = standard_deviation(&values);
    let limit = threshold * pooled_sd;

    let kept: Vec<&ChildRecord> = children
        .par_iter()
        .map(record)
        .filter(|child| {
            child
                .measurements
                .iter()
                .all(|m| (m.value(metric) - pooled_mean).abs() <= limit)
        })
        .collect();

    debug!(
        total = children.len(),
        kept = kept.len(),
        threshold,
        "filtered population outliers"
    );
    kept
}

/// Age-based growth velocity of every child, in input order.
///
/// A child with a single visit has no interval and reports NaN.
pub fn child_velocities<C>(children: &[C], metric: Metric) -> Vec<f64>
where
    C: Borrow<ChildRecord> + Sync,
{
    children
        .par_iter()
        .map(|child| age_based_velocity(&record(child).measurements, metric))
        .collect()
}

/// Mean age-based velocity of a cohort; 0 for an empty cohort.
///
/// Any child with fewer than two visits makes the mean NaN.
pub fn cohort_velocity<C>(children: &[C], metric: Metric) -> f64
where
    C: Borrow<ChildRecord> + Sync,
{
    if children.is_empty() {
        return 0.0;
    }
    mean(&child_velocities(children, metric))
}

/// Mean value at each measurement index (first visit, second visit, ...).
///
/// Each index averages over the children that have a measurement at that position, so the
/// trajectory is as long as the longest history. The dashboard chart instead divides every
/// index by the whole cohort size, which understates later visits when histories differ.
pub fn mean_trajectory<C: Borrow<ChildRecord>>(children: &[C], metric: Metric) -> Vec<f64> {
    let longest = children
        .iter()
        .map(|c| record(c).measurements.len())
        .max()
        .unwrap_or(0);

    (0..longest)
        .map(|i| {
            let at_visit: Vec<f64> = children
                .iter()
                .filter_map(|c| record(c).measurements.get(i).map(|m| m.value(metric)))
                .collect();
            mean(&at_visit)
        })
        .collect()
}

/// Result of comparing growth velocities across intervention cohorts.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortComparison {
    /// Cohort labels in the order of `velocities`; `None` is the control group
    pub groups: Vec<Option<InterventionKind>>,
    /// Per-child velocities of each cohort
    pub velocities: Vec<Vec<f64>>,
    pub anova: AnovaResult,
}

/// One-way ANOVA of age-based velocities across intervention cohorts.
///
/// A child belongs to every cohort of an intervention it received, so its velocity can appear in
/// several groups; children with no interventions form the control group (`None`), which sorts
/// first.
pub fn compare_cohorts<C>(children: &[C], metric: Metric) -> CohortComparison
where
    C: Borrow<ChildRecord> + Sync,
{
    let velocities = child_velocities(children, metric);

    let (labels, memberships): (Vec<Option<InterventionKind>>, Vec<f64>) = children
        .iter()
        .zip(&velocities)
        .flat_map(|(c, &v)| record(c).cohorts().into_iter().map(move |label| (label, v)))
        .unzip();

    let groups = extract_unique_groups(&labels);
    let grouped = group_values(&memberships, &labels, &groups);
    let anova = one_way_anova(&grouped);

    debug!(
        cohorts = groups.len(),
        memberships = memberships.len(),
        f_value = anova.f_value,
        p_value = anova.p_value,
        "compared intervention cohorts"
    );

    CohortComparison {
        groups,
        velocities: grouped,
        anova,
    }
}
