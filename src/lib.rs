//! # growth-statistics
//!
//! Statistical core for child growth monitoring dashboards.
//!
//! This crate computes the numbers a growth dashboard plots and reports: growth velocity and
//! acceleration from dated measurements, seasonal growth patterns, WHO LMS z-scores and
//! percentiles, catch-up growth indices, and the inferential statistics used to judge whether an
//! intervention changed a child's trajectory (two-sample t-tests, Cohen's d, one-way and
//! repeated-measures ANOVA).
//!
//! Every function is a pure mapping from plain inputs to a result value. Ill-conditioned inputs
//! (empty samples, zero variance, zero degrees of freedom) propagate as NaN or infinity instead of
//! raising errors; only structural problems such as a missing WHO lookup table return an
//! [`anyhow::Error`].
//!
//! ## Module Organization
//!
//! - **[`descriptive`]**: Mean, variance, standard deviation, z-score and normal CDF
//! - **[`testing`]**: t-tests, effect sizes and ANOVA
//! - **[`growth`]**: Velocity, acceleration, seasonal effects, catch-up index and intervention impact
//! - **[`who`]**: WHO growth standards (LMS and SD-band tables) and z-score/percentile conversion
//! - **[`population`]**: Cohort summaries, outlier filtering and cohort comparisons

pub mod descriptive;
pub mod growth;
pub mod population;
pub mod testing;
pub mod who;
