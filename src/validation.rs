//! Range checks applied to scenario parameters when a scenario is built.
//!
//! Every check returns the accepted value so that the builder can validate and convert a field in a
//! single expression. A rejected value becomes [`ScenarioError::InvalidParameter`] carrying the
//! serialized name of the field, the offending value and the constraint it violated.

use crate::error::ScenarioError;

pub const POSITIVE: &str = "> 0";
pub const NON_NEGATIVE: &str = ">= 0";
pub const PROBABILITY: &str = "in [0, 1]";
pub const FINITE: &str = "finite";
pub const SCHEDULE_LENGTH: &str = "length equal to T";
pub const HORIZON_RANGE: &str = "in 1..=100000";

/// Longest accepted time horizon in days. The schedule is materialized per day, so an unbounded
/// horizon would be an unbounded allocation.
pub const MAX_HORIZON: usize = 100_000;

/// Rejects NaN and infinities.
pub fn check_finite(name: &'static str, value: f64) -> Result<f64, ScenarioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScenarioError::invalid_parameter(name, value, FINITE))
    }
}

/// Accepts finite rates strictly greater than zero.
pub fn check_positive(name: &'static str, value: f64) -> Result<f64, ScenarioError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ScenarioError::invalid_parameter(name, value, POSITIVE))
    }
}

pub fn check_non_negative(name: &'static str, value: f64) -> Result<f64, ScenarioError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ScenarioError::invalid_parameter(name, value, NON_NEGATIVE))
    }
}

/// Accepts values in the closed unit interval.
pub fn check_probability(name: &'static str, value: f64) -> Result<f64, ScenarioError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ScenarioError::invalid_parameter(name, value, PROBABILITY))
    }
}

/// Integer counts of days or doses. Accepted as signed so negative input is reported as a range
/// violation rather than a parse failure.
pub fn check_count(name: &'static str, value: i64) -> Result<u64, ScenarioError> {
    u64::try_from(value).map_err(|_| ScenarioError::invalid_parameter(name, value, NON_NEGATIVE))
}

/// The time horizon `T`, in `1..=MAX_HORIZON` days.
pub fn check_horizon(name: &'static str, value: i64) -> Result<usize, ScenarioError> {
    match usize::try_from(value) {
        Ok(days) if (1..=MAX_HORIZON).contains(&days) => Ok(days),
        _ => Err(ScenarioError::invalid_parameter(name, value, HORIZON_RANGE)),
    }
}
