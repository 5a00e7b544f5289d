//! The daily vaccine availability schedule `b`.
//!
//! Entry `d` is the vaccine supply on day `d` as a proportion of the day-one supply `B_0`, for
//! days `0..T`. A scenario that leaves the schedule absent or empty gets `T` entries of `1.0`.
//! That default is materialized when the scenario is built, so every consumer sees a schedule
//! with exactly `T` entries.

use crate::error::ScenarioError;
use crate::log::{debug, trace};
use crate::validation::{check_probability, PROBABILITY, SCHEDULE_LENGTH};
use serde::Serialize;

/// Serialized name of the schedule field.
pub const SCHEDULE_FIELD: &str = "b";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VaccineSchedule(Vec<f64>);

impl VaccineSchedule {
    /// Full availability on every day of the horizon.
    #[must_use]
    pub fn uniform(horizon: usize) -> Self {
        VaccineSchedule(vec![1.0; horizon])
    }

    /// Expands an absent or empty schedule to `horizon` ones, or validates a supplied one.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidParameter`] if a supplied schedule does not have exactly
    /// `horizon` entries or if an entry lies outside `[0, 1]`.
    pub fn resolve(proportions: Option<Vec<f64>>, horizon: usize) -> Result<Self, ScenarioError> {
        let proportions = match proportions {
            Some(proportions) if !proportions.is_empty() => proportions,
            _ => {
                debug!("No vaccine schedule given; using full availability for {horizon} days");
                return Ok(Self::uniform(horizon));
            }
        };

        if proportions.len() != horizon {
            return Err(ScenarioError::invalid_parameter(
                SCHEDULE_FIELD,
                format!("of length {}", proportions.len()),
                SCHEDULE_LENGTH,
            ));
        }
        for (day, proportion) in proportions.iter().enumerate() {
            check_probability(SCHEDULE_FIELD, *proportion).map_err(|_| {
                ScenarioError::invalid_parameter(
                    SCHEDULE_FIELD,
                    format!("{proportion} on day {day}"),
                    PROBABILITY,
                )
            })?;
        }
        trace!("Accepted vaccine schedule of {horizon} days");
        Ok(VaccineSchedule(proportions))
    }

    /// Number of days covered; equal to `T`, never zero.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The availability proportion on `day`, or `None` past the horizon.
    #[must_use]
    pub fn proportion(&self, day: usize) -> Option<f64> {
        self.0.get(day).copied()
    }

    /// Doses available on `day` given the day-one supply.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn doses_available(&self, day: usize, initial_supply: u64) -> Option<f64> {
        self.proportion(day)
            .map(|proportion| proportion * initial_supply as f64)
    }

    /// Doses available over the whole horizon.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_doses(&self, initial_supply: u64) -> f64 {
        self.0.iter().sum::<f64>() * initial_supply as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn absent_schedule_defaults_to_ones() {
        let schedule = VaccineSchedule::resolve(None, 180).unwrap();
        assert_eq!(schedule.len(), 180);
        assert!(schedule.iter().all(|proportion| proportion == 1.0));
    }

    #[test]
    fn empty_schedule_defaults_to_ones() {
        let schedule = VaccineSchedule::resolve(Some(vec![]), 1).unwrap();
        assert_eq!(schedule.as_slice(), &[1.0]);
    }

    #[test]
    fn supplied_schedule_is_kept() {
        let schedule = VaccineSchedule::resolve(Some(vec![1.0, 0.5, 0.25]), 3).unwrap();
        assert_eq!(schedule.as_slice(), &[1.0, 0.5, 0.25]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let error = VaccineSchedule::resolve(Some(vec![1.0, 1.0]), 3).unwrap_err();
        match error {
            ScenarioError::InvalidParameter {
                name,
                value,
                constraint,
            } => {
                assert_eq!(name, "b");
                assert_eq!(value, "of length 2");
                assert_eq!(constraint, SCHEDULE_LENGTH);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_entry_names_the_day() {
        let error = VaccineSchedule::resolve(Some(vec![1.0, 1.2]), 2).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter b: value 1.2 on day 1 violates constraint in [0, 1]"
        );
    }

    #[test]
    fn doses_scale_with_initial_supply() {
        let schedule = VaccineSchedule::resolve(Some(vec![1.0, 0.5]), 2).unwrap();
        assert_relative_eq!(schedule.doses_available(0, 1750).unwrap(), 1750.0);
        assert_relative_eq!(schedule.doses_available(1, 1750).unwrap(), 875.0);
        assert_eq!(schedule.doses_available(2, 1750), None);
        assert_relative_eq!(schedule.total_doses(1750), 2625.0);
    }

    #[test]
    fn serializes_as_plain_array() {
        let schedule = VaccineSchedule::uniform(2);
        assert_eq!(serde_json::to_string(&schedule).unwrap(), "[1.0,1.0]");
    }
}
