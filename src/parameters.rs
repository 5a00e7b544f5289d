//! Scenario parameters for an SEIR model with vaccination and variant dynamics.
//!
//! A scenario is described by [`ScenarioParameters`], an immutable record that can only be
//! obtained through [`ScenarioBuilder::build`] (directly, from a preset, or by deserializing it).
//! Building validates every field and materializes the default vaccine schedule, so holders of a
//! `ScenarioParameters` never need to re-check anything.
//!
//! Field names in serialized form match the names used in the model formulation:
//!
//! | Key       | Meaning                                                         | Default |
//! |-----------|-----------------------------------------------------------------|---------|
//! | `r_I`     | rate out of exposed (E) into infectious (I)                     | 1/5     |
//! | `r_0`     | rate out of infectious without testing                          | 1/3.5   |
//! | `r_R`     | rate out of hospitalized (H) into recovery or death             | 1/15    |
//! | `p_V_H`   | P(hospitalized \| infected and vaccinated)                      | 0.02    |
//! | `p_H`     | P(hospitalized \| infected)                                     | 0.2     |
//! | `p_D`     | P(dead \| hospitalized)                                         | 0.1     |
//! | `a_0`     | initial infection rate (proportion/day)                         | 0.6     |
//! | `delta_a` | change in infection rate for a new variant (proportion/day)     | 0.6     |
//! | `p_e`     | transmission rate from a vaccinated person, relative            | 0.6     |
//! | `p_r`     | infection rate for a vaccinated person, relative                | 0.6     |
//! | `L`       | days for a variant to reach another area                        | 20      |
//! | `T_D`     | days for a variant to dominate an area                          | 45      |
//! | `p`       | proportion of infected people carrying the new variant on entry | 0.01    |
//! | `T`       | time horizon in days                                            | 180     |
//! | `B_0`     | vaccine doses available on day 1                                | 1750    |
//! | `b`       | daily availability as a proportion of `B_0`, days `0..T`        | all 1   |

use crate::error::ScenarioError;
use crate::log::trace;
use crate::schedule::VaccineSchedule;
use crate::validation::{
    check_count, check_finite, check_horizon, check_non_negative, check_positive,
    check_probability,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated, immutable scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioBuilder")]
pub struct ScenarioParameters {
    #[serde(rename = "r_I")]
    r_i: f64,
    r_0: f64,
    #[serde(rename = "r_R")]
    r_r: f64,
    #[serde(rename = "p_V_H")]
    p_v_h: f64,
    #[serde(rename = "p_H")]
    p_h: f64,
    #[serde(rename = "p_D")]
    p_d: f64,
    a_0: f64,
    delta_a: f64,
    p_e: f64,
    p_r: f64,
    #[serde(rename = "L")]
    variant_lag: u64,
    #[serde(rename = "T_D")]
    variant_dominance: u64,
    #[serde(rename = "p")]
    variant_proportion: f64,
    #[serde(rename = "T")]
    horizon: usize,
    #[serde(rename = "B_0")]
    initial_vaccine_supply: u64,
    #[serde(rename = "b")]
    vaccine_availability: VaccineSchedule,
}

impl ScenarioParameters {
    /// A builder populated with the default scenario.
    #[must_use]
    pub fn builder() -> ScenarioBuilder {
        ScenarioBuilder::default()
    }

    /// A builder holding this scenario's values, for deriving a variation of it.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_builder(&self) -> ScenarioBuilder {
        ScenarioBuilder {
            r_i: self.r_i,
            r_0: self.r_0,
            r_r: self.r_r,
            p_v_h: self.p_v_h,
            p_h: self.p_h,
            p_d: self.p_d,
            a_0: self.a_0,
            delta_a: self.delta_a,
            p_e: self.p_e,
            p_r: self.p_r,
            variant_lag: self.variant_lag as i64,
            variant_dominance: self.variant_dominance as i64,
            variant_proportion: self.variant_proportion,
            horizon: self.horizon as i64,
            initial_vaccine_supply: self.initial_vaccine_supply as i64,
            vaccine_availability: Some(self.vaccine_availability.as_slice().to_vec()),
        }
    }

    /// Rate out of the exposed state into the infectious state (`r_I`).
    #[must_use]
    pub fn r_i(&self) -> f64 {
        self.r_i
    }

    /// Rate out of the infectious state without testing (`r_0`).
    #[must_use]
    pub fn r_0(&self) -> f64 {
        self.r_0
    }

    /// Rate out of the hospitalized state into recovery or death (`r_R`).
    #[must_use]
    pub fn r_r(&self) -> f64 {
        self.r_r
    }

    #[must_use]
    pub fn p_v_h(&self) -> f64 {
        self.p_v_h
    }

    #[must_use]
    pub fn p_h(&self) -> f64 {
        self.p_h
    }

    #[must_use]
    pub fn p_d(&self) -> f64 {
        self.p_d
    }

    #[must_use]
    pub fn a_0(&self) -> f64 {
        self.a_0
    }

    #[must_use]
    pub fn delta_a(&self) -> f64 {
        self.delta_a
    }

    #[must_use]
    pub fn p_e(&self) -> f64 {
        self.p_e
    }

    #[must_use]
    pub fn p_r(&self) -> f64 {
        self.p_r
    }

    /// Days for a variant to reach another area (`L`).
    #[must_use]
    pub fn variant_lag(&self) -> u64 {
        self.variant_lag
    }

    /// Days for a variant to dominate an area (`T_D`).
    #[must_use]
    pub fn variant_dominance(&self) -> u64 {
        self.variant_dominance
    }

    /// Proportion of infected people carrying the new variant when it is introduced (`p`).
    #[must_use]
    pub fn variant_proportion(&self) -> f64 {
        self.variant_proportion
    }

    /// Time horizon in days (`T`).
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Vaccine doses available on day 1 (`B_0`).
    #[must_use]
    pub fn initial_vaccine_supply(&self) -> u64 {
        self.initial_vaccine_supply
    }

    /// The effective schedule `b`; always `T` entries long.
    #[must_use]
    pub fn vaccine_availability(&self) -> &VaccineSchedule {
        &self.vaccine_availability
    }

    #[must_use]
    pub fn mean_incubation_period(&self) -> f64 {
        1.0 / self.r_i
    }

    #[must_use]
    pub fn mean_infectious_period(&self) -> f64 {
        1.0 / self.r_0
    }

    #[must_use]
    pub fn mean_hospital_stay(&self) -> f64 {
        1.0 / self.r_r
    }

    /// Infection rate once the new variant has taken over (`a_0 + delta_a`).
    #[must_use]
    pub fn variant_infection_rate(&self) -> f64 {
        self.a_0 + self.delta_a
    }

    /// Doses available on `day` (`B_0 * b[day]`), or `None` past the horizon.
    #[must_use]
    pub fn doses_available(&self, day: usize) -> Option<f64> {
        self.vaccine_availability
            .doses_available(day, self.initial_vaccine_supply)
    }
}

impl TryFrom<ScenarioBuilder> for ScenarioParameters {
    type Error = ScenarioError;

    fn try_from(builder: ScenarioBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// The recognized scenario options with their defaults.
///
/// Deserializing a builder from a JSON object fills missing keys with defaults and rejects
/// unrecognized keys. Integer options are signed so that negative values reach validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioBuilder {
    #[serde(rename = "r_I")]
    r_i: f64,
    r_0: f64,
    #[serde(rename = "r_R")]
    r_r: f64,
    #[serde(rename = "p_V_H")]
    p_v_h: f64,
    #[serde(rename = "p_H")]
    p_h: f64,
    #[serde(rename = "p_D")]
    p_d: f64,
    a_0: f64,
    delta_a: f64,
    p_e: f64,
    p_r: f64,
    #[serde(rename = "L")]
    variant_lag: i64,
    #[serde(rename = "T_D")]
    variant_dominance: i64,
    #[serde(rename = "p")]
    variant_proportion: f64,
    #[serde(rename = "T")]
    horizon: i64,
    #[serde(rename = "B_0")]
    initial_vaccine_supply: i64,
    #[serde(rename = "b", skip_serializing_if = "Option::is_none")]
    vaccine_availability: Option<Vec<f64>>,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        ScenarioBuilder {
            r_i: 1.0 / 5.0,
            r_0: 1.0 / 3.5,
            r_r: 1.0 / 15.0,
            p_v_h: 0.02,
            p_h: 0.2,
            p_d: 0.1,
            a_0: 0.6,
            delta_a: 0.6,
            p_e: 0.6,
            p_r: 0.6,
            variant_lag: 20,
            variant_dominance: 45,
            variant_proportion: 0.01,
            horizon: 180,
            initial_vaccine_supply: 1750,
            vaccine_availability: None,
        }
    }
}

impl ScenarioBuilder {
    #[must_use]
    pub fn r_i(mut self, value: f64) -> Self {
        self.r_i = value;
        self
    }

    #[must_use]
    pub fn r_0(mut self, value: f64) -> Self {
        self.r_0 = value;
        self
    }

    #[must_use]
    pub fn r_r(mut self, value: f64) -> Self {
        self.r_r = value;
        self
    }

    #[must_use]
    pub fn p_v_h(mut self, value: f64) -> Self {
        self.p_v_h = value;
        self
    }

    #[must_use]
    pub fn p_h(mut self, value: f64) -> Self {
        self.p_h = value;
        self
    }

    #[must_use]
    pub fn p_d(mut self, value: f64) -> Self {
        self.p_d = value;
        self
    }

    #[must_use]
    pub fn a_0(mut self, value: f64) -> Self {
        self.a_0 = value;
        self
    }

    #[must_use]
    pub fn delta_a(mut self, value: f64) -> Self {
        self.delta_a = value;
        self
    }

    #[must_use]
    pub fn p_e(mut self, value: f64) -> Self {
        self.p_e = value;
        self
    }

    #[must_use]
    pub fn p_r(mut self, value: f64) -> Self {
        self.p_r = value;
        self
    }

    #[must_use]
    pub fn variant_lag(mut self, days: i64) -> Self {
        self.variant_lag = days;
        self
    }

    #[must_use]
    pub fn variant_dominance(mut self, days: i64) -> Self {
        self.variant_dominance = days;
        self
    }

    #[must_use]
    pub fn variant_proportion(mut self, value: f64) -> Self {
        self.variant_proportion = value;
        self
    }

    /// Sets `T`. A schedule set earlier must still match the new horizon when building.
    #[must_use]
    pub fn horizon(mut self, days: i64) -> Self {
        self.horizon = days;
        self
    }

    #[must_use]
    pub fn initial_vaccine_supply(mut self, doses: i64) -> Self {
        self.initial_vaccine_supply = doses;
        self
    }

    /// Sets `b`. An empty vector means full availability on every day.
    #[must_use]
    pub fn vaccine_availability(mut self, proportions: Vec<f64>) -> Self {
        self.vaccine_availability = Some(proportions);
        self
    }

    /// Drops any schedule so that the default one is materialized on build.
    #[must_use]
    pub fn default_vaccine_availability(mut self) -> Self {
        self.vaccine_availability = None;
        self
    }

    /// Replaces the options named in `overrides`, a JSON object keyed by the serialized field
    /// names. Options not named keep their current values. A `null` or empty `b` restores the
    /// default schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if `overrides` is not an object, names an unknown option, or holds a
    /// value of the wrong type.
    pub fn with_overrides(self, overrides: &Value) -> Result<Self, ScenarioError> {
        let Value::Object(overrides) = overrides else {
            return Err(format!("scenario overrides must be a JSON object, found {overrides}").into());
        };
        let Value::Object(mut merged) = serde_json::to_value(&self)? else {
            return Err("scenario builder did not serialize to a JSON object".into());
        };
        for (key, value) in overrides {
            trace!("Overriding scenario option {key} with {value}");
            merged.insert(key.clone(), value.clone());
        }
        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// Validates every option in table order and materializes the vaccine schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::InvalidParameter`] for the first option outside its range.
    pub fn build(self) -> Result<ScenarioParameters, ScenarioError> {
        let horizon = check_horizon("T", self.horizon)?;
        let parameters = ScenarioParameters {
            r_i: check_positive("r_I", self.r_i)?,
            r_0: check_positive("r_0", self.r_0)?,
            r_r: check_positive("r_R", self.r_r)?,
            p_v_h: check_probability("p_V_H", self.p_v_h)?,
            p_h: check_probability("p_H", self.p_h)?,
            p_d: check_probability("p_D", self.p_d)?,
            a_0: check_non_negative("a_0", self.a_0)?,
            delta_a: check_finite("delta_a", self.delta_a)?,
            p_e: check_probability("p_e", self.p_e)?,
            p_r: check_probability("p_r", self.p_r)?,
            variant_lag: check_count("L", self.variant_lag)?,
            variant_dominance: check_count("T_D", self.variant_dominance)?,
            variant_proportion: check_probability("p", self.variant_proportion)?,
            horizon,
            initial_vaccine_supply: check_count("B_0", self.initial_vaccine_supply)?,
            vaccine_availability: VaccineSchedule::resolve(self.vaccine_availability, horizon)?,
        };
        trace!("Built scenario with a horizon of {horizon} days");
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn invalid_name(error: ScenarioError) -> &'static str {
        match error {
            ScenarioError::InvalidParameter { name, .. } => name,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn defaults_build() {
        let parameters = ScenarioParameters::builder().build().unwrap();
        assert_relative_eq!(parameters.r_i(), 0.2);
        assert_relative_eq!(parameters.r_0(), 1.0 / 3.5);
        assert_relative_eq!(parameters.r_r(), 1.0 / 15.0);
        assert_relative_eq!(parameters.p_v_h(), 0.02);
        assert_relative_eq!(parameters.p_h(), 0.2);
        assert_relative_eq!(parameters.p_d(), 0.1);
        assert_relative_eq!(parameters.a_0(), 0.6);
        assert_relative_eq!(parameters.delta_a(), 0.6);
        assert_relative_eq!(parameters.p_e(), 0.6);
        assert_relative_eq!(parameters.p_r(), 0.6);
        assert_eq!(parameters.variant_lag(), 20);
        assert_eq!(parameters.variant_dominance(), 45);
        assert_relative_eq!(parameters.variant_proportion(), 0.01);
        assert_eq!(parameters.horizon(), 180);
        assert_eq!(parameters.initial_vaccine_supply(), 1750);
        assert_eq!(parameters.vaccine_availability().len(), 180);
    }

    #[test]
    fn derived_quantities() {
        let parameters = ScenarioParameters::builder().build().unwrap();
        assert_relative_eq!(parameters.mean_incubation_period(), 5.0);
        assert_relative_eq!(parameters.mean_infectious_period(), 3.5);
        assert_relative_eq!(parameters.mean_hospital_stay(), 15.0);
        assert_relative_eq!(parameters.variant_infection_rate(), 1.2);
        assert_relative_eq!(parameters.doses_available(0).unwrap(), 1750.0);
        assert_eq!(parameters.doses_available(180), None);
    }

    #[test]
    fn probabilities_outside_unit_interval_are_rejected() {
        let cases: [(ScenarioBuilder, &str); 6] = [
            (ScenarioParameters::builder().p_v_h(1.1), "p_V_H"),
            (ScenarioParameters::builder().p_h(-0.2), "p_H"),
            (ScenarioParameters::builder().p_d(2.0), "p_D"),
            (ScenarioParameters::builder().p_e(-1.0), "p_e"),
            (ScenarioParameters::builder().p_r(1.5), "p_r"),
            (ScenarioParameters::builder().variant_proportion(1.01), "p"),
        ];
        for (builder, expected) in cases {
            assert_eq!(invalid_name(builder.build().unwrap_err()), expected);
        }
    }

    #[test]
    fn rates_must_be_positive() {
        assert_eq!(
            invalid_name(ScenarioParameters::builder().r_i(0.0).build().unwrap_err()),
            "r_I"
        );
        assert_eq!(
            invalid_name(ScenarioParameters::builder().r_0(-0.5).build().unwrap_err()),
            "r_0"
        );
        assert_eq!(
            invalid_name(
                ScenarioParameters::builder()
                    .r_r(f64::NAN)
                    .build()
                    .unwrap_err()
            ),
            "r_R"
        );
    }

    #[test]
    fn horizon_must_be_positive() {
        assert_eq!(
            invalid_name(ScenarioParameters::builder().horizon(0).build().unwrap_err()),
            "T"
        );
        assert_eq!(
            invalid_name(ScenarioParameters::builder().horizon(-3).build().unwrap_err()),
            "T"
        );
    }

    #[test]
    fn oversized_horizon_is_rejected_before_allocating() {
        let error = ScenarioParameters::builder()
            .horizon(i64::MAX)
            .build()
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("invalid parameter T: value {} violates constraint in 1..=100000", i64::MAX)
        );
        assert_eq!(
            invalid_name(ScenarioParameters::builder().horizon(100_001).build().unwrap_err()),
            "T"
        );
        let longest = ScenarioParameters::builder().horizon(100_000).build().unwrap();
        assert_eq!(longest.vaccine_availability().len(), 100_000);
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert_eq!(
            invalid_name(ScenarioParameters::builder().variant_lag(-1).build().unwrap_err()),
            "L"
        );
        assert_eq!(
            invalid_name(
                ScenarioParameters::builder()
                    .variant_dominance(-45)
                    .build()
                    .unwrap_err()
            ),
            "T_D"
        );
        assert_eq!(
            invalid_name(
                ScenarioParameters::builder()
                    .initial_vaccine_supply(-1)
                    .build()
                    .unwrap_err()
            ),
            "B_0"
        );
    }

    #[test]
    fn delta_a_may_be_negative_but_not_infinite() {
        let parameters = ScenarioParameters::builder().delta_a(-0.4).build().unwrap();
        assert_relative_eq!(parameters.variant_infection_rate(), 0.2);
        assert_eq!(
            invalid_name(
                ScenarioParameters::builder()
                    .delta_a(f64::INFINITY)
                    .build()
                    .unwrap_err()
            ),
            "delta_a"
        );
    }

    #[test]
    fn zero_infection_rate_is_allowed() {
        assert!(ScenarioParameters::builder().a_0(0.0).build().is_ok());
        assert_eq!(
            invalid_name(ScenarioParameters::builder().a_0(-0.1).build().unwrap_err()),
            "a_0"
        );
    }

    #[test]
    fn schedule_must_match_horizon() {
        let error = ScenarioParameters::builder()
            .horizon(3)
            .vaccine_availability(vec![1.0, 0.5])
            .build()
            .unwrap_err();
        assert_eq!(invalid_name(error), "b");

        let parameters = ScenarioParameters::builder()
            .horizon(3)
            .vaccine_availability(vec![1.0, 0.5, 0.0])
            .build()
            .unwrap();
        assert_relative_eq!(parameters.doses_available(1).unwrap(), 875.0);
    }

    #[test]
    fn empty_schedule_expands_to_horizon() {
        let parameters = ScenarioParameters::builder()
            .horizon(1)
            .vaccine_availability(vec![])
            .build()
            .unwrap();
        assert_eq!(parameters.vaccine_availability().as_slice(), &[1.0]);
    }

    #[test]
    fn to_builder_round_trips() {
        let parameters = ScenarioParameters::builder()
            .horizon(2)
            .vaccine_availability(vec![0.5, 0.25])
            .build()
            .unwrap();
        assert_eq!(parameters.to_builder().build().unwrap(), parameters);
    }

    #[test]
    fn deserializing_fills_defaults_and_validates() {
        let parameters: ScenarioParameters =
            serde_json::from_value(json!({ "T": 2, "p_H": 0.3 })).unwrap();
        assert_eq!(parameters.horizon(), 2);
        assert_relative_eq!(parameters.p_h(), 0.3);
        assert_eq!(parameters.vaccine_availability().as_slice(), &[1.0, 1.0]);

        let error = serde_json::from_value::<ScenarioParameters>(json!({ "p_H": 3.0 }))
            .unwrap_err()
            .to_string();
        assert!(error.contains("invalid parameter p_H"), "{error}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = serde_json::from_value::<ScenarioParameters>(json!({ "R_0": 2.5 }))
            .unwrap_err()
            .to_string();
        assert!(error.contains("unknown field `R_0`"), "{error}");
    }

    #[test]
    fn serialization_uses_model_names() {
        let parameters = ScenarioParameters::builder().horizon(1).build().unwrap();
        let value = serde_json::to_value(&parameters).unwrap();
        for key in [
            "r_I", "r_0", "r_R", "p_V_H", "p_H", "p_D", "a_0", "delta_a", "p_e", "p_r", "L",
            "T_D", "p", "T", "B_0", "b",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["b"], json!([1.0]));
    }

    #[test]
    fn overrides_replace_only_named_options() {
        let builder = ScenarioParameters::builder()
            .horizon(2)
            .vaccine_availability(vec![1.0, 0.5]);
        let parameters = builder
            .with_overrides(&json!({ "B_0": 100, "p_e": 0.5 }))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(parameters.initial_vaccine_supply(), 100);
        assert_relative_eq!(parameters.p_e(), 0.5);
        assert_eq!(parameters.horizon(), 2);
        assert_eq!(parameters.vaccine_availability().as_slice(), &[1.0, 0.5]);
    }

    #[test]
    fn null_schedule_override_restores_default() {
        let parameters = ScenarioParameters::builder()
            .horizon(2)
            .vaccine_availability(vec![1.0, 0.5])
            .with_overrides(&json!({ "b": null, "T": 4 }))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(parameters.vaccine_availability().len(), 4);
        assert!(parameters.vaccine_availability().iter().all(|x| x == 1.0));
    }

    #[test]
    fn overrides_must_be_an_object() {
        let error = ScenarioParameters::builder()
            .with_overrides(&json!([1, 2]))
            .unwrap_err();
        assert!(matches!(error, ScenarioError::ScenarioError(_)));
    }

    #[test]
    fn unknown_override_is_rejected() {
        let error = ScenarioParameters::builder()
            .with_overrides(&json!({ "v": 2 }))
            .unwrap_err();
        assert!(matches!(error, ScenarioError::JsonError(_)));
    }
}
