//! Scenario parameters for SEIR epidemic models with vaccination and variant dynamics
//!
//! A scenario fixes the transition rates, probabilities, variant timing, time horizon and
//! vaccine supply that a simulation or optimization run is configured with. This crate does not
//! simulate anything; it defines the parameter record and makes sure that every value a
//! downstream model reads is in range.
//!
//! The central type is [`ScenarioParameters`]. It is immutable and can only be obtained through
//! validation:
//! * [`ScenarioBuilder`] accepts each option by name and starts from documented defaults.
//! * [`ScenarioPreset`] provides the named scenarios `T1.1`, `T1.2` and `T1.3`.
//! * [`loader`] reads scenarios from JSON files, optionally layered over a preset, and writes
//!   them back out.
//!
//! An absent or empty vaccine availability schedule is expanded to `T` days of full availability
//! when the scenario is built, so [`ScenarioParameters::vaccine_availability`] always has exactly
//! `T` entries. The [`report`] module writes that schedule as CSV.
//!
//! ```rust
//! use seir_scenario::{ScenarioParameters, ScenarioPreset};
//!
//! let scenario = ScenarioPreset::T1_3.parameters().unwrap();
//! assert_eq!(scenario.vaccine_availability().len(), 180);
//!
//! let custom = ScenarioParameters::builder()
//!     .horizon(3)
//!     .vaccine_availability(vec![1.0, 0.5, 0.5])
//!     .build()
//!     .unwrap();
//! assert_eq!(custom.doses_available(1), Some(875.0));
//! ```
pub mod error;
pub mod loader;
pub mod log;
pub mod parameters;
pub mod prelude;
pub mod presets;
pub mod report;
pub mod runner;
pub mod schedule;
pub mod validation;

pub use error::ScenarioError;
pub use parameters::{ScenarioBuilder, ScenarioParameters};
pub use presets::ScenarioPreset;
pub use schedule::VaccineSchedule;
