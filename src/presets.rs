//! Named scenarios. Each preset uses the default parameter values and differs only in its time
//! horizon.

use crate::error::ScenarioError;
use crate::parameters::{ScenarioBuilder, ScenarioParameters};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ScenarioPreset {
    /// A single-day horizon.
    #[strum(serialize = "T1.1")]
    T1_1,
    /// A two-day horizon.
    #[strum(serialize = "T1.2")]
    T1_2,
    /// A 180-day horizon.
    #[strum(serialize = "T1.3")]
    T1_3,
}

impl ScenarioPreset {
    /// Looks a preset up by its display name, e.g. `"T1.3"`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::UnknownPreset`] if no preset has that name.
    pub fn from_name(name: &str) -> Result<Self, ScenarioError> {
        ScenarioPreset::from_str(name).map_err(|_| ScenarioError::UnknownPreset(name.to_string()))
    }

    #[must_use]
    pub fn horizon(self) -> i64 {
        match self {
            ScenarioPreset::T1_1 => 1,
            ScenarioPreset::T1_2 => 2,
            ScenarioPreset::T1_3 => 180,
        }
    }

    /// A builder holding this preset, to be adjusted before building.
    #[must_use]
    pub fn builder(self) -> ScenarioBuilder {
        ScenarioParameters::builder().horizon(self.horizon())
    }

    /// # Errors
    ///
    /// Presets are valid by construction; an error here means the defaults themselves are invalid.
    pub fn parameters(self) -> Result<ScenarioParameters, ScenarioError> {
        self.builder().build()
    }

    pub fn all() -> impl Iterator<Item = ScenarioPreset> {
        ScenarioPreset::iter()
    }
}
