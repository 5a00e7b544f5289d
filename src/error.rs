use std::fmt::{self, Debug, Display};
use std::io;

/// Provides `ScenarioError` and maps other errors to
/// convert to a `ScenarioError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum ScenarioError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    /// A parameter value lies outside its documented range.
    InvalidParameter {
        name: &'static str,
        value: String,
        constraint: &'static str,
    },
    UnknownPreset(String),
    ScenarioError(String),
}

impl ScenarioError {
    #[must_use]
    pub fn invalid_parameter<V: Display>(
        name: &'static str,
        value: V,
        constraint: &'static str,
    ) -> Self {
        ScenarioError::InvalidParameter {
            name,
            value: value.to_string(),
            constraint,
        }
    }
}

impl From<io::Error> for ScenarioError {
    fn from(error: io::Error) -> Self {
        ScenarioError::IoError(error)
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(error: serde_json::Error) -> Self {
        ScenarioError::JsonError(error)
    }
}

impl From<csv::Error> for ScenarioError {
    fn from(error: csv::Error) -> Self {
        ScenarioError::CsvError(error)
    }
}

impl From<String> for ScenarioError {
    fn from(error: String) -> Self {
        ScenarioError::ScenarioError(error)
    }
}

impl From<&str> for ScenarioError {
    fn from(error: &str) -> Self {
        ScenarioError::ScenarioError(error.to_string())
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::IoError(error) => Some(error),
            ScenarioError::JsonError(error) => Some(error),
            ScenarioError::CsvError(error) => Some(error),
            _ => None,
        }
    }
}

impl Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScenarioError::IoError(error) => write!(f, "I/O error: {error}"),
            ScenarioError::JsonError(error) => write!(f, "invalid scenario JSON: {error}"),
            ScenarioError::CsvError(error) => write!(f, "CSV error: {error}"),
            ScenarioError::InvalidParameter {
                name,
                value,
                constraint,
            } => write!(
                f,
                "invalid parameter {name}: value {value} violates constraint {constraint}"
            ),
            ScenarioError::UnknownPreset(name) => write!(f, "unknown scenario preset: {name}"),
            ScenarioError::ScenarioError(message) => write!(f, "{message}"),
        }
    }
}
