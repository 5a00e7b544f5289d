//! Reading and writing scenarios as JSON.
//!
//! A scenario file is a single JSON object keyed by the serialized parameter names (`r_I`, `T`,
//! `b`, ...). Keys may be omitted; omitted parameters take their defaults, or the values of the
//! base scenario when loading with [`load_scenario_over`].

use crate::error::ScenarioError;
use crate::log::{debug, info};
use crate::parameters::{ScenarioBuilder, ScenarioParameters};
use serde_json::Value;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

fn check_json_extension(path: &Path) -> Result<(), ScenarioError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("json") => Ok(()),
        _ => Err(ScenarioError::ScenarioError(format!(
            "Scenario files must be JSON: {}",
            path.display()
        ))),
    }
}

/// Parses a scenario from a JSON string, filling omitted parameters with defaults.
///
/// # Errors
///
/// Returns an error if the string is not a JSON object of known parameters or if a parameter is
/// out of range.
pub fn parse_scenario(json: &str) -> Result<ScenarioParameters, ScenarioError> {
    let builder: ScenarioBuilder = serde_json::from_str(json)?;
    builder.build()
}

/// Reads the raw JSON object from a scenario file without applying it to anything.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not named `*.json`, or is not valid JSON.
pub fn read_overrides(path: &Path) -> Result<Value, ScenarioError> {
    check_json_extension(path)?;
    info!("Loading scenario from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a scenario file, filling omitted parameters with defaults.
///
/// # Errors
///
/// See [`read_overrides`]; additionally fails if a parameter is out of range.
pub fn load_scenario(path: &Path) -> Result<ScenarioParameters, ScenarioError> {
    load_scenario_over(ScenarioParameters::builder(), path)
}

/// Loads a scenario file on top of `base`. Parameters present in the file replace those of
/// `base`.
///
/// # Errors
///
/// See [`read_overrides`]; additionally fails if the file names an unknown parameter or if a
/// resulting parameter is out of range.
pub fn load_scenario_over(
    base: ScenarioBuilder,
    path: &Path,
) -> Result<ScenarioParameters, ScenarioError> {
    let overrides = read_overrides(path)?;
    let parameters = base.with_overrides(&overrides)?.build()?;
    debug!(
        "Loaded scenario with T = {} days from {}",
        parameters.horizon(),
        path.display()
    );
    Ok(parameters)
}

/// Writes `parameters` as pretty-printed JSON, including the materialized schedule. Parent
/// directories are created as needed.
///
/// # Errors
///
/// Returns an error if the path is not named `*.json` or the file cannot be written.
pub fn save_scenario(parameters: &ScenarioParameters, path: &Path) -> Result<(), ScenarioError> {
    check_json_extension(path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, parameters)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!("Saved scenario to {}", path.display());
    Ok(())
}
