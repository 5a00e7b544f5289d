//! CSV output of the effective vaccine schedule, one row per day of the horizon.

use crate::error::ScenarioError;
use crate::log::info;
use crate::parameters::ScenarioParameters;
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::path::Path;

/// A row of the schedule report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub day: usize,
    pub proportion: f64,
    pub doses: f64,
}

/// Rows for every day `0..T` of `parameters`.
#[allow(clippy::cast_precision_loss)]
pub fn schedule_rows(parameters: &ScenarioParameters) -> impl Iterator<Item = ScheduleRow> + '_ {
    let supply = parameters.initial_vaccine_supply();
    parameters
        .vaccine_availability()
        .iter()
        .enumerate()
        .map(move |(day, proportion)| ScheduleRow {
            day,
            proportion,
            doses: proportion * supply as f64,
        })
}

// Checks that the path is a CSV path and that we may write to it. Creates all parent
// directories if they do not exist.
fn generate_validate_filepath(path: &Path, overwrite: bool) -> Result<File, ScenarioError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("csv") => {
            if path.exists() && !overwrite {
                return Err(ScenarioError::ScenarioError(format!(
                    "Refusing to overwrite existing file: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            Ok(File::create(path)?)
        }
        _ => Err(ScenarioError::ScenarioError(
            "Report output files must be CSVs at this time".to_string(),
        )),
    }
}

/// Writes the schedule of `parameters` to `path` with the columns `day,proportion,doses`.
///
/// # Errors
///
/// Returns an error if `path` is not a `.csv` path, if it exists and `overwrite` is false, or if
/// writing fails.
pub fn write_schedule_csv(
    parameters: &ScenarioParameters,
    path: &Path,
    overwrite: bool,
) -> Result<(), ScenarioError> {
    let file = generate_validate_filepath(path, overwrite)?;
    let mut writer = Writer::from_writer(file);
    for row in schedule_rows(parameters) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!(
        "Wrote {} days of vaccine schedule to {}",
        parameters.horizon(),
        path.display()
    );
    Ok(())
}
