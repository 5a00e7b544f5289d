use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::ScenarioError;
use crate::loader::{load_scenario_over, save_scenario};
use crate::log::{current_log_levels, set_log_level, LevelFilter, LogLevelSpec};
use crate::parameters::ScenarioParameters;
use crate::presets::ScenarioPreset;
use crate::report::write_schedule_csv;

pub const SCENARIO_FILE_NAME: &str = "scenario.json";
pub const SCHEDULE_FILE_NAME: &str = "vaccine_schedule.csv";

#[derive(Parser, Debug)]
#[command(name = "seir-scenario", version)]
#[command(about = "Resolve, check and export SEIR scenario parameters")]
pub struct Cli {
    #[command(flatten)]
    pub base: BaseArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Default)]
pub struct BaseArgs {
    /// Named scenario to start from (T1.1, T1.2 or T1.3)
    #[arg(short, long, global = true)]
    pub preset: Option<ScenarioPreset>,

    /// Optional path for a scenario JSON file; its values override the preset
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log levels, e.g. `info` or `warn,seir_scenario::loader=debug`
    #[arg(long, global = true)]
    pub log_level: Option<LogLevelSpec>,

    /// Increase logging verbosity (-v, -vv, -vvv); ignored when --log-level is given
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved scenario as JSON
    Show,
    /// Check the resolved scenario and exit with an error if it is invalid
    Validate,
    /// Write the resolved scenario and its vaccine schedule to a directory
    Export {
        /// Directory for the output files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Prefix for the output file names
        #[arg(long, default_value = "")]
        prefix: String,

        /// Replace existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },
    /// List the named scenarios
    Presets,
}

fn configure_logging(args: &BaseArgs) {
    if let Some(spec) = &args.log_level {
        spec.apply();
        let (global, modules) = current_log_levels();
        eprintln!("Current log levels enabled: {global}");
        for (module, level) in modules {
            eprintln!("Logging enabled for {module} at level {level}");
        }
        return;
    }
    let level = match args.verbose {
        0 => return,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    set_log_level(level);
}

/// Builds the scenario described by `args`: the preset (or the defaults), then any values from
/// the config file on top.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or a parameter is out of range.
pub fn resolve_scenario(args: &BaseArgs) -> Result<ScenarioParameters, ScenarioError> {
    let base = match args.preset {
        Some(preset) => preset.builder(),
        None => ScenarioParameters::builder(),
    };
    match &args.config {
        Some(path) => load_scenario_over(base, path),
        None => base.build(),
    }
}

fn export(
    parameters: &ScenarioParameters,
    output_dir: &Path,
    prefix: &str,
    force_overwrite: bool,
) -> Result<()> {
    let scenario_path = output_dir.join(format!("{prefix}{SCENARIO_FILE_NAME}"));
    let schedule_path = output_dir.join(format!("{prefix}{SCHEDULE_FILE_NAME}"));
    if !force_overwrite {
        for path in [&scenario_path, &schedule_path] {
            if path.exists() {
                bail!("Refusing to overwrite existing file: {}", path.display());
            }
        }
    }
    save_scenario(parameters, &scenario_path)?;
    write_schedule_csv(parameters, &schedule_path, force_overwrite)?;
    println!(
        "Wrote {} and {}",
        scenario_path.display(),
        schedule_path.display()
    );
    Ok(())
}

/// Runs the command line front end.
///
/// # Errors
///
/// Returns an error if the scenario cannot be resolved or the requested output cannot be written.
pub fn run(cli: Cli) -> Result<()> {
    configure_logging(&cli.base);
    let resolve = || resolve_scenario(&cli.base).context("Failed to resolve scenario");

    match cli.command {
        Commands::Show => {
            let parameters = resolve()?;
            println!("{}", serde_json::to_string_pretty(&parameters)?);
        }
        Commands::Validate => {
            let parameters = resolve()?;
            println!("Scenario is valid (T = {} days)", parameters.horizon());
        }
        Commands::Export {
            output_dir,
            prefix,
            force_overwrite,
        } => export(&resolve()?, &output_dir, &prefix, force_overwrite)?,
        Commands::Presets => {
            for preset in ScenarioPreset::all() {
                println!("{preset}\tT = {} days", preset.horizon());
            }
        }
    }
    Ok(())
}
