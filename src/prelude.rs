pub use crate::error::ScenarioError;
pub use crate::loader::{load_scenario, load_scenario_over, parse_scenario, save_scenario};
pub use crate::log::{debug, error, info, trace, warn};
pub use crate::parameters::{ScenarioBuilder, ScenarioParameters};
pub use crate::presets::ScenarioPreset;
pub use crate::report::write_schedule_csv;
pub use crate::schedule::VaccineSchedule;
