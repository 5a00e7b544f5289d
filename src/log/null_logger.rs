/*!

Used when the `logging` feature is disabled. Nothing is output anywhere, but the public API of the
`log` module keeps working.

*/

use crate::log::LogConfiguration;

impl LogConfiguration {
    /// Sets the global logger to conform to this `LogConfiguration`.
    pub(in crate::log) fn set_config(&mut self) {
        log::set_max_level(self.global_log_level);
    }
}
