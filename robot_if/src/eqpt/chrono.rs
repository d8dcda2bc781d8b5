//! # Chronometer interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Commands the run controller issues to the chronometer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChronoCmd {
    Start,
    Stop,
    Reset,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The timer collaborator.
///
/// Semantics follow a stopwatch: `reset` zeroes the accumulated time without changing whether
/// the chronometer is running.
pub trait Chrono {
    fn start(&mut self);
    fn stop(&mut self);
    fn reset(&mut self);

    /// Accumulated time in seconds.
    fn read(&self) -> f64;

    /// Execute a single command.
    fn apply(&mut self, cmd: ChronoCmd) {
        match cmd {
            ChronoCmd::Start => self.start(),
            ChronoCmd::Stop => self.stop(),
            ChronoCmd::Reset => self.reset(),
        }
    }
}
