//! # Run control module
//!
//! Run control decides when the robot is allowed to drive. It is a three
//! state automaton driven by the start jack and the stop button:
//!
//! - `Idle` - waiting on the start line, the display shows the speed
//!   potentiometer so it can be tuned before the run.
//! - `Running` - the jack has been pulled, motors are enabled and the
//!   chronometer is counting.
//! - `Stopped` - the stop button has been released, motors are disabled and
//!   the display shows the lap time. Plugging the jack back in returns to
//!   `Idle`.
//!
//! The automaton never touches the equipment itself, it returns the display
//! and chronometer commands for the control cycle to execute.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use state::*;
