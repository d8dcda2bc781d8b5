//! Implementations for the RunCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use robot_if::eqpt::{ChronoCmd, DisplayCmd};
use serde::Serialize;
use std::convert::Infallible;

// Internal
use util::module::{InfallibleState, State};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Display row used for the potentiometer and lap time
const VALUE_ROW: u8 = 1;

/// Display column used for the potentiometer and lap time
const VALUE_COL: u8 = 0;

/// Decimals shown for the potentiometer
const POT_PRECISION: usize = 3;

/// Decimals shown for the lap time
const TIME_PRECISION: usize = 2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Run control module state
#[derive(Debug, Default)]
pub struct RunCtrl {
    state: RunState,
}

/// Input data to run control.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// Start jack level, `false` once the jack is pulled
    pub jack_inserted: bool,

    /// Stop button level, `false` once the button is released
    pub button_pressed: bool,

    /// Current potentiometer reading, only used for display
    pub pot: f64,

    /// Current chronometer reading, only used for display
    pub elapsed_s: f64,
}

/// Output of one run control cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputData {
    /// True if the motors may be driven
    pub enabled: bool,

    /// Display command to execute this cycle, if any
    pub display: Option<DisplayCmd>,

    /// Chronometer commands to execute this cycle, in order
    pub chrono: Vec<ChronoCmd>,
}

/// Status report for run control processing.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    /// State at the start of the cycle
    pub prev_state: RunState,

    /// State at the end of the cycle
    pub state: RunState,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Run states of the robot
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Stopped,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for RunCtrl {
    type InitData = ();
    type InitError = Infallible;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the RunCtrl module, run control has no parameters.
    fn init(&mut self, _init_data: Self::InitData) -> Result<(), Self::InitError> {
        self.state = RunState::Idle;
        Ok(())
    }

    /// Perform cyclic processing of run control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let prev_state = self.state;

        let mut display = None;
        let mut chrono = vec![];

        match self.state {
            RunState::Idle => {
                if !input_data.jack_inserted {
                    info!("Jack pulled, starting run");
                    self.state = RunState::Running;
                    chrono.push(ChronoCmd::Reset);
                    chrono.push(ChronoCmd::Start);
                    display = Some(DisplayCmd::Clear);
                }
                else {
                    display = Some(value_cmd(input_data.pot, POT_PRECISION));
                }
            },
            RunState::Running => {
                if !input_data.button_pressed {
                    self.state = RunState::Stopped;
                    chrono.push(ChronoCmd::Stop);
                    info!("Stop button released, run stopped");
                }
            },
            RunState::Stopped => {
                if input_data.jack_inserted {
                    info!("Jack inserted, back to idle");
                    self.state = RunState::Idle;
                    display = Some(DisplayCmd::Clear);
                }
                else {
                    display = Some(value_cmd(input_data.elapsed_s, TIME_PRECISION));
                }
            }
        }

        Ok((
            OutputData {
                enabled: self.is_enabled(),
                display,
                chrono
            },
            StatusReport {
                prev_state,
                state: self.state
            }
        ))
    }
}

impl RunCtrl {
    /// Process one cycle and return the output.
    pub fn tick(&mut self, input_data: &InputData) -> OutputData {
        self.step(input_data).0
    }

    /// The current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// True only while running.
    pub fn is_enabled(&self) -> bool {
        self.state == RunState::Running
    }
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn value_cmd(value: f64, precision: usize) -> DisplayCmd {
    DisplayCmd::Show {
        row: VALUE_ROW,
        col: VALUE_COL,
        value,
        precision,
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn input(jack_inserted: bool, button_pressed: bool) -> InputData {
        InputData {
            jack_inserted,
            button_pressed,
            pot: 0.42,
            elapsed_s: 12.5,
        }
    }

    #[test]
    fn test_idle_shows_pot() {
        let mut ctrl = RunCtrl::default();

        let out = ctrl.tick(&input(true, true));
        assert_eq!(ctrl.state(), RunState::Idle);
        assert!(!out.enabled);
        assert!(out.chrono.is_empty());
        assert_eq!(out.display, Some(value_cmd(0.42, 3)));
    }

    #[test]
    fn test_run_scenario() {
        let mut ctrl = RunCtrl::default();

        // Pull the jack
        let (out, rpt) = ctrl.proc(&input(false, true)).unwrap();
        assert_eq!(rpt.prev_state, RunState::Idle);
        assert_eq!(rpt.state, RunState::Running);
        assert!(out.enabled);
        assert_eq!(out.chrono, vec![ChronoCmd::Reset, ChronoCmd::Start]);
        assert_eq!(out.display, Some(DisplayCmd::Clear));

        // Keep running, the jack stays out
        let out = ctrl.tick(&input(false, true));
        assert_eq!(ctrl.state(), RunState::Running);
        assert!(out.enabled);
        assert!(out.chrono.is_empty());
        assert_eq!(out.display, None);

        // Jack state is ignored while running
        let out = ctrl.tick(&input(true, true));
        assert_eq!(ctrl.state(), RunState::Running);
        assert!(out.enabled);

        // Release the stop button
        let out = ctrl.tick(&input(false, false));
        assert_eq!(ctrl.state(), RunState::Stopped);
        assert!(!out.enabled);
        assert_eq!(out.chrono, vec![ChronoCmd::Stop]);

        // Stopped shows the lap time
        let out = ctrl.tick(&input(false, true));
        assert_eq!(ctrl.state(), RunState::Stopped);
        assert!(!out.enabled);
        assert_eq!(out.display, Some(value_cmd(12.5, 2)));

        // Plug the jack back in
        let out = ctrl.tick(&input(true, true));
        assert_eq!(ctrl.state(), RunState::Idle);
        assert!(!out.enabled);
        assert!(out.chrono.is_empty());
        assert_eq!(out.display, Some(DisplayCmd::Clear));
    }

    #[test]
    fn test_init_resets() {
        let mut ctrl = RunCtrl::default();
        ctrl.tick(&input(false, true));
        assert!(ctrl.is_enabled());

        ctrl.init(()).unwrap();
        assert_eq!(ctrl.state(), RunState::Idle);
        assert!(!ctrl.is_enabled());
    }
}
