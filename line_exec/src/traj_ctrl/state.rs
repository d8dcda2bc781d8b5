//! Trajectory control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use robot_if::eqpt::{LightPattern, LineSensorReading};
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::*;
use util::{module::{InfallibleState, State}, params};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Trajectory control module state.
///
/// The default instance starts in `Straight` with unit coefficients; call
/// `init` (or build with `TrajCtrl::new`) to apply the robot's geometry.
#[derive(Debug, Default)]
pub struct TrajCtrl {
    coefs: SpeedCoefs,

    /// Current state of the automaton, kept between cycles.
    state: TrajState,
}

/// Wheel speed multipliers, applied by the motor output stage.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct WheelSpeeds {
    /// Left wheel multiplier (vg)
    pub left: f64,

    /// Right wheel multiplier (vd)
    pub right: f64,
}

/// Output of one trajectory control cycle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct OutputData {
    pub speeds: WheelSpeeds,

    /// Bar graph pattern for the state
    pub pattern: LightPattern,

    /// State the automaton is in after this cycle
    pub state: TrajState,
}

/// The status report of one trajectory control cycle.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    /// State at the start of the cycle
    pub prev_state: TrajState,

    /// True if the reading triggered a transition
    pub transitioned: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for TrajCtrl {
    type InitData = &'static str;
    type InitError = TrajCtrlError;

    type InputData = LineSensorReading;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the TrajCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        let params: Params = params::load(init_data)
            .map_err(TrajCtrlError::ParamLoadError)?;

        *self = Self::new(&params)?;

        Ok(())
    }

    /// Perform cyclic processing of trajectory control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let prev_state = self.state;

        // No matching row means the last trajectory is held
        let transitioned = match next_state(self.state, input_data) {
            Some(next) => {
                debug!("TrajCtrl {:?} -> {:?} on {}", self.state, next, input_data);
                self.state = next;
                true
            }
            None => false,
        };

        let output = OutputData {
            speeds: self.wheel_speeds(),
            pattern: self.state.pattern(),
            state: self.state,
        };

        trace!(
            "TrajCtrl output: {:?} vg = {:.4}, vd = {:.4}",
            output.state,
            output.speeds.left,
            output.speeds.right
        );

        Ok((
            output,
            StatusReport {
                prev_state,
                transitioned,
            },
        ))
    }
}

impl TrajCtrl {
    /// Create a new instance from the given geometry, starting in `Straight`.
    ///
    /// Fails if the geometry cannot produce valid speed coefficients.
    pub fn new(params: &Params) -> Result<Self, TrajCtrlError> {
        let coefs = params.speed_coefs()?;

        debug!(
            "TrajCtrl coefficients: correction = {:.4}, turn = {:.4}, exit = {:.4}",
            coefs.correction, coefs.turn, coefs.exit
        );

        Ok(Self {
            coefs,
            state: TrajState::Straight,
        })
    }

    /// Process one reading and return the wheel speeds to apply.
    pub fn tick(&mut self, reading: &LineSensorReading) -> WheelSpeeds {
        self.step(reading).0.speeds
    }

    /// The current state of the automaton.
    pub fn state(&self) -> TrajState {
        self.state
    }

    /// The speed coefficients in use.
    pub fn coefs(&self) -> &SpeedCoefs {
        &self.coefs
    }

    /// Wheel speeds commanded by the current state.
    pub fn wheel_speeds(&self) -> WheelSpeeds {
        let c = &self.coefs;

        // (inner, outer) wheel for left arcs, mirrored for right arcs
        let (left, right) = match self.state {
            TrajState::Straight => (1.0, 1.0),
            TrajState::CorrectLeft => (c.correction, 1.0 / c.correction),
            TrajState::CorrectRight => (1.0 / c.correction, c.correction),
            TrajState::TurnLeft => (c.turn, 1.0 / c.turn),
            TrajState::TurnRight => (1.0 / c.turn, c.turn),
            TrajState::ExitTurnLeft => (c.exit, 1.0 / c.exit),
            TrajState::ExitTurnRight => (1.0 / c.exit, c.exit),
        };

        WheelSpeeds { left, right }
    }
}

impl Default for WheelSpeeds {
    fn default() -> Self {
        Self {
            left: 1.0,
            right: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use util::maths::approx_eq;

    const TOL: f64 = 1e-4;

    fn params() -> Params {
        Params {
            track_width_m: 0.2,
            correction_radius_m: 0.6,
            turn_radius_m: 0.5,
            exit_radius_m: 0.3,
        }
    }

    fn r(t: (bool, bool, bool, bool)) -> LineSensorReading {
        LineSensorReading::from(t)
    }

    const F: bool = false;
    const T: bool = true;

    /// Sensor sequence leading from `Straight` to the given state.
    fn path_to(state: TrajState) -> Vec<LineSensorReading> {
        let to_correct_left = r((F, T, F, F));
        let to_correct_right = r((F, F, T, F));
        let to_turn_left = r((T, F, F, F));
        let to_turn_right = r((F, F, F, T));
        let lost = r((F, F, F, F));

        match state {
            TrajState::Straight => vec![],
            TrajState::CorrectLeft => vec![to_correct_left],
            TrajState::CorrectRight => vec![to_correct_right],
            TrajState::TurnLeft => vec![to_correct_left, to_turn_left],
            TrajState::TurnRight => vec![to_correct_right, to_turn_right],
            TrajState::ExitTurnLeft => vec![to_correct_left, to_turn_left, lost],
            TrajState::ExitTurnRight => vec![to_correct_right, to_turn_right, lost],
        }
    }

    fn ctrl_in(state: TrajState) -> TrajCtrl {
        let mut ctrl = TrajCtrl::new(&params()).unwrap();
        for reading in path_to(state) {
            ctrl.tick(&reading);
        }
        assert_eq!(ctrl.state(), state);
        ctrl
    }

    #[test]
    fn test_initial_state() {
        let ctrl = TrajCtrl::new(&params()).unwrap();
        assert_eq!(ctrl.state(), TrajState::Straight);
        assert_eq!(ctrl.wheel_speeds(), WheelSpeeds { left: 1.0, right: 1.0 });
    }

    #[test]
    fn test_correct_left_output() {
        let mut ctrl = TrajCtrl::new(&params()).unwrap();
        let speeds = ctrl.tick(&r((F, T, F, F)));

        assert_eq!(ctrl.state(), TrajState::CorrectLeft);
        assert!(approx_eq(speeds.left, 0.8452, TOL));
        assert!(approx_eq(speeds.right, 1.1832, TOL));
    }

    #[test]
    fn test_state_outputs() {
        let c = params().speed_coefs().unwrap();

        let expected = [
            (TrajState::Straight, 1.0, 1.0, 0x18),
            (TrajState::CorrectLeft, c.correction, 1.0 / c.correction, 0x20),
            (TrajState::CorrectRight, 1.0 / c.correction, c.correction, 0x04),
            (TrajState::TurnLeft, c.turn, 1.0 / c.turn, 0x40),
            (TrajState::TurnRight, 1.0 / c.turn, c.turn, 0x02),
            (TrajState::ExitTurnLeft, c.exit, 1.0 / c.exit, 0x80),
            (TrajState::ExitTurnRight, 1.0 / c.exit, c.exit, 0x01),
        ];

        for (state, vg, vd, pattern) in expected.iter() {
            let mut ctrl = ctrl_in(*state);

            // A degenerate reading holds the state and gives its output
            let (output, report) = ctrl.proc(&r((T, T, T, T))).unwrap();
            assert_eq!(output.state, *state);
            assert!(!report.transitioned);
            assert!(approx_eq(output.speeds.left, *vg, 1e-12));
            assert!(approx_eq(output.speeds.right, *vd, 1e-12));
            assert_eq!(output.pattern, LightPattern(*pattern));
        }
    }

    #[test]
    fn test_unmatched_holds_output() {
        for state in TrajState::ALL.iter() {
            for reading in LineSensorReading::all() {
                if next_state(*state, &reading).is_some() {
                    continue;
                }

                let mut ctrl = ctrl_in(*state);
                let before = ctrl.wheel_speeds();

                let (output, report) = ctrl.proc(&reading).unwrap();

                assert_eq!(output.state, *state);
                assert_eq!(output.speeds, before);
                assert_eq!(report.prev_state, *state);
                assert!(!report.transitioned);

                // And keeps holding while the pattern persists
                assert_eq!(ctrl.tick(&reading), before);
                assert_eq!(ctrl.state(), *state);
            }
        }
    }

    #[test]
    fn test_round_trip_to_straight() {
        let mut ctrl = TrajCtrl::new(&params()).unwrap();

        let speeds = ctrl.tick(&r((F, F, T, F)));
        assert_eq!(ctrl.state(), TrajState::CorrectRight);
        assert!(speeds.left > 1.0 && speeds.right < 1.0);

        let speeds = ctrl.tick(&r((F, T, T, F)));
        assert_eq!(ctrl.state(), TrajState::Straight);
        assert_eq!(speeds, WheelSpeeds { left: 1.0, right: 1.0 });
    }

    #[test]
    fn test_left_turn_sequence() {
        let mut ctrl = TrajCtrl::new(&params()).unwrap();
        let c = *ctrl.coefs();

        let seq = [
            ((F, T, F, F), TrajState::CorrectLeft, c.correction),
            ((F, T, F, F), TrajState::CorrectLeft, c.correction),
            ((T, F, F, F), TrajState::TurnLeft, c.turn),
            ((T, T, F, F), TrajState::TurnLeft, c.turn),
            ((F, F, F, F), TrajState::ExitTurnLeft, c.exit),
            ((T, F, F, F), TrajState::TurnLeft, c.turn),
            ((F, T, F, F), TrajState::CorrectLeft, c.correction),
            ((F, T, T, F), TrajState::Straight, 1.0),
        ];

        for (reading, state, vg) in seq.iter() {
            let speeds = ctrl.tick(&r(*reading));
            assert_eq!(ctrl.state(), *state);
            assert!(approx_eq(speeds.left, *vg, 1e-12));
            assert!(approx_eq(speeds.left * speeds.right, 1.0, 1e-12));
        }
    }

    /// With every sensor off the line a turn moves to its exit phase, and the
    /// exit phase then holds until the far sensor sees the line again. Whether
    /// "all sensors off" means the robot left the line or is centred past the
    /// turn cannot be told from the sensors alone: this sequence needs to be
    /// checked on the physical robot before relying on it.
    #[test]
    fn test_all_sensors_off_during_turn() {
        let mut ctrl = ctrl_in(TrajState::TurnRight);

        ctrl.tick(&r((F, F, F, F)));
        assert_eq!(ctrl.state(), TrajState::ExitTurnRight);

        for _ in 0..10 {
            ctrl.tick(&r((F, F, F, F)));
            assert_eq!(ctrl.state(), TrajState::ExitTurnRight);
        }

        // Only the far right sensor brings the turn back
        ctrl.tick(&r((F, F, T, F)));
        assert_eq!(ctrl.state(), TrajState::ExitTurnRight);
        ctrl.tick(&r((F, F, F, T)));
        assert_eq!(ctrl.state(), TrajState::TurnRight);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let p = Params {
            turn_radius_m: 0.05,
            ..params()
        };
        assert!(matches!(
            TrajCtrl::new(&p),
            Err(TrajCtrlError::InvalidGeometry { .. })
        ));
    }
}
