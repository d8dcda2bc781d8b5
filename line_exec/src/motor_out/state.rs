//! Implementations for the MotorOut state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use robot_if::eqpt::MotorDems;
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{MotorOutError, Params};
use crate::traj_ctrl::WheelSpeeds;
use util::{maths::clamp, module::State, params};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Motor output module state
#[derive(Debug, Default)]
pub struct MotorOut {
    params: Params,
}

/// Input data to motor output.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// Wheel speed multipliers from trajectory control
    pub speeds: WheelSpeeds,

    /// Speed potentiometer reading in [0, 1]
    pub pot: f64,

    /// Run control enabled flag
    pub enabled: bool,
}

/// Status report for motor output processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    pub left_limited: bool,
    pub right_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for MotorOut {
    type InitData = &'static str;
    type InitError = MotorOutError;

    type InputData = InputData;
    type OutputData = MotorDems;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the MotorOut module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        let params: Params = params::load(init_data)
            .map_err(MotorOutError::ParamLoadError)?;

        *self = Self::new(params)?;

        Ok(())
    }

    /// Perform cyclic processing of motor output.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Disabled means exactly zero, whatever the speeds or pot say
        if !input_data.enabled {
            return Ok((MotorDems::STOPPED, StatusReport::default()));
        }

        let (left, left_limited) = clamp(
            &(input_data.speeds.left * input_data.pot), &0.0, &1.0
        );
        let (right, right_limited) = clamp(
            &(input_data.speeds.right * input_data.pot), &0.0, &1.0
        );

        trace!("MotorOut demands: left = {:.4}, right = {:.4}", left, right);

        Ok((
            MotorDems { left, right },
            StatusReport { left_limited, right_limited }
        ))
    }
}

impl MotorOut {
    /// Create a new instance from validated parameters.
    pub fn new(params: Params) -> Result<Self, MotorOutError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// PWM period to configure the motors with.
    pub fn pwm_period_us(&self) -> u32 {
        self.params.pwm_period_us
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
