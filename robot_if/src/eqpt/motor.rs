//! # Motor interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands sent to the motor driver.
///
/// Both values are PWM duty ratios between 0 and 1.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct MotorDems {
    pub left: f64,
    pub right: f64,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The motor-output collaborator.
pub trait Motors {
    /// Configure the PWM period of both motors.
    fn init(&mut self, pwm_period_us: u32);

    /// Apply new demands to both motors.
    fn set_demands(&mut self, dems: MotorDems);
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MotorDems {
    /// Both motors stopped.
    pub const STOPPED: MotorDems = MotorDems {
        left: 0.0,
        right: 0.0,
    };
}
