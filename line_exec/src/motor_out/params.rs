//! Parameters structure for MotorOut

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::MotorOutError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for motor output.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Params {
    /// PWM period of both motors.
    ///
    /// Units: microseconds
    pub pwm_period_us: u32,
}

impl Params {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), MotorOutError> {
        if self.pwm_period_us == 0 {
            return Err(MotorOutError::InvalidPwmPeriod);
        }

        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Params { pwm_period_us: 50 }
    }
}
