//! # Motor output module
//!
//! Converts the trajectory wheel speeds into motor demands. Each wheel speed
//! is scaled by the speed potentiometer and gated by the run control enabled
//! flag:
//!
//! ```text
//! dem = wheel_speed * pot   (enabled)
//! dem = 0                   (disabled)
//! ```
//!
//! Demands are limited to the PWM duty range [0, 1].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while configuring motor output.
#[derive(Debug, thiserror::Error)]
pub enum MotorOutError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("The PWM period must be non-zero")]
    InvalidPwmPeriod,
}
