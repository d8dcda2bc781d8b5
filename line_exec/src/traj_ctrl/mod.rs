//! # Trajectory control module
//!
//! Trajectory control keeps the robot on the line. The robot straddles the
//! line with four sensors (far left, left, right, far right), and a seven
//! state automaton interprets the sensor patterns as "drifted left",
//! "drifted right", "entering a sharp turn" or "leaving a sharp turn".
//!
//! Each state commands a fixed pair of wheel speed multipliers `(vg, vd)`.
//! Rather than an arbitrary correction, the multipliers are derived from the
//! robot's track width `w` and the radius `r` of the arc the robot should
//! follow in that state:
//!
//! ```text
//! coef = sqrt((r - w/2) / (r + w/2))
//! ```
//!
//! The inner wheel is driven at `coef` and the outer wheel at `1/coef`, so the
//! robot describes an arc of radius `r`. Three radii are used: a gentle
//! correction radius, the turn radius and the tighter radius used while
//! leaving a turn.
//!
//! Sensor patterns which are not listed for the current state (including
//! degenerate ones, like all sensors seeing the line) never cause a
//! transition: the robot holds its last trajectory.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;
mod table;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;
pub use table::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur while configuring trajectory control.
///
/// Cyclic processing itself cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum TrajCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("The track width must be positive and finite, found {0} m")]
    InvalidTrackWidth(f64),

    #[error(
        "The {name} radius ({radius_m} m) must be larger than half the track width ({half_track_m} m)"
    )]
    InvalidGeometry {
        name: &'static str,
        radius_m: f64,
        half_track_m: f64,
    },
}
