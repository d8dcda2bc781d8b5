//! # Equipment Interface
//!
//! This module defines the data structures exchanged with the robot's equipment and the traits
//! each collaborator shall implement. The control core never touches hardware directly, it only
//! talks to these traits.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod buttons;
pub mod chrono;
pub mod display;
pub mod line;
pub mod motor;
pub mod mux;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use self::buttons::Buttons;
pub use self::chrono::{Chrono, ChronoCmd};
pub use self::display::{Display, DisplayCmd, LightPattern};
pub use self::line::{LineSensing, LineSensorReading};
pub use self::motor::{MotorDems, Motors};
pub use self::mux::Mux;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The full set of collaborators the control loop needs in one cycle.
///
/// Implemented automatically for any type providing every equipment trait, so a board support
/// layer or a simulation only has to implement the individual traits.
pub trait Equipment: LineSensing + Buttons + Chrono + Display + Motors {}

impl<T> Equipment for T where T: LineSensing + Buttons + Chrono + Display + Motors {}
