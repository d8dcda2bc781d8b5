//! # Robot interface crate.
//!
//! Provides the data types exchanged between the control core and the robot's equipment, along
//! with the traits each piece of equipment must implement.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Equipment data types and collaborator traits (sensors, buttons, chronometer, display, motors)
pub mod eqpt;
