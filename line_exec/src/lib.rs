//! # Line follower library.
//!
//! This library allows the executable, the benchmarks and other crates in the workspace to access
//! the items defined inside the line follower crate.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Control cycle - runs one tick of the robot against its equipment
pub mod cycle;

/// Global data store for the executable
pub mod data_store;

/// Motor output - converts wheel speeds into motor demands
pub mod motor_out;

/// Run control - start/stop automaton driven by the jack and the stop button
pub mod run_ctrl;

/// Sensing - analog front-end of the line sensors and the potentiometer
pub mod sensing;

/// Simulated equipment - drives the control cycle from a stimulus script
pub mod sim;

/// Trajectory control - line following automaton
pub mod traj_ctrl;
