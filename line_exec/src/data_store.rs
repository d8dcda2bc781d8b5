//! # Data Store

use serde::Serialize;

use robot_if::eqpt::{LineSensorReading, MotorDems};

use crate::{
    motor_out,
    run_ctrl::{self, RunState},
    traj_ctrl::{self, TrajState},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// Simulation elapsed time
    pub sim_time_s: f64,

    // Inputs
    pub line_reading: LineSensorReading,
    pub pot: f64,
    pub jack_inserted: bool,
    pub button_pressed: bool,

    // RunCtrl
    pub run_ctrl: run_ctrl::RunCtrl,
    pub run_ctrl_input: run_ctrl::InputData,
    pub run_ctrl_output: Option<run_ctrl::OutputData>,
    pub run_ctrl_status_rpt: Option<run_ctrl::StatusReport>,

    // TrajCtrl
    pub traj_ctrl: traj_ctrl::TrajCtrl,
    pub traj_ctrl_output: Option<traj_ctrl::OutputData>,
    pub traj_ctrl_status_rpt: Option<traj_ctrl::StatusReport>,

    // MotorOut
    pub motor_out: motor_out::MotorOut,
    pub motor_out_input: motor_out::InputData,
    pub motor_out_output: MotorDems,
    pub motor_out_status_rpt: motor_out::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

/// Flattened view of one cycle, written to the cycle archive.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CycleRecord {
    pub num_cycles: u64,
    pub sim_time_s: f64,

    pub far_left: bool,
    pub left: bool,
    pub right: bool,
    pub far_right: bool,
    pub pot: f64,
    pub jack_inserted: bool,
    pub button_pressed: bool,

    pub run_state: RunState,
    pub enabled: bool,

    pub traj_state: TrajState,
    pub speed_left: f64,
    pub speed_right: f64,

    pub dem_left: f64,
    pub dem_right: f64,
    pub left_limited: bool,
    pub right_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears the per-cycle outputs and sets the simulation time. Controller states are kept.
    pub fn cycle_start(&mut self, sim_time_s: f64) {
        self.run_ctrl_input = run_ctrl::InputData::default();
        self.run_ctrl_output = None;
        self.run_ctrl_status_rpt = None;

        self.traj_ctrl_output = None;
        self.traj_ctrl_status_rpt = None;

        self.motor_out_input = motor_out::InputData::default();
        self.motor_out_output = MotorDems::STOPPED;
        self.motor_out_status_rpt = motor_out::StatusReport::default();

        self.sim_time_s = sim_time_s;
    }

    /// Build the archive record for the current cycle.
    pub fn cycle_record(&self) -> CycleRecord {
        let speeds = self.motor_out_input.speeds;

        CycleRecord {
            num_cycles: self.num_cycles,
            sim_time_s: self.sim_time_s,
            far_left: self.line_reading.far_left,
            left: self.line_reading.left,
            right: self.line_reading.right,
            far_right: self.line_reading.far_right,
            pot: self.pot,
            jack_inserted: self.jack_inserted,
            button_pressed: self.button_pressed,
            run_state: self.run_ctrl.state(),
            enabled: self.run_ctrl.is_enabled(),
            traj_state: self.traj_ctrl.state(),
            speed_left: speeds.left,
            speed_right: speeds.right,
            dem_left: self.motor_out_output.left,
            dem_right: self.motor_out_output.right,
            left_limited: self.motor_out_status_rpt.left_limited,
            right_limited: self.motor_out_status_rpt.right_limited,
        }
    }
}
