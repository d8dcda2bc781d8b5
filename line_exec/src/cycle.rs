//! # Control cycle
//!
//! One tick of the robot: acquire the inputs as a single snapshot, run the two automatons and
//! drive the outputs. The automatons never touch the equipment themselves, their intents are
//! applied here.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use robot_if::eqpt::{Equipment, LightPattern, MotorDems};

// Internal
use crate::{data_store::DataStore, motor_out, run_ctrl};
use util::module::InfallibleState;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Bring the equipment into its power-on state.
///
/// Motors are configured and stopped, the chronometer is started and the bar graph cleared.
pub fn robot_init<E: Equipment>(ds: &DataStore, eqpt: &mut E) {
    let pwm_period_us = ds.motor_out.pwm_period_us();

    eqpt.init(pwm_period_us);
    eqpt.set_demands(MotorDems::STOPPED);
    eqpt.start();
    eqpt.set_bar(LightPattern(0));

    info!("Robot initialised, PWM period {} us", pwm_period_us);
}

/// Execute one control cycle against the given equipment.
pub fn control_cycle<E: Equipment>(ds: &mut DataStore, eqpt: &mut E) {
    // ---- INPUT ACQUISITION ----

    ds.pot = eqpt.read_potentiometer();
    ds.line_reading = eqpt.read_line_sensors();
    ds.jack_inserted = eqpt.jack_inserted();
    ds.button_pressed = eqpt.button_pressed();

    let leds = eqpt.sensor_leds();
    eqpt.set_sensor_leds(leds);
    eqpt.set_status_leds(ds.jack_inserted, ds.button_pressed);

    // ---- RUN CONTROL ----

    ds.run_ctrl_input = run_ctrl::InputData {
        jack_inserted: ds.jack_inserted,
        button_pressed: ds.button_pressed,
        pot: ds.pot,
        elapsed_s: eqpt.read(),
    };

    let (run_output, run_rpt) = ds.run_ctrl.step(&ds.run_ctrl_input);

    if run_rpt.prev_state != run_rpt.state {
        debug!("RunCtrl {:?} -> {:?}", run_rpt.prev_state, run_rpt.state);
    }

    for &cmd in run_output.chrono.iter() {
        eqpt.apply(cmd);
    }
    if let Some(cmd) = run_output.display {
        eqpt.command(cmd);
    }

    let enabled = run_output.enabled;
    ds.run_ctrl_output = Some(run_output);
    ds.run_ctrl_status_rpt = Some(run_rpt);

    // ---- TRAJECTORY CONTROL ----

    // Runs whatever the run state so the trajectory survives a stop
    let (traj_output, traj_rpt) = ds.traj_ctrl.step(&ds.line_reading);

    eqpt.set_bar(traj_output.pattern);

    ds.traj_ctrl_output = Some(traj_output);
    ds.traj_ctrl_status_rpt = Some(traj_rpt);

    // ---- MOTOR OUTPUT ----

    ds.motor_out_input = motor_out::InputData {
        speeds: traj_output.speeds,
        pot: ds.pot,
        enabled,
    };

    let (dems, motor_rpt) = ds.motor_out.step(&ds.motor_out_input);

    eqpt.set_demands(dems);

    ds.motor_out_output = dems;
    ds.motor_out_status_rpt = motor_rpt;
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
