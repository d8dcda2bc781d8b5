//! Main line follower executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Initialise the equipment (motors stopped, chronometer started, bar cleared)
//!     - Main loop:
//!         - Stimulus script processing
//!         - Control cycle:
//!             - Line sensor and potentiometer acquisition
//!             - Run control processing
//!             - Trajectory control processing
//!             - Motor output processing
//!         - Cycle archiving
//!
//! On the host the equipment is simulated and driven by a stimulus script, the executable stops
//! once the script ends.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::{eyre, WrapErr}, Report};
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use line_lib::{
    cycle::{control_cycle, robot_init},
    data_store::DataStore,
    sensing,
    sim::{SimEqpt, Stimulus},
};
use robot_if::eqpt::{Chrono, MotorDems, Motors};
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{Pending, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "line_exec",
    about = "Line follower control loop running against simulated equipment"
)]
struct Opts {
    /// Stimulus script to run
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Most verbose level to log (info, debug or trace)
    #[structopt(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Run cycles back to back rather than in real time
    #[structopt(short, long)]
    fast: bool,

    /// Override the cycle period from exec.toml
    #[structopt(long)]
    cycle_period_s: Option<f64>,
}

/// Parameters of the executable itself.
#[derive(Debug, Deserialize)]
struct ExecParams {
    /// Target period of one cycle
    cycle_period_s: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("line_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opts.log_level, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Line Follower Executable\n");
    info!("Started at {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let exec_params: ExecParams = util::params::load("exec.toml")
        .wrap_err("Could not load exec params")?;

    let cycle_period_s = opts.cycle_period_s.unwrap_or(exec_params.cycle_period_s);
    if !(cycle_period_s > 0.0 && cycle_period_s.is_finite()) {
        return Err(eyre!(
            "The cycle period must be positive, found {} s", cycle_period_s
        ));
    }

    let sensing_params: sensing::Params = util::params::load("sensing.toml")
        .wrap_err("Could not load sensing params")?;

    info!("Exec parameters loaded, cycle period {:.3} s", cycle_period_s);

    // ---- INITIALISE STIMULUS SCRIPT ----

    let mut si: ScriptInterpreter<Stimulus> = ScriptInterpreter::new(&opts.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script {:?} lasts {:.02} s and contains {} stimuli\n",
        si.get_script_path().unwrap_or(opts.script.as_path()),
        si.get_duration(),
        si.get_num_entries()
    );

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.run_ctrl.init(())
        .wrap_err("Failed to initialise RunCtrl")?;
    info!("RunCtrl init complete");

    ds.traj_ctrl.init("traj_ctrl.toml")
        .wrap_err("Failed to initialise TrajCtrl")?;
    info!("TrajCtrl init complete");

    ds.motor_out.init("motor_out.toml")
        .wrap_err("Failed to initialise MotorOut")?;
    info!("MotorOut init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE EQUIPMENT ----

    let mut eqpt = SimEqpt::new(sensing_params)
        .wrap_err("Failed to initialise the simulated equipment")?;

    robot_init(&ds, &mut eqpt);

    let mut cycle_arch = Archiver::from_path(&session, "cycles.csv")
        .map_err(|e| eyre!("Failed to create the cycle archive: {}", e))?;

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Simulation time only advances with the cycles
        ds.cycle_start(ds.num_cycles as f64 * cycle_period_s);

        // ---- STIMULUS PROCESSING ----

        match si.get_pending(ds.sim_time_s) {
            Pending::None => (),
            Pending::Some(stims) => {
                for stim in stims.iter() {
                    eqpt.apply_stimulus(stim);
                }
            }
            // Exit if end of script reached
            Pending::EndOfScript => {
                info!("End of stimulus script reached, stopping");
                break
            }
        }

        // ---- CONTROL CYCLE ----

        control_cycle(&mut ds, &mut eqpt);

        eqpt.chrono.advance(cycle_period_s);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = cycle_arch.serialise(ds.cycle_record()) {
            warn!("Could not archive cycle {}: {}", ds.num_cycles, e);
        }

        // ---- CYCLE MANAGEMENT ----

        if !opts.fast {
            let cycle_dur = Instant::now() - cycle_start_instant;

            // Get sleep duration
            match Duration::from_secs_f64(cycle_period_s).checked_sub(cycle_dur) {
                Some(d) => {
                    ds.num_consec_cycle_overruns = 0;
                    thread::sleep(d);
                },
                None => {
                    warn!(
                        "Cycle overran by {:.06} s",
                        cycle_dur.as_secs_f64() - cycle_period_s
                    );
                    ds.num_consec_cycle_overruns += 1;
                }
            }
        }

        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    eqpt.set_demands(MotorDems::STOPPED);

    info!(
        "End of execution after {} cycles, run state {:?}, chronometer {:.2} s",
        ds.num_cycles,
        ds.run_ctrl.state(),
        eqpt.chrono.read()
    );

    Ok(())
}
