//! # Simulated equipment
//!
//! In-memory collaborators used by the host executable, the benchmarks and the tests. Inputs are
//! set from [`Stimulus`] entries read out of a script, outputs are recorded so they can be
//! inspected after each cycle.
//!
//! The line sensors are simulated at the voltage level and read back through the real
//! [`AnalogLineSensors`] front-end.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Deserialize;

// Internal
use crate::sensing::{self, AnalogLineSensors, SensingError};
use robot_if::eqpt::{
    mux::MAX_MUX_CHANNEL, Buttons, Chrono, Display, DisplayCmd, LightPattern, LineSensing,
    LineSensorReading, MotorDems, Motors, Mux,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Voltage of a sensor above the line
const LINE_VOLTAGE: f64 = 0.1;

/// Voltage of a sensor above the floor
const FLOOR_VOLTAGE: f64 = 0.9;

/// Index of the centre sensor
const CENTRE_IDX: usize = 2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A change to the simulated inputs. Fields which are not given keep their previous value.
///
/// In a script:
///
/// ```text
/// 0.5: {"jack": false};
/// 1.0: {"sensors": [false, false, true, false], "pot": 0.8};
/// ```
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Stimulus {
    /// `(far_left, left, right, far_right)` line detections
    pub sensors: Option<(bool, bool, bool, bool)>,

    /// Centre sensor detection
    pub centre: Option<bool>,

    /// Start jack level
    pub jack: Option<bool>,

    /// Stop button level
    pub button: Option<bool>,

    /// Potentiometer position in [0, 1]
    pub pot: Option<f64>,
}

/// Stopwatch driven by simulation time rather than the wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimChrono {
    running: bool,
    elapsed_s: f64,
}

/// Analog multiplexer with fixed channel voltages.
#[derive(Debug, Default, Clone)]
pub struct SimMux {
    /// Voltage presented on each channel
    pub voltages: [f64; MAX_MUX_CHANNEL as usize + 1],

    selected: u8,
}

/// Everything the robot's display has been told to show.
#[derive(Debug, Default, Clone)]
pub struct DisplayRecord {
    /// Current bar graph pattern
    pub bar: LightPattern,

    /// Text currently on the value row, `None` once cleared
    pub text: Option<String>,

    /// Number of clear commands received
    pub num_clears: usize,

    /// Sensor LED bit field
    pub sensor_leds: u8,

    /// `(jack, button)` status LEDs
    pub status_leds: (bool, bool),
}

/// Full set of simulated equipment.
pub struct SimEqpt {
    pub sensors: AnalogLineSensors<SimMux>,

    pub jack_inserted: bool,
    pub button_pressed: bool,

    pub chrono: SimChrono,
    pub display: DisplayRecord,

    /// PWM period set by the last motor initialisation
    pub pwm_period_us: Option<u32>,

    /// Last demands sent to the motors
    pub motor_dems: MotorDems,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimChrono {
    /// Advance simulation time, only counted while the chronometer runs.
    pub fn advance(&mut self, dt_s: f64) {
        if self.running {
            self.elapsed_s += dt_s;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Chrono for SimChrono {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn reset(&mut self) {
        self.elapsed_s = 0.0;
    }

    fn read(&self) -> f64 {
        self.elapsed_s
    }
}

impl Mux for SimMux {
    fn select(&mut self, channel: u8) {
        self.selected = channel;
    }

    fn read(&mut self) -> f64 {
        self.voltages
            .get(self.selected as usize)
            .copied()
            .unwrap_or_default()
    }
}

impl SimEqpt {
    /// Robot on the start line: jack in, button at rest, centred on the line and the pot at
    /// half speed.
    pub fn new(sensing_params: sensing::Params) -> Result<Self, SensingError> {
        let mut eqpt = Self {
            sensors: AnalogLineSensors::new(SimMux::default(), sensing_params)?,
            jack_inserted: true,
            button_pressed: true,
            chrono: SimChrono::default(),
            display: DisplayRecord::default(),
            pwm_period_us: None,
            motor_dems: MotorDems::STOPPED,
        };

        eqpt.apply_stimulus(&Stimulus {
            sensors: Some((false, true, true, false)),
            centre: Some(true),
            pot: Some(0.5),
            ..Default::default()
        });

        Ok(eqpt)
    }

    /// Apply a scripted change to the inputs.
    pub fn apply_stimulus(&mut self, stim: &Stimulus) {
        debug!("Applying stimulus {:?}", stim);

        let params = *self.sensors.params();
        let mux = self.sensors.mux_mut();
        let mut set_sensor = |idx: usize, on_line: bool| {
            mux.voltages[params.sensor_channels[idx] as usize] = if on_line {
                LINE_VOLTAGE
            } else {
                FLOOR_VOLTAGE
            };
        };

        if let Some((fl, l, r, fr)) = stim.sensors {
            set_sensor(0, fl);
            set_sensor(1, l);
            set_sensor(3, r);
            set_sensor(4, fr);
        }
        if let Some(centre) = stim.centre {
            set_sensor(CENTRE_IDX, centre);
        }
        if let Some(pot) = stim.pot {
            mux.voltages[params.pot_channel as usize] = pot;
        }
        if let Some(jack) = stim.jack {
            self.jack_inserted = jack;
        }
        if let Some(button) = stim.button {
            self.button_pressed = button;
        }
    }
}

impl LineSensing for SimEqpt {
    fn read_line_sensors(&mut self) -> LineSensorReading {
        self.sensors.read_line_sensors()
    }

    fn read_potentiometer(&mut self) -> f64 {
        self.sensors.read_potentiometer()
    }

    fn sensor_leds(&self) -> u8 {
        self.sensors.sensor_leds()
    }
}

impl Buttons for SimEqpt {
    fn jack_inserted(&self) -> bool {
        self.jack_inserted
    }

    fn button_pressed(&self) -> bool {
        self.button_pressed
    }
}

impl Chrono for SimEqpt {
    fn start(&mut self) {
        self.chrono.start()
    }

    fn stop(&mut self) {
        self.chrono.stop()
    }

    fn reset(&mut self) {
        self.chrono.reset()
    }

    fn read(&self) -> f64 {
        self.chrono.read()
    }
}

impl Display for SimEqpt {
    fn set_bar(&mut self, pattern: LightPattern) {
        self.display.bar = pattern;
    }

    fn command(&mut self, cmd: DisplayCmd) {
        match cmd {
            DisplayCmd::Clear => {
                self.display.text = None;
                self.display.num_clears += 1;
            }
            DisplayCmd::Show { .. } => {
                self.display.text = cmd.text();
                trace!("Display: {:?}", self.display.text);
            }
        }
    }

    fn set_sensor_leds(&mut self, leds: u8) {
        self.display.sensor_leds = leds;
    }

    fn set_status_leds(&mut self, jack: bool, button: bool) {
        self.display.status_leds = (jack, button);
    }
}

impl Motors for SimEqpt {
    fn init(&mut self, pwm_period_us: u32) {
        self.pwm_period_us = Some(pwm_period_us);
    }

    fn set_demands(&mut self, dems: MotorDems) {
        self.motor_dems = dems;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use robot_if::eqpt::ChronoCmd;
    use util::script_interpreter::{Pending, ScriptInterpreter};

    fn eqpt() -> SimEqpt {
        SimEqpt::new(sensing::Params {
            settle_us: 0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_chrono() {
        let mut c = SimChrono::default();

        c.advance(1.0);
        assert_eq!(c.read(), 0.0);

        c.apply(ChronoCmd::Start);
        c.advance(0.25);
        c.advance(0.25);
        assert_eq!(c.read(), 0.5);

        c.apply(ChronoCmd::Stop);
        c.advance(1.0);
        assert_eq!(c.read(), 0.5);

        // Reset does not restart
        c.apply(ChronoCmd::Reset);
        assert_eq!(c.read(), 0.0);
        assert!(!c.is_running());
    }

    #[test]
    fn test_start_line() {
        let mut eqpt = eqpt();

        assert_eq!(
            eqpt.read_line_sensors(),
            LineSensorReading::new(false, true, true, false)
        );
        assert_eq!(eqpt.sensor_leds(), 0b01110);
        assert_eq!(eqpt.read_potentiometer(), 0.5);
    }

    #[test]
    fn test_stimulus_partial() {
        let mut eqpt = eqpt();

        let stim: Stimulus = serde_json::from_str(r#"{"jack": false, "pot": 0.8}"#).unwrap();
        eqpt.apply_stimulus(&stim);

        assert!(!eqpt.jack_inserted());
        assert!(eqpt.button_pressed());
        assert_eq!(eqpt.read_potentiometer(), 0.8);
        assert_eq!(
            eqpt.read_line_sensors(),
            LineSensorReading::new(false, true, true, false)
        );
    }

    #[test]
    fn test_stimulus_script() {
        let script = "\
            # Start then veer right\n\
            0.0: {\"jack\": false};\n\
            0.5: {\"sensors\": [false, false, true, false], \"centre\": false};\n";

        let mut si: ScriptInterpreter<Stimulus> = ScriptInterpreter::from_str(script).unwrap();
        let mut eqpt = eqpt();

        match si.get_pending(0.6) {
            Pending::Some(stims) => stims.iter().for_each(|s| eqpt.apply_stimulus(s)),
            p => panic!("Expected stimuli, got {:?}", p),
        }

        assert!(!eqpt.jack_inserted());
        assert_eq!(
            eqpt.read_line_sensors(),
            LineSensorReading::new(false, false, true, false)
        );
        assert_eq!(eqpt.sensor_leds(), 0b01000);
    }

    #[test]
    fn test_display_record() {
        let mut eqpt = eqpt();

        eqpt.command(DisplayCmd::Show {
            row: 1,
            col: 0,
            value: 0.25,
            precision: 3,
        });
        assert_eq!(eqpt.display.text.as_deref(), Some("0.250"));

        eqpt.command(DisplayCmd::Clear);
        assert_eq!(eqpt.display.text, None);
        assert_eq!(eqpt.display.num_clears, 1);
    }
}
