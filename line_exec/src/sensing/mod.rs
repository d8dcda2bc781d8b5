//! # Sensing module
//!
//! Analog front-end of the line sensors. Five reflective sensors and the
//! speed potentiometer share one ADC through an analog multiplexer. A sensor
//! sees the line when its voltage is below the detection threshold.
//!
//! Sensors are indexed left to right. The automaton only uses four of them:
//! index 0 (far left), 1 (left), 3 (right) and 4 (far right). The centre
//! sensor is still sampled and shown on the sensor LEDs.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use robot_if::eqpt::{LineSensing, LineSensorReading, Mux};
use std::time::Duration;

pub use params::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of line sensors on the robot.
pub const NUM_LINE_SENSORS: usize = 5;

/// Sensor indexes feeding the automaton, `(far_left, left, right, far_right)`.
const FAR_LEFT_IDX: usize = 0;
const LEFT_IDX: usize = 1;
const RIGHT_IDX: usize = 3;
const FAR_RIGHT_IDX: usize = 4;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while configuring sensing.
#[derive(Debug, thiserror::Error)]
pub enum SensingError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Channel {0} does not exist on the multiplexer")]
    InvalidChannel(u8),

    #[error("Channel {0} is assigned more than once")]
    DuplicateChannel(u8),

    #[error("The detection threshold must be between 0 and 1, found {0}")]
    InvalidThreshold(f64),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Line sensors read through an analog multiplexer.
pub struct AnalogLineSensors<M> {
    mux: M,
    params: Params,

    /// Detection state of every sensor at the last sample
    detections: [bool; NUM_LINE_SENSORS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<M> AnalogLineSensors<M>
where
    M: Mux,
{
    /// Create a new front-end over the given multiplexer.
    pub fn new(mux: M, params: Params) -> Result<Self, SensingError> {
        params.validate()?;

        Ok(Self {
            mux,
            params,
            detections: [false; NUM_LINE_SENSORS],
        })
    }

    /// Create a new front-end, loading the parameters from the given file.
    pub fn from_params_file(mux: M, params_file: &str) -> Result<Self, SensingError> {
        let params: Params =
            util::params::load(params_file).map_err(SensingError::ParamLoadError)?;

        Self::new(mux, params)
    }

    /// Select a channel, let the multiplexer settle and read it.
    fn read_channel(&mut self, channel: u8) -> f64 {
        self.mux.select(channel);
        if self.params.settle_us > 0 {
            std::thread::sleep(Duration::from_micros(self.params.settle_us));
        }
        self.mux.read()
    }

    /// Detection state of every sensor at the last sample.
    pub fn detections(&self) -> &[bool; NUM_LINE_SENSORS] {
        &self.detections
    }

    /// Parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Access the multiplexer.
    pub fn mux_mut(&mut self) -> &mut M {
        &mut self.mux
    }

    /// Give back the multiplexer.
    pub fn into_inner(self) -> M {
        self.mux
    }
}

impl<M> LineSensing for AnalogLineSensors<M>
where
    M: Mux,
{
    fn read_line_sensors(&mut self) -> LineSensorReading {
        let channels = self.params.sensor_channels;

        for (i, &channel) in channels.iter().enumerate() {
            let voltage = self.read_channel(channel);
            self.detections[i] = voltage < self.params.detect_threshold;
            trace!("Sensor {} (channel {}): {:.3}", i, channel, voltage);
        }

        LineSensorReading::new(
            self.detections[FAR_LEFT_IDX],
            self.detections[LEFT_IDX],
            self.detections[RIGHT_IDX],
            self.detections[FAR_RIGHT_IDX],
        )
    }

    fn read_potentiometer(&mut self) -> f64 {
        let pot_channel = self.params.pot_channel;
        self.read_channel(pot_channel)
    }

    fn sensor_leds(&self) -> u8 {
        sensor_led_bits(&self.detections)
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// LED bit field for a set of detections, bit `i` set when sensor `i` sees
/// the line.
pub fn sensor_led_bits(detections: &[bool; NUM_LINE_SENSORS]) -> u8 {
    detections
        .iter()
        .enumerate()
        .filter(|(_, d)| **d)
        .fold(0u8, |leds, (i, _)| leds | (1 << i))
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
