//! Parameters structure for sensing

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use robot_if::eqpt::mux::MAX_MUX_CHANNEL;
use serde::Deserialize;

use super::{SensingError, NUM_LINE_SENSORS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the analog sensing front-end.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Params {
    /// Multiplexer channel of each line sensor, left to right.
    pub sensor_channels: [u8; NUM_LINE_SENSORS],

    /// Multiplexer channel of the speed potentiometer.
    pub pot_channel: u8,

    /// Normalised voltage under which a sensor sees the line.
    pub detect_threshold: f64,

    /// Time to wait after selecting a channel before reading it.
    ///
    /// Units: microseconds
    pub settle_us: u64,
}

impl Params {
    /// Check the parameters are usable.
    pub fn validate(&self) -> Result<(), SensingError> {
        let mut used = [false; MAX_MUX_CHANNEL as usize + 1];

        for &channel in self.sensor_channels.iter().chain(std::iter::once(&self.pot_channel)) {
            if channel > MAX_MUX_CHANNEL {
                return Err(SensingError::InvalidChannel(channel));
            }
            if used[channel as usize] {
                return Err(SensingError::DuplicateChannel(channel));
            }
            used[channel as usize] = true;
        }

        if !(self.detect_threshold > 0.0 && self.detect_threshold < 1.0) {
            return Err(SensingError::InvalidThreshold(self.detect_threshold));
        }

        Ok(())
    }
}

impl Default for Params {
    /// Wiring of the robot's sensor board.
    fn default() -> Self {
        Params {
            sensor_channels: [4, 3, 2, 1, 0],
            pot_channel: 7,
            detect_threshold: 0.5,
            settle_us: 1,
        }
    }
}
