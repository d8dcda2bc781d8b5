//! # Line sensor interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// One consistent snapshot of the four line sensors used by trajectory control.
///
/// `true` means the line is detected under that sensor. The reading is `Copy` so it is always
/// handed over as a whole, never field by field.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSensorReading {
    pub far_left: bool,
    pub left: bool,
    pub right: bool,
    pub far_right: bool,
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The sensing collaborator.
pub trait LineSensing {
    /// Sample all line sensors at the same instant.
    fn read_line_sensors(&mut self) -> LineSensorReading;

    /// Read the speed potentiometer, normalised to [0, 1].
    fn read_potentiometer(&mut self) -> f64;

    /// Detection state of every physical sensor at the last sample, bit `i` set when sensor `i`
    /// saw the line.
    fn sensor_leds(&self) -> u8;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LineSensorReading {
    /// Build a reading from the sensor states, left to right.
    pub const fn new(far_left: bool, left: bool, right: bool, far_right: bool) -> Self {
        Self {
            far_left,
            left,
            right,
            far_right,
        }
    }

    /// Return the sensor states as a `(far_left, left, right, far_right)` tuple.
    pub fn as_tuple(&self) -> (bool, bool, bool, bool) {
        (self.far_left, self.left, self.right, self.far_right)
    }

    /// Iterate over all 16 possible readings.
    pub fn all() -> impl Iterator<Item = Self> {
        (0u8..16).map(|bits| {
            Self::new(bits & 0b1000 != 0, bits & 0b0100 != 0, bits & 0b0010 != 0, bits & 0b0001 != 0)
        })
    }
}

impl From<(bool, bool, bool, bool)> for LineSensorReading {
    fn from(t: (bool, bool, bool, bool)) -> Self {
        Self::new(t.0, t.1, t.2, t.3)
    }
}

impl std::fmt::Display for LineSensorReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = |b: bool| if b { 'T' } else { 'F' };
        write!(
            f,
            "({},{},{},{})",
            c(self.far_left),
            c(self.left),
            c(self.right),
            c(self.far_right)
        )
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
