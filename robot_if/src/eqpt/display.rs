//! # Display interface
//!
//! The robot carries an LCD, an 8 segment bar graph showing the trajectory state, five LEDs
//! mirroring the line sensors and two status LEDs mirroring the jack and the stop button.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Bar graph pattern, one bit per segment.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightPattern(pub u8);

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command for the text display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum DisplayCmd {
    /// Clear the whole display
    Clear,

    /// Show a number at the given position with a fixed number of decimals.
    Show {
        row: u8,
        col: u8,
        value: f64,
        precision: usize,
    },
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The display collaborator. Every call is fire-and-forget.
pub trait Display {
    /// Set the bar graph pattern.
    fn set_bar(&mut self, pattern: LightPattern);

    /// Execute a text display command.
    fn command(&mut self, cmd: DisplayCmd);

    /// Mirror the line sensors, bit `i` set when sensor `i` sees the line.
    fn set_sensor_leds(&mut self, leds: u8);

    /// Mirror the jack and the stop button.
    fn set_status_leds(&mut self, jack: bool, button: bool);
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DisplayCmd {
    /// Format the text shown by a `Show` command, five characters wide.
    ///
    /// Returns `None` for `Clear`.
    pub fn text(&self) -> Option<String> {
        match self {
            DisplayCmd::Clear => None,
            DisplayCmd::Show {
                value, precision, ..
            } => Some(format!("{:5.*}", precision, value)),
        }
    }
}

impl std::fmt::Display for LightPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08b}", self.0)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
