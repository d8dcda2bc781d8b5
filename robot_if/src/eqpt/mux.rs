//! # Analog multiplexer interface
//!
//! The line sensors and the potentiometer share one ADC input through an 8 channel analog
//! multiplexer.

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Highest channel number the multiplexer can select.
pub const MAX_MUX_CHANNEL: u8 = 7;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// An analog multiplexer in front of a single ADC.
pub trait Mux {
    /// Route the given channel to the ADC.
    fn select(&mut self, channel: u8);

    /// Read the currently selected channel, normalised to [0, 1].
    fn read(&mut self) -> f64;
}
