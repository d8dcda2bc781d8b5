//! # Button and jack interface

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The button/jack collaborator. Both reads are instantaneous digital levels.
pub trait Buttons {
    /// `true` while the start jack is plugged in. Pulling the jack starts a run.
    fn jack_inserted(&self) -> bool;

    /// `true` while the stop button is at rest. Releasing the line low stops a run.
    fn button_pressed(&self) -> bool;
}
