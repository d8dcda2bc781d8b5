//! Control module interfaces
//!
//! Every control module of the line follower (run control, trajectory
//! control, motor output) is a state struct implementing [`State`]. The
//! executable owns one instance of each, initialises it once and then calls
//! `proc` exactly once per cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::convert::Infallible;

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// The module's internal state.
pub trait State {
    /// Data required during initialisation, usually the parameter file name.
    type InitData;
    /// An error which can occur during initialisation.
    type InitError;

    /// Data consumed by one cycle.
    type InputData;
    /// Data produced by one cycle.
    type OutputData;
    /// Diagnostics on one cycle.
    type StatusReport;
    /// An error which can occur during cyclic processing.
    type ProcError;

    /// Initialise the module, replacing any previous state.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError>;

    /// Process one cycle.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}

/// A module whose cyclic processing cannot fail.
pub trait InfallibleState: State<ProcError = Infallible> {
    /// Process one cycle, without the `Result` wrapping.
    fn step(&mut self, input_data: &Self::InputData) -> (Self::OutputData, Self::StatusReport) {
        match self.proc(input_data) {
            Ok(o) => o,
            Err(e) => match e {},
        }
    }
}

impl<T> InfallibleState for T where T: State<ProcError = Infallible> {}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    /// Counts the cycles it has processed.
    #[derive(Default)]
    struct Counter {
        count: u32,
    }

    impl State for Counter {
        type InitData = u32;
        type InitError = Infallible;
        type InputData = u32;
        type OutputData = u32;
        type StatusReport = bool;
        type ProcError = Infallible;

        fn init(&mut self, init_data: u32) -> Result<(), Infallible> {
            self.count = init_data;
            Ok(())
        }

        fn proc(&mut self, input_data: &u32) -> Result<(u32, bool), Infallible> {
            self.count += input_data;
            Ok((self.count, self.count > 10))
        }
    }

    #[test]
    fn test_step() {
        let mut c = Counter::default();
        c.init(5).unwrap();

        assert_eq!(c.step(&3), (8, false));
        assert_eq!(c.step(&3), (11, true));
    }
}
