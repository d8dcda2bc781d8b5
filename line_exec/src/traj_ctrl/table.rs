//! Trajectory states and their transition table

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use robot_if::eqpt::{LightPattern, LineSensorReading};
use serde::Serialize;

// Internal
use self::TrajState as S;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The trajectory the robot is currently following.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrajState {
    /// On the line, both wheels at the same speed
    Straight,
    /// Drifted right, correct towards the left
    CorrectLeft,
    /// Drifted left, correct towards the right
    CorrectRight,
    /// Sharp left turn
    TurnLeft,
    /// Sharp right turn
    TurnRight,
    /// Leaving a sharp left turn
    ExitTurnLeft,
    /// Leaving a sharp right turn
    ExitTurnRight,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One row of the transition table.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// State in which the row applies
    pub from: TrajState,

    /// Exact sensor pattern which triggers the transition
    pub on: LineSensorReading,

    /// State entered when the row matches
    pub to: TrajState,
}

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const F: bool = false;
const T: bool = true;

const fn row(from: TrajState, on: (bool, bool, bool, bool), to: TrajState) -> Transition {
    Transition {
        from,
        on: LineSensorReading::new(on.0, on.1, on.2, on.3),
        to,
    }
}

/// The transition table.
///
/// Patterns are `(far_left, left, right, far_right)`. Rows are evaluated in
/// order and the first match for the current state wins.
pub const TRANSITIONS: &[Transition] = &[
    row(S::Straight, (F, F, T, F), S::CorrectRight),
    row(S::Straight, (F, T, F, F), S::CorrectLeft),
    row(S::CorrectLeft, (F, T, T, F), S::Straight),
    row(S::CorrectLeft, (F, F, T, F), S::CorrectRight),
    row(S::CorrectLeft, (T, F, F, F), S::TurnLeft),
    row(S::CorrectRight, (F, T, T, F), S::Straight),
    row(S::CorrectRight, (F, T, F, F), S::CorrectLeft),
    row(S::CorrectRight, (F, F, F, T), S::TurnRight),
    row(S::TurnLeft, (F, T, F, F), S::CorrectLeft),
    row(S::TurnLeft, (F, F, F, F), S::ExitTurnLeft),
    row(S::TurnRight, (F, F, T, F), S::CorrectRight),
    row(S::TurnRight, (F, F, F, F), S::ExitTurnRight),
    row(S::ExitTurnLeft, (T, F, F, F), S::TurnLeft),
    row(S::ExitTurnRight, (F, F, F, T), S::TurnRight),
];

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the state to move to from `state` given a sensor reading.
///
/// Returns `None` when no row matches, in which case the current state must
/// be held.
pub fn next_state(state: TrajState, reading: &LineSensorReading) -> Option<TrajState> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == state)
        .find(|t| t.on == *reading)
        .map(|t| t.to)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajState {
    /// All states, in table order.
    pub const ALL: [TrajState; 7] = [
        TrajState::Straight,
        TrajState::CorrectLeft,
        TrajState::CorrectRight,
        TrajState::TurnLeft,
        TrajState::TurnRight,
        TrajState::ExitTurnLeft,
        TrajState::ExitTurnRight,
    ];

    /// Bar graph pattern shown while in this state.
    pub fn pattern(&self) -> LightPattern {
        LightPattern(match self {
            TrajState::Straight => 0x18,
            TrajState::CorrectLeft => 0x20,
            TrajState::CorrectRight => 0x04,
            TrajState::TurnLeft => 0x40,
            TrajState::TurnRight => 0x02,
            TrajState::ExitTurnLeft => 0x80,
            TrajState::ExitTurnRight => 0x01,
        })
    }
}

impl Default for TrajState {
    fn default() -> Self {
        TrajState::Straight
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn r(fl: bool, l: bool, rt: bool, fr: bool) -> LineSensorReading {
        LineSensorReading::new(fl, l, rt, fr)
    }

    #[test]
    fn test_listed_transitions() {
        use TrajState::*;

        assert_eq!(next_state(Straight, &r(F, F, T, F)), Some(CorrectRight));
        assert_eq!(next_state(Straight, &r(F, T, F, F)), Some(CorrectLeft));
        assert_eq!(next_state(CorrectLeft, &r(F, T, T, F)), Some(Straight));
        assert_eq!(next_state(CorrectLeft, &r(F, F, T, F)), Some(CorrectRight));
        assert_eq!(next_state(CorrectLeft, &r(T, F, F, F)), Some(TurnLeft));
        assert_eq!(next_state(CorrectRight, &r(F, T, T, F)), Some(Straight));
        assert_eq!(next_state(CorrectRight, &r(F, T, F, F)), Some(CorrectLeft));
        assert_eq!(next_state(CorrectRight, &r(F, F, F, T)), Some(TurnRight));
        assert_eq!(next_state(TurnLeft, &r(F, T, F, F)), Some(CorrectLeft));
        assert_eq!(next_state(TurnLeft, &r(F, F, F, F)), Some(ExitTurnLeft));
        assert_eq!(next_state(TurnRight, &r(F, F, T, F)), Some(CorrectRight));
        assert_eq!(next_state(TurnRight, &r(F, F, F, F)), Some(ExitTurnRight));
        assert_eq!(next_state(ExitTurnLeft, &r(T, F, F, F)), Some(TurnLeft));
        assert_eq!(next_state(ExitTurnRight, &r(F, F, F, T)), Some(TurnRight));
    }

    #[test]
    fn test_unlisted_patterns_hold() {
        for state in TrajState::ALL.iter() {
            let listed: HashSet<LineSensorReading> = TRANSITIONS
                .iter()
                .filter(|t| t.from == *state)
                .map(|t| t.on)
                .collect();

            for reading in LineSensorReading::all().filter(|r| !listed.contains(r)) {
                assert_eq!(
                    next_state(*state, &reading),
                    None,
                    "{:?} should hold on {}",
                    state,
                    reading
                );
            }
        }
    }

    #[test]
    fn test_degenerate_patterns_hold() {
        for state in TrajState::ALL.iter() {
            assert_eq!(next_state(*state, &r(T, T, T, T)), None);
            assert_eq!(next_state(*state, &r(T, F, F, T)), None);
        }
    }

    #[test]
    fn test_no_ambiguous_rows() {
        // Every (state, pattern) pair appears once, so first-match order only
        // matters if the table is edited.
        let mut seen = HashSet::new();
        for t in TRANSITIONS.iter() {
            assert!(seen.insert((t.from, t.on)), "duplicate row {:?}", t);
        }
    }

    #[test]
    fn test_every_state_reachable() {
        let targets: HashSet<TrajState> = TRANSITIONS.iter().map(|t| t.to).collect();
        for state in TrajState::ALL.iter() {
            assert!(targets.contains(state), "{:?} cannot be reached", state);
        }
    }

    #[test]
    fn test_patterns_distinct() {
        let patterns: HashSet<LightPattern> = TrajState::ALL.iter().map(|s| s.pattern()).collect();
        assert_eq!(patterns.len(), TrajState::ALL.len());
        assert_eq!(TrajState::Straight.pattern(), LightPattern(0x18));
        assert_eq!(TrajState::ExitTurnRight.pattern(), LightPattern(0x01));
    }
}
