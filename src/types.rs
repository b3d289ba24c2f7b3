//! This module defines the core data structures and types used throughout the
//! decoder and simulator: tape symbols, machine actions and states, the
//! transition table, and the error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The default maximum number of cells the working tape may materialize.
pub const DEFAULT_MAX_TAPE_LEN: usize = 1 << 20;
/// The default maximum number of simulation steps.
pub const DEFAULT_MAX_STEPS: u64 = 1 << 20;

/// Identifies a machine state. States are dense and 0-based; state 0 is
/// always the initial state.
pub type StateId = usize;

/// A binary value as written to the tape or used in the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Returns the character rendering of this bit.
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

/// A single tape cell.
///
/// A `Blank` cell selects the same transition as `Zero` but is rendered as a
/// space, so traces distinguish cells the machine never touched from explicit
/// zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    Blank,
    Zero,
    One,
}

impl Symbol {
    /// Returns the character rendering of this cell.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Blank => ' ',
            Symbol::Zero => '0',
            Symbol::One => '1',
        }
    }

    /// Returns true if the cell reads as `1` for transition selection.
    /// Blank cells read as `0`.
    pub fn reads_as_one(self) -> bool {
        self == Symbol::One
    }
}

impl From<Bit> for Symbol {
    fn from(bit: Bit) -> Self {
        match bit {
            Bit::Zero => Symbol::Zero,
            Bit::One => Symbol::One,
        }
    }
}

/// The head movement prescribed by an action. `Stop` halts the machine and
/// is its only halting condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Stop,
}

impl Direction {
    /// Returns the token rendering used in table listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Stop => "STOP",
        }
    }
}

/// What a state does after reading a given tape symbol: the value to write,
/// where to move the head, and which state to enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The bit written to the cell under the head.
    pub write: Bit,
    /// The head movement after writing.
    pub direction: Direction,
    /// The state entered after moving. Ignored when `direction` is `Stop`.
    pub next_state: StateId,
}

/// A single machine state: its identity and its response to each readable
/// symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    /// The action taken after reading `0` (or a blank).
    pub on_zero: Action,
    /// The action taken after reading `1`.
    pub on_one: Action,
}

/// The decoded machine: a dense, immutable sequence of states indexed by
/// `StateId`.
///
/// Invariant: every `Action::next_state` inside the table is a valid index.
/// This is established by the codec at decode time; execution never needs to
/// re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTable {
    states: Vec<State>,
}

impl TransitionTable {
    /// Builds a table from a dense state sequence.
    ///
    /// Intended for the codec and for tests; arbitrary callers must uphold
    /// the `next_state` invariant themselves.
    pub fn new(states: Vec<State>) -> Self {
        Self { states }
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the table has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range, which cannot happen for ids taken
    /// from actions of this table.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// Returns the states in id order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns every action in definition order as `(state, read, action)`,
    /// i.e. state 0's `on_zero`, state 0's `on_one`, state 1's `on_zero`, ...
    pub fn actions(&self) -> impl Iterator<Item = (StateId, Bit, &Action)> {
        self.states.iter().flat_map(|s| {
            [(s.id, Bit::Zero, &s.on_zero), (s.id, Bit::One, &s.on_one)]
        })
    }
}

/// Errors rejecting a machine specification during decoding.
///
/// All decode errors are fatal for the invocation; there is no partial
/// recovery and no attempt to execute a partially decoded machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The specification contains a character other than `0` or `1`.
    #[error("invalid machine specification at index {0}; encoding must consist of 0s and 1s only")]
    InvalidCharacter(usize),
    /// The specification contains a run of more than four consecutive `1`s.
    #[error("invalid machine specification at index {0}; encoding contains more than four consecutive 1s")]
    InvalidRunLength(usize),
    /// The specification defines an odd number of actions.
    #[error("invalid machine specification; every state must define what to do after reading either a 0 or a 1")]
    IncompleteStateDefinition,
    /// An action targets a state beyond the last defined one.
    #[error("invalid machine specification; state {0:X} has a transition to non-existent state {1:X}")]
    UndefinedStateReference(StateId, StateId),
}

/// Errors rejecting a transition table the encoding cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The implicit leading `110` forces state 0 to respond to `0` by
    /// writing 0, moving right, and staying in state 0.
    #[error("table is not encodable; state 0 must respond to 0 with \"0 R 0\"")]
    UnencodableFirstAction,
    /// The implicit trailing `110` forces the final action to move right.
    #[error("table is not encodable; the final action must move right")]
    UnencodableLastAction,
}

/// Errors aborting a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The initial tape contains a character other than `0` or `1`.
    #[error("invalid tape at index {0}; must consist of 0s and 1s only")]
    InvalidTapeCharacter(usize),
    /// The machine did not halt within the configured number of steps.
    #[error("exceeded maximum number of steps ({0})")]
    StepLimitExceeded(u64),
    /// The working tape grew beyond the configured number of cells.
    #[error("exceeded maximum length of working tape ({0})")]
    TapeLimitExceeded(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let stop = Direction::Stop;

        let left_json = serde_json::to_string(&left).unwrap();
        let stop_json = serde_json::to_string(&stop).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(stop_json, "\"Stop\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let stop_deserialized: Direction = serde_json::from_str(&stop_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(stop, stop_deserialized);
    }

    #[test]
    fn test_table_round_trips_through_json() {
        let table = TransitionTable::new(vec![State {
            id: 0,
            on_zero: Action {
                write: Bit::Zero,
                direction: Direction::Right,
                next_state: 0,
            },
            on_one: Action {
                write: Bit::One,
                direction: Direction::Stop,
                next_state: 0,
            },
        }]);

        let json = serde_json::to_string(&table).unwrap();
        let back: TransitionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table, back);
    }

    #[test]
    fn test_blank_reads_as_zero() {
        assert!(!Symbol::Blank.reads_as_one());
        assert!(!Symbol::Zero.reads_as_one());
        assert!(Symbol::One.reads_as_one());
        assert_eq!(Symbol::Blank.as_char(), ' ');
        assert_eq!(Symbol::Zero.as_char(), '0');
    }

    #[test]
    fn test_actions_iterates_in_definition_order() {
        let a = Action {
            write: Bit::Zero,
            direction: Direction::Right,
            next_state: 0,
        };
        let b = Action {
            write: Bit::One,
            direction: Direction::Left,
            next_state: 1,
        };
        let table = TransitionTable::new(vec![
            State {
                id: 0,
                on_zero: a,
                on_one: b,
            },
            State {
                id: 1,
                on_zero: b,
                on_one: a,
            },
        ]);

        let order: Vec<(StateId, Bit)> = table.actions().map(|(s, r, _)| (s, r)).collect();
        assert_eq!(
            order,
            vec![
                (0, Bit::Zero),
                (0, Bit::One),
                (1, Bit::Zero),
                (1, Bit::One)
            ]
        );
    }

    #[test]
    fn test_error_display() {
        let error = DecodeError::UndefinedStateReference(3, 26);
        let msg = format!("{}", error);
        assert!(msg.contains("state 3"));
        assert!(msg.contains("1A"));

        let error = RunError::StepLimitExceeded(1024);
        assert!(format!("{}", error).contains("1024"));
    }
}
