//! This module implements the execution engine. It simulates a decoded
//! machine against an initial tape, growing the working tape in both
//! directions as needed and enforcing the configured step and tape limits.
//!
//! Traced output is produced in two passes. The footprint of the run (how
//! far left and right the head ever travels) is unknowable until the machine
//! halts, but every trace line wants a fixed-width window; so a silent
//! discovery pass finds the footprint first, and a retrace over an exactly
//! sized tape emits the frames.

use serde::{Deserialize, Serialize};

use crate::tape::Tape;
use crate::types::{
    Action, Direction, RunError, StateId, Symbol, TransitionTable, DEFAULT_MAX_STEPS,
    DEFAULT_MAX_TAPE_LEN,
};

/// How much of a run to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Level 0: only the trimmed final tape.
    #[default]
    Quiet,
    /// Level 1: a frame for every step whose write changed the cell, plus
    /// the initial frame.
    Changes,
    /// Level 2: a frame for every step, plus the initial frame.
    Full,
}

impl Verbosity {
    /// Maps a numeric verbosity level to a mode. Levels above 2 clamp to
    /// `Full`.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Changes,
            _ => Verbosity::Full,
        }
    }
}

/// Resource limits and reporting mode for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// The run fails once the materialized tape exceeds this many cells.
    pub max_tape_len: usize,
    /// The run fails once this many steps have been taken without halting.
    pub max_steps: u64,
    pub verbosity: Verbosity,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_tape_len: DEFAULT_MAX_TAPE_LEN,
            max_steps: DEFAULT_MAX_STEPS,
            verbosity: Verbosity::Quiet,
        }
    }
}

/// One snapshot of the machine during a traced run: taken after the step's
/// write, before the head moves. `state` is the state the step was taken in
/// and `head` indexes into `tape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub step: u64,
    pub state: StateId,
    pub tape: Vec<Symbol>,
    pub head: usize,
}

/// The result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// Quiet mode: the maximal contiguous non-blank region of the final
    /// tape containing the final head position.
    Tape(String),
    /// Traced mode: the emitted frames, all over the same fixed-width
    /// window.
    Trace(Vec<Frame>),
}

/// Runs a machine against an initial tape.
///
/// Execution always begins in state 0 with the head on the first tape cell.
/// Each step reads the cell under the head (blanks read as 0), selects the
/// current state's action for that symbol, writes the action's bit, and
/// either stops or moves one cell and enters the next state. `Stop` is the
/// only halting condition; the step and tape limits in `config` bound runs
/// that would otherwise never end.
///
/// # Errors
///
/// Fails fast with a [`RunError`] if the tape contains a character other
/// than `0`/`1` or if a resource limit is hit. A failed run produces no
/// partial output.
pub fn run(
    table: &TransitionTable,
    initial_tape: &str,
    config: &RunConfig,
) -> Result<Output, RunError> {
    let symbols = parse_tape(initial_tape)?;

    let mut discovery = Machine::new(table, &symbols);
    discovery.run_to_halt(config)?;

    match config.verbosity {
        Verbosity::Quiet => Ok(Output::Tape(discovery.trimmed_output())),
        verbosity => Ok(Output::Trace(retrace(
            table,
            &symbols,
            discovery.min_head,
            discovery.max_head,
            verbosity,
        ))),
    }
}

/// Validates the initial tape string.
fn parse_tape(initial_tape: &str) -> Result<Vec<Symbol>, RunError> {
    initial_tape
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '0' => Ok(Symbol::Zero),
            '1' => Ok(Symbol::One),
            _ => Err(RunError::InvalidTapeCharacter(i)),
        })
        .collect()
}

/// The mutable state of one executing machine.
struct Machine<'a> {
    table: &'a TransitionTable,
    tape: Tape,
    head: isize,
    state: StateId,
    step: u64,
    /// Leftmost head position ever reached.
    min_head: isize,
    /// Rightmost head position ever reached, at least the end of the
    /// initial tape.
    max_head: isize,
}

impl<'a> Machine<'a> {
    fn new(table: &'a TransitionTable, initial: &[Symbol]) -> Self {
        Self {
            table,
            tape: Tape::new(initial.to_vec()),
            head: 0,
            state: 0,
            step: 0,
            min_head: 0,
            max_head: (initial.len() as isize - 1).max(0),
        }
    }

    /// Returns the current state's action for a read symbol.
    fn select(&self, symbol: Symbol) -> Action {
        let state = self.table.state(self.state);
        if symbol.reads_as_one() {
            state.on_one
        } else {
            state.on_zero
        }
    }

    /// Runs until the machine stops or a limit trips, tracking the head's
    /// footprint. Both limits are checked before each step.
    fn run_to_halt(&mut self, config: &RunConfig) -> Result<(), RunError> {
        loop {
            if self.step == config.max_steps {
                return Err(RunError::StepLimitExceeded(config.max_steps));
            }
            self.step += 1;
            if self.tape.len() > config.max_tape_len {
                return Err(RunError::TapeLimitExceeded(config.max_tape_len));
            }

            let action = self.select(self.tape.get(self.head));
            self.tape.set(self.head, action.write.into());
            match action.direction {
                Direction::Stop => return Ok(()),
                Direction::Right => self.head += 1,
                Direction::Left => self.head -= 1,
            }
            self.min_head = self.min_head.min(self.head);
            self.max_head = self.max_head.max(self.head);
            self.tape.ensure(self.head);
            self.state = action.next_state;
        }
    }

    /// Extracts the quiet-mode output: the maximal contiguous non-blank run
    /// of cells containing the final head position. The head cell itself was
    /// just written, so it is never blank.
    fn trimmed_output(&self) -> String {
        let mut lo = self.head;
        while self.tape.get(lo - 1) != Symbol::Blank {
            lo -= 1;
        }
        let mut hi = self.head;
        while self.tape.get(hi + 1) != Symbol::Blank {
            hi += 1;
        }
        self.tape.chars(lo, hi)
    }
}

/// Re-runs a machine whose footprint is already known over an exactly sized
/// window, emitting frames per the verbosity mode. The retrace revisits only
/// cells inside the window and takes exactly the steps the discovery pass
/// proved to be within limits, so no limit is re-checked here.
fn retrace(
    table: &TransitionTable,
    initial: &[Symbol],
    min: isize,
    max: isize,
    verbosity: Verbosity,
) -> Vec<Frame> {
    let mut tape = Tape::blank_window(min, max);
    for (i, symbol) in initial.iter().enumerate() {
        tape.set(i as isize, *symbol);
    }

    let mut head: isize = 0;
    let mut state: StateId = 0;
    let mut step: u64 = 0;
    let mut frames = vec![snapshot(&tape, min, max, step, state, head)];

    loop {
        step += 1;
        let current = tape.get(head);
        let action = if current.reads_as_one() {
            table.state(state).on_one
        } else {
            table.state(state).on_zero
        };
        let written: Symbol = action.write.into();
        tape.set(head, written);

        // A blank overwritten with 0 counts as a change: the cell becomes
        // visually distinct even though the automaton cannot tell.
        if verbosity == Verbosity::Full || written != current {
            frames.push(snapshot(&tape, min, max, step, state, head));
        }

        match action.direction {
            Direction::Stop => break,
            Direction::Right => head += 1,
            Direction::Left => head -= 1,
        }
        state = action.next_state;
    }

    frames
}

fn snapshot(tape: &Tape, min: isize, max: isize, step: u64, state: StateId, head: isize) -> Frame {
    Frame {
        step,
        state,
        tape: tape.window(min, max),
        head: (head - min) as usize,
    }
}
