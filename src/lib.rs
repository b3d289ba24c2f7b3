//! This crate decodes the self-delimiting binary Turing machine encoding
//! from Penrose's "The Emperor's New Mind" and simulates the decoded
//! machines. It includes the codec, the execution engine with its silent and
//! traced modes, text rendering for listings and traces, and a registry of
//! built-in machine encodings.

pub mod codec;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod render;
pub mod tape;
pub mod types;

/// Re-exports the encoding functions from the codec module.
pub use codec::{decode, encode};
/// Re-exports the input resolution helper from the loader module.
pub use loader::resolve_input;
/// Re-exports the execution entry point and its configuration types.
pub use machine::{run, Frame, Output, RunConfig, Verbosity};
/// Re-exports the text renderers.
pub use render::{frame_line, table_listing};
/// Re-exports the core data model and error types.
pub use types::{
    Action, Bit, DecodeError, Direction, EncodeError, RunError, State, StateId, Symbol,
    TransitionTable, DEFAULT_MAX_STEPS, DEFAULT_MAX_TAPE_LEN,
};
