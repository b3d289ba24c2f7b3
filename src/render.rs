//! This module renders decoded tables and trace frames as text. It contains
//! no decoding or simulation logic; it is a thin formatting layer over the
//! structures the codec and the engine produce.
//!
//! State numbers are printed in hexadecimal, as in the original Penrose
//! listings (which used binary).

use std::fmt::Write;

use crate::machine::Frame;
use crate::types::TransitionTable;

/// Renders a table listing: one line per `(state, symbol)` pair in
/// definition order, e.g. `    1 0 ->     0 1 STOP`.
pub fn table_listing(table: &TransitionTable) -> String {
    let mut out = String::new();
    for (state, read, action) in table.actions() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{:>5X} {} -> {:>5X} {} {}",
            state,
            read.as_char(),
            action.next_state,
            action.write.as_char(),
            action.direction.as_str()
        );
    }
    out
}

/// Renders one trace frame: step number, state (hex), and the tape with the
/// head cell bracketed. The initial frame (step 0) leaves the head
/// unbracketed, since no step has been taken yet.
///
/// Cells left of the head are spaced on the left, cells right of it on the
/// right, so the bracket never disturbs the column alignment.
pub fn frame_line(frame: &Frame) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>5} {:>5X}:", frame.step, frame.state);

    let bracket = if frame.step > 0 { '|' } else { ' ' };
    for symbol in &frame.tape[..frame.head] {
        out.push(' ');
        out.push(symbol.as_char());
    }
    out.push(bracket);
    out.push(frame.tape[frame.head].as_char());
    out.push(bracket);
    for symbol in &frame.tape[frame.head + 1..] {
        out.push(symbol.as_char());
        out.push(' ');
    }
    out
}
