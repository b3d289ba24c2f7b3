//! This module embeds a small registry of known-good machine encodings so
//! the CLI and examples can run named machines without carrying the
//! encodings around.

use crate::codec::decode;
use crate::types::TransitionTable;

/// A named built-in machine encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub encoding: &'static str,
}

impl ProgramInfo {
    /// Decodes this program's encoding.
    ///
    /// # Panics
    ///
    /// Panics if the embedded encoding is invalid, which the registry test
    /// rules out.
    pub fn table(&self) -> TransitionTable {
        decode(self.encoding).unwrap_or_else(|e| {
            panic!("built-in program {} has an invalid encoding: {e}", self.name)
        })
    }
}

lazy_static::lazy_static! {
    /// The built-in machines.
    pub static ref PROGRAMS: Vec<ProgramInfo> = vec![
        ProgramInfo {
            name: "un+1",
            description: "Penrose's UN+1 (machine 177642): adds one to a unary number",
            encoding: "101011010111101010",
        },
        ProgramInfo {
            name: "un-erase",
            description: "erases a block of 1s, leaving zeros",
            encoding: "10011011110100",
        },
        ProgramInfo {
            name: "un-parity",
            description: "erases a block of 1s and writes its parity after it",
            encoding: "1001101011110100011011110100",
        },
    ];
}

/// Looks up a built-in program by name.
pub fn find(name: &str) -> Option<&'static ProgramInfo> {
    PROGRAMS.iter().find(|p| p.name == name)
}
