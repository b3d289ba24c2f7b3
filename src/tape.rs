//! This module provides the working tape: a contiguous buffer of symbols
//! addressed by a signed logical index, where index 0 is the cell the head
//! starts on. The tape is logically infinite in both directions and is
//! materialized lazily with explicit left/right extension.

use crate::types::Symbol;

/// Cells added per extension before doubling kicks in.
const INITIAL_GROWTH: usize = 1024;

/// An owned, bidirectionally growable tape.
///
/// The growth amount doubles after every extension, so the amortized cost of
/// moving the head one cell at a time is constant. Reads outside the
/// materialized window are blank; writes materialize the window first.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<Symbol>,
    /// Logical index of `cells[0]`.
    start: isize,
    growth: usize,
}

impl Tape {
    /// Creates a tape whose cells `0..symbols.len()` hold the given symbols.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self {
            cells: symbols,
            start: 0,
            growth: INITIAL_GROWTH,
        }
    }

    /// Creates a fully materialized blank tape covering the logical window
    /// `min..=max`. Used by the retrace pass, whose footprint is known in
    /// advance and never grows.
    pub fn blank_window(min: isize, max: isize) -> Self {
        debug_assert!(min <= max);
        Self {
            cells: vec![Symbol::Blank; (max - min + 1) as usize],
            start: min,
            growth: INITIAL_GROWTH,
        }
    }

    /// Returns the number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell is materialized.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the logical index of the leftmost materialized cell.
    pub fn start(&self) -> isize {
        self.start
    }

    /// Returns the symbol at a logical index. Cells outside the materialized
    /// window read as blank.
    pub fn get(&self, ix: isize) -> Symbol {
        if ix < self.start {
            return Symbol::Blank;
        }
        self.cells
            .get((ix - self.start) as usize)
            .copied()
            .unwrap_or(Symbol::Blank)
    }

    /// Writes the symbol at a logical index, extending the materialized
    /// window if needed.
    pub fn set(&mut self, ix: isize, symbol: Symbol) {
        self.ensure(ix);
        self.cells[(ix - self.start) as usize] = symbol;
    }

    /// Extends the materialized window to contain a logical index. Each
    /// extension adds the current growth amount on the relevant side, then
    /// doubles it.
    pub fn ensure(&mut self, ix: isize) {
        if ix < self.start {
            let needed = (self.start - ix) as usize;
            let amount = self.growth.max(needed);
            self.grow_left(amount);
        } else if ix >= self.start + self.cells.len() as isize {
            let needed = (ix - self.start) as usize - self.cells.len() + 1;
            let amount = self.growth.max(needed);
            self.grow_right(amount);
        }
    }

    /// Prepends `amount` blank cells.
    fn grow_left(&mut self, amount: usize) {
        let mut cells = vec![Symbol::Blank; amount + self.cells.len()];
        cells[amount..].copy_from_slice(&self.cells);
        self.cells = cells;
        self.start -= amount as isize;
        self.growth *= 2;
    }

    /// Appends `amount` blank cells.
    fn grow_right(&mut self, amount: usize) {
        self.cells.resize(self.cells.len() + amount, Symbol::Blank);
        self.growth *= 2;
    }

    /// Collects the symbols in the logical window `lo..=hi` into characters;
    /// unmaterialized cells render as blanks.
    pub fn chars(&self, lo: isize, hi: isize) -> String {
        (lo..=hi).map(|ix| self.get(ix).as_char()).collect()
    }

    /// Returns the symbols in the logical window `lo..=hi`.
    pub fn window(&self, lo: isize, hi: isize) -> Vec<Symbol> {
        (lo..=hi).map(|ix| self.get(ix)).collect()
    }
}
