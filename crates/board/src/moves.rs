//! Move encoding: one of the 81 cells, addressed as
//! `(global_row, global_col, local_row, local_col)`.
//!
//! The text form is four 0-indexed, row-major integers separated by any
//! non-digit characters, e.g. `1 1 0 2` or `(1,1),(0,2)`.

use std::fmt;
use std::str::FromStr;

use uttt_core::UtttError;

use crate::{DIM, NUM_CELLS};

/// A single placement on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    gr: u8,
    gc: u8,
    lr: u8,
    lc: u8,
}

impl Move {
    /// Create a move, returning `None` if any coordinate is out of range.
    pub fn new(gr: usize, gc: usize, lr: usize, lc: usize) -> Option<Self> {
        if gr < DIM && gc < DIM && lr < DIM && lc < DIM {
            Some(Self::new_unchecked(gr, gc, lr, lc))
        } else {
            None
        }
    }

    /// Create a move without range checks.
    ///
    /// The caller guarantees every coordinate is below [`DIM`].
    #[inline]
    pub const fn new_unchecked(gr: usize, gc: usize, lr: usize, lc: usize) -> Self {
        Self {
            gr: gr as u8,
            gc: gc as u8,
            lr: lr as u8,
            lc: lc as u8,
        }
    }

    /// Coordinates of the sub-board this move is played in.
    #[inline]
    pub const fn global(self) -> (usize, usize) {
        (self.gr as usize, self.gc as usize)
    }

    /// Coordinates of the cell inside its sub-board. This is also the
    /// sub-board the opponent is sent to.
    #[inline]
    pub const fn local(self) -> (usize, usize) {
        (self.lr as usize, self.lc as usize)
    }

    /// Flat cell index in `0..81`, row-major over `(gr, gc, lr, lc)`.
    #[inline]
    pub const fn index(self) -> usize {
        ((self.gr as usize * DIM + self.gc as usize) * DIM + self.lr as usize) * DIM
            + self.lc as usize
    }

    /// Inverse of [`Move::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_CELLS {
            return None;
        }
        let lc = index % DIM;
        let lr = (index / DIM) % DIM;
        let gc = (index / (DIM * DIM)) % DIM;
        let gr = index / (DIM * DIM * DIM);
        Some(Self::new_unchecked(gr, gc, lr, lc))
    }

    /// Iterate over all 81 cells in index order.
    pub fn all() -> impl Iterator<Item = Move> {
        (0..NUM_CELLS).filter_map(Move::from_index)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.gr, self.gc, self.lr, self.lc)
    }
}

impl FromStr for Move {
    type Err = UtttError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() != 4 {
            return Err(UtttError::InvalidMove(format!(
                "expected 4 coordinates, found {} in {:?}",
                parts.len(),
                s
            )));
        }

        let mut coords = [0usize; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| UtttError::InvalidMove(format!("bad coordinate {:?}", part)))?;
        }

        Move::new(coords[0], coords[1], coords[2], coords[3]).ok_or_else(|| {
            UtttError::InvalidMove(format!(
                "coordinates must be in 0..{}, got {:?}",
                DIM, coords
            ))
        })
    }
}
