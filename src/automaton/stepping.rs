//! Cyclic-dominance stepping over a toroidal grid.
//!
//! For every cell, independently:
//! - Sample the cell and its four axis neighbours (up, down, left, right), wrapping at the edges
//! - Pick the challenger: the first neighbour that beats the cell, scanning cyclically from a
//!   start position taken from the cell's roll
//! - The challenger takes the cell iff the roll is below the acceptance threshold
//!
//! Reads come only from FRONT, writes go only to BACK, so rows can be computed in any order.

use rayon::prelude::*;

use super::field::RandomField;
use super::grid::{Grid, Neighbors};
use super::species::Species;

/// Acceptance threshold when a species attacks an occupied cell.
pub const PREDATION_THRESHOLD: f32 = 0.9;

/// Acceptance threshold when a species spreads into an empty cell.
pub const COLONISATION_THRESHOLD: f32 = 0.6;

/// First neighbour scanned for a given roll. A roll of 0 starts at "up".
#[inline]
pub fn scan_start(roll: f32) -> usize {
    (roll * 4096.0) as usize & 3
}

/// The neighbour code that challenges `own`, if any.
#[inline]
pub fn challenger(own: Species, neighbors: &Neighbors, roll: f32) -> Option<Species> {
    let start = scan_start(roll);
    (0..4)
        .map(|i| neighbors[(start + i) & 3])
        .filter_map(Species::from_code)
        .find(|candidate| candidate.beats(own))
}

/// Next code for one cell.
#[inline]
pub fn next_code(own: u8, neighbors: &Neighbors, roll: f32) -> u8 {
    // Unknown codes are inert
    let Some(species) = Species::from_code(own) else {
        return own;
    };

    let threshold = if species.is_empty() {
        COLONISATION_THRESHOLD
    } else {
        PREDATION_THRESHOLD
    };

    match challenger(species, neighbors, roll) {
        Some(winner) if roll < threshold => winner.code(),
        _ => own,
    }
}

/// Compute the next generation of `front` into `back`, one rayon task per row.
///
/// Dimensions must already agree; the caller checks them before dispatch.
pub fn step_into(front: &Grid, random: &RandomField, back: &mut Grid) {
    let width = front.width();
    if width == 0 {
        return;
    }

    back.cells_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, cell) in out.iter_mut().enumerate() {
                let own = front.cells()[front.index_of(row, col)];
                let neighbors = front.neighbors(row, col);
                *cell = next_code(own, &neighbors, random.roll(row, col));
            }
        });
}
