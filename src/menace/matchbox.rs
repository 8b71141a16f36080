//! Matchbox implementation for MENACE

use serde::{Deserialize, Serialize};

use crate::utils::entropy_from_weights;

/// Bead counts for one canonical state, one slot per cell.
///
/// Every cell has a slot even when it is occupied in the state; those slots
/// are kept but never drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matchbox {
    beads: [u32; 9],
}

impl Matchbox {
    /// Create a matchbox with every slot at `initial_beads`.
    pub fn new(initial_beads: u32) -> Self {
        Matchbox {
            beads: [initial_beads; 9],
        }
    }

    /// Get the bead count for a position
    pub fn bead_count(&self, position: usize) -> u32 {
        self.beads[position]
    }

    pub fn beads(&self) -> &[u32; 9] {
        &self.beads
    }

    pub fn set_bead_count(&mut self, position: usize, count: u32) {
        self.beads[position] = count;
    }

    /// Positions from `legal` that still hold beads, with their counts.
    pub fn candidates(&self, legal: &[usize]) -> Vec<(usize, u32)> {
        legal
            .iter()
            .map(|&pos| (pos, self.beads[pos]))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    /// Refill every legal position to `initial_beads`.
    pub fn restock(&mut self, legal: &[usize], initial_beads: u32) {
        for &pos in legal {
            self.beads[pos] = initial_beads;
        }
    }

    /// Add or remove beads for a position. Counts never drop below zero.
    pub fn reinforce(&mut self, position: usize, delta: i16) {
        let count = &mut self.beads[position];
        let amount = u32::from(delta.unsigned_abs());
        *count = if delta >= 0 {
            count.saturating_add(amount)
        } else {
            count.saturating_sub(amount)
        };
    }

    /// Total beads over the given positions
    pub fn total_beads(&self, positions: &[usize]) -> u64 {
        positions.iter().map(|&pos| u64::from(self.beads[pos])).sum()
    }

    /// Entropy of the move distribution restricted to `positions`
    pub fn entropy(&self, positions: &[usize]) -> f64 {
        entropy_from_weights(positions.iter().map(|&pos| f64::from(self.beads[pos])))
    }
}
