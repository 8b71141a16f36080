//! Matchbox storage keyed by canonical state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::matchbox::Matchbox;
use crate::{tictactoe::Cell, types::StateKey};

/// All matchboxes MENACE has opened so far.
///
/// Boxes are created on first use with every slot at `initial_beads` and
/// are never removed. The same value refills a state whose legal moves have
/// all run dry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTable {
    initial_beads: u32,
    boxes: BTreeMap<StateKey, Matchbox>,
}

/// Summary of a table's contents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    pub states: usize,
    pub total_beads: u64,
    pub avg_entropy: f64,
    /// States whose legal moves currently hold no beads
    pub depleted_states: usize,
}

impl StateTable {
    /// Create an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] for zero initial beads,
    /// which would leave a drained state unable to move.
    pub fn new(initial_beads: u32) -> crate::Result<Self> {
        if initial_beads == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "initial beads must be at least 1".to_string(),
            });
        }
        Ok(StateTable {
            initial_beads,
            boxes: BTreeMap::new(),
        })
    }

    pub fn initial_beads(&self) -> u32 {
        self.initial_beads
    }

    /// Look up a box without creating it
    pub fn get(&self, key: &StateKey) -> Option<&Matchbox> {
        self.boxes.get(key)
    }

    /// Fetch the box for `key`, opening a fresh one if the state is new.
    pub fn get_or_insert(&mut self, key: &StateKey) -> &mut Matchbox {
        let initial = self.initial_beads;
        self.boxes
            .entry(key.clone())
            .or_insert_with(|| Matchbox::new(initial))
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Matchbox)> {
        self.boxes.iter()
    }

    /// Smallest bead count stored anywhere in the table
    pub fn min_bead_count(&self) -> Option<u32> {
        self.boxes
            .values()
            .flat_map(|matchbox| matchbox.beads().iter().copied())
            .min()
    }

    pub fn stats(&self) -> TableStats {
        let mut total_beads = 0;
        let mut entropy_sum = 0.0;
        let mut depleted_states = 0;

        for (key, matchbox) in &self.boxes {
            let legal = legal_positions(key);
            let beads = matchbox.total_beads(&legal);
            if beads == 0 && !legal.is_empty() {
                depleted_states += 1;
            }
            total_beads += beads;
            entropy_sum += matchbox.entropy(&legal);
        }

        let avg_entropy = if self.boxes.is_empty() {
            0.0
        } else {
            entropy_sum / self.boxes.len() as f64
        };

        TableStats {
            states: self.boxes.len(),
            total_beads,
            avg_entropy,
            depleted_states,
        }
    }
}

/// Empty cells of a canonical state, in ascending order
pub(crate) fn legal_positions(key: &StateKey) -> Vec<usize> {
    key.cells()
        .iter()
        .enumerate()
        .filter(|&(_, &cell)| cell == Cell::Empty)
        .map(|(pos, _)| pos)
        .collect()
}
