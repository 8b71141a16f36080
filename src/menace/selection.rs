//! Bead drawing: how MENACE picks a move from a matchbox

use rand::Rng;

use super::{
    state_table::{StateTable, legal_positions},
    trace::GameTrace,
};
use crate::{tictactoe::Board, utils::weighted_pick};

impl StateTable {
    /// Draw a move for `board` and record the decision in `trace`.
    ///
    /// The board is canonicalized and beads are drawn in the canonical frame
    /// from the legal cells that still hold beads. If none do, all legal
    /// cells are refilled to the initial count first. The returned cell is
    /// in the caller's frame; `None` means the board has no empty cell.
    pub fn select_move<R: Rng>(
        &mut self,
        board: &Board,
        rng: &mut R,
        trace: &mut GameTrace,
    ) -> Option<usize> {
        let ctx = board.canonical_context();
        let legal = legal_positions(&ctx.key);
        if legal.is_empty() {
            return None;
        }

        let initial = self.initial_beads();
        let matchbox = self.get_or_insert(&ctx.key);
        let mut candidates = matchbox.candidates(&legal);
        if candidates.is_empty() {
            log::debug!("restocking depleted matchbox {}", ctx.key);
            matchbox.restock(&legal, initial);
            candidates = matchbox.candidates(&legal);
        }

        let canonical_move = weighted_pick(rng, &candidates)?;
        let position = ctx.to_original(canonical_move);
        trace.record(ctx.key, canonical_move);
        Some(position)
    }
}
