//! Common test utilities for the menace test suite.

#![allow(dead_code)]

use menace::{menace::StateTable, tictactoe::Board};

/// Opponent that plays the given cells in order, skipping any already taken.
pub fn scripted(moves: Vec<usize>) -> impl FnMut(&Board) -> Option<usize> + Send {
    let mut remaining = moves.into_iter();
    move |board: &Board| remaining.by_ref().find(|&pos| board.is_empty(pos))
}

/// Every stored bead count, keyed by state, for before/after comparisons.
pub fn snapshot(table: &StateTable) -> Vec<(String, [u32; 9])> {
    table
        .iter()
        .map(|(key, matchbox)| (key.to_string(), *matchbox.beads()))
        .collect()
}

/// Boards reachable in real play, found by walking the game tree from the
/// empty board.
pub fn reachable_boards() -> Vec<Board> {
    use menace::tictactoe::Player;

    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![(Board::new(), Player::X)];
    let mut boards = Vec::new();
    while let Some((board, player)) = stack.pop() {
        if !seen.insert(board) {
            continue;
        }
        boards.push(board);
        if board.winner().is_some() {
            continue;
        }
        for pos in board.empty_positions() {
            if let Ok(next) = board.place(pos, player) {
                stack.push((next, player.opponent()));
            }
        }
    }
    boards
}
