//! Fixed policies MENACE can train and be evaluated against

use std::{collections::HashMap, fmt, str::FromStr};

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    ports::Opponent,
    tictactoe::{Board, Player},
    types::StateKey,
};

/// Plays a uniformly random empty cell.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    /// Create a random opponent; `None` seeds from the operating system.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        board.empty_positions().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Perfect player using memoised negamax.
///
/// Among equally valued moves the lowest cell index is played, so the policy
/// is deterministic.
#[derive(Debug, Default)]
pub struct OptimalOpponent {
    cache: HashMap<StateKey, i8>,
}

impl OptimalOpponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `board` for `player`, who is to move: 1 win, 0 draw, -1 loss.
    fn negamax(&mut self, board: &Board, player: Player) -> i8 {
        if let Some(winner) = board.winner() {
            return if winner == player { 1 } else { -1 };
        }
        let empty = board.empty_positions();
        if empty.is_empty() {
            return 0;
        }

        // Symmetric positions share a value, and the side to move follows
        // from the piece counts.
        let key = board.canonical_key();
        if let Some(&value) = self.cache.get(&key) {
            return value;
        }

        let mut best = i8::MIN;
        for pos in empty {
            if let Ok(next) = board.place(pos, player) {
                best = best.max(-self.negamax(&next, player.opponent()));
            }
        }
        self.cache.insert(key, best);
        best
    }

    /// Every legal move of `board` with its value for the side to move.
    pub fn evaluate_moves(&mut self, board: &Board) -> Vec<(usize, i8)> {
        let player = side_to_move(board);
        board
            .empty_positions()
            .into_iter()
            .filter_map(|pos| {
                let next = board.place(pos, player).ok()?;
                Some((pos, -self.negamax(&next, player.opponent())))
            })
            .collect()
    }
}

impl Opponent for OptimalOpponent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        if board.winner().is_some() {
            return None;
        }
        let mut best: Option<(usize, i8)> = None;
        for (pos, value) in self.evaluate_moves(board) {
            if best.is_none_or(|(_, top)| value > top) {
                best = Some((pos, value));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn name(&self) -> &str {
        "optimal"
    }
}

/// X moves whenever both sides have placed the same number of marks.
fn side_to_move(board: &Board) -> Player {
    let x = board.cells.iter().filter(|&&c| c == Player::X.to_cell()).count();
    let o = board.cells.iter().filter(|&&c| c == Player::O.to_cell()).count();
    if x > o { Player::O } else { Player::X }
}

/// Opponent selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    Random,
    Optimal,
}

impl OpponentKind {
    pub const NAMES: &'static str = "random, optimal";

    /// Instantiate the opponent; only the random one uses `seed`.
    pub fn build(self, seed: Option<u64>) -> Box<dyn Opponent> {
        match self {
            OpponentKind::Random => Box::new(RandomOpponent::new(seed)),
            OpponentKind::Optimal => Box::new(OptimalOpponent::new()),
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpponentKind::Random => f.write_str("random"),
            OpponentKind::Optimal => f.write_str("optimal"),
        }
    }
}

impl FromStr for OpponentKind {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(OpponentKind::Random),
            "optimal" | "minimax" | "perfect" => Ok(OpponentKind::Optimal),
            _ => Err(Error::ParseOpponent {
                input: input.to_string(),
                expected: Self::NAMES.to_string(),
            }),
        }
    }
}
