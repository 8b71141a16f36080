//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{Board, GameStatus, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A game in progress with its history. X always opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            to_move: Player::X,
            moves: Vec::new(),
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Play a move for the side to move.
    ///
    /// Returns the outcome once the move ends the game.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] after the game has finished and
    /// [`crate::Error::InvalidMove`] for an occupied or out-of-range cell.
    pub fn play(&mut self, position: usize) -> Result<Option<GameOutcome>, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        self.board = self.board.place(position, self.to_move)?;
        self.moves.push(Move {
            position,
            player: self.to_move,
        });
        self.to_move = self.to_move.opponent();

        self.outcome = match self.board.status() {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(GameOutcome::Win(player)),
            GameStatus::Draw => Some(GameOutcome::Draw),
        };
        Ok(self.outcome)
    }

    /// End the game as a draw because the side to move had nothing to play.
    pub fn concede_draw(&mut self) -> GameOutcome {
        *self.outcome.get_or_insert(GameOutcome::Draw)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_alternates_players_and_detects_win() {
        let mut game = Game::new();
        for pos in [0, 3, 1, 4] {
            assert_eq!(game.play(pos).unwrap(), None);
        }
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(game.play(2).unwrap(), Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.moves.len(), 5);
        assert_eq!(game.moves[1].player, Player::O);

        assert!(matches!(game.play(5), Err(crate::Error::GameOver)));
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let mut game = Game::new();
        let mut last = None;
        for pos in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            last = game.play(pos).unwrap();
        }
        assert_eq!(last, Some(GameOutcome::Draw));
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut game = Game::new();
        game.play(4).unwrap();
        assert!(matches!(
            game.play(4),
            Err(crate::Error::InvalidMove { position: 4 })
        ));
        assert_eq!(game.moves.len(), 1);
    }
}
