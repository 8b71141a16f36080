//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lines::LineAnalyzer, symmetry::D4Transform};
use crate::types::StateKey;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Digit used in state keys.
    pub fn digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::X => '1',
            Cell::O => '2',
        }
    }

    pub fn from_digit(c: char) -> Option<Cell> {
        match c {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::X),
            '2' => Some(Cell::O),
            _ => None,
        }
    }

    fn from_value(value: u8) -> Option<Cell> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::X),
            2 => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Parse a player token from the command line or a config file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ParsePlayer`] for anything other than x/o aliases.
    pub fn parse(value: &str) -> Result<Player, crate::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "x" | "first" | "player1" | "p1" => Ok(Player::X),
            "o" | "second" | "player2" | "p2" => Ok(Player::O),
            _ => Err(crate::Error::ParsePlayer {
                input: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Result of evaluating a board against the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// A 3x3 board. The cell count is fixed by the type; the fallible
/// constructors reject input that cannot describe one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
}

/// Cached result of canonicalization.
///
/// Holds the canonical key together with the transform that produced it so
/// cell indices can be moved between the caller's frame and the canonical one
/// without repeating the search.
#[derive(Debug, Clone)]
pub struct CanonicalContext {
    /// Canonical encoding of the board
    pub key: StateKey,
    /// Transform that maps the original board onto the canonical one
    pub transform: D4Transform,
}

impl CanonicalContext {
    /// Map a cell from original coordinates to canonical coordinates
    pub fn to_canonical(&self, original: usize) -> usize {
        self.transform.transform_position(original)
    }

    /// Map a cell from canonical coordinates back to original coordinates
    pub fn to_original(&self, canonical: usize) -> usize {
        self.transform.inverse().transform_position(canonical)
    }
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Board { cells }
    }

    /// Build a board from numeric cell values (0 empty, 1 player one, 2 player two).
    ///
    /// # Errors
    ///
    /// Returns error if the slice does not hold exactly 9 values or a value
    /// is outside 0..=2.
    pub fn from_values(values: &[u8]) -> Result<Self, crate::Error> {
        if values.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: values.len(),
                context: format!("{values:?}"),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (position, (slot, &value)) in cells.iter_mut().zip(values).enumerate() {
            *slot = Cell::from_value(value)
                .ok_or(crate::Error::InvalidCellValue { value, position })?;
        }
        Ok(Board { cells })
    }

    /// Create a board from a string such as `"X.O\n.X.\n..O"`.
    ///
    /// Whitespace is ignored; the remaining characters must be exactly nine
    /// cells from `.`, `X` and `O`.
    ///
    /// # Errors
    ///
    /// Returns error on a wrong cell count or an unknown character.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }
        Ok(Board { cells })
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Place a marker and return the new board
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, pos: usize, player: Player) -> Result<Board, crate::Error> {
        if pos >= 9 || !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = player.to_cell();
        Ok(next)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Evaluate the board: a completed line wins, a full board without one draws.
    pub fn status(&self) -> GameStatus {
        match self.winner() {
            Some(player) => GameStatus::Won(player),
            None if !self.cells.contains(&Cell::Empty) => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// Encode the board as a state key without canonicalizing
    pub fn encode(&self) -> StateKey {
        StateKey::from_cells(&self.cells)
    }

    /// Search the 8 symmetric variants for the smallest encoding.
    ///
    /// Ties keep the first transform in [`D4Transform::all`] order.
    pub fn canonical_context(&self) -> CanonicalContext {
        let mut best_key = self.encode();
        let mut best_transform = D4Transform::identity();

        for transform in D4Transform::all() {
            let key = StateKey::from_cells(&transform.apply_to_cells(&self.cells));
            if key < best_key {
                best_key = key;
                best_transform = transform;
            }
        }

        CanonicalContext {
            key: best_key,
            transform: best_transform,
        }
    }

    /// Canonical key shared by every board in this board's symmetry class
    pub fn canonical_key(&self) -> StateKey {
        self.canonical_context().key
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
