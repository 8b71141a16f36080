//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Canonical identifier of a board configuration.
///
/// Nine ASCII digits in cell-index order: `0` empty, `1` player one (X),
/// `2` player two (O). Keys compare lexicographically, which is what the
/// canonicalizer minimises over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey(String);

impl StateKey {
    /// Encode a cell array in index order.
    pub fn from_cells(cells: &[Cell; 9]) -> Self {
        StateKey(cells.iter().map(|cell| cell.digit()).collect())
    }

    /// Parse and validate a persisted key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKey`] unless the input is exactly
    /// nine characters from `0`, `1` and `2`.
    pub fn parse(raw: &str) -> Result<Self, crate::Error> {
        let valid = raw.len() == 9 && raw.chars().all(|c| Cell::from_digit(c).is_some());
        if valid {
            Ok(StateKey(raw.to_string()))
        } else {
            Err(crate::Error::InvalidStateKey {
                key: raw.to_string(),
                expected: "9 digits from 0, 1, 2".to_string(),
            })
        }
    }

    /// Decode the key back into cells.
    pub fn cells(&self) -> [Cell; 9] {
        let mut cells = [Cell::Empty; 9];
        for (slot, c) in cells.iter_mut().zip(self.0.chars()) {
            *slot = Cell::from_digit(c).unwrap_or(Cell::Empty);
        }
        cells
    }

    /// Get the raw encoding.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StateKey {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StateKey::parse(&value)
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
