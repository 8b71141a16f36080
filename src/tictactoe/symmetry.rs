//! D4 symmetry group operations for board canonicalization

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Clockwise rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to mirror left-right before rotating
    pub reflection: bool,
}

impl D4Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        D4Transform {
            rotation: 0,
            reflection: false,
        }
    }

    /// All 8 elements: each rotation, with and without the mirror
    pub fn all() -> [D4Transform; 8] {
        let mut transforms = [Self::identity(); 8];
        for (i, rotation) in [0, 90, 180, 270].into_iter().enumerate() {
            transforms[2 * i] = D4Transform {
                rotation,
                reflection: false,
            };
            transforms[2 * i + 1] = D4Transform {
                rotation,
                reflection: true,
            };
        }
        transforms
    }

    /// Apply transform to a position (0-8)
    pub fn transform_position(&self, pos: usize) -> usize {
        let (mut row, mut col) = (pos / 3, pos % 3);

        if self.reflection {
            col = 2 - col;
        }

        for _ in 0..(self.rotation / 90) {
            let new_row = col;
            let new_col = 2 - row;
            row = new_row;
            col = new_col;
        }

        row * 3 + col
    }

    /// Apply transform to an array of cells
    pub fn apply_to_cells(&self, cells: &[Cell; 9]) -> [Cell; 9] {
        let mut transformed = [Cell::Empty; 9];
        for (idx, &cell) in cells.iter().enumerate() {
            transformed[self.transform_position(idx)] = cell;
        }
        transformed
    }

    /// Get the inverse transform
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            // mirror-then-rotate is itself a reflection, hence an involution
            *self
        } else {
            D4Transform {
                rotation: (360 - self.rotation) % 360,
                reflection: false,
            }
        }
    }
}

impl Board {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Self {
        Board::from_cells(t.apply_to_cells(&self.cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transforms_are_distinct_permutations() {
        let images: Vec<Vec<usize>> = D4Transform::all()
            .iter()
            .map(|t| (0..9).map(|p| t.transform_position(p)).collect())
            .collect();

        for image in &images {
            let mut sorted = image.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..9).collect::<Vec<_>>());
        }
        for (i, a) in images.iter().enumerate() {
            for b in &images[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn quarter_turn_moves_top_left_to_top_right() {
        let t = D4Transform {
            rotation: 90,
            reflection: false,
        };
        assert_eq!(t.transform_position(0), 2);
        assert_eq!(t.transform_position(4), 4);
        assert_eq!(t.transform_position(2), 8);
    }

    #[test]
    fn inverse_undoes_every_transform() {
        for t in D4Transform::all() {
            for pos in 0..9 {
                assert_eq!(t.inverse().transform_position(t.transform_position(pos)), pos);
            }
        }
    }
}
