//! Discrete coordinate space of the board

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the game grid, addressed by (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// The neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        self.moved_by(dc, dr)
    }
}

/// Square board of `tile_count` x `tile_count` cells
///
/// The tile count is derived once from the canvas and cell sizes and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    tile_count: i32,
}

impl Grid {
    /// Create a grid with `floor(canvas_size / cell_size)` tiles per side
    ///
    /// Returns `None` when the cell size is zero or larger than the canvas.
    pub fn from_canvas(canvas_size: u32, cell_size: u32) -> Option<Self> {
        if cell_size == 0 {
            return None;
        }
        let tiles = canvas_size / cell_size;
        if tiles == 0 {
            return None;
        }
        i32::try_from(tiles).ok().map(Self::with_tile_count)
    }

    pub fn with_tile_count(tile_count: i32) -> Self {
        assert!(tile_count > 0, "grid needs at least one tile");
        Self { tile_count }
    }

    pub fn tile_count(&self) -> i32 {
        self.tile_count
    }

    /// Total number of cells on the board
    pub fn capacity(&self) -> usize {
        (self.tile_count as usize).pow(2)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.tile_count).contains(&cell.col) && (0..self.tile_count).contains(&cell.row)
    }

    /// Uniformly random cell in `[0, tile_count)^2`
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(
            rng.gen_range(0..self.tile_count),
            rng.gen_range(0..self.tile_count),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_tile_count_from_canvas() {
        assert_eq!(Grid::from_canvas(400, 20).map(|g| g.tile_count()), Some(20));
        assert_eq!(Grid::from_canvas(410, 20).map(|g| g.tile_count()), Some(20));
        assert_eq!(Grid::from_canvas(400, 0), None);
        assert_eq!(Grid::from_canvas(10, 20), None);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::with_tile_count(20);

        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(19, 19)));
        assert!(!grid.in_bounds(Cell::new(-1, 0)));
        assert!(!grid.in_bounds(Cell::new(20, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 20)));
        assert!(!grid.in_bounds(Cell::new(0, -1)));
    }

    #[test]
    fn test_random_cell_stays_in_bounds() {
        let grid = Grid::with_tile_count(3);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..500 {
            let cell = grid.random_cell(&mut rng);
            assert!(grid.in_bounds(cell));
            seen.insert(cell);
        }

        // 500 draws over 9 cells should hit every one of them
        assert_eq!(seen.len(), grid.capacity());
    }
}
