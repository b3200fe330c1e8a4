//! Grid geometry: cells, directions and toroidal wrapping

use serde::{Deserialize, Serialize};

/// A grid cell. Value type; `x` grows rightward, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `dir`, before wrapping
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Unit movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in screen coordinates
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// Playfield dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: i32,
    pub rows: i32,
}

impl GridSize {
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    pub fn cell_count(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.x) && (0..self.rows).contains(&cell.y)
    }

    /// Wrap a cell onto the torus (each axis modulo its dimension)
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(cell.x.rem_euclid(self.cols), cell.y.rem_euclid(self.rows))
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.cols / 2, self.rows / 2)
    }

    /// Cell at a row-major index (`index < cell_count()`)
    pub fn cell_at(&self, index: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((index % cols) as i32, (index / cols) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_both_edges() {
        let grid = GridSize::new(25, 17);
        assert_eq!(grid.wrap(Cell::new(25, 8)), Cell::new(0, 8));
        assert_eq!(grid.wrap(Cell::new(-1, 8)), Cell::new(24, 8));
        assert_eq!(grid.wrap(Cell::new(3, -1)), Cell::new(3, 16));
        assert_eq!(grid.wrap(Cell::new(3, 17)), Cell::new(3, 0));
    }

    #[test]
    fn test_opposites() {
        for dir in Direction::ALL {
            assert!(dir.is_opposite(dir.opposite()));
            assert!(!dir.is_opposite(dir));
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_center_and_index() {
        let grid = GridSize::new(25, 17);
        assert_eq!(grid.center(), Cell::new(12, 8));
        assert_eq!(grid.cell_at(0), Cell::new(0, 0));
        assert_eq!(grid.cell_at(26), Cell::new(1, 1));
        assert_eq!(grid.cell_count(), 425);
    }
}
