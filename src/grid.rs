//! Playfield grid: a flat `y * width + x` store of sand cells.

/// Single cell: either empty or sand of a given colour tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Sand(u8),
}

impl Cell {
    #[inline]
    pub fn is_sand(self) -> bool {
        matches!(self, Self::Sand(_))
    }

    #[inline]
    pub fn color(self) -> Option<u8> {
        match self {
            Self::Sand(c) => Some(c),
            Self::Empty => None,
        }
    }
}

/// Playfield: fixed-size grid of cells. y=0 is top.
///
/// Every stored `Cell::Sand` is loose sand; a freshly locked piece and settled
/// sand look the same here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index of `(x, y)`; callers must have checked bounds.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[self.index(x, y)])
    }

    /// True if `(x, y)` is inside the grid and holds sand.
    #[inline]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Cell::is_sand)
    }

    /// Writes are silently dropped outside the grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.index(x, y);
        self.cells[i] = cell;
        true
    }

    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        self.cells[index]
    }

    #[inline]
    pub fn set_at(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Moves the cell at `from` to `to`, leaving `from` empty.
    #[inline]
    pub(crate) fn move_cell(&mut self, from: usize, to: usize) {
        self.cells[to] = self.cells[from];
        self.cells[from] = Cell::Empty;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of sand cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_sand()).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Fills `x0..x1` of row `y` with one colour.
    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, y: usize, x0: usize, x1: usize, color: u8) {
        for x in x0..x1.min(self.width) {
            self.set(x, y, Cell::Sand(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(60, 100);
        assert_eq!(grid.width(), 60);
        assert_eq!(grid.height(), 100);
        assert_eq!(grid.cells().len(), 6000);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let grid = Grid::new(6, 4);
        assert_eq!(grid.get(6, 0), None);
        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.get(5, 3), Some(Cell::Empty));
    }

    #[test]
    fn set_and_get_use_row_major_index() {
        let mut grid = Grid::new(6, 4);
        assert!(grid.set(2, 3, Cell::Sand(1)));
        assert_eq!(grid.cell_at(3 * 6 + 2), Cell::Sand(1));
        assert!(grid.is_occupied(2, 3));
        assert_eq!(grid.get(3, 3), Some(Cell::Empty));
    }

    #[test]
    fn set_out_of_bounds_is_noop() {
        let mut grid = Grid::new(6, 4);
        let before = grid.clone();
        assert!(!grid.set(6, 0, Cell::Sand(0)));
        assert!(!grid.set(0, 4, Cell::Sand(0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn in_bounds_handles_negatives() {
        let grid = Grid::new(6, 4);
        assert!(grid.in_bounds(0, 0));
        assert!(grid.in_bounds(5, 3));
        assert!(!grid.in_bounds(-1, 0));
        assert!(!grid.in_bounds(0, -1));
        assert!(!grid.in_bounds(6, 0));
        assert!(!grid.in_bounds(0, 4));
    }

    #[test]
    fn move_cell_clears_source() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 0, Cell::Sand(2));
        let (from, to) = (grid.index(1, 0), grid.index(1, 1));
        grid.move_cell(from, to);
        assert_eq!(grid.get(1, 0), Some(Cell::Empty));
        assert_eq!(grid.get(1, 1), Some(Cell::Sand(2)));
    }

    #[test]
    fn fill_row_and_clear() {
        let mut grid = Grid::new(6, 4);
        grid.fill_row(2, 0, 6, 3);
        assert_eq!(grid.occupied_count(), 6);
        assert!((0..6).all(|x| grid.get(x, 2) == Some(Cell::Sand(3))));
        grid.clear();
        assert_eq!(grid.occupied_count(), 0);
    }
}
