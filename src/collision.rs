//! Movement legality: a piece bitmap against grid walls, floor and sand.

use crate::grid::Grid;
use crate::shape::Piece;

/// True if `piece`, shifted by `(dx, dy)`, would leave the grid sideways, pass
/// the floor, or overlap sand. Cells above the top row never collide.
pub fn collides(grid: &Grid, piece: &Piece, dx: i32, dy: i32) -> bool {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    piece.cells().any(|(x, y)| {
        let (nx, ny) = (x + dx, y + dy);
        if nx < 0 || nx >= w || ny >= h {
            return true;
        }
        ny >= 0 && grid.is_occupied(nx as usize, ny as usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::shape::{Piece, TetrominoKind};
    use proptest::prelude::*;

    fn o_piece(x: i32, y: i32) -> Piece {
        let mut p = Piece::new(TetrominoKind::O, 0, 1);
        p.x = x;
        p.y = y;
        p
    }

    #[test]
    fn free_space_does_not_collide() {
        let grid = Grid::new(6, 4);
        assert!(!collides(&grid, &o_piece(2, 1), 0, 0));
        assert!(!collides(&grid, &o_piece(2, 1), 0, 1));
    }

    #[test]
    fn walls_and_floor_collide() {
        let grid = Grid::new(6, 4);
        let p = o_piece(0, 2);
        assert!(collides(&grid, &p, -1, 0));
        assert!(collides(&grid, &p, 0, 1));
        assert!(collides(&grid, &o_piece(4, 0), 1, 0));
    }

    #[test]
    fn cells_above_top_never_collide() {
        let mut grid = Grid::new(6, 4);
        grid.fill_row(0, 0, 6, 1);
        // both rows of the O above the visible top
        assert!(!collides(&grid, &o_piece(2, -3), 0, 0));
        // lower row reaches row 0, which is sand
        assert!(collides(&grid, &o_piece(2, -1), 0, 0));
    }

    #[test]
    fn sand_overlap_collides() {
        let mut grid = Grid::new(6, 4);
        grid.set(3, 3, Cell::Sand(2));
        assert!(collides(&grid, &o_piece(2, 1), 0, 1));
        assert!(!collides(&grid, &o_piece(0, 1), 0, 1));
    }

    #[test]
    fn empty_bitmap_rows_are_ignored() {
        // I's set row is its second bitmap row, so the piece may sit with
        // its empty bottom rows below the floor.
        let grid = Grid::new(6, 4);
        let mut p = Piece::new(TetrominoKind::I, 0, 1);
        p.x = 1;
        p.y = 2;
        assert!(!collides(&grid, &p, 0, 0));
        assert!(collides(&grid, &p, 0, 1));
    }

    proptest! {
        #[test]
        fn prop_out_of_bounds_always_collides(x in -10i32..20, y in -10i32..20) {
            let grid = Grid::new(8, 8);
            let p = o_piece(x, y);
            let out = p.cells().any(|(cx, cy)| cx < 0 || cx >= 8 || cy >= 8);
            prop_assert_eq!(collides(&grid, &p, 0, 0), out);
        }

        #[test]
        fn prop_overlap_collides(x in 0i32..7, y in 0i32..7, sx in 0usize..8, sy in 0usize..8) {
            let mut grid = Grid::new(8, 8);
            grid.set(sx, sy, Cell::Sand(0));
            let p = o_piece(x, y);
            prop_assert_eq!(collides(&grid, &p, 0, 0), p.covers(sx as i32, sy as i32));
        }
    }
}
