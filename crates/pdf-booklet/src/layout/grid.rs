//! Grid layout calculation
//!
//! This module handles the geometric layout of the cell grid on a sheet side.

use crate::types::SheetGrid;

use super::{GridLayout, GridPosition, Rect};

// =============================================================================
// Grid Creation
// =============================================================================

/// Create a grid layout that divides `area` into `grid.cols` x `grid.rows` cells.
pub fn create_grid_layout(grid: SheetGrid, area: Rect) -> GridLayout {
    let cols = grid.cols.max(1);
    let rows = grid.rows.max(1);

    GridLayout {
        cols,
        rows,
        cell_width_pt: area.width / cols as f32,
        cell_height_pt: area.height / rows as f32,
        origin: (area.x, area.y),
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Grid position of the `index`-th cell, filling rows left to right from the top.
pub fn cell_position(grid: &GridLayout, index: usize) -> GridPosition {
    GridPosition::new(index / grid.cols, index % grid.cols)
}

/// Calculate the bounds of a cell at the given grid position.
pub fn cell_bounds(grid: &GridLayout, pos: GridPosition) -> Rect {
    let (origin_x, origin_y) = grid.origin;

    // Row 0 is at the top, so we need to invert the y calculation
    let cell_x = origin_x + pos.col as f32 * grid.cell_width_pt;
    let cell_y = origin_y + (grid.rows - pos.row - 1) as f32 * grid.cell_height_pt;

    Rect::new(cell_x, cell_y, grid.cell_width_pt, grid.cell_height_pt)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = create_grid_layout(SheetGrid::default(), Rect::new(0.0, 0.0, 600.0, 800.0));

        assert_eq!(grid.cols, 2);
        assert_eq!(grid.rows, 4);
        assert_eq!(grid.cell_width_pt, 300.0);
        assert_eq!(grid.cell_height_pt, 200.0);
        assert_eq!(grid.cell_count(), 8);
    }

    #[test]
    fn test_cell_position_row_major() {
        let grid = create_grid_layout(SheetGrid::default(), Rect::new(0.0, 0.0, 600.0, 800.0));

        assert_eq!(cell_position(&grid, 0), GridPosition::new(0, 0));
        assert_eq!(cell_position(&grid, 1), GridPosition::new(0, 1));
        assert_eq!(cell_position(&grid, 2), GridPosition::new(1, 0));
        assert_eq!(cell_position(&grid, 7), GridPosition::new(3, 1));
    }

    #[test]
    fn test_cell_bounds() {
        let grid = create_grid_layout(SheetGrid::default(), Rect::new(10.0, 20.0, 600.0, 800.0));

        // Top-left cell
        let bounds = cell_bounds(&grid, GridPosition::new(0, 0));
        assert_eq!(bounds.x, 10.0);
        assert_eq!(bounds.y, 620.0);
        assert_eq!(bounds.width, 300.0);
        assert_eq!(bounds.height, 200.0);

        // Bottom-right cell
        let bounds = cell_bounds(&grid, GridPosition::new(3, 1));
        assert_eq!(bounds.x, 310.0);
        assert_eq!(bounds.y, 20.0);
    }
}
