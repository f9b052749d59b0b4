use crate::heading::Heading;
use crate::pipe::Pipe;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// A cell coordinate; x grows right, y grows down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Neighbouring position one cell along `heading`
    pub fn step(self, heading: Heading) -> Position {
        let (dx, dy) = heading.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Heading from `self` to an orthogonally adjacent `other`
    pub fn heading_to(self, other: Position) -> Option<Heading> {
        Heading::from_offset(other.x - self.x, other.y - self.y)
    }
}

/// Tracked extent of the grid: min inclusive, max exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    /// Bounds that enclose nothing, anchored at the origin
    pub fn empty() -> Self {
        Bounds { min_x: 0, min_y: 0, max_x: 0, max_y: 0 }
    }

    /// Bounds enclosing exactly one cell
    pub fn around(pos: Position) -> Self {
        Bounds {
            min_x: pos.x,
            min_y: pos.y,
            max_x: pos.x + 1,
            max_y: pos.y + 1,
        }
    }

    pub fn include(&mut self, pos: Position) {
        self.min_x = self.min_x.min(pos.x);
        self.min_y = self.min_y.min(pos.y);
        self.max_x = self.max_x.max(pos.x + 1);
        self.max_y = self.max_y.max(pos.y + 1);
    }

    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    /// Grow to also enclose `other`; empty bounds add nothing
    pub fn merge(&mut self, other: Bounds) {
        if other.is_empty() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }
}

/// Sparse pipe storage; only occupied cells have keys
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: HashMap<Position, Pipe>,
    bounds: Bounds,
    /// Revision number - incremented whenever grid cells change
    revision: u64,
}

impl Grid {
    /// Create an empty grid with bounds anchored at the origin
    pub fn new() -> Self {
        Grid {
            cells: HashMap::new(),
            bounds: Bounds::empty(),
            revision: 0,
        }
    }

    /// Create a grid holding a single start cell at `origin`
    pub fn with_start(origin: Position) -> Self {
        let mut cells = HashMap::new();
        cells.insert(origin, Pipe::Start);
        Grid {
            cells,
            bounds: Bounds::around(origin),
            revision: 0,
        }
    }

    /// Store `pipe` at (x, y), overwriting whatever was there
    pub fn add_value(&mut self, x: i32, y: i32, pipe: Pipe) {
        let pos = Position::new(x, y);
        self.bounds.include(pos);
        if self.cells.insert(pos, pipe) != Some(pipe) {
            self.revision += 1;
        }
    }

    pub fn get_value(&self, x: i32, y: i32) -> Option<Pipe> {
        self.cells.get(&Position::new(x, y)).copied()
    }

    pub fn get(&self, pos: Position) -> Option<Pipe> {
        self.cells.get(&pos).copied()
    }

    /// Remove the pipe at `pos`. Bounds are left as they were.
    pub fn remove(&mut self, pos: Position) -> Option<Pipe> {
        let removed = self.cells.remove(&pos);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Extend the bounds without storing anything
    pub fn include(&mut self, pos: Position) {
        self.bounds.include(pos);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Column range covered by the bounds
    pub fn columns(&self) -> Range<i32> {
        self.bounds.min_x..self.bounds.max_x
    }

    /// Row range covered by the bounds
    pub fn rows(&self) -> Range<i32> {
        self.bounds.min_y..self.bounds.max_y
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in row-major order
    pub fn cells(&self) -> Vec<(Position, Pipe)> {
        let mut cells: Vec<_> = self.cells.iter().map(|(&pos, &pipe)| (pos, pipe)).collect();
        cells.sort_by_key(|(pos, _)| (pos.y, pos.x));
        cells
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }

    /// Reapply saved metadata after the cells are back. Bounds only grow, so
    /// every stored cell stays inside them.
    pub(crate) fn restore_meta(&mut self, bounds: Bounds, revision: u64) {
        self.bounds.merge(bounds);
        self.revision = revision;
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_get() {
        let mut grid = Grid::new();
        grid.add_value(3, 2, Pipe::NorthEast);
        assert_eq!(grid.get_value(3, 2), Some(Pipe::NorthEast));
        assert_eq!(grid.get_value(2, 3), None);

        grid.add_value(3, 2, Pipe::Vertical);
        assert_eq!(grid.get_value(3, 2), Some(Pipe::Vertical));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_bounds_grow_from_origin() {
        let mut grid = Grid::new();
        assert_eq!(grid.columns(), 0..0);
        assert_eq!(grid.rows(), 0..0);

        grid.add_value(4, 1, Pipe::Horizontal);
        assert_eq!(grid.columns(), 0..5);
        assert_eq!(grid.rows(), 0..2);

        // Bounds never shrink on removal
        grid.remove(Position::new(4, 1));
        assert_eq!(grid.columns(), 0..5);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_bounds_follow_negative_cells() {
        let mut grid = Grid::with_start(Position::new(0, 0));
        assert_eq!(grid.columns(), 0..1);

        grid.include(Position::new(-2, 3));
        assert_eq!(grid.columns(), -2..1);
        assert_eq!(grid.rows(), 0..4);
    }

    #[test]
    fn test_merge_grows_only() {
        let mut bounds = Bounds::around(Position::new(2, 2));
        bounds.merge(Bounds { min_x: 0, min_y: 1, max_x: 3, max_y: 2 });
        assert_eq!(bounds, Bounds { min_x: 0, min_y: 1, max_x: 3, max_y: 3 });

        // Empty bounds at the origin do not drag the minimum back to 0
        let mut bounds = Bounds::around(Position::new(-3, 4));
        bounds.merge(Bounds::empty());
        assert_eq!(bounds, Bounds::around(Position::new(-3, 4)));
        assert!(Bounds::empty().is_empty());
    }

    #[test]
    fn test_revision_counts_changes_only() {
        let mut grid = Grid::new();
        grid.add_value(0, 0, Pipe::Start);
        grid.add_value(0, 0, Pipe::Start);
        assert_eq!(grid.get_revision(), 1);
        grid.remove(Position::new(1, 1));
        assert_eq!(grid.get_revision(), 1);
    }

    #[test]
    fn test_cells_row_major() {
        let mut grid = Grid::new();
        grid.add_value(1, 1, Pipe::Vertical);
        grid.add_value(2, 0, Pipe::Horizontal);
        grid.add_value(0, 1, Pipe::Start);
        let order: Vec<_> = grid.cells().into_iter().map(|(p, _)| (p.x, p.y)).collect();
        assert_eq!(order, vec![(2, 0), (0, 1), (1, 1)]);
    }
}
