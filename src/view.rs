use crate::grid::{Grid, Position};
use crate::pipe::Pipe;
use std::ops::Range;

/// Read-only queries shared by the walker and the builder, used for rendering
pub trait PipeView {
    fn grid(&self) -> &Grid;

    /// Current cursor or walker position, if any
    fn position(&self) -> Option<Position>;

    /// Previously occupied positions, oldest first
    fn path(&self) -> &[Position];

    fn get_value(&self, x: i32, y: i32) -> Option<Pipe> {
        self.grid().get_value(x, y)
    }

    fn is_here(&self, x: i32, y: i32) -> bool {
        self.position() == Some(Position::new(x, y))
    }

    /// True once the position is back on a start cell after real progress
    fn is_completed(&self) -> bool {
        match self.position() {
            Some(pos) => self.grid().get(pos) == Some(Pipe::Start) && self.path().len() > 1,
            None => false,
        }
    }

    /// Index of the first path entry at (x, y)
    fn path_index(&self, x: i32, y: i32) -> Option<usize> {
        let target = Position::new(x, y);
        self.path().iter().position(|&pos| pos == target)
    }

    fn columns(&self) -> Range<i32> {
        self.grid().columns()
    }

    fn rows(&self) -> Range<i32> {
        self.grid().rows()
    }
}

/// Draw the dense grid over the tracked bounds, one line per row.
/// Unoccupied cells are written as '.'.
pub fn render_text<V: PipeView + ?Sized>(view: &V) -> String {
    let mut result = String::new();

    for y in view.rows() {
        for x in view.columns() {
            let symbol = match view.get_value(x, y) {
                Some(pipe) => pipe.symbol(),
                None => '.',
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}
