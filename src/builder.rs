use crate::grid::{Grid, Position};
use crate::heading::{turn_shape, Heading};
use crate::pipe::Pipe;
use crate::view::PipeView;
use tracing::{debug, trace};

/// Draws a pipe loop by moving a cursor from a start cell at the origin.
///
/// The shape of a cell is only known once the cursor has left it, so each
/// move writes the shape of the cell just left, inferred from the heading
/// it was entered on and the heading it was left on.
#[derive(Debug, Clone)]
pub struct PipeBuilder {
    grid: Grid,
    position: Position,
    path: Vec<Position>,
}

impl PipeBuilder {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new() -> Self {
        PipeBuilder {
            grid: Grid::with_start(Self::ORIGIN),
            position: Self::ORIGIN,
            path: Vec::new(),
        }
    }

    pub fn add_value(&mut self, x: i32, y: i32, pipe: Pipe) {
        self.grid.add_value(x, y, pipe);
    }

    /// Back to a single start cell at the origin
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    pub fn cursor(&self) -> Position {
        self.position
    }

    /// Move the cursor one cell. Returns false when the move was refused:
    /// the loop is already closed, the destination already holds a pipe
    /// other than the start, or the move would turn straight back.
    pub fn move_cursor(&mut self, heading: Heading) -> bool {
        if self.is_completed() {
            return false;
        }

        let destination = self.position.step(heading);

        if self.path.last() == Some(&destination) {
            trace!(?heading, "refusing u-turn");
            return false;
        }

        match self.grid.get(destination) {
            Some(Pipe::Start) | None => {}
            Some(pipe) => {
                trace!(?heading, %pipe, "destination occupied");
                return false;
            }
        }

        let left = self.position;
        self.path.push(left);
        self.position = destination;
        self.grid.include(destination);

        if self.path.len() >= 2 {
            let before = self.path[self.path.len() - 2];
            let incoming = before.heading_to(left);
            if let Some(shape) = incoming.and_then(|incoming| turn_shape(incoming, heading)) {
                self.grid.add_value(left.x, left.y, shape);
            }
        }

        debug!(
            x = destination.x,
            y = destination.y,
            path_len = self.path.len(),
            completed = self.is_completed(),
            "cursor moved"
        );
        true
    }

    /// Step the cursor back to where it was before the last move and erase
    /// the shape written there. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.path.pop() else {
            return false;
        };

        self.position = previous;
        if self.grid.get(previous) != Some(Pipe::Start) {
            self.grid.remove(previous);
        }

        debug!(x = previous.x, y = previous.y, path_len = self.path.len(), "undo");
        true
    }
}

impl Default for PipeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipeView for PipeBuilder {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn position(&self) -> Option<Position> {
        Some(self.position)
    }

    fn path(&self) -> &[Position] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builder_is_single_start() {
        let builder = PipeBuilder::new();
        assert_eq!(builder.get_value(0, 0), Some(Pipe::Start));
        assert_eq!(builder.grid().len(), 1);
        assert_eq!(builder.columns(), 0..1);
        assert_eq!(builder.rows(), 0..1);
        assert!(builder.is_here(0, 0));
        assert!(!builder.is_completed());
    }

    #[test]
    fn test_straight_run_writes_horizontal() {
        let mut builder = PipeBuilder::new();
        assert!(builder.move_cursor(Heading::East));
        assert_eq!(builder.get_value(1, 0), None);
        assert!(builder.move_cursor(Heading::East));
        assert_eq!(builder.get_value(1, 0), Some(Pipe::Horizontal));
        assert_eq!(builder.get_value(2, 0), None);
        assert_eq!(builder.cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_u_turn_refused() {
        let mut builder = PipeBuilder::new();
        builder.move_cursor(Heading::East);
        assert!(!builder.move_cursor(Heading::West));
        assert_eq!(builder.cursor(), Position::new(1, 0));
        assert_eq!(builder.path().len(), 1);
    }
}
