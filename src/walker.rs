use crate::error::PipeError;
use crate::grid::{Grid, Position};
use crate::heading::{exit_heading, Heading};
use crate::pipe::Pipe;
use crate::view::PipeView;
use tracing::{debug, trace, warn};

/// Walks a user-filled grid from its start cell along pipe connections
/// until the walk arrives back on a start cell.
#[derive(Debug, Clone, Default)]
pub struct PipeWalker {
    grid: Grid,
    position: Option<Position>,
    path: Vec<Position>,
    /// Heading the next full step moves along
    next_heading: Option<Heading>,
    /// Data error that ended the walk; cleared by `start` or `clear`
    failed: Option<PipeError>,
}

impl PipeWalker {
    pub fn new() -> Self {
        PipeWalker {
            grid: Grid::new(),
            position: None,
            path: Vec::new(),
            next_heading: None,
            failed: None,
        }
    }

    /// Wrap an existing grid; the walk has not started yet
    pub fn from_grid(grid: Grid) -> Self {
        PipeWalker {
            grid,
            ..Self::new()
        }
    }

    pub fn add_value(&mut self, x: i32, y: i32, pipe: Pipe) {
        self.grid.add_value(x, y, pipe);
    }

    /// Reset grid, position, path and pending heading together
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Heading the next full step will take, once the initial step is done
    pub fn next_heading(&self) -> Option<Heading> {
        self.next_heading
    }

    /// Error that broke the current walk, if any
    pub fn failure(&self) -> Option<&PipeError> {
        self.failed.as_ref()
    }

    /// Place the walker on the start cell, scanning row-major. The last start
    /// cell found wins. Does nothing if the grid has no start cell.
    pub fn start(&mut self) {
        let mut found = None;
        for y in self.grid.rows() {
            for x in self.grid.columns() {
                if self.grid.get_value(x, y) == Some(Pipe::Start) {
                    found = Some(Position::new(x, y));
                }
            }
        }

        if let Some(pos) = found {
            debug!(x = pos.x, y = pos.y, "walk starting");
            self.position = Some(pos);
            self.path.clear();
            self.next_heading = None;
            self.failed = None;
        }
    }

    /// Move off the start cell onto the first connected neighbour, probing
    /// south, north, east, west in that order.
    pub fn step_initial(&mut self) -> Result<(), PipeError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if self.next_heading.is_some() {
            return Err(PipeError::InitialStepTaken);
        }
        let current = self.position.ok_or(PipeError::NoStartingPosition)?;

        for heading in Heading::INITIAL_SCAN {
            let neighbour = current.step(heading);
            let Some(pipe) = self.grid.get(neighbour) else {
                continue;
            };

            if let Some(exit) = exit_heading(pipe, heading) {
                trace!(?heading, ?exit, x = neighbour.x, y = neighbour.y, "initial step");
                self.position = Some(neighbour);
                self.next_heading = Some(exit);
                return Ok(());
            }
        }

        Err(PipeError::NoConnection { x: current.x, y: current.y })
    }

    /// Advance the walk by one cell, starting it first if needed. After a
    /// missing or disconnected pipe every further step returns that error
    /// until the walk is restarted.
    pub fn step(&mut self) -> Result<(), PipeError> {
        let Some(current) = self.position else {
            self.start();
            return Ok(());
        };

        if let Some(err) = &self.failed {
            return Err(err.clone());
        }

        if self.is_completed() {
            return Err(PipeError::WalkCompleted);
        }

        let Some(heading) = self.next_heading else {
            return self.step_initial();
        };

        self.path.push(current);
        let next = current.step(heading);
        self.position = Some(next);

        let Some(pipe) = self.grid.get(next) else {
            return Err(self.fail(PipeError::MissingPipe { x: next.x, y: next.y }));
        };

        if pipe == Pipe::Start {
            debug!(x = next.x, y = next.y, moves = self.path.len() + 1, "walk reached start");
            self.next_heading = None;
            return Ok(());
        }

        match exit_heading(pipe, heading) {
            Some(exit) => {
                trace!(x = next.x, y = next.y, %pipe, ?exit, "step");
                self.next_heading = Some(exit);
                Ok(())
            }
            None => Err(self.fail(PipeError::Disconnected { x: next.x, y: next.y, pipe })),
        }
    }

    fn fail(&mut self, err: PipeError) -> PipeError {
        warn!(error = %err, "walk broken");
        self.next_heading = None;
        self.failed = Some(err.clone());
        err
    }

    pub fn can_step(&self) -> bool {
        !self.is_completed()
    }

    /// Walk until the loop closes and return its length in cells.
    /// Fails if the grid has no start cell.
    pub fn run(&mut self) -> Result<usize, PipeError> {
        if self.position.is_none() {
            self.start();
        }
        if self.position.is_none() {
            return Err(PipeError::NoStart);
        }

        // A closed loop can never visit more cells than the grid holds
        let limit = self.grid.len() + 1;
        let mut moves = 0;
        while !self.is_completed() {
            if moves > limit {
                return Err(PipeError::Unterminated { moves });
            }
            self.step()?;
            moves += 1;
        }

        Ok(self.path.len() + 1)
    }
}

impl PipeView for PipeWalker {
    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn position(&self) -> Option<Position> {
        self.position
    }

    fn path(&self) -> &[Position] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// S-7
    /// | |
    /// L-J
    fn square() -> PipeWalker {
        let mut walker = PipeWalker::new();
        let rows = ["S-7", "|.|", "L-J"];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                walker.add_value(x as i32, y as i32, Pipe::try_from(ch).unwrap());
            }
        }
        walker
    }

    #[test]
    fn test_step_without_start_calls_start() {
        let mut walker = square();
        walker.step().unwrap();
        assert_eq!(walker.position(), Some(Position::new(0, 0)));
        assert!(walker.path().is_empty());
        assert_eq!(walker.next_heading(), None);
    }

    #[test]
    fn test_initial_step_prefers_south() {
        let mut walker = square();
        walker.start();
        walker.step_initial().unwrap();
        assert_eq!(walker.position(), Some(Position::new(0, 1)));
        assert_eq!(walker.next_heading(), Some(Heading::South));
    }

    #[test]
    fn test_step_initial_without_position() {
        let mut walker = PipeWalker::new();
        assert_eq!(walker.step_initial(), Err(PipeError::NoStartingPosition));
    }

    #[test]
    fn test_run_returns_loop_length() {
        let mut walker = square();
        assert_eq!(walker.run(), Ok(8));
        assert!(walker.is_completed());
        assert_eq!(walker.step(), Err(PipeError::WalkCompleted));
    }

    #[test]
    fn test_run_without_start() {
        let mut walker = PipeWalker::new();
        walker.add_value(0, 0, Pipe::Vertical);
        assert_eq!(walker.run(), Err(PipeError::NoStart));
    }
}
