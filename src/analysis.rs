//! Puzzle text parsing and analysis of a closed loop.
//!
//! Puzzle text is one row per non-blank line, using the pipe symbols
//! `| - L J 7 F S` with `.` or `◦` for empty ground.

use crate::error::PipeError;
use crate::grid::Position;
use crate::heading::{turn_shape, Heading};
use crate::pipe::Pipe;
use crate::view::PipeView;
use crate::walker::PipeWalker;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Build a walker grid from puzzle text
pub fn parse_puzzle(text: &str) -> Result<PipeWalker, PipeError> {
    let mut walker = PipeWalker::new();

    let rows = text.lines().map(str::trim_end).filter(|line| !line.trim().is_empty());
    for (y, line) in rows.enumerate() {
        for (x, ch) in line.chars().enumerate() {
            let pipe = Pipe::try_from(ch)?;
            walker.add_value(x as i32, y as i32, pipe);
        }
    }

    Ok(walker)
}

/// Facts about a loop the walker has fully traced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSummary {
    /// Cells in the loop, start included
    pub length: usize,
    /// Steps from the start to the point of the loop farthest from it
    pub farthest: usize,
    /// Shape the start cell stands in for
    pub start_shape: Pipe,
    /// Cells strictly inside the loop
    pub enclosed: usize,
}

impl LoopSummary {
    pub fn from_walker(walker: &PipeWalker) -> Result<Self, PipeError> {
        if !walker.is_completed() {
            return Err(PipeError::NotCompleted);
        }
        let start = walker.position().ok_or(PipeError::NotCompleted)?;
        let path = walker.path();

        let start_shape = infer_start_shape(start, path).ok_or(PipeError::NotCompleted)?;

        let mut members: HashSet<Position> = path.iter().copied().collect();
        members.insert(start);

        let length = path.len() + 1;
        let enclosed = count_enclosed(walker, &members, start, start_shape);

        Ok(LoopSummary {
            length,
            farthest: length / 2,
            start_shape,
            enclosed,
        })
    }
}

/// Parse, walk and summarize puzzle text
pub fn solve(text: &str) -> Result<LoopSummary, PipeError> {
    let mut walker = parse_puzzle(text)?;
    walker.run()?;
    LoopSummary::from_walker(&walker)
}

/// The start cell is entered from the last path cell and left towards the first
fn infer_start_shape(start: Position, path: &[Position]) -> Option<Pipe> {
    let first = *path.first()?;
    let last = *path.last()?;
    let departure = start.heading_to(first)?;
    let arrival = last.heading_to(start)?;
    turn_shape(arrival, departure)
}

/// Scan each row left to right, flipping "inside" whenever a loop cell
/// opens to the north. Non-loop cells seen while inside are enclosed.
fn count_enclosed(
    walker: &PipeWalker,
    members: &HashSet<Position>,
    start: Position,
    start_shape: Pipe,
) -> usize {
    let mut enclosed = 0;

    for y in walker.rows() {
        let mut inside = false;
        for x in walker.columns() {
            let pos = Position::new(x, y);
            if members.contains(&pos) {
                let shape = if pos == start {
                    start_shape
                } else {
                    walker.grid().get(pos).unwrap_or(Pipe::Empty)
                };
                if shape.opens(Heading::North) {
                    inside = !inside;
                }
            } else if inside {
                enclosed += 1;
            }
        }
    }

    enclosed
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "\
.....
.S-7.
.|.|.
.L-J.
.....
";

    #[test]
    fn test_parse_keeps_every_cell() {
        let walker = parse_puzzle(SIMPLE).unwrap();
        assert_eq!(walker.grid().len(), 25);
        assert_eq!(walker.columns(), 0..5);
        assert_eq!(walker.rows(), 0..5);
        assert_eq!(walker.get_value(1, 1), Some(Pipe::Start));
        assert_eq!(walker.get_value(0, 0), Some(Pipe::Empty));
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        let result = parse_puzzle("S-7\n|x|\nL-J\n");
        assert_eq!(result.err(), Some(PipeError::InvalidSymbol('x')));
    }

    #[test]
    fn test_solve_simple_loop() {
        let summary = solve(SIMPLE).unwrap();
        assert_eq!(summary.length, 8);
        assert_eq!(summary.farthest, 4);
        assert_eq!(summary.start_shape, Pipe::SouthEast);
        assert_eq!(summary.enclosed, 1);
    }

    #[test]
    fn test_summary_requires_completed_walk() {
        let mut walker = parse_puzzle(SIMPLE).unwrap();
        walker.start();
        assert_eq!(LoopSummary::from_walker(&walker), Err(PipeError::NotCompleted));
    }
}
