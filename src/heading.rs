use crate::pipe::Pipe;
use serde::{Deserialize, Serialize};

/// Unit move between orthogonally adjacent cells (+y points down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    /// Probe order used when leaving the start cell. Pipes that look
    /// connected on more than one side are resolved by this order alone.
    pub const INITIAL_SCAN: [Heading; 4] =
        [Heading::South, Heading::North, Heading::East, Heading::West];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Heading::North => (0, -1),
            Heading::South => (0, 1),
            Heading::East => (1, 0),
            Heading::West => (-1, 0),
        }
    }

    pub fn from_offset(dx: i32, dy: i32) -> Option<Heading> {
        match (dx, dy) {
            (0, -1) => Some(Heading::North),
            (0, 1) => Some(Heading::South),
            (1, 0) => Some(Heading::East),
            (-1, 0) => Some(Heading::West),
            _ => None,
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::South => Heading::North,
            Heading::East => Heading::West,
            Heading::West => Heading::East,
        }
    }
}

/// Heading the walk leaves `pipe` on after entering it while travelling `heading`.
/// `None` when the pipe has no opening on the side it was entered from.
pub fn exit_heading(pipe: Pipe, heading: Heading) -> Option<Heading> {
    use Heading::*;

    match (pipe, heading) {
        (Pipe::Vertical, South) => Some(South),
        (Pipe::Vertical, North) => Some(North),
        (Pipe::Horizontal, East) => Some(East),
        (Pipe::Horizontal, West) => Some(West),
        (Pipe::NorthEast, South) => Some(East),
        (Pipe::NorthEast, West) => Some(North),
        (Pipe::NorthWest, East) => Some(North),
        (Pipe::NorthWest, South) => Some(West),
        (Pipe::SouthWest, East) => Some(South),
        (Pipe::SouthWest, North) => Some(West),
        (Pipe::SouthEast, West) => Some(South),
        (Pipe::SouthEast, North) => Some(East),
        _ => None,
    }
}

/// Shape a cell must have when a path enters it travelling `incoming` and
/// leaves travelling `outgoing`. U-turns have no shape.
pub fn turn_shape(incoming: Heading, outgoing: Heading) -> Option<Pipe> {
    use Heading::*;

    match (incoming, outgoing) {
        (South, South) | (North, North) => Some(Pipe::Vertical),
        (East, East) | (West, West) => Some(Pipe::Horizontal),
        (South, East) | (West, North) => Some(Pipe::NorthEast),
        (East, North) | (South, West) => Some(Pipe::NorthWest),
        (East, South) | (North, West) => Some(Pipe::SouthWest),
        (West, South) | (North, East) => Some(Pipe::SouthEast),
        _ => None,
    }
}
