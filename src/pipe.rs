use crate::error::PipeError;
use crate::heading::Heading;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape occupying a grid cell
///
/// Turn variants are named after the two sides they connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pipe {
    #[serde(rename = "◦", alias = ".")]
    Empty,
    #[serde(rename = "|")]
    Vertical,
    #[serde(rename = "-")]
    Horizontal,
    #[serde(rename = "L")]
    NorthEast,
    #[serde(rename = "J")]
    NorthWest,
    #[serde(rename = "7")]
    SouthWest,
    #[serde(rename = "F")]
    SouthEast,
    #[serde(rename = "S")]
    Start,
}

impl Pipe {
    /// Every pipe in selector order
    pub const ALL: [Pipe; 8] = [
        Pipe::Empty,
        Pipe::Vertical,
        Pipe::Horizontal,
        Pipe::NorthEast,
        Pipe::NorthWest,
        Pipe::SouthWest,
        Pipe::SouthEast,
        Pipe::Start,
    ];

    pub fn symbol(self) -> char {
        match self {
            Pipe::Empty => '◦',
            Pipe::Vertical => '|',
            Pipe::Horizontal => '-',
            Pipe::NorthEast => 'L',
            Pipe::NorthWest => 'J',
            Pipe::SouthWest => '7',
            Pipe::SouthEast => 'F',
            Pipe::Start => 'S',
        }
    }

    /// The two sides this shape opens onto. `Empty` and `Start` have none;
    /// the start cell's shape is only known once a loop has been walked.
    pub fn sides(self) -> Option<(Heading, Heading)> {
        match self {
            Pipe::Vertical => Some((Heading::North, Heading::South)),
            Pipe::Horizontal => Some((Heading::East, Heading::West)),
            Pipe::NorthEast => Some((Heading::North, Heading::East)),
            Pipe::NorthWest => Some((Heading::North, Heading::West)),
            Pipe::SouthWest => Some((Heading::South, Heading::West)),
            Pipe::SouthEast => Some((Heading::South, Heading::East)),
            Pipe::Empty | Pipe::Start => None,
        }
    }

    pub fn opens(self, side: Heading) -> bool {
        self.sides().is_some_and(|(a, b)| a == side || b == side)
    }

    /// Next pipe in selector order, wrapping around
    pub fn next(self) -> Pipe {
        let index = self.index();
        Pipe::ALL[(index + 1) % Pipe::ALL.len()]
    }

    /// Previous pipe in selector order, wrapping around
    pub fn prev(self) -> Pipe {
        let index = self.index();
        Pipe::ALL[(index + Pipe::ALL.len() - 1) % Pipe::ALL.len()]
    }

    fn index(self) -> usize {
        Pipe::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Pipe {
    type Error = PipeError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            '◦' | '.' => Ok(Pipe::Empty),
            '|' => Ok(Pipe::Vertical),
            '-' => Ok(Pipe::Horizontal),
            'L' => Ok(Pipe::NorthEast),
            'J' => Ok(Pipe::NorthWest),
            '7' => Ok(Pipe::SouthWest),
            'F' => Ok(Pipe::SouthEast),
            'S' => Ok(Pipe::Start),
            other => Err(PipeError::InvalidSymbol(other)),
        }
    }
}

impl FromStr for Pipe {
    type Err = PipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Pipe::try_from(ch),
            (Some(ch), Some(_)) => Err(PipeError::InvalidSymbol(ch)),
            (None, _) => Err(PipeError::InvalidSymbol(' ')),
        }
    }
}
