#![allow(dead_code)]

use pipemaze::{Pipe, PipeView, PipeWalker, Position};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const PUZZLE_DIR: &str = "./test_data/puzzles";

/// Expected results for one puzzle file, as listed in expected.json
#[derive(Debug, Clone, Deserialize)]
pub struct PuzzleExpectation {
    pub file: String,
    pub length: usize,
    pub farthest: usize,
    #[serde(rename = "startShape")]
    pub start_shape: Pipe,
    pub enclosed: usize,
}

/// Load the expectation list for the fixture puzzles
pub fn load_expectations(dir: &str) -> Result<Vec<PuzzleExpectation>, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(Path::new(dir).join("expected.json"))?;
    let expectations: Vec<PuzzleExpectation> = serde_json::from_str(&contents)?;
    Ok(expectations)
}

/// Build a walker from rows of pipe symbols, (0, 0) at the top left
pub fn walker_from_rows(rows: &[&str]) -> PipeWalker {
    let mut walker = PipeWalker::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let pipe = Pipe::try_from(ch).unwrap_or_else(|e| panic!("bad fixture: {}", e));
            walker.add_value(x as i32, y as i32, pipe);
        }
    }
    walker
}

/// Draw a view with the current position as '@' and visited cells as '*'
pub fn visualize<V: PipeView>(view: &V) -> String {
    let mut result = String::new();

    for y in view.rows() {
        for x in view.columns() {
            let symbol = if view.is_here(x, y) {
                '@'
            } else if view.path_index(x, y).is_some() {
                '*'
            } else {
                view.get_value(x, y).map_or(' ', |pipe| pipe.symbol())
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}

pub fn pos(x: i32, y: i32) -> Position {
    Position::new(x, y)
}
