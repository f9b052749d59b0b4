use crate::error::Result;
use crate::grid::{Bounds, Grid};
use crate::pipe::Pipe;
use crate::walker::PipeWalker;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Save state containing the grid cells (walk progress is not saved)
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    /// Grid revision number, carried over to the restored grid
    pub grid_revision: u64,
    /// Tracked extent, so empty margins survive a reload
    pub bounds: Bounds,
    /// Occupied cells in row-major order
    pub cells: Vec<SavedCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCell {
    pub x: i32,
    pub y: i32,
    pub pipe: Pipe,
}

impl SaveState {
    /// Create a save state from the current grid
    pub fn from_grid(grid: &Grid) -> Self {
        let cells = grid
            .cells()
            .into_iter()
            .map(|(pos, pipe)| SavedCell { x: pos.x, y: pos.y, pipe })
            .collect();

        SaveState {
            grid_revision: grid.get_revision(),
            bounds: grid.bounds(),
            cells,
        }
    }

    /// Save to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        info!(path = %path.as_ref().display(), cells = self.cells.len(), "saved grid");
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let save_state: SaveState = serde_json::from_str(&json)?;
        info!(path = %path.as_ref().display(), cells = save_state.cells.len(), "loaded grid");
        Ok(save_state)
    }

    /// Rebuild the grid from the saved cells, bounds and revision. A save
    /// whose bounds miss some of its cells is widened to fit them.
    pub fn restore_grid(&self) -> Grid {
        let mut grid = Grid::new();
        for cell in &self.cells {
            grid.add_value(cell.x, cell.y, cell.pipe);
        }
        grid.restore_meta(self.bounds, self.grid_revision);
        grid
    }

    /// Walker over the restored grid, not yet started
    pub fn restore_walker(&self) -> PipeWalker {
        PipeWalker::from_grid(self.restore_grid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PipeView;

    #[test]
    fn test_save_and_reload() {
        let mut walker = PipeWalker::new();
        walker.add_value(0, 0, Pipe::Start);
        walker.add_value(1, 0, Pipe::SouthWest);
        walker.add_value(4, 3, Pipe::Empty);

        let path = std::env::temp_dir().join(format!("pipemaze_save_{}.json", std::process::id()));
        SaveState::from_grid(walker.grid()).save_to_file(&path).unwrap();

        let loaded = SaveState::load_from_file(&path).unwrap();
        let restored = loaded.restore_walker();
        let _ = fs::remove_file(&path);

        assert_eq!(restored.grid().cells(), walker.grid().cells());
        assert_eq!(restored.columns(), 0..5);
        assert_eq!(restored.rows(), 0..4);
        assert_eq!(restored.position(), None);
        assert_eq!(restored.grid().get_revision(), walker.grid().get_revision());
    }

    #[test]
    fn test_restore_keeps_cells_inside_bounds() {
        let json = r#"{
            "grid_revision": 42,
            "bounds": { "min_x": 0, "min_y": 0, "max_x": 1, "max_y": 1 },
            "cells": [
                { "x": 0, "y": 0, "pipe": "F" },
                { "x": 1, "y": 0, "pipe": "7" },
                { "x": 0, "y": 1, "pipe": "L" },
                { "x": 1, "y": 1, "pipe": "S" }
            ]
        }"#;
        let save: SaveState = serde_json::from_str(json).unwrap();
        let mut walker = save.restore_walker();

        assert_eq!(walker.columns(), 0..2);
        assert_eq!(walker.rows(), 0..2);
        assert_eq!(walker.grid().get_revision(), 42);

        // The start cell lies outside the saved bounds but is still found
        walker.start();
        assert_eq!(walker.position(), Some(crate::grid::Position::new(1, 1)));
        assert_eq!(walker.run(), Ok(4));
    }

    #[test]
    fn test_restore_keeps_wider_saved_bounds() {
        let mut grid = Grid::new();
        grid.add_value(1, 1, Pipe::Start);
        let mut save = SaveState::from_grid(&grid);
        save.bounds = Bounds { min_x: 0, min_y: 0, max_x: 6, max_y: 3 };

        let restored = save.restore_grid();
        assert_eq!(restored.columns(), 0..6);
        assert_eq!(restored.rows(), 0..3);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = SaveState::load_from_file("/nonexistent/pipemaze.json");
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn test_pipes_saved_as_symbols() {
        let mut grid = Grid::new();
        grid.add_value(2, 1, Pipe::NorthWest);
        let json = serde_json::to_string(&SaveState::from_grid(&grid)).unwrap();
        assert!(json.contains("\"pipe\":\"J\""), "{}", json);
    }
}
