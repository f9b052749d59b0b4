use crate::error::Result;
use crate::heading::Heading;
use crate::pipe::Pipe;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// User actions taken in the viewer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Set the pipe at (x, y) through the selector
    SetPipe { x: i32, y: i32, pipe: Pipe },
    /// Advance the walker
    Step,
    /// Put the walker back on its start cell
    Restart,
    /// Move the builder cursor
    Move { heading: Heading, moved: bool },
    /// Undo the last builder move
    Undo { undone: bool },
    /// Reset the active grid
    Clear,
    /// Switch between walker and builder
    SwitchMode,
    /// Copy the grid text to the clipboard
    CopyToClipboard,
    /// Save the walker grid
    Save,
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds since start
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Action logger
pub struct ActionLog {
    start_time: Instant,
    actions: Vec<LoggedAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog {
            start_time: Instant::now(),
            actions: Vec::new(),
        }
    }

    /// Log an action with the current timestamp
    pub fn log(&mut self, action: Action) {
        let timestamp_ms = self.start_time.elapsed().as_millis() as u64;
        self.actions.push(LoggedAction { timestamp_ms, action });
    }

    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut edits = 0;
        let mut steps = 0;
        let mut moves = 0;
        let mut refused = 0;
        let mut undos = 0;
        let mut clears = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::SetPipe { .. } => edits += 1,
                Action::Step => steps += 1,
                Action::Move { moved: true, .. } => moves += 1,
                Action::Move { moved: false, .. } => refused += 1,
                Action::Undo { undone: true } => undos += 1,
                Action::Clear => clears += 1,
                _ => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Walker: {} edits, {} steps\n\
             Builder: {} moves ({} refused), {} undos\n\
             Clears: {}",
            duration,
            self.actions.len(),
            edits,
            steps,
            moves,
            refused,
            undos,
            clears
        )
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut log = ActionLog::new();
        log.log(Action::SetPipe { x: 0, y: 0, pipe: Pipe::Start });
        log.log(Action::Step);
        log.log(Action::Step);
        log.log(Action::Move { heading: Heading::East, moved: true });
        log.log(Action::Move { heading: Heading::West, moved: false });
        log.log(Action::Undo { undone: true });
        log.log(Action::Undo { undone: false });

        assert_eq!(log.get_actions().len(), 7);
        let summary = log.summary();
        assert!(summary.contains("Total Events: 7"), "{}", summary);
        assert!(summary.contains("Walker: 1 edits, 2 steps"), "{}", summary);
        assert!(summary.contains("Builder: 1 moves (1 refused), 1 undos"), "{}", summary);
    }

    #[test]
    fn test_actions_serialize() {
        let action = Action::Move { heading: Heading::North, moved: true };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"Move":{"heading":"North","moved":true}}"#);
    }
}
