pub mod action_log;
pub mod analysis;
pub mod builder;
pub mod config;
pub mod error;
pub mod grid;
pub mod heading;
pub mod pipe;
pub mod save_state;
pub mod view;
pub mod walker;

pub use analysis::{parse_puzzle, solve, LoopSummary};
pub use builder::PipeBuilder;
pub use error::{Error, PipeError, Result};
pub use grid::{Bounds, Grid, Position};
pub use heading::{exit_heading, turn_shape, Heading};
pub use pipe::Pipe;
pub use view::{render_text, PipeView};
pub use walker::PipeWalker;
