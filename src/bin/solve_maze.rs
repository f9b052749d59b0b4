//! Headless pipe maze solver
//!
//! Reads one or more puzzle text files and prints the loop length, the
//! distance to the farthest loop cell, the inferred start shape and the
//! number of enclosed cells for each.

use pipemaze::config::{Config, LoggingConfig, CONFIG_PATH};
use pipemaze::{parse_puzzle, render_text, LoopSummary};
use std::env;
use std::fs;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() {
    // Tracing needs the filter before the config load can be logged
    let loaded = Config::try_load_from(CONFIG_PATH);
    let filter = match &loaded {
        Ok(config) => config.logging.filter.clone(),
        Err(_) => LoggingConfig::default().filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
    Config::or_default(loaded, CONFIG_PATH);

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <puzzle.txt>...", args[0]);
        eprintln!("Walks the loop through 'S' and reports its length and enclosed area");
        std::process::exit(1);
    }

    let mut failures = 0;
    for path in &args[1..] {
        match solve_file(path) {
            Ok(summary) => {
                println!("=== {} ===", path);
                println!("Loop length:  {}", summary.length);
                println!("Farthest:     {}", summary.farthest);
                println!("Start shape:  {}", summary.start_shape);
                println!("Enclosed:     {}", summary.enclosed);
            }
            Err(e) => {
                error!(path = %path, error = %e, "failed to solve puzzle");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

fn solve_file(path: &str) -> pipemaze::Result<LoopSummary> {
    let text = fs::read_to_string(path)?;
    let mut walker = parse_puzzle(&text)?;
    walker.run()?;
    debug!("traced loop:\n{}", render_text(&walker));
    Ok(LoopSummary::from_walker(&walker)?)
}
