use arboard::Clipboard;
use macroquad::prelude::*;
use pipemaze::action_log::{Action, ActionLog};
use pipemaze::config::{Config, LoggingConfig, CONFIG_PATH};
use pipemaze::save_state::SaveState;
use pipemaze::{parse_puzzle, render_text, solve, Heading, Pipe, PipeBuilder, PipeView, PipeWalker};
use std::fs;
use std::ops::Range;
use std::sync::OnceLock;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const SAVE_PATH: &str = "pipemaze_save.json";
const PANEL_HEIGHT: f32 = 110.0;

static CONFIG: OnceLock<Config> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Walk,
    Build,
}

/// Visualization state
struct ViewerState {
    config: &'static Config,
    mode: Mode,
    walker: PipeWalker,
    builder: PipeBuilder,
    action_log: ActionLog,
    /// Last error or notice shown under the grid
    status: String,
}

impl ViewerState {
    fn new(config: &'static Config) -> Self {
        let walker = match &config.puzzle.path {
            Some(path) => load_puzzle(path).unwrap_or_default(),
            None => PipeWalker::new(),
        };

        ViewerState {
            config,
            mode: Mode::Walk,
            walker,
            builder: PipeBuilder::new(),
            action_log: ActionLog::new(),
            status: String::new(),
        }
    }

    fn active_view(&self) -> &dyn PipeView {
        match self.mode {
            Mode::Walk => &self.walker,
            Mode::Build => &self.builder,
        }
    }

    /// Cells drawn on screen. The walker always shows at least the configured
    /// area; the builder gets a one-cell margin so the cursor has room to move.
    fn visible_ranges(&self) -> (Range<i32>, Range<i32>) {
        match self.mode {
            Mode::Walk => {
                let columns = self.walker.columns();
                let rows = self.walker.rows();
                (
                    0..columns.end.max(self.config.grid.cols),
                    0..rows.end.max(self.config.grid.rows),
                )
            }
            Mode::Build => {
                let columns = self.builder.columns();
                let rows = self.builder.rows();
                (columns.start - 1..columns.end + 1, rows.start - 1..rows.end + 1)
            }
        }
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32, forward: bool) {
        if self.mode != Mode::Walk {
            return;
        }

        let cell_size = self.config.grid.cell_size;
        let (columns, rows) = self.visible_ranges();
        let x = columns.start + (mouse_x / cell_size).floor() as i32;
        let y = rows.start + (mouse_y / cell_size).floor() as i32;
        if !columns.contains(&x) || !rows.contains(&y) {
            return;
        }

        let current = self.walker.get_value(x, y).unwrap_or(Pipe::Empty);
        let pipe = if forward { current.next() } else { current.prev() };
        self.walker.add_value(x, y, pipe);
        self.action_log.log(Action::SetPipe { x, y, pipe });
    }

    fn handle_keys(&mut self) {
        if is_key_pressed(KeyCode::Tab) {
            self.mode = match self.mode {
                Mode::Walk => Mode::Build,
                Mode::Build => Mode::Walk,
            };
            self.status.clear();
            self.action_log.log(Action::SwitchMode);
        }

        if is_key_pressed(KeyCode::R) {
            match self.mode {
                Mode::Walk => self.walker.clear(),
                Mode::Build => self.builder.clear(),
            }
            self.status.clear();
            self.action_log.log(Action::Clear);
        }

        if is_key_pressed(KeyCode::C) {
            self.copy_to_clipboard();
            self.action_log.log(Action::CopyToClipboard);
        }

        match self.mode {
            Mode::Walk => self.handle_walker_keys(),
            Mode::Build => self.handle_builder_keys(),
        }
    }

    fn handle_walker_keys(&mut self) {
        // A broken walk stays broken until restarted
        if is_key_pressed(KeyCode::Space) && self.walker.can_step() && self.walker.failure().is_none() {
            if let Err(e) = self.walker.step() {
                warn!(error = %e, "step failed");
                self.status = e.to_string();
            }
            self.action_log.log(Action::Step);
        }

        if is_key_pressed(KeyCode::Enter) {
            self.walker.start();
            self.status.clear();
            self.action_log.log(Action::Restart);
        }

        if is_key_pressed(KeyCode::S) {
            match SaveState::from_grid(self.walker.grid()).save_to_file(SAVE_PATH) {
                Ok(()) => self.status = format!("Saved to {}", SAVE_PATH),
                Err(e) => {
                    error!(error = %e, "save failed");
                    self.status = e.to_string();
                }
            }
            self.action_log.log(Action::Save);
        }

        if is_key_pressed(KeyCode::L) {
            match SaveState::load_from_file(SAVE_PATH) {
                Ok(state) => {
                    self.walker = state.restore_walker();
                    self.status = format!("Loaded {}", SAVE_PATH);
                }
                Err(e) => {
                    warn!(error = %e, "load failed");
                    self.status = e.to_string();
                }
            }
        }
    }

    fn handle_builder_keys(&mut self) {
        let keys = [
            (KeyCode::Up, Heading::North),
            (KeyCode::Down, Heading::South),
            (KeyCode::Right, Heading::East),
            (KeyCode::Left, Heading::West),
        ];

        for (key, heading) in keys {
            if is_key_pressed(key) {
                let moved = self.builder.move_cursor(heading);
                self.action_log.log(Action::Move { heading, moved });
            }
        }

        if is_key_pressed(KeyCode::Backspace) || is_key_pressed(KeyCode::U) {
            let undone = self.builder.undo();
            self.action_log.log(Action::Undo { undone });
        }
    }

    fn copy_to_clipboard(&self) {
        let grid_string = render_text(self.active_view());
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(grid_string) {
                    warn!(error = %e, "failed to copy to clipboard");
                } else {
                    info!("grid layout copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!(error = %e, "failed to access clipboard"),
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(visual.background_r, visual.background_g, visual.background_b, 255));

        let view = self.active_view();
        let cell_size = self.config.grid.cell_size;
        let (columns, rows) = self.visible_ranges();

        for y in rows.clone() {
            for x in columns.clone() {
                let px = (x - columns.start) as f32 * cell_size;
                let py = (y - rows.start) as f32 * cell_size;
                let path_index = view.path_index(x, y);

                let color = if view.is_here(x, y) {
                    Color::from_rgba(100, 116, 139, 255) // Current position
                } else if path_index.is_some() {
                    Color::from_rgba(40, 90, 60, 255) // Visited
                } else {
                    Color::from_rgba(60, 60, 60, 255)
                };
                draw_rectangle(px, py, cell_size - 1.0, cell_size - 1.0, color);

                if let Some(pipe) = view.get_value(x, y).filter(|&p| p != Pipe::Empty) {
                    draw_text(
                        &pipe.symbol().to_string(),
                        px + cell_size * 0.35,
                        py + cell_size * 0.7,
                        cell_size * 0.6,
                        WHITE,
                    );
                }

                if visual.show_path_index {
                    if let Some(index) = path_index {
                        draw_text(&index.to_string(), px + 2.0, py + 10.0, 12.0, YELLOW);
                    }
                }
            }
        }

        let top = rows.len() as f32 * cell_size + 20.0;
        let help = match self.mode {
            Mode::Walk => "WALK  click/right-click: cycle pipe  Space: step  Enter: restart  S/L: save/load",
            Mode::Build => "BUILD  arrows: move  Backspace/U: undo",
        };
        draw_text(help, 10.0, top, 18.0, WHITE);
        draw_text("Tab: switch mode  R: clear  C: copy grid  Esc: quit", 10.0, top + 20.0, 18.0, WHITE);

        let progress = if view.is_completed() {
            format!("Loop closed after {} cells", view.path().len() + 1)
        } else {
            format!("Path length: {}", view.path().len())
        };
        draw_text(&progress, 10.0, top + 45.0, 20.0, GREEN);

        if !self.status.is_empty() {
            draw_text(&self.status, 10.0, top + 70.0, 18.0, RED);
        }
    }

    fn finish(&self) {
        info!("{}", self.action_log.summary());
        if self.config.logging.enable_action_log {
            if let Err(e) = self.action_log.save_to_file(&self.config.logging.action_log_path) {
                warn!(error = %e, "failed to save action log");
            }
        }
    }
}

fn load_puzzle(path: &str) -> Option<PipeWalker> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path, error = %e, "failed to read puzzle");
            return None;
        }
    };

    match parse_puzzle(&text) {
        Ok(walker) => {
            info!(path, cells = walker.grid().len(), "loaded puzzle");
            Some(walker)
        }
        Err(e) => {
            warn!(path, error = %e, "failed to parse puzzle");
            None
        }
    }
}

fn run_solver(path: &str) {
    match fs::read_to_string(path) {
        Ok(text) => match solve(&text) {
            Ok(summary) => println!(
                "{}: loop length {}, farthest {}, start shape '{}', enclosed {}",
                path, summary.length, summary.farthest, summary.start_shape, summary.enclosed
            ),
            Err(e) => error!(path, error = %e, "failed to solve puzzle"),
        },
        Err(e) => error!(path, error = %e, "failed to read puzzle"),
    }
}

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Read the config file once, set up tracing from it, then log how the load
/// went. Shared by `window_conf` and `main`.
fn startup_config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let loaded = Config::try_load_from(CONFIG_PATH);
        let filter = match &loaded {
            Ok(config) => config.logging.filter.clone(),
            Err(_) => LoggingConfig::default().filter,
        };
        init_tracing(&filter);
        Config::or_default(loaded, CONFIG_PATH)
    })
}

fn window_conf() -> Conf {
    let config = startup_config();
    let cell_size = config.grid.cell_size;
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: ((config.grid.cols.max(12) as f32) * cell_size) as i32,
        window_height: ((config.grid.rows.max(8) as f32) * cell_size + PANEL_HEIGHT) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = startup_config();

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 && args[1] == "--solve" {
        run_solver(&args[2]);
        return;
    }

    let mut state = ViewerState::new(config);

    loop {
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y, is_mouse_button_pressed(MouseButton::Left));
        }

        state.handle_keys();

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }

    state.finish();
}
