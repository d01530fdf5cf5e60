mod renderer;
pub mod round;
mod tile;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    style::{Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};
use rand::rngs::StdRng;

pub use renderer::{Renderer, tile_at};
pub use round::{Outcome, Round, Tick};
pub use tile::Tile;

use crate::{generators::get_rng, settings::Settings, solvers::Solver};

/// Fastest and slowest animation tick reachable with the arrow keys
const MIN_TICK: Duration = Duration::from_millis(1);
const MAX_TICK: Duration = Duration::from_millis(1000);

/// Action requested by a key press.
#[derive(Debug, Clone, Copy, PartialEq)]
enum UserAction {
    /// Start the given solver on the current round
    Solve(Solver),
    /// Generate a new round
    NewRound,
    /// Increase animation speed
    SpeedUp,
    /// Decrease animation speed
    SlowDown,
    /// Redraw after a terminal resize
    Redraw,
    /// Leave the app
    Quit,
}

fn user_action(event: &event::Event) -> Option<UserAction> {
    match event {
        event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
            match key_event.code {
                KeyCode::Char('1') => Some(UserAction::Solve(Solver::Bfs)),
                KeyCode::Char('2') => Some(UserAction::Solve(Solver::AStar)),
                KeyCode::Char('3') => Some(UserAction::Solve(Solver::Dijkstra)),
                KeyCode::Char('r') | KeyCode::Char('R') => Some(UserAction::NewRound),
                KeyCode::Up => Some(UserAction::SpeedUp),
                KeyCode::Down => Some(UserAction::SlowDown),
                KeyCode::Esc | KeyCode::Char('q') => Some(UserAction::Quit),
                _ => None,
            }
        }
        event::Event::Resize(_, _) => Some(UserAction::Redraw),
        _ => None,
    }
}

pub struct App {
    settings: Settings,
    rng: StdRng,
    /// Current time between two search steps
    tick: Duration,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let rng = get_rng(settings.seed);
        let tick = settings.tick;
        Self { settings, rng, tick }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop. Pulls one search step per tick and draws it.
    pub fn run(&mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        let (term_width, term_height) = terminal::size()?;
        self.settings.fit_terminal(
            term_width,
            term_height,
            Tile::WIDTH,
            Renderer::<Stdout>::NUM_LOG_ROWS,
        );

        let mut renderer = Renderer::new(stdout, term_width);
        let mut round = Round::new(&self.settings, &mut self.rng);
        self.redraw(&mut renderer, &round)?;

        tracing::info!("Started main app loop");
        let mut next_step = Instant::now();
        loop {
            let timeout = next_step.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                let action = user_action(&event::read()?);
                match action {
                    Some(UserAction::Quit) => break,
                    Some(UserAction::NewRound) => {
                        round = Round::new(&self.settings, &mut self.rng);
                        self.redraw(&mut renderer, &round)?;
                    }
                    Some(UserAction::Solve(solver)) => {
                        if round.begin(solver) {
                            // Clear highlights of the previous search
                            self.redraw(&mut renderer, &round)?;
                            renderer.log(1, Some(running_message(solver)))?;
                        }
                    }
                    Some(UserAction::SpeedUp) => {
                        self.tick = (self.tick / 2).max(MIN_TICK);
                        tracing::debug!(tick = ?self.tick, "speed up");
                    }
                    Some(UserAction::SlowDown) => {
                        self.tick = (self.tick * 2).min(MAX_TICK);
                        tracing::debug!(tick = ?self.tick, "slow down");
                    }
                    Some(UserAction::Redraw) => {
                        let (term_width, _) = terminal::size()?;
                        renderer.set_line_width(term_width);
                        self.redraw(&mut renderer, &round)?;
                        redraw_progress(&mut renderer, &round)?;
                    }
                    None => {}
                }
                continue;
            }

            next_step = Instant::now() + self.tick;
            match round.tick() {
                Tick::Idle => {}
                Tick::Discovered(coord) => {
                    if coord != round.start() && coord != round.end() {
                        renderer.draw_cell(coord, Tile::Discovered)?;
                    }
                }
                Tick::Finished(outcome) => {
                    renderer.draw_path(&outcome.path, outcome.solver)?;
                    renderer.log(1, Some(outcome_message(&outcome)))?;
                }
            }
        }
        tracing::info!("Exiting main app loop");
        renderer.finish()
    }

    fn redraw<W: Write>(&self, renderer: &mut Renderer<W>, round: &Round) -> std::io::Result<()> {
        renderer.draw_maze(round.known(), round.start(), round.end())?;
        renderer.log(
            0,
            Some(
                "1: BFS  2: A*  3: Dijkstra  r: new maze  ↑/↓: speed  Esc: exit"
                    .to_string()
                    .with(Color::Cyan),
            ),
        )?;
        renderer.log(1, None)
    }
}

/// Draws the discoveries, path and status of the current or most recent search
/// on top of a freshly drawn maze.
fn redraw_progress<W: Write>(renderer: &mut Renderer<W>, round: &Round) -> std::io::Result<()> {
    for &coord in round.discovered() {
        if coord != round.start() && coord != round.end() {
            renderer.draw_cell(coord, Tile::Discovered)?;
        }
    }
    if let Some(outcome) = round.last_outcome() {
        renderer.draw_path(&outcome.path, outcome.solver)?;
        renderer.log(1, Some(outcome_message(outcome)))?;
    } else if let Some(solver) = round.running_solver() {
        renderer.log(1, Some(running_message(solver)))?;
    }
    Ok(())
}

fn running_message(solver: Solver) -> StyledContent<String> {
    format!("Running {}...", solver).with(Color::Yellow)
}

/// Status line for a finished search.
fn outcome_message(outcome: &Outcome) -> StyledContent<String> {
    let elapsed_ms = outcome.elapsed.as_secs_f64() * 1000.0;
    if outcome.path.is_empty() {
        format!(
            "{} Time: {:.2} ms, discovered {} cells, no path found",
            outcome.solver.short_name(),
            elapsed_ms,
            outcome.discovered
        )
        .with(Color::Red)
        .attribute(Attribute::Bold)
    } else {
        format!(
            "{} Time: {:.2} ms, discovered {} cells, path length {}",
            outcome.solver.short_name(),
            elapsed_ms,
            outcome.discovered,
            outcome.path.len() - 1
        )
        .with(Color::Green)
        .attribute(Attribute::Bold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            user_action(&press(KeyCode::Char('1'))),
            Some(UserAction::Solve(Solver::Bfs))
        );
        assert_eq!(
            user_action(&press(KeyCode::Char('2'))),
            Some(UserAction::Solve(Solver::AStar))
        );
        assert_eq!(
            user_action(&press(KeyCode::Char('3'))),
            Some(UserAction::Solve(Solver::Dijkstra))
        );
        assert_eq!(user_action(&press(KeyCode::Char('r'))), Some(UserAction::NewRound));
        assert_eq!(user_action(&press(KeyCode::Esc)), Some(UserAction::Quit));
        assert_eq!(user_action(&press(KeyCode::Up)), Some(UserAction::SpeedUp));
        assert_eq!(user_action(&press(KeyCode::Char('x'))), None);
        assert_eq!(user_action(&Event::Resize(80, 24)), Some(UserAction::Redraw));
    }

    #[test]
    fn test_outcome_message() {
        let found = Outcome {
            solver: Solver::AStar,
            elapsed: Duration::from_millis(12),
            discovered: 40,
            path: vec![(0, 0), (1, 0), (1, 1)],
        };
        let msg = outcome_message(&found);
        assert_eq!(
            msg.content(),
            "A* Time: 12.00 ms, discovered 40 cells, path length 2"
        );

        let missing = Outcome {
            path: Vec::new(),
            ..found
        };
        assert!(outcome_message(&missing).content().ends_with("no path found"));
    }

    #[test]
    fn test_resize_keeps_search_progress() {
        let settings = Settings {
            cols: 6,
            rows: 5,
            seed: Some(17),
            ..Settings::default()
        };
        let app = App::new(settings.clone());
        let mut round = Round::new(&settings, &mut get_rng(settings.seed));
        round.begin(Solver::Bfs);
        let Tick::Discovered(coord) = round.tick() else {
            panic!("start cell has no explored neighbor");
        };

        let mut renderer = Renderer::new(Vec::new(), 200);
        app.redraw(&mut renderer, &round).unwrap();
        let before_redraw = renderer.written().len();
        redraw_progress(&mut renderer, &round).unwrap();
        let output = String::from_utf8_lossy(&renderer.written()[before_redraw..]).into_owned();
        assert!(output.contains("Running Breadth-First Search (BFS)..."));
        if coord != round.end() {
            assert!(output.contains(&Tile::Discovered.to_string()));
        }

        while !matches!(round.tick(), Tick::Finished(_)) {}
        let before_redraw = renderer.written().len();
        redraw_progress(&mut renderer, &round).unwrap();
        let output = String::from_utf8_lossy(&renderer.written()[before_redraw..]).into_owned();
        assert!(output.contains("BFS Time:"));
        assert!(!output.contains("Running"));
    }
}
