use std::time::{Duration, Instant};

use rand::Rng;

use crate::{
    generators::generate,
    maze::{Coord, Maze, partial::build_partial_map},
    settings::Settings,
    solvers::{Search, Solver},
};

/// Result of a finished search.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub solver: Solver,
    /// Wall-clock time from starting the search until it completed
    pub elapsed: Duration,
    /// Number of cells the search handed out
    pub discovered: usize,
    /// Path from start to end, empty if the end was not reachable
    pub path: Vec<Coord>,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// No search is running
    Idle,
    /// The running search discovered a new cell
    Discovered(Coord),
    /// The running search completed during this tick
    Finished(Outcome),
}

struct Running {
    search: Search,
    started_at: Instant,
}

/// One round: a ground-truth maze, the partial map derived from it, and at most
/// one search running over the partial map.
pub struct Round {
    truth: Maze,
    known: Maze,
    start: Coord,
    end: Coord,
    running: Option<Running>,
    /// Cells handed out by the current or most recent search, in discovery order
    discovered: Vec<Coord>,
    last_outcome: Option<Outcome>,
}

impl Round {
    /// Generates a new ground truth and the known map for it.
    /// The start is the top left cell and the end is the bottom right cell.
    pub fn new<R: Rng>(settings: &Settings, rng: &mut R) -> Self {
        let truth = generate(settings.cols, settings.rows, rng);
        let start = (0, 0);
        let end = (settings.cols - 1, settings.rows - 1);

        // The true solution is always part of the known map
        let true_path = Solver::Bfs
            .start(&truth, start, end)
            .run_to_end(&truth)
            .path_to(end);
        let known = build_partial_map(&truth, &true_path, settings.reveal_percent, rng);
        tracing::info!(
            cols = settings.cols,
            rows = settings.rows,
            true_path_len = true_path.len(),
            "new round"
        );

        Round {
            truth,
            known,
            start,
            end,
            running: None,
            discovered: Vec::new(),
            last_outcome: None,
        }
    }

    pub fn truth(&self) -> &Maze {
        &self.truth
    }

    /// The partial map the searches run on.
    pub fn known(&self) -> &Maze {
        &self.known
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn is_searching(&self) -> bool {
        self.running.is_some()
    }

    /// Solver of the search in progress, if any.
    pub fn running_solver(&self) -> Option<Solver> {
        self.running.as_ref().map(|running| running.search.solver())
    }

    /// Cells discovered by the current or most recent search.
    pub fn discovered(&self) -> &[Coord] {
        &self.discovered
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Starts a search with the given solver. Returns false if a search is already running.
    pub fn begin(&mut self, solver: Solver) -> bool {
        if self.running.is_some() {
            return false;
        }
        self.last_outcome = None;
        self.discovered.clear();
        self.running = Some(Running {
            search: solver.start(&self.known, self.start, self.end),
            started_at: Instant::now(),
        });
        true
    }

    /// Advances the running search by one discovery.
    pub fn tick(&mut self) -> Tick {
        let Some(running) = self.running.as_mut() else {
            return Tick::Idle;
        };
        if let Some(coord) = running.search.step(&self.known) {
            self.discovered.push(coord);
            return Tick::Discovered(coord);
        }

        let Some(running) = self.running.take() else {
            return Tick::Idle;
        };
        let outcome = Outcome {
            solver: running.search.solver(),
            elapsed: running.started_at.elapsed(),
            discovered: self.discovered.len(),
            path: running.search.into_predecessors().path_to(self.end),
        };
        tracing::info!(
            solver = outcome.solver.short_name(),
            elapsed_ms = outcome.elapsed.as_secs_f64() * 1000.0,
            discovered = outcome.discovered,
            path_len = outcome.path.len(),
            "search completed"
        );
        self.last_outcome = Some(outcome.clone());
        Tick::Finished(outcome)
    }

    /// Runs a search to completion without animation.
    pub fn run_to_end(&mut self, solver: Solver) -> Outcome {
        // Discard a running search so the new one can start
        self.running = None;
        self.begin(solver);
        loop {
            if let Tick::Finished(outcome) = self.tick() {
                return outcome;
            }
        }
    }
}
