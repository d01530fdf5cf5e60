use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
};

use super::{PredecessorMap, Solver, manhattan_distance, valid_moves};
use crate::maze::{Coord, Maze, unravel_index};

/// Priority queue entry: (priority, insertion sequence, cell index).
/// The sequence number keeps equal priorities in FIFO order.
type OpenEntry = Reverse<(u32, u64, usize)>;

/// Best-first search with unit step cost. Ordered by `g + h` for A*, by `g` alone for Dijkstra.
#[derive(Debug, Clone)]
pub struct BestFirst {
    solver: Solver,
    end: Coord,
    cols: u8,
    open_set: BinaryHeap<OpenEntry>,
    /// Whether a cell currently has an entry in `open_set`
    in_open_set: Vec<bool>,
    /// Best known cost from the start, `u32::MAX` if unknown
    g_score: Vec<u32>,
    came_from: PredecessorMap,
    count: u64,
    pending: VecDeque<Coord>,
    done: bool,
}

impl BestFirst {
    pub fn astar(maze: &Maze, start: Coord, end: Coord) -> Self {
        BestFirst::new(Solver::AStar, maze, start, end)
    }

    pub fn dijkstra(maze: &Maze, start: Coord, end: Coord) -> Self {
        BestFirst::new(Solver::Dijkstra, maze, start, end)
    }

    fn new(solver: Solver, maze: &Maze, start: Coord, end: Coord) -> Self {
        let start_idx = maze.ravel_index(start);
        let mut came_from = PredecessorMap::new(maze);
        came_from.insert_start(start);
        let mut g_score = vec![u32::MAX; maze.len()];
        g_score[start_idx] = 0;
        let mut in_open_set = vec![false; maze.len()];
        in_open_set[start_idx] = true;

        BestFirst {
            solver,
            end,
            cols: maze.cols(),
            open_set: BinaryHeap::from([Reverse((0, 0, start_idx))]),
            in_open_set,
            g_score,
            came_from,
            count: 0,
            pending: VecDeque::new(),
            done: false,
        }
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    fn heuristic(&self, coord: Coord) -> u32 {
        match self.solver {
            Solver::AStar => manhattan_distance(coord, self.end),
            _ => 0,
        }
    }

    pub fn step(&mut self, maze: &Maze) -> Option<Coord> {
        loop {
            if let Some(coord) = self.pending.pop_front() {
                return Some(coord);
            }
            if self.done {
                return None;
            }

            let Some(Reverse((_, _, current_idx))) = self.open_set.pop() else {
                self.finish();
                return None;
            };
            self.in_open_set[current_idx] = false;
            let current = unravel_index(self.cols, current_idx);
            if current == self.end {
                self.finish();
                return None;
            }

            let tentative_g = self.g_score[current_idx] + 1;
            for neighbor in valid_moves(maze, current) {
                let idx = maze.ravel_index(neighbor);
                if tentative_g >= self.g_score[idx] {
                    continue;
                }
                self.came_from.insert(neighbor, current);
                self.g_score[idx] = tentative_g;
                // An improved cell that is already queued keeps its queued entry
                if !self.in_open_set[idx] {
                    self.count += 1;
                    let priority = tentative_g + self.heuristic(neighbor);
                    self.open_set.push(Reverse((priority, self.count, idx)));
                    self.in_open_set[idx] = true;
                    self.pending.push_back(neighbor);
                }
            }
        }
    }

    fn finish(&mut self) {
        self.done = true;
        tracing::debug!(
            solver = self.solver.short_name(),
            discovered = self.count,
            reached_end = self.came_from.contains(self.end),
            "search finished"
        );
    }

    pub fn is_done(&self) -> bool {
        self.done && self.pending.is_empty()
    }

    pub fn predecessors(&self) -> &PredecessorMap {
        &self.came_from
    }

    pub fn into_predecessors(self) -> PredecessorMap {
        self.came_from
    }

    /// Cost of the best known path from the start to `coord`, if one is known.
    pub fn cost(&self, maze: &Maze, coord: Coord) -> Option<u32> {
        let g = self.g_score[maze.ravel_index(coord)];
        (g != u32::MAX).then_some(g)
    }
}
