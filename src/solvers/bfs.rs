use std::collections::VecDeque;

use super::{PredecessorMap, valid_moves};
use crate::maze::{Coord, Maze};

/// Breadth-first search over the explored part of a maze.
#[derive(Debug, Clone)]
pub struct Bfs {
    end: Coord,
    /// Discovered cells waiting to be expanded, in discovery order
    queue: VecDeque<Coord>,
    /// Cells discovered by the last expansion that have not been handed out yet
    pending: VecDeque<Coord>,
    came_from: PredecessorMap,
    done: bool,
}

impl Bfs {
    pub fn new(maze: &Maze, start: Coord, end: Coord) -> Self {
        let mut came_from = PredecessorMap::new(maze);
        came_from.insert_start(start);
        Bfs {
            end,
            queue: VecDeque::from([start]),
            pending: VecDeque::new(),
            came_from,
            done: false,
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

            let Some(current) = self.queue.pop_front() else {
                self.finish();
                return None;
            };
            if current == self.end {
                self.finish();
                return None;
            }

            for next in valid_moves(maze, current) {
                if !self.came_from.contains(next) {
                    self.came_from.insert(next, current);
                    self.queue.push_back(next);
                    self.pending.push_back(next);
                }
            }
        }
    }

    fn finish(&mut self) {
        self.done = true;
        tracing::debug!(
            solver = "BFS",
            discovered = self.came_from.len() - 1,
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
}
