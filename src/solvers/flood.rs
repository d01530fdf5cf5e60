use std::collections::VecDeque;

use super::valid_moves;
use crate::maze::{Coord, Direction, Maze, ravel_index};

/// Steps from every cell to the nearest goal over the explored part of a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    cols: u8,
    distances: Vec<Option<u32>>,
}

/// Floods outwards from all `goals` at once, one step per ring.
/// Goals get distance 0. Cells that cannot reach a goal through explored
/// passages stay without a distance.
pub fn distance_field(maze: &Maze, goals: &[Coord]) -> DistanceField {
    let mut distances = vec![None; maze.len()];
    let mut queue = VecDeque::with_capacity(maze.len());
    for &goal in goals {
        let idx = maze.ravel_index(goal);
        if distances[idx].is_none() {
            distances[idx] = Some(0);
            queue.push_back((goal, 0));
        }
    }

    while let Some((current, dist)) = queue.pop_front() {
        for next in valid_moves(maze, current) {
            let idx = maze.ravel_index(next);
            if distances[idx].is_none() {
                distances[idx] = Some(dist + 1);
                queue.push_back((next, dist + 1));
            }
        }
    }

    let field = DistanceField {
        cols: maze.cols(),
        distances,
    };
    tracing::debug!(
        goals = goals.len(),
        reached = field.reached(),
        "computed distance field"
    );
    field
}

impl DistanceField {
    /// Steps to the nearest goal, `None` if no goal is reachable.
    pub fn distance(&self, coord: Coord) -> Option<u32> {
        self.distances
            .get(ravel_index(self.cols, coord))
            .copied()
            .flatten()
    }

    /// Number of cells with a distance, goals included.
    pub fn reached(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    /// Direction of the open neighbor closest to a goal.
    /// Ties go to the first direction in top, right, bottom, left order.
    /// `None` on a goal, or when `coord` cannot reach one.
    pub fn best_move(&self, maze: &Maze, coord: Coord) -> Option<Direction> {
        let mut best = self.distance(coord)?;
        let mut best_next = None;
        for next in valid_moves(maze, coord) {
            if let Some(dist) = self.distance(next).filter(|&d| d < best) {
                best = dist;
                best_next = Some(next);
            }
        }
        Direction::between(coord, best_next?)
    }

    /// Follows [`DistanceField::best_move`] from `start` until a goal is reached.
    /// Returns an empty route if `start` cannot reach a goal.
    pub fn route_from(&self, maze: &Maze, start: Coord) -> Vec<Coord> {
        if self.distance(start).is_none() {
            return Vec::new();
        }
        let mut route = vec![start];
        let mut current = start;
        while let Some(direction) = self.best_move(maze, current) {
            current = direction.step(current);
            route.push(current);
        }
        route
    }
}
