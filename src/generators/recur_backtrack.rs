use rand::Rng;

use crate::maze::{Coord, Maze, get_neighbors};

/// Builds a `cols` x `rows` maze and carves it into a perfect maze.
/// The returned maze is the ground truth, so every cell is explored.
pub fn generate<R: Rng>(cols: u8, rows: u8, rng: &mut R) -> Maze {
    let mut maze = Maze::new(cols, rows);
    recursive_backtrack(&mut maze, rng);
    maze.explore_all();
    maze
}

/// Carves a perfect maze with randomized depth-first backtracking, starting at (0, 0).
///
/// All walls are closed first. The `visited` flags are scratch state and are
/// cleared again before returning.
pub fn recursive_backtrack<R: Rng>(maze: &mut Maze, rng: &mut R) {
    if maze.is_empty() {
        return;
    }

    // Initialize the maze with walls
    maze.cells_mut().for_each(|cell| {
        cell.walls = Default::default();
        cell.visited = false;
    });

    let mut current: Coord = (0, 0);
    maze[current].visited = true;
    // Cells with possibly unvisited neighbors left to look at
    let mut stack: Vec<Coord> = Vec::new();
    let mut carved = 0usize;

    loop {
        let neighbors = get_neighbors(current, maze)
            .filter(|&c| !maze[c].visited)
            .collect::<Vec<_>>();

        if !neighbors.is_empty() {
            let neighbor = neighbors[rng.random_range(0..neighbors.len())];
            maze[neighbor].visited = true;
            stack.push(current);
            maze.remove_wall_between(current, neighbor);
            carved += 1;
            current = neighbor;
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            break;
        }
    }

    maze.cells_mut().for_each(|cell| cell.visited = false);
    tracing::debug!(
        cols = maze.cols(),
        rows = maze.rows(),
        passages = carved,
        "carved maze"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::get_rng,
        maze::{Direction, Walls},
    };

    /// Cells reachable from (0, 0) through open walls.
    fn reachable(maze: &Maze) -> usize {
        let mut seen = vec![false; maze.len()];
        let mut stack = vec![(0u8, 0u8)];
        seen[0] = true;
        let mut count = 0;
        while let Some(coord) = stack.pop() {
            count += 1;
            for d in Direction::ALL {
                if let Some(next) = maze.neighbor(coord, d) {
                    let idx = maze.ravel_index(next);
                    if maze[coord].is_open(d) && !seen[idx] {
                        seen[idx] = true;
                        stack.push(next);
                    }
                }
            }
        }
        count
    }

    #[test]
    fn test_generates_perfect_maze() {
        for (seed, (cols, rows)) in [(1, 1), (2, 1), (1, 7), (5, 5), (12, 8), (40, 30)]
            .into_iter()
            .enumerate()
        {
            let maze = generate(cols, rows, &mut get_rng(Some(seed as u64)));
            assert_eq!(maze.passage_count(), maze.len() - 1, "{cols}x{rows}");
            assert_eq!(reachable(&maze), maze.len(), "{cols}x{rows}");
        }
    }

    #[test]
    fn test_walls_are_symmetric() {
        let maze = generate(9, 6, &mut get_rng(Some(42)));
        for cell in maze.cells() {
            for d in Direction::ALL {
                if let Some(next) = maze.neighbor(cell.coord(), d) {
                    assert_eq!(cell.is_open(d), maze[next].is_open(d.opposite()));
                }
            }
        }
    }

    #[test]
    fn test_outer_walls_stay_closed() {
        let maze = generate(7, 5, &mut get_rng(Some(5)));
        for cell in maze.cells() {
            for d in Direction::ALL {
                if maze.neighbor(cell.coord(), d).is_none() {
                    assert!(!cell.is_open(d));
                }
            }
        }
    }

    #[test]
    fn test_visited_flags_are_reset() {
        let maze = generate(8, 8, &mut get_rng(Some(3)));
        assert!(maze.cells().all(|c| !c.visited()));
        assert!(maze.cells().all(|c| c.explored));
    }

    #[test]
    fn test_single_cell_maze() {
        let maze = generate(1, 1, &mut get_rng(Some(0)));
        assert_eq!(maze[(0, 0)].walls, Walls::CLOSED);
        assert_eq!(maze.passage_count(), 0);
    }

    #[test]
    fn test_two_by_one_maze() {
        let maze = generate(2, 1, &mut get_rng(None));
        assert!(maze[(0, 0)].is_open(Direction::Right));
        assert!(maze[(1, 0)].is_open(Direction::Left));
        for d in [Direction::Top, Direction::Bottom, Direction::Left] {
            assert!(!maze[(0, 0)].is_open(d));
        }
        for d in [Direction::Top, Direction::Bottom, Direction::Right] {
            assert!(!maze[(1, 0)].is_open(d));
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let first = generate(20, 15, &mut get_rng(Some(1234)));
        let second = generate(20, 15, &mut get_rng(Some(1234)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_regenerating_resets_walls() {
        let mut rng = get_rng(Some(9));
        let mut maze = generate(6, 6, &mut rng);
        recursive_backtrack(&mut maze, &mut rng);
        assert_eq!(maze.passage_count(), maze.len() - 1);
    }
}
