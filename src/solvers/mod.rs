mod best_first;
mod bfs;
mod flood;

use crate::maze::{Coord, Direction, Maze, ravel_index, unravel_index};
pub use best_first::BestFirst;
pub use bfs::Bfs;
pub use flood::{DistanceField, distance_field};

/// How a cell was reached during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// The cell the search started from
    Start,
    /// Reached from the cell with this index
    From(usize),
}

/// Predecessor of every discovered cell, keyed by the cell's index in the maze.
#[derive(Debug, Clone, PartialEq)]
pub struct PredecessorMap {
    cols: u8,
    links: Vec<Option<Link>>,
}

impl PredecessorMap {
    pub fn new(maze: &Maze) -> Self {
        PredecessorMap {
            cols: maze.cols(),
            links: vec![None; maze.len()],
        }
    }

    fn index(&self, coord: Coord) -> usize {
        ravel_index(self.cols, coord)
    }

    fn coord(&self, index: usize) -> Coord {
        unravel_index(self.cols, index)
    }

    pub fn insert_start(&mut self, coord: Coord) {
        let idx = self.index(coord);
        self.links[idx] = Some(Link::Start);
    }

    pub fn insert(&mut self, coord: Coord, from: Coord) {
        let (idx, from_idx) = (self.index(coord), self.index(from));
        self.links[idx] = Some(Link::From(from_idx));
    }

    /// Whether the cell was discovered by the search.
    pub fn contains(&self, coord: Coord) -> bool {
        self.links.get(self.index(coord)).is_some_and(Option::is_some)
    }

    /// `None` if the cell was never discovered, `Some(None)` for the start cell.
    pub fn get(&self, coord: Coord) -> Option<Option<Coord>> {
        self.links
            .get(self.index(coord))
            .copied()
            .flatten()
            .map(|link| match link {
                Link::Start => None,
                Link::From(idx) => Some(self.coord(idx)),
            })
    }

    /// Number of cells with an entry, including the start cell.
    pub fn len(&self) -> usize {
        self.links.iter().filter(|link| link.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walks back from `end` to the start cell and returns the path in start-to-end order.
    /// Returns an empty path if `end` was never reached.
    pub fn path_to(&self, end: Coord) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut current = match self.get(end) {
            Some(_) => Some(end),
            None => return path,
        };
        while let Some(coord) = current {
            path.push(coord);
            current = self.get(coord).flatten();
        }
        path.reverse();
        path
    }
}

/// Cells reachable from `coord` in one step that the searcher is allowed to see:
/// in bounds, no wall on `coord`'s side, and explored.
/// Directions are visited in the fixed order top, right, bottom, left.
pub fn valid_moves(maze: &Maze, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
    Direction::ALL.into_iter().filter_map(move |d| {
        maze.neighbor(coord, d)
            .filter(|&next| maze[coord].is_open(d) && maze[next].explored)
    })
}

/// Manhattan distance between two cells.
pub fn manhattan_distance(a: Coord, b: Coord) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Bfs,
    AStar,
    Dijkstra,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::AStar => write!(f, "A* Search"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
        }
    }
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Bfs, Solver::AStar, Solver::Dijkstra];

    /// Short name for status lines.
    pub fn short_name(&self) -> &'static str {
        match self {
            Solver::Bfs => "BFS",
            Solver::AStar => "A*",
            Solver::Dijkstra => "Dijkstra",
        }
    }

    /// Creates the initial search state from `start` to `end` on `maze`.
    pub fn start(self, maze: &Maze, start: Coord, end: Coord) -> Search {
        tracing::debug!(solver = self.short_name(), ?start, ?end, "starting search");
        match self {
            Solver::Bfs => Search::Bfs(Bfs::new(maze, start, end)),
            Solver::AStar => Search::BestFirst(BestFirst::astar(maze, start, end)),
            Solver::Dijkstra => Search::BestFirst(BestFirst::dijkstra(maze, start, end)),
        }
    }
}

/// A search in progress. Each call to [`Search::step`] advances it to the next newly
/// discovered cell, so that a caller can animate one discovery per tick.
///
/// The maze passed to `step` must be the one the search was started on.
#[derive(Debug, Clone)]
pub enum Search {
    Bfs(Bfs),
    BestFirst(BestFirst),
}

impl Search {
    pub fn solver(&self) -> Solver {
        match self {
            Search::Bfs(_) => Solver::Bfs,
            Search::BestFirst(search) => search.solver(),
        }
    }

    /// Returns the next discovered cell, or `None` once the search has completed.
    pub fn step(&mut self, maze: &Maze) -> Option<Coord> {
        match self {
            Search::Bfs(search) => search.step(maze),
            Search::BestFirst(search) => search.step(maze),
        }
    }

    /// Whether the end was reached or the frontier is exhausted.
    pub fn is_done(&self) -> bool {
        match self {
            Search::Bfs(search) => search.is_done(),
            Search::BestFirst(search) => search.is_done(),
        }
    }

    pub fn predecessors(&self) -> &PredecessorMap {
        match self {
            Search::Bfs(search) => search.predecessors(),
            Search::BestFirst(search) => search.predecessors(),
        }
    }

    pub fn into_predecessors(self) -> PredecessorMap {
        match self {
            Search::Bfs(search) => search.into_predecessors(),
            Search::BestFirst(search) => search.into_predecessors(),
        }
    }

    /// Borrowing iterator over the remaining discoveries.
    pub fn discoveries<'s, 'm>(&'s mut self, maze: &'m Maze) -> Discoveries<'s, 'm> {
        Discoveries { search: self, maze }
    }

    /// Drains the search and returns the final predecessor map.
    pub fn run_to_end(mut self, maze: &Maze) -> PredecessorMap {
        self.discoveries(maze).for_each(drop);
        self.into_predecessors()
    }
}

/// Iterator adapter over [`Search::step`].
pub struct Discoveries<'s, 'm> {
    search: &'s mut Search,
    maze: &'m Maze,
}

impl Iterator for Discoveries<'_, '_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        self.search.step(self.maze)
    }
}
