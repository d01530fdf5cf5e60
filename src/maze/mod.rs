pub mod cell;
pub mod partial;

pub use cell::{Cell, Coord, Direction, Walls};

/// Index of `(x, y)` in a row-major grid that is `cols` cells wide.
pub fn ravel_index(cols: u8, (x, y): Coord) -> usize {
    y as usize * cols as usize + x as usize
}

/// Inverse of [`ravel_index`].
pub fn unravel_index(cols: u8, index: usize) -> Coord {
    let cols = cols as usize;
    ((index % cols) as u8, (index / cols) as u8)
}

/// A rectangular grid of cells whose walls encode the passages between them.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    cells: Box<[Cell]>,
    cols: u8,
    rows: u8,
}

impl Maze {
    /// Creates a maze with the given number of columns and rows.
    /// Every cell starts with all four walls closed and unexplored.
    pub fn new(cols: u8, rows: u8) -> Self {
        let cells = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Cell::new((x, y))))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Maze { cells, cols, rows }
    }

    /// Returns the width of the maze in cells.
    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Returns the height of the maze in cells.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.cols && coord.1 < self.rows
    }

    /// Stable integer index of a cell, `row * cols + col`.
    pub fn ravel_index(&self, coord: Coord) -> usize {
        ravel_index(self.cols, coord)
    }

    /// Inverse of [`Maze::ravel_index`].
    pub fn unravel_index(&self, index: usize) -> Coord {
        unravel_index(self.cols, index)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Coordinate of the grid-adjacent cell in the given direction, if it exists.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        let next = direction.step(coord);
        self.is_in_bounds(next).then_some(next)
    }

    /// Removes the wall between two grid-adjacent cells, on both sides.
    ///
    /// # Panics
    /// * If either coordinate is out of bounds
    /// * If the two cells are not grid-adjacent
    pub fn remove_wall_between(&mut self, from: Coord, to: Coord) {
        if !self.is_in_bounds(from) || !self.is_in_bounds(to) {
            panic!("The given coordinate is out of bounds");
        }
        let Some(direction) = Direction::between(from, to) else {
            panic!("Cannot remove wall between non-adjacent cells {from:?} and {to:?}");
        };
        self[from].walls.set(direction, false);
        self[to].walls.set(direction.opposite(), false);
    }

    /// Number of open walls between pairs of adjacent cells.
    /// Each passage is counted once, from its left or top cell.
    pub fn passage_count(&self) -> usize {
        self.cells()
            .map(|cell| {
                [Direction::Right, Direction::Bottom]
                    .into_iter()
                    .filter(|&d| {
                        self.neighbor(cell.coord(), d).is_some() && cell.is_open(d)
                    })
                    .count()
            })
            .sum()
    }

    /// Marks every cell as visible to the search algorithms.
    pub fn explore_all(&mut self) {
        self.cells_mut().for_each(|cell| cell.explored = true);
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}

impl std::ops::IndexMut<Coord> for Maze {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        let idx = self.ravel_index(index);
        &mut self.cells[idx]
    }
}

/// Get neighbors of a cell, regardless of walls.
/// A neighbor is a cell one step away in the cardinal directions, in the order
/// top, right, bottom, left.
pub fn get_neighbors(coord: Coord, maze: &Maze) -> impl Iterator<Item = Coord> + '_ {
    let in_bounds = maze.is_in_bounds(coord);
    Direction::ALL
        .into_iter()
        .filter(move |_| in_bounds)
        .filter_map(move |d| maze.neighbor(coord, d))
}
