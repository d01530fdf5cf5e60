/// Column and row of a cell in the maze.
pub type Coord = (u8, u8);

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Fixed visiting order shared by the generator and the search algorithms.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// The side of the neighboring cell that faces this side.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Coordinate one step away in this direction, without bounds checking.
    ///
    /// NOTE: Stepping off the top or left edge wraps to `u8::MAX`, and stepping off the right
    /// or bottom edge saturates at `u8::MAX`. Since the largest dimension is `u8::MAX`, the
    /// largest valid index is `u8::MAX - 1`, so both cases are filtered out by a bounds check.
    pub fn step(self, (x, y): Coord) -> Coord {
        match self {
            Direction::Top => (x, y.wrapping_sub(1)),
            Direction::Right => (x.saturating_add(1), y),
            Direction::Bottom => (x, y.saturating_add(1)),
            Direction::Left => (x.wrapping_sub(1), y),
        }
    }

    /// Direction leading from `from` to the grid-adjacent `to`, if they are adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| direction.step(from) == to && from != to)
    }
}

/// Wall flags of a cell. `true` means the wall is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub fn set(&mut self, direction: Direction, present: bool) {
        let wall = match direction {
            Direction::Top => &mut self.top,
            Direction::Right => &mut self.right,
            Direction::Bottom => &mut self.bottom,
            Direction::Left => &mut self.left,
        };
        *wall = present;
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::CLOSED
    }
}

/// A single maze cell: a graph vertex whose edges are encoded by its walls.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Coord,
    /// Walls around the cell, all closed at construction.
    pub walls: Walls,
    /// Whether search algorithms can see this cell.
    pub explored: bool,
    /// Scratch flag for the generator. Always false outside of generation.
    pub(crate) visited: bool,
}

impl Cell {
    pub fn new(coord: Coord) -> Self {
        Cell {
            coord,
            walls: Walls::CLOSED,
            explored: false,
            visited: false,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Whether the wall on the given side is absent.
    pub fn is_open(&self, direction: Direction) -> bool {
        !self.walls.get(direction)
    }
}
