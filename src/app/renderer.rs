use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{self, StyledContent},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    app::tile::Tile,
    maze::{Coord, Direction, Maze},
    solvers::Solver,
};

/// Tile shown at a position of the rendered grid, which is `2 * cols + 1` tiles wide and
/// `2 * rows + 1` tiles high. Odd positions on both axes are cells, positions between two
/// cells are walls or passages, and everything else is a wall.
pub fn tile_at(maze: &Maze, start: Coord, end: Coord, (gx, gy): (u16, u16)) -> Tile {
    let cell_of = |g: u16| -> Option<u8> { (g % 2 == 1).then_some((g / 2) as u8) };
    match (cell_of(gx), cell_of(gy)) {
        (Some(x), Some(y)) => {
            let coord = (x, y);
            if coord == start {
                Tile::Start
            } else if coord == end {
                Tile::Goal
            } else if maze[coord].explored {
                Tile::Empty
            } else {
                Tile::Fog
            }
        }
        // Between two cells of the same row
        (None, Some(y)) if gx > 0 => passage_tile(maze, ((gx / 2 - 1) as u8, y), Direction::Right),
        // Between two cells of the same column
        (Some(x), None) if gy > 0 => passage_tile(maze, (x, (gy / 2 - 1) as u8), Direction::Bottom),
        _ => Tile::Wall,
    }
}

/// Tile for the wall on the `direction` side of `from`, drawn from whichever side is explored.
fn passage_tile(maze: &Maze, from: Coord, direction: Direction) -> Tile {
    let Some(to) = maze.neighbor(from, direction) else {
        return Tile::Wall;
    };
    let (a, b) = (&maze[from], &maze[to]);
    if !a.explored && !b.explored {
        return Tile::Fog;
    }
    let open = (a.explored && a.is_open(direction)) || (b.explored && b.is_open(direction.opposite()));
    if open { Tile::Empty } else { Tile::Wall }
}

/// Grid position of the passage between two adjacent cells.
fn passage_position(from: Coord, to: Coord) -> (u16, u16) {
    (from.0 as u16 + to.0 as u16 + 1, from.1 as u16 + to.1 as u16 + 1)
}

fn cell_position(coord: Coord) -> (u16, u16) {
    (coord.0 as u16 * 2 + 1, coord.1 as u16 * 2 + 1)
}

/// Draws a maze and search progress onto a terminal-like writer.
pub struct Renderer<W: Write> {
    out: W,
    /// Rendered grid dimensions in tiles, known after the first full draw
    grid_dims: Option<(u16, u16)>,
    /// Width available for log lines, in characters
    line_width: u16,
}

impl<W: Write> Renderer<W> {
    /// Number of terminal rows reserved below the maze for status lines
    pub const NUM_LOG_ROWS: u16 = 2;

    pub fn new(out: W, line_width: u16) -> Self {
        Self {
            out,
            grid_dims: None,
            line_width,
        }
    }

    pub fn set_line_width(&mut self, line_width: u16) {
        self.line_width = line_width;
    }

    /// Clears the screen and draws every tile of the maze.
    pub fn draw_maze(&mut self, maze: &Maze, start: Coord, end: Coord) -> std::io::Result<()> {
        let width = maze.cols() as u16 * 2 + 1;
        let height = maze.rows() as u16 * 2 + 1;
        self.grid_dims = Some((width, height));

        queue!(self.out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for y in 0..height {
            for x in 0..width {
                queue!(self.out, style::Print(tile_at(maze, start, end, (x, y))))?;
            }
            queue!(self.out, style::Print("\r\n"))?;
        }
        self.out.flush()
    }

    /// Redraws a single cell.
    pub fn draw_cell(&mut self, coord: Coord, tile: Tile) -> std::io::Result<()> {
        self.draw_tile(cell_position(coord), tile)?;
        self.out.flush()
    }

    /// Draws the cells of a path and the passages between them, leaving start and end as they are.
    pub fn draw_path(&mut self, path: &[Coord], solver: Solver) -> std::io::Result<()> {
        let tile = Tile::Route(solver);
        for pair in path.windows(2) {
            self.draw_tile(passage_position(pair[0], pair[1]), tile)?;
        }
        if path.len() > 2 {
            for &coord in &path[1..path.len() - 1] {
                self.draw_tile(cell_position(coord), tile)?;
            }
        }
        self.out.flush()
    }

    fn draw_tile(&mut self, (x, y): (u16, u16), tile: Tile) -> std::io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(x * Tile::WIDTH, y),
            style::Print(tile)
        )?;
        Ok(())
    }

    /// Writes a status line below the maze, truncated to the line width.
    /// `None` clears the line.
    pub fn log(&mut self, row: u16, msg: Option<StyledContent<String>>) -> std::io::Result<()> {
        let grid_height = self.grid_dims.map(|(_, h)| h).unwrap_or(0);
        queue!(
            self.out,
            cursor::MoveTo(0, grid_height + row.min(Self::NUM_LOG_ROWS - 1)),
            terminal::Clear(ClearType::CurrentLine)
        )?;
        if let Some(msg) = msg {
            let (truncated, _) = msg.content().unicode_truncate(self.line_width as usize);
            queue!(
                self.out,
                style::PrintStyledContent(StyledContent::new(*msg.style(), truncated.to_string()))
            )?;
        }
        self.out.flush()
    }

    /// Moves the cursor below the maze and status lines.
    pub fn finish(&mut self) -> std::io::Result<()> {
        let grid_height = self.grid_dims.map(|(_, h)| h).unwrap_or(0);
        queue!(
            self.out,
            cursor::MoveTo(0, grid_height + Self::NUM_LOG_ROWS),
            cursor::Show
        )?;
        self.out.flush()
    }
}

#[cfg(test)]
impl Renderer<Vec<u8>> {
    /// Everything written so far.
    pub(crate) fn written(&self) -> &[u8] {
        &self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Stylize;

    fn corridor() -> Maze {
        // Three cells in a row, only the first two connected and explored
        let mut maze = Maze::new(3, 1);
        maze.remove_wall_between((0, 0), (1, 0));
        maze.remove_wall_between((1, 0), (2, 0));
        maze[(0, 0)].explored = true;
        maze[(1, 0)].explored = true;
        maze
    }

    #[test]
    fn test_tile_layout() {
        let maze = corridor();
        let tile = |pos| tile_at(&maze, (0, 0), (9, 9), pos);
        // Corners and borders
        assert_eq!(tile((0, 0)), Tile::Wall);
        assert_eq!(tile((0, 1)), Tile::Wall);
        assert_eq!(tile((1, 0)), Tile::Wall);
        // Cells
        assert_eq!(tile((1, 1)), Tile::Start);
        assert_eq!(tile((3, 1)), Tile::Empty);
        assert_eq!(tile((5, 1)), Tile::Fog);
        // Passages
        assert_eq!(tile((2, 1)), Tile::Empty);
        assert_eq!(tile((4, 1)), Tile::Empty);
        assert_eq!(tile((6, 1)), Tile::Wall);
        // Bottom border
        assert_eq!(tile((3, 2)), Tile::Wall);
    }

    #[test]
    fn test_fog_between_unexplored_cells() {
        let mut maze = Maze::new(2, 2);
        maze[(0, 0)].explored = true;
        let tile = |pos| tile_at(&maze, (5, 5), (1, 1), pos);
        // Between (1, 0) and (1, 1): neither side explored
        assert_eq!(tile((3, 2)), Tile::Fog);
        // Between (0, 0) and (1, 0): explored side has a wall
        assert_eq!(tile((2, 1)), Tile::Wall);
        assert_eq!(tile((3, 3)), Tile::Goal);
    }

    #[test]
    fn test_passage_position() {
        assert_eq!(passage_position((0, 0), (1, 0)), (2, 1));
        assert_eq!(passage_position((2, 3), (2, 2)), (5, 6));
        assert_eq!(cell_position((2, 3)), (5, 7));
    }

    #[test]
    fn test_renders_into_buffer() {
        let maze = corridor();
        let mut renderer = Renderer::new(Vec::new(), 10);
        renderer.draw_maze(&maze, (0, 0), (2, 0)).unwrap();
        renderer.draw_cell((1, 0), Tile::Discovered).unwrap();
        renderer
            .draw_path(&[(0, 0), (1, 0)], Solver::AStar)
            .unwrap();
        renderer
            .log(0, Some("a status line longer than ten".to_string().bold()))
            .unwrap();
        renderer.finish().unwrap();

        let output = String::from_utf8(renderer.out).unwrap();
        assert!(output.contains("🔵"));
        assert!(output.contains("🟥"));
        assert!(output.contains("🟧"));
        assert!(output.contains("a status l"));
        assert!(!output.contains("longer"));
    }

    #[test]
    fn test_renders_through_borrowed_writer() {
        let maze = corridor();
        let mut out = Vec::new();
        {
            let mut renderer = Renderer::new(&mut out, 40);
            renderer.draw_maze(&maze, (0, 0), (2, 0)).unwrap();
            renderer.log(1, Some("ready".to_string().bold())).unwrap();
        }
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("🔵"));
        assert!(output.contains("ready"));
    }
}
