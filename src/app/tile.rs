use crossterm::style::{Color, Stylize};

use std::fmt;

use crate::solvers::Solver;

/// What is drawn at one position of the rendered grid.
/// The rendered grid has a tile for every cell and for every wall between cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    /// A wall, or a wall corner
    Wall,
    /// A cell or passage the searcher cannot see
    Fog,
    /// An explored cell or an open passage
    Empty,
    /// A cell handed out by the running search
    Discovered,
    /// A cell or passage on the reconstructed path of the given solver
    Route(Solver),
    /// The starting cell of the search
    Start,
    /// The cell the search looks for
    Goal,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Fog => "░░".with(Color::DarkGrey),
            Tile::Empty => "  ".with(Color::Reset),
            Tile::Discovered => "* ".with(Color::Magenta),
            Tile::Route(solver) => match solver {
                Solver::Bfs => "🟩".with(Color::Green),
                Solver::AStar => "🟧".with(Color::DarkYellow),
                Solver::Dijkstra => "🟦".with(Color::Blue),
            },
            Tile::Start => "🔵".with(Color::Blue),
            Tile::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_tiles_are_two_columns_wide() {
        let tiles = [
            Tile::Wall,
            Tile::Fog,
            Tile::Empty,
            Tile::Discovered,
            Tile::Route(Solver::Bfs),
            Tile::Route(Solver::AStar),
            Tile::Route(Solver::Dijkstra),
            Tile::Start,
            Tile::Goal,
        ];
        for tile in tiles {
            // Display asserts the width in debug builds
            let rendered = tile.to_string();
            assert!(!rendered.is_empty());
        }
        assert_eq!("░░".width(), Tile::WIDTH as usize);
    }
}
