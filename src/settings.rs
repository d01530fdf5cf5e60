use std::time::Duration;

use clap::Parser;

/// Run configuration, built from defaults and command-line arguments.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Settings {
    /// Maze width in cells
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u8).range(1..))]
    pub cols: u8,

    /// Maze height in cells
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(1..))]
    pub rows: u8,

    /// Fraction of all cells sampled into the known map, besides the solution path
    #[arg(long = "reveal", default_value_t = 0.5, value_parser = parse_reveal)]
    pub reveal_percent: f64,

    /// Seed for maze generation and reveal sampling. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Time between two animation steps, in milliseconds
    #[arg(long = "tick-ms", default_value = "30", value_parser = parse_tick)]
    pub tick: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 30,
            reveal_percent: 0.5,
            seed: None,
            tick: Duration::from_millis(30),
        }
    }
}

impl Settings {
    /// Shrinks the maze so that it fits a terminal of the given size.
    /// Each cell takes two tiles per axis (cell plus wall), and each tile is
    /// `tile_width` characters wide. `reserved_rows` are kept free for status lines.
    pub fn fit_terminal(
        &mut self,
        term_width: u16,
        term_height: u16,
        tile_width: u16,
        reserved_rows: u16,
    ) {
        let max_cols = max_maze_size(term_width / tile_width);
        let max_rows = max_maze_size(term_height.saturating_sub(reserved_rows));
        if self.cols > max_cols || self.rows > max_rows {
            tracing::info!(
                requested = ?(self.cols, self.rows),
                fitted = ?(self.cols.min(max_cols), self.rows.min(max_rows)),
                "shrinking maze to fit terminal"
            );
        }
        self.cols = self.cols.min(max_cols);
        self.rows = self.rows.min(max_rows);
    }
}

/// Largest maze dimension that fits into `tiles` tiles: n cells need 2n + 1 tiles.
/// Always at least 1.
fn max_maze_size(tiles: u16) -> u8 {
    (tiles.saturating_sub(1) / 2).clamp(1, u8::MAX as u16) as u8
}

fn parse_reveal(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(fraction) if (0.0..=1.0).contains(&fraction) => Ok(fraction),
        _ => Err(format!("reveal fraction must be between 0 and 1, got {s}")),
    }
}

fn parse_tick(s: &str) -> Result<Duration, String> {
    s.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| format!("tick must be a whole number of milliseconds, got {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_args() {
        assert_eq!(
            Settings::try_parse_from(["fogmaze"]).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_parse_all_flags() {
        let settings = Settings::try_parse_from([
            "fogmaze", "--cols", "12", "--rows", "7", "--reveal", "0.25", "--seed", "42",
            "--tick-ms", "5",
        ])
        .unwrap();
        assert_eq!(settings.cols, 12);
        assert_eq!(settings.rows, 7);
        assert_eq!(settings.reveal_percent, 0.25);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.tick, Duration::from_millis(5));
    }

    #[test]
    fn test_largest_dimensions_are_accepted() {
        let settings = Settings::try_parse_from(["fogmaze", "--cols", "255", "--rows", "1"]).unwrap();
        assert_eq!((settings.cols, settings.rows), (255, 1));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let parse = |args: &[&str]| {
            Settings::try_parse_from(std::iter::once("fogmaze").chain(args.iter().copied()))
        };
        assert!(parse(&["--cols", "0"]).is_err());
        assert!(parse(&["--rows", "256"]).is_err());
        assert!(parse(&["--reveal", "1.5"]).is_err());
        assert!(parse(&["--reveal", "-0.1"]).is_err());
        assert!(parse(&["--seed", "abc"]).is_err());
        assert!(parse(&["--tick-ms", "fast"]).is_err());
        assert!(parse(&["--cols"]).is_err());
        assert!(parse(&["--size", "3"]).is_err());
    }

    #[test]
    fn test_fit_terminal() {
        let mut settings = Settings::default();
        // 80 columns of 2-wide tiles -> 40 tiles -> 19 cells; 24 rows minus 2 reserved -> 10 cells
        settings.fit_terminal(80, 24, 2, 2);
        assert_eq!((settings.cols, settings.rows), (19, 10));

        // Tiny terminals still get a 1x1 maze
        settings.fit_terminal(1, 1, 2, 2);
        assert_eq!((settings.cols, settings.rows), (1, 1));
    }
}
