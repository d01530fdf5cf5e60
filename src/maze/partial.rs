use rand::Rng;

use super::{Coord, Maze};

/// Copies the walls of one ground-truth cell into the known maze and marks it explored.
pub fn sync_cell(known: &mut Maze, truth: &Maze, coord: Coord) {
    let cell = &mut known[coord];
    cell.walls = truth[coord].walls;
    cell.explored = true;
}

/// Builds the map a searcher sees: a maze with the same dimensions as `truth` where only
/// the cells of `path`, plus `reveal_percent` of all cells sampled uniformly by coordinate
/// (with replacement), are explored and carry their ground-truth walls.
/// Every other cell is left unexplored with all walls closed.
pub fn build_partial_map<R: Rng>(
    truth: &Maze,
    path: &[Coord],
    reveal_percent: f64,
    rng: &mut R,
) -> Maze {
    let mut known = Maze::new(truth.cols(), truth.rows());
    if known.is_empty() {
        return known;
    }

    path.iter()
        .for_each(|&coord| sync_cell(&mut known, truth, coord));

    let cells_to_reveal = (known.len() as f64 * reveal_percent.clamp(0.0, 1.0)) as usize;
    for _ in 0..cells_to_reveal {
        let coord = (
            rng.random_range(0..known.cols()),
            rng.random_range(0..known.rows()),
        );
        sync_cell(&mut known, truth, coord);
    }

    tracing::debug!(
        path_cells = path.len(),
        sampled = cells_to_reveal,
        explored = known.cells().filter(|c| c.explored).count(),
        "built partial map"
    );
    known
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{generate, get_rng},
        maze::Walls,
    };

    #[test]
    fn test_path_cells_are_synced() {
        let mut rng = get_rng(Some(7));
        let truth = generate(6, 4, &mut rng);
        let path = [(0, 0), (1, 0), (2, 0)];
        let known = build_partial_map(&truth, &path, 0.0, &mut rng);

        for coord in path {
            assert!(known[coord].explored);
            assert_eq!(known[coord].walls, truth[coord].walls);
        }
        assert_eq!(known.cells().filter(|c| c.explored).count(), path.len());
    }

    #[test]
    fn test_unexplored_cells_stay_closed() {
        let mut rng = get_rng(Some(11));
        let truth = generate(10, 10, &mut rng);
        let known = build_partial_map(&truth, &[], 0.3, &mut rng);

        let explored = known.cells().filter(|c| c.explored).count();
        // Sampling with replacement reveals at most the requested number of cells
        assert!(explored >= 1 && explored <= 30);
        for cell in known.cells() {
            if cell.explored {
                assert_eq!(cell.walls, truth[cell.coord()].walls);
            } else {
                assert_eq!(cell.walls, Walls::CLOSED);
            }
        }
    }

    #[test]
    fn test_full_reveal_fraction_is_bounded() {
        let mut rng = get_rng(Some(3));
        let truth = generate(4, 4, &mut rng);
        let known = build_partial_map(&truth, &[], 5.0, &mut rng);
        assert!(known.cells().filter(|c| c.explored).count() <= 16);
        assert_eq!(known.cols(), truth.cols());
        assert_eq!(known.rows(), truth.rows());
    }
}
