use std::time::Instant;

use clap::Parser;
use fogmaze::{
    app::Round,
    generators::get_rng,
    settings::Settings,
    solvers::{Solver, distance_field},
};

/// Builds one round and runs every solver on it without animation, printing
/// how many cells each one discovered, the path it found and how long it took.
/// A flood fill from the end is listed last for comparison.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    settings: Settings,

    /// Number of runs per solver to average the time over
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    iterations: u32,
}

fn print_row(name: &str, discovered: usize, path_len: usize, avg_ms: f64) {
    let path_len = match path_len {
        0 => "-".to_string(),
        n => (n - 1).to_string(),
    };
    println!("{name:<10} {discovered:>10} {path_len:>12} {avg_ms:>12.3}");
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let Args {
        settings,
        iterations,
    } = Args::parse();

    let mut rng = get_rng(settings.seed);
    let mut round = Round::new(&settings, &mut rng);
    println!(
        "{}x{} maze, {} of {} cells explored",
        settings.cols,
        settings.rows,
        round.known().cells().filter(|c| c.explored).count(),
        round.known().len()
    );
    println!(
        "{:<10} {:>10} {:>12} {:>12}",
        "solver", "discovered", "path length", "avg time ms"
    );
    for solver in Solver::ALL {
        let mut total_ms = 0.0;
        let mut last = None;
        for _ in 0..iterations {
            let outcome = round.run_to_end(solver);
            total_ms += outcome.elapsed.as_secs_f64() * 1000.0;
            last = Some(outcome);
        }
        let Some(outcome) = last else { continue };
        print_row(
            solver.short_name(),
            outcome.discovered,
            outcome.path.len(),
            total_ms / iterations as f64,
        );
    }

    let mut total_ms = 0.0;
    let mut last = None;
    for _ in 0..iterations {
        let started_at = Instant::now();
        let field = distance_field(round.known(), &[round.end()]);
        let route = field.route_from(round.known(), round.start());
        total_ms += started_at.elapsed().as_secs_f64() * 1000.0;
        last = Some((field.reached(), route));
    }
    if let Some((reached, route)) = last {
        print_row("Flood", reached, route.len(), total_ms / iterations as f64);
    }
}
