use clap::Parser;
use fogmaze::{app::App, settings::Settings};

/// Environment variable naming the log level. Logging is off when unset.
const LOG_ENV_VAR: &str = "FOGMAZE_LOG";
const LOG_FILE: &str = "fogmaze.log";

/// Sends tracing output to a log file, since the terminal is taken by the maze.
/// The returned guard must be kept alive to flush the log on exit.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = std::env::var(LOG_ENV_VAR)
        .ok()?
        .parse::<tracing::Level>()
        .ok()?;
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn main() -> std::io::Result<()> {
    let _guard = init_logging();

    let settings = Settings::parse();
    tracing::info!(?settings, "starting");

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::new(settings).run(&mut stdout);
    App::restore_terminal(&mut stdout)?;
    result
}
