use gridcatch::cli::{self, Cli};
use gridcatch::core::Result;
use gridcatch::{config, session};
use std::fs::File;
use std::path::Path;
use std::process;
use std::sync::Mutex;
use tracing::{info, Level};

fn main() {
    let cli = cli::parse();

    // Initialize the logging system using tracing subscriber
    init_logging(cli.log_file.as_deref());

    info!("Starting gridcatch...");

    match run(&cli) {
        Ok(()) => println!("Goodbye! :)"),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    info!(explicit = cli.play, "Entering play mode");
    let config = config::load_or_default(cli.config.as_deref())?;
    let grid = config.grid_config(&cli.overrides())?;

    let mut settings = session::PlaySettings::new(grid);
    settings.seed = cli.seed;
    session::play(&settings)?;
    Ok(())
}

/// Logs go to the given file at debug level; otherwise only warnings reach
/// stderr so the game screen stays readable.
fn init_logging(log_file: Option<&Path>) {
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_max_level(Level::DEBUG)
                    .init();
                return;
            }
            Err(e) => eprintln!("Warning: could not open log file {}: {}", path.display(), e),
        }
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::WARN)
        .init();
}
