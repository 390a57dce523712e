use clap::Parser;
use dotenvy::dotenv;
use grade_visualizer::{
    cli::{self, Cli},
    config,
    core::{GradeManager, LoadOutcome},
    errors::Result,
};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // 1. Initialize tracing (as early as possible). Logs go to stderr so command
    //    output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env before parsing so GRADEBOOK_* variables can come from it
    dotenv().ok();
    debug!("Attempted to load .env file.");

    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    // 3. Resolve where the gradebook lives
    let app_config =
        config::load_app_configuration(&cli.storage_overrides(), cli.config.as_deref())?;

    // 4. Open the gradebook; a bad file never blocks startup
    let mut manager = GradeManager::new(app_config.storage_path)?;
    if let LoadOutcome::Degraded { reason, backup } = manager.load_outcome() {
        eprintln!(
            "Warning: could not read saved grades ({reason}); starting with an empty gradebook."
        );
        if let Some(backup) = backup {
            eprintln!("The unreadable file was copied to {}", backup.display());
        }
    }

    // 5. Run the command; mutating commands save before returning
    cli::run(&cli.command, &mut manager)
}
