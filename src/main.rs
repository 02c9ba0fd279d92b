use clap::Parser;
use dotenv::dotenv;
use egs_admin::app::app::App;
use egs_admin::app::cli::Cli;
use egs_admin::util::logger::Logger;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load environment variables before the logger reads its levels from them
    let env_loaded = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => Some(logger),
        Err(e) => {
            eprintln!("Failed to initialise file logging: {e}");
            None
        }
    };

    match env_loaded {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = match App::from_env(cli.demo, cli.yes) {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("{e}");
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    match app.run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
