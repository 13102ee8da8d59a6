//! ledit - a multi-buffer line editor
//!
//! This is the main entry point. It parses CLI arguments, builds the
//! configuration and hands stdin/stdout to the interactive loop.

use std::io;

use clap::Parser;

use ledit::cli::Cli;
use ledit::config::Config;
use ledit::core::app::EditorApp;
use ledit::{logging, run, user_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = Cli::parse();
    logging::init(cli.log.as_deref());

    // Load configuration
    let mut config = Config::new();
    user_config::configure(&mut config);

    // Apply CLI overrides
    cli.apply_to_config(&mut config);

    let mut app = EditorApp::initialize_with_config(&config, &cli.files);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run::run_interactive(&mut app, stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
