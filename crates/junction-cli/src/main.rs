//! Junction CLI - Draw orthogonal connector diagrams in the terminal

mod cli;
mod colorizer;

use clap::Parser;

fn main() {
    // Logging is initialized inside run() once the CLI flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::JunctionApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
