//! kdspace - query 2D point files with a k-d tree

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kdspace_cli::{run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over -v
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok((output, passed)) => {
            println!("{output}");
            if passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
