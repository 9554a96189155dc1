//! Argument parsing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kdspace_core::{Point, Rect, SpatialError};

use crate::commands;
use crate::config::{Backend, CliConfig, OutputFormat};
use crate::error::CliResult;

/// Query 2D point files with a k-d tree
#[derive(Debug, Parser)]
#[command(name = "kdspace", version, about)]
pub struct Cli {
    /// Config file (defaults to <config dir>/kdspace/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a point file
    Info {
        file: PathBuf,
    },
    /// Find the stored point closest to (X, Y)
    Nearest {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(long, value_enum)]
        backend: Option<Backend>,
    },
    /// List stored points inside a rectangle
    Range {
        file: PathBuf,
        #[arg(allow_negative_numbers = true)]
        xmin: f64,
        #[arg(allow_negative_numbers = true)]
        ymin: f64,
        #[arg(allow_negative_numbers = true)]
        xmax: f64,
        #[arg(allow_negative_numbers = true)]
        ymax: f64,
        #[arg(long, value_enum)]
        backend: Option<Backend>,
    },
    /// Cross-check the k-d tree against brute force on a query grid
    Verify {
        file: PathBuf,
        /// Queries per side of the grid
        #[arg(long)]
        grid: Option<usize>,
    },
}

impl Cli {
    /// Log filter directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Run a parsed command, returning the rendered output and whether it succeeded
pub fn run(cli: &Cli) -> CliResult<(String, bool)> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);

    match &cli.command {
        Command::Info { file } => {
            let report = commands::info(file)?;
            Ok((commands::render(&report, format)?, true))
        }
        Command::Nearest {
            file,
            x,
            y,
            backend,
        } => {
            let query = Point::new(*x, *y)?;
            let backend = backend.unwrap_or(config.query.backend);
            let report = commands::nearest(file, query, backend)?;
            Ok((commands::render(&report, format)?, true))
        }
        Command::Range {
            file,
            xmin,
            ymin,
            xmax,
            ymax,
            backend,
        } => {
            // Infinite bounds are valid for a Rect but have no JSON form
            let bounds = [*xmin, *ymin, *xmax, *ymax];
            if bounds.iter().any(|bound| !bound.is_finite()) {
                return Err(SpatialError::InvalidArgument(format!(
                    "range bounds must be finite, got {xmin} {ymin} {xmax} {ymax}"
                ))
                .into());
            }
            let rect = Rect::new(*xmin, *ymin, *xmax, *ymax)?;
            let backend = backend.unwrap_or(config.query.backend);
            let report = commands::range(file, rect, backend)?;
            Ok((commands::render(&report, format)?, true))
        }
        Command::Verify { file, grid } => {
            let grid = grid.unwrap_or(config.query.grid);
            let report = commands::verify(file, grid)?;
            let passed = report.passed();
            Ok((commands::render(&report, format)?, passed))
        }
    }
}
