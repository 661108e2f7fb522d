//! Maze command line front end.
//!
//! Generates one maze and writes its layout as JSON to stdout, or to a file
//! with `--output`. Logs go to stderr.
//!
//! Settings resolve as defaults, then `--config` file, then explicit flags.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use maze_generator::{generate, MazeConfig, Topology};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "maze", version, about = "Generate perfect mazes on several grid shapes", long_about = None)]
struct Args {
    /// JSON file with default settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid shape: rect, polar, hexhex, trihex, tri or irregular
    #[arg(short, long)]
    topology: Option<Topology>,

    /// Grid size (rings for polar and hex-hex, edge length otherwise)
    #[arg(short, long)]
    size: Option<u32>,

    /// Number of entries opened on the boundary
    #[arg(short, long)]
    entries: Option<usize>,

    /// Random seed for a reproducible maze
    #[arg(long)]
    seed: Option<u64>,

    /// Write the layout here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON layout
    #[arg(long)]
    pretty: bool,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Defaults, overlaid by the config file, overlaid by flags.
    fn resolve_config(&self) -> maze_generator::Result<MazeConfig> {
        let mut config = match &self.config {
            Some(path) => MazeConfig::load(path)?,
            None => MazeConfig::default(),
        };

        if let Some(topology) = self.topology {
            config.topology = topology;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(entries) = self.entries {
            config.entry_count = entries;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "maze=debug,maze_generator=debug"
    } else {
        "maze=info,maze_generator=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = args.resolve_config()?;
    tracing::debug!("Resolved config: {:?}", config);

    let maze = generate(&config)?;
    let layout = maze.layout(&config);

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &layout)?;
    } else {
        serde_json::to_writer(&mut out, &layout)?;
    }
    writeln!(out)?;
    out.flush()?;

    if let Some(path) = &args.output {
        tracing::info!("Wrote layout to {}", path.display());
    }
    Ok(())
}
