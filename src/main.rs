mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use geomemo::config;
use geomemo::geo::Coordinate;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geomemo", version, about = "Geotagged photo memories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest city names for a partial query
    Search {
        /// Partial city name, e.g. "San Fr"
        fragment: String,
    },
    /// Resolve a place name to coordinates
    Geocode {
        name: String,
    },
    /// Compute the map region framing a set of points
    Fit {
        /// Points as lat,lon (e.g. 48.8566,2.3522)
        #[arg(allow_hyphen_values = true)]
        points: Vec<Coordinate>,
    },
    /// Capture a memory from an image file and a city name
    Capture {
        /// Photo to attach (JPEG, PNG, GIF, WebP or HEIC)
        #[arg(long)]
        image: PathBuf,
        /// City to geocode
        #[arg(long)]
        city: String,
        /// Previously recorded voice note
        #[arg(long)]
        voice: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::GeomemoConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.logging.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Search { fragment } => cli::search::run(&config, &fragment).await?,
        Command::Geocode { name } => cli::geocode::run(&config, &name).await?,
        Command::Fit { points } => cli::fit::run(&config, &points)?,
        Command::Capture { image, city, voice } => {
            cli::capture::run(&config, image, &city, voice).await?
        }
    }

    Ok(())
}
