// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use gpspic::backends::geocoding::AddressRecord;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "gpspic")]
#[command(about = "Stamp photos with a location, address and map overlay")]
#[command(version = gpspic::constants::app_info::version())]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a copy of a photo with the location overlay burnt in
    Stamp {
        /// Photo to stamp (jpg, png, webp, bmp)
        photo: PathBuf,

        /// Latitude in decimal degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// City or town for the header line
        #[arg(long)]
        locality: Option<String>,

        /// State or region for the header line
        #[arg(long)]
        admin_area: Option<String>,

        /// Country for the header line
        #[arg(long)]
        country: Option<String>,

        /// Full single-line address
        #[arg(long)]
        address_line: Option<String>,

        /// Directory to save into (default: ~/Pictures/GPSPic)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Burn the selected grid guides into the photo
        #[arg(long)]
        grid: bool,
    },

    /// Print the path of the latest capture
    Latest,

    /// Open the latest capture in the image viewer
    Open,

    /// Show the config file and current settings
    Config,

    /// Toggle a setting
    Toggle {
        #[arg(value_enum)]
        target: cli::ToggleTarget,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=gpspic=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stamp {
            photo,
            lat,
            lon,
            locality,
            admin_area,
            country,
            address_line,
            output,
            grid,
        } => {
            let location = cli::StampLocation {
                latitude: lat,
                longitude: lon,
                address: AddressRecord {
                    locality,
                    admin_area,
                    country_name: country,
                    address_line,
                },
            };
            cli::stamp_photo(photo, location, output, grid)
        }
        Commands::Latest => cli::print_latest(),
        Commands::Open => cli::open_latest(),
        Commands::Config => cli::show_config(),
        Commands::Toggle { target } => cli::toggle(target),
    }
}
