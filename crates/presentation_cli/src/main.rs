//! Trailmap CLI
//!
//! Command-line interface for finding routes and testing the map services.

#![allow(clippy::print_stdout)]

mod route;

use std::path::PathBuf;

use anyhow::Context;
use application::ports::GeocoderPort;
use clap::{Parser, Subcommand};
use domain::{Coordinate, TravelProfile};
use infrastructure::{AppConfig, EnvSecretStore, GeocodingAdapter, init_logging};

/// Trailmap CLI
#[derive(Parser)]
#[command(name = "trailmap-cli")]
#[command(author, version, about = "Walking and cycling routes between two places", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find routes between two locations
    ///
    /// Example: trailmap-cli route --from "Ann Arbor, MI" --to "Detroit, MI"
    /// Example: trailmap-cli route --from-coords 42.2808,-83.743 --to "Detroit" -o route.geojson
    Route {
        /// Start address
        #[arg(long, required_unless_present = "from_coords", conflicts_with = "from_coords")]
        from: Option<String>,

        /// Start as "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        from_coords: Option<Coordinate>,

        /// Destination address
        #[arg(long, required_unless_present = "to_coords", conflicts_with = "to_coords")]
        to: Option<String>,

        /// Destination as "lat,lon"
        #[arg(long, allow_hyphen_values = true)]
        to_coords: Option<Coordinate>,

        /// Travel profile to request, repeatable (default: from config)
        #[arg(short, long = "profile")]
        profiles: Vec<TravelProfile>,

        /// Write the GeoJSON map document here ("-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up the coordinate of an address
    Geocode {
        /// Address to look up
        address: String,
    },

    /// Look up the address of a coordinate
    Reverse {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Print the effective configuration (secrets redacted)
    Config,
}

/// Determine log filter override from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Fill secrets from the environment and check the configuration
async fn prepare_config(config: &mut AppConfig) -> anyhow::Result<()> {
    config.resolve_secrets(&EnvSecretStore::new()).await?;
    config.validate()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))?;
    prepare_config(&mut config).await?;

    match cli.command {
        Commands::Route {
            from,
            from_coords,
            to,
            to_coords,
            profiles,
            output,
        } => {
            let request = route::RouteRequest {
                start: route::Endpoint::from_args(from, from_coords)?,
                destination: route::Endpoint::from_args(to, to_coords)?,
                profiles,
                output,
            };
            route::run(config, request).await?;
        },

        Commands::Geocode { address } => {
            let geocoder = GeocodingAdapter::from_config(&config.geocoding)?;
            match geocoder.geocode(&address).await {
                Ok(coordinate) => println!("📍 {address}: {coordinate}"),
                Err(e) => {
                    println!("❌ {}", e.user_message());
                    std::process::exit(1);
                },
            }
        },

        Commands::Reverse { lat, lon } => {
            let coordinate = Coordinate::new(lat, lon)?;
            let geocoder = GeocodingAdapter::from_config(&config.geocoding)?;
            match geocoder.reverse_geocode(coordinate).await {
                Ok(address) => println!("🏠 {coordinate}: {address}"),
                Err(e) => {
                    println!("❌ {}", e.user_message());
                    std::process::exit(1);
                },
            }
        },

        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            if config.routing.has_api_key() {
                println!("# routing.api_key is set (hidden)");
            }
        },
    }

    Ok(())
}
