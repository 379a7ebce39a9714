use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use route_optimizer::api::{OptimizeResponse, handle_optimize_json};
use route_optimizer::optimizer::{OptimizeOptions, optimize_route};
use route_optimizer::store::{HttpStopStore, StoreConfig};
use route_optimizer::traits::StopStore;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a JSON request with `userLocation` and `markers`
    Optimize {
        /// Request file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Maximum 2-opt passes
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,
    },
    /// Fetch a driver's stops from the delivery backend and optimize them
    Driver {
        #[arg(long)]
        driver_id: String,

        /// Driver latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Driver longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        #[arg(long, default_value = "http://localhost:5000")]
        store_url: String,

        /// Bearer token for the delivery backend
        #[arg(long)]
        token: Option<String>,

        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        #[arg(long, default_value_t = 100)]
        max_iterations: usize,
    },
}

fn main() -> route_optimizer::Result<ExitCode> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Optimize { input, max_iterations } => {
            let body = match input {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut body = String::new();
                    io::stdin().read_to_string(&mut body)?;
                    body
                }
            };

            let (status, response) = handle_optimize_json(&body, &OptimizeOptions { max_iterations });
            println!("{response}");
            if status == 200 {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Driver {
            driver_id,
            lat,
            lng,
            store_url,
            token,
            timeout_secs,
            max_iterations,
        } => {
            let store = HttpStopStore::new(StoreConfig {
                base_url: store_url,
                timeout_secs,
                auth_token: token,
            })?;
            let stops = store.stops_for_driver(&driver_id)?;
            let route = optimize_route((lat, lng), &stops, &OptimizeOptions { max_iterations })?;
            info!(
                driver_id = %driver_id,
                stops = route.stop_count,
                distance_km = %route.display_distance(),
                "route ready"
            );

            let response = OptimizeResponse::success(route.into());
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
