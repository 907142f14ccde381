use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use flightgen::utils::logging::init_logging;
use flightgen::FlightGenClient;

#[derive(Parser, Debug)]
#[command(name = "flightgen", version, about = "Synthetic airline-operations data generator")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "flightgen.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the database answers
    Check,
    /// Create every table that does not exist yet
    InitDb,
    /// Load the airline and airport CSV files
    LoadReference {
        /// Reload files even when their checksum was seen before
        #[arg(long)]
        force: bool,
    },
    /// Generate a year of flights
    Flights {
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Generate passengers
    Passengers {
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Book the stored passengers onto the stored flights
    Book {
        #[arg(long)]
        max_capacity: Option<usize>,
    },
    /// Check in luggage for every booking
    Luggage,
    /// File PIR reports for a share of the bags
    Pir,
    /// Run every stage in order
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = flightgen::config::load_from_file(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    let client = FlightGenClient::new(config)
        .await
        .context("failed to connect to the database")?;

    match cli.command {
        Commands::Check => {
            let version = client.check_connection().await?;
            print_json(&json!({ "version": version }))?;
        }
        Commands::InitDb => {
            client.init_schema().await?;
            print_json(&json!({ "schema": "ready" }))?;
        }
        Commands::LoadReference { force } => {
            let outcomes = client.load_reference_data(force).await?;
            print_json(&outcomes)?;
        }
        Commands::Flights { csv } => {
            let flights = client.generate_flights(csv.as_deref()).await?;
            print_json(&json!({ "flights": flights.len() }))?;
        }
        Commands::Passengers { count, csv } => {
            let written = client.generate_passengers(count, csv.as_deref()).await?;
            print_json(&json!({ "passengers": written }))?;
        }
        Commands::Book { max_capacity } => {
            let bookings = client
                .book_flights(max_capacity)
                .await
                .context("booking assignment failed")?;
            print_json(&json!({ "bookings": bookings.len() }))?;
        }
        Commands::Luggage => {
            let bags = client.generate_luggage().await?;
            print_json(&json!({ "bags": bags.len() }))?;
        }
        Commands::Pir => {
            let reports = client.generate_pir_reports().await?;
            print_json(&json!({ "pir_reports": reports.len() }))?;
        }
        Commands::All => {
            let summary = client.run_all().await?;
            print_json(&summary)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
