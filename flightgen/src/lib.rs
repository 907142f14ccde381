//! flightgen: synthetic data for a toy airline-operations database
//!
//! flightgen loads airline and airport reference data, generates a year of
//! flights and a pool of passengers, books passengers onto flights under
//! capacity and one-flight-per-day rules, and derives checked luggage and
//! property irregularity reports from the bookings. Every stage writes to a
//! relational database through sqlx.

// Lets the derive macros refer to `flightgen::` from inside this crate
extern crate self as flightgen;

pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod generate;
pub mod models;
pub mod utils;

#[cfg(test)]
mod test;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::Instrument;
use uuid::Uuid;

// Re-export main types for easier access
pub use config::Config;
pub use db::connection::DatabaseConnection;
pub use error::{Error, Result};
pub use generate::{
    BookingAssigner, FlightDetailsGenerator, LuggageGenerator, PassengerGenerator, PirGenerator,
};
pub use models::registry::TableRegistry;

use db::history::{self, LoadHistory};
use db::{schema, store};
use generate::booking::{flight_loads, BookingLedger};
use models::{BookedFlight, BookedLuggage, FlightDetails, PirReport, Record, Validate};

/// Initialize flightgen with the specified configuration file
pub async fn init(config_path: &str) -> Result<FlightGenClient> {
    let config = config::load_from_file(config_path)?;
    FlightGenClient::new(config).await
}

/// Generation stages, each drawing from its own RNG stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Flights = 1,
    Passengers = 2,
    Bookings = 3,
    Luggage = 4,
    PirReports = 5,
}

/// Outcome of loading one reference file
#[derive(Debug, Clone, Serialize)]
pub struct LoadOutcome {
    pub source: String,
    pub table: String,
    pub rows: usize,
    pub inserted: u64,
    pub skipped: bool,
}

/// Row counts of a complete generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub reference: Vec<LoadOutcome>,
    pub flights: usize,
    pub passengers: usize,
    pub bookings: usize,
    pub bags: usize,
    pub pir_reports: usize,
}

/// The main client for generating and loading data
pub struct FlightGenClient {
    config: Config,
    connection: DatabaseConnection,
    run_id: Uuid,
}

impl FlightGenClient {
    /// Create a new client from configuration
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let connection = DatabaseConnection::connect(&config.database).await?;

        Ok(Self {
            config,
            connection,
            run_id: Uuid::new_v4(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Deterministic RNG for a stage, derived from the configured seed
    pub fn stage_rng(&self, stage: Stage) -> StdRng {
        StdRng::seed_from_u64(self.config.generation.seed.wrapping_add(stage as u64))
    }

    /// Confirm the database answers and report its version
    pub async fn check_connection(&self) -> Result<String> {
        let version = self.connection.server_version().await?;
        tracing::info!(version = %version, "Database connection established");
        Ok(version)
    }

    /// Create all tables that do not exist yet
    pub async fn init_schema(&self) -> Result<()> {
        let registry = TableRegistry::airline_operations()?;
        schema::ensure_schema(&self.connection, &registry).await?;
        self.history().ensure_table().await
    }

    /// Load the airline and airport CSV files
    ///
    /// A file whose checksum matches an earlier load is skipped unless
    /// `force` is set.
    pub async fn load_reference_data(&self, force: bool) -> Result<Vec<LoadOutcome>> {
        self.history().ensure_table().await?;

        let airlines = self
            .load_reference_file(
                &self.config.data.airline_csv,
                |path| data::read_airlines(path),
                force,
            )
            .await?;
        let airports = self
            .load_reference_file(
                &self.config.data.airport_csv,
                |path| data::read_airports(path),
                force,
            )
            .await?;

        Ok(vec![airlines, airports])
    }

    /// Generate a year of flights between the stored airlines and airports
    pub async fn generate_flights(&self, csv: Option<&Path>) -> Result<Vec<FlightDetails>> {
        let airlines = self.codes("airline").await?;
        let airports = self.codes("airport").await?;

        let generation = &self.config.generation;
        let generator = FlightDetailsGenerator::new(
            &airlines,
            &airports,
            generation.year,
            generation.flights_per_quarter,
        )?;
        let flights = generator.generate(&mut self.stage_rng(Stage::Flights))?;

        schema::upsert(&self.connection, &flights, &self.config.loading).await?;
        if let Some(path) = csv {
            data::write_records(path, &flights)?;
        }

        Ok(flights)
    }

    /// Generate passengers chunk by chunk, numbering them after the stored ones
    pub async fn generate_passengers(&self, count: Option<usize>, csv: Option<&Path>) -> Result<usize> {
        let count = count.unwrap_or(self.config.generation.passenger_count);
        let chunk_size = self.config.data.chunk_size;
        let reference_date = self
            .config
            .generation
            .reference_date
            .unwrap_or_else(today);

        let first_id = self.connection.next_id("passenger", "passenger_id").await?;
        let mut generator = PassengerGenerator::new(first_id, reference_date)?;
        let mut rng = self.stage_rng(Stage::Passengers);

        let mut written = 0;
        while written < count {
            let chunk = generator.generate(chunk_size.min(count - written), &mut rng);
            schema::upsert(&self.connection, &chunk, &self.config.loading).await?;
            if let Some(path) = csv {
                data::append_records(path, &chunk)?;
            }

            written += chunk.len();
            tracing::info!(written, total = count, "Generated passenger chunk");
        }

        Ok(written)
    }

    /// Book the stored passengers onto the stored flights
    ///
    /// Bookings already in the database count toward each flight's capacity
    /// and each passenger's one flight per date, so only seats still free are
    /// handed out.
    pub async fn book_flights(&self, max_capacity: Option<usize>) -> Result<Vec<BookedFlight>> {
        let flights = store::flights(&self.connection).await?;
        let passengers = store::passenger_ids(&self.connection).await?;
        let existing = store::booked_flights(&self.connection).await?;

        let assigner =
            BookingAssigner::new(max_capacity.unwrap_or(self.config.generation.max_capacity));
        let assignments = assigner.assign_with_ledger(
            &flights,
            &passengers,
            BookingLedger::from_bookings(&existing),
            &mut self.stage_rng(Stage::Bookings),
        )?;

        tracing::info!(
            existing = existing.len(),
            new = assignments.len(),
            flights_touched = flight_loads(&assignments).len(),
            "Booked passengers"
        );

        let first_id = self.connection.next_id("booked_flight", "id").await?;
        let bookings = BookedFlight::from_assignments(assignments, first_id);
        schema::upsert(&self.connection, &bookings, &self.config.loading).await?;

        Ok(bookings)
    }

    /// Check in luggage for every stored booking
    pub async fn generate_luggage(&self) -> Result<Vec<BookedLuggage>> {
        let bookings = store::booked_flights(&self.connection).await?;

        let first_id = self.connection.next_id("booked_luggage", "id").await?;
        let mut generator = LuggageGenerator::new(first_id)?;
        let bags = generator.generate(&bookings, &mut self.stage_rng(Stage::Luggage));

        schema::upsert(&self.connection, &bags, &self.config.loading).await?;
        Ok(bags)
    }

    /// File PIR reports for a share of the stored bags
    pub async fn generate_pir_reports(&self) -> Result<Vec<PirReport>> {
        let flights = store::flights(&self.connection).await?;
        let bookings = store::booked_flights(&self.connection).await?;
        let luggage = store::booked_luggage(&self.connection).await?;

        let first_id = self.connection.next_id("pir_report", "id").await?;
        let mut generator =
            PirGenerator::new(self.config.generation.pir_rate, first_id, &bookings, &flights)?;
        let reports = generator.generate(&luggage, &mut self.stage_rng(Stage::PirReports))?;

        schema::upsert(&self.connection, &reports, &self.config.loading).await?;
        Ok(reports)
    }

    /// Complete workflow: create tables, load reference data, generate every record type
    ///
    /// Flights and passengers are also exported to CSV under the configured
    /// output directory.
    pub async fn run_all(&self) -> Result<RunSummary> {
        let span = tracing::info_span!("run", run_id = %self.run_id);

        async {
            self.init_schema().await?;
            let reference = self.load_reference_data(false).await?;

            let output = PathBuf::from(&self.config.data.output_directory);
            let flights_csv = output.join(format!("flight_details_{}.csv", self.config.generation.year));
            let flights = self.generate_flights(Some(&flights_csv)).await?;
            let passengers = self
                .generate_passengers(None, Some(&output.join("passengers.csv")))
                .await?;

            let bookings = self.book_flights(None).await?;
            let bags = self.generate_luggage().await?;
            let pir_reports = self.generate_pir_reports().await?;

            let summary = RunSummary {
                run_id: self.run_id,
                reference,
                flights: flights.len(),
                passengers,
                bookings: bookings.len(),
                bags: bags.len(),
                pir_reports: pir_reports.len(),
            };

            tracing::info!(?summary, "Generation run complete");
            Ok::<_, Error>(summary)
        }
        .instrument(span)
        .await
    }

    fn history(&self) -> LoadHistory<'_> {
        LoadHistory::new(&self.connection, &self.config.loading.history_table)
    }

    async fn load_reference_file<R, F>(&self, source: &str, read: F, force: bool) -> Result<LoadOutcome>
    where
        R: Record + Validate,
        F: FnOnce(&Path) -> Result<Vec<R>>,
    {
        let path = Path::new(source);
        let bytes = std::fs::read(path).map_err(|e| {
            Error::IoError(io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;

        let checksum = history::checksum(&bytes);
        let history = self.history();
        let table = R::table_name();

        if !force && history.already_loaded(source, &checksum).await? {
            tracing::info!(source, table, "Reference file unchanged since last load, skipping");
            return Ok(LoadOutcome {
                source: source.to_string(),
                table: table.to_string(),
                rows: 0,
                inserted: 0,
                skipped: true,
            });
        }

        let rows = read(path)?;
        let inserted = schema::upsert(&self.connection, &rows, &self.config.loading).await?;
        history.record(source, table, &checksum, rows.len()).await?;

        Ok(LoadOutcome {
            source: source.to_string(),
            table: table.to_string(),
            rows: rows.len(),
            inserted,
            skipped: false,
        })
    }

    /// IATA codes stored in a reference table
    async fn codes(&self, table: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = self
            .connection
            .fetch_all(&format!("SELECT iata FROM {} ORDER BY iata", table))
            .await?;

        Ok(rows.into_iter().map(|(code,)| code).collect())
    }
}

/// Today's date, used when no reference date is configured
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
