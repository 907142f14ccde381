//! Airline and airport reference files

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Airline, Airport, Validate};
use crate::utils::naming::normalize_header;

/// Row of the airline file: `IATA, Airline, Country, Region`
#[derive(Debug, Deserialize)]
struct AirlineRow {
    iata: Option<String>,
    airline: Option<String>,
    country: Option<String>,
    region: Option<String>,
}

/// Row of the airport file: `IATA Code, Airport Name, City, Country, Region`
#[derive(Debug, Deserialize)]
struct AirportRow {
    iata_code: Option<String>,
    airport_name: Option<String>,
    city: Option<String>,
    country: Option<String>,
    region: Option<String>,
}

/// Read airlines, dropping rows without a usable IATA code
pub fn read_airlines(path: impl AsRef<Path>) -> Result<Vec<Airline>> {
    let rows: Vec<AirlineRow> = read_normalized(path.as_ref())?;
    let total = rows.len();

    let airlines = unique_valid(
        rows.into_iter().filter_map(|row| {
            Some(Airline {
                iata: row.iata?.to_uppercase(),
                name: row.airline.unwrap_or_default(),
                country: row.country,
                region: row.region,
            })
        }),
        |airline| airline.iata.clone(),
    );

    tracing::info!(
        path = %path.as_ref().display(),
        rows = total,
        airlines = airlines.len(),
        "Read airline reference data"
    );
    Ok(airlines)
}

/// Read airports, dropping rows without a usable IATA code
pub fn read_airports(path: impl AsRef<Path>) -> Result<Vec<Airport>> {
    let rows: Vec<AirportRow> = read_normalized(path.as_ref())?;
    let total = rows.len();

    let airports = unique_valid(
        rows.into_iter().filter_map(|row| {
            Some(Airport {
                iata: row.iata_code?.to_uppercase(),
                name: row.airport_name.unwrap_or_default(),
                city: row.city,
                country: row.country,
                region: row.region,
            })
        }),
        |airport| airport.iata.clone(),
    );

    tracing::info!(
        path = %path.as_ref().display(),
        rows = total,
        airports = airports.len(),
        "Read airport reference data"
    );
    Ok(airports)
}

/// Deserialize a CSV file after renaming its headers to snake_case
fn read_normalized<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(Error::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let headers: StringRecord = reader.headers()?.iter().map(normalize_header).collect();
    reader.set_headers(headers);

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;

    Ok(rows)
}

/// Keep the first valid record per key, logging the ones skipped
fn unique_valid<T, K, F>(records: impl Iterator<Item = T>, key: F) -> Vec<T>
where
    T: Validate + std::fmt::Debug,
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();

    records
        .filter(|record| match record.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, ?record, "Skipping reference row");
                false
            }
        })
        .filter(|record| seen.insert(key(record)))
        .collect()
}
