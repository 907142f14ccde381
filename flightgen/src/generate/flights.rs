//! Flight details generator
//!
//! Produces a year of flights, quarter by quarter, with random airlines,
//! airport pairs and dates.

use chrono::{Days, NaiveDate};
use rand::Rng;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::FlightDetails;

/// Distinct numbers available behind each airline prefix
const NUMBERS_PER_AIRLINE: usize = 1_000_000;

/// Generates flights for a single year
pub struct FlightDetailsGenerator<'a> {
    airlines: &'a [String],
    airports: &'a [String],
    year: i32,
    flights_per_quarter: usize,
}

impl<'a> FlightDetailsGenerator<'a> {
    pub fn new(
        airlines: &'a [String],
        airports: &'a [String],
        year: i32,
        flights_per_quarter: usize,
    ) -> Result<Self> {
        if airlines.is_empty() {
            return Err(Error::ConfigError(
                "at least one airline is needed to generate flights".to_string(),
            ));
        }

        let distinct_airports: HashSet<&String> = airports.iter().collect();
        if distinct_airports.len() < 2 {
            return Err(Error::ConfigError(format!(
                "at least two distinct airports are needed to generate flights, got {}",
                distinct_airports.len()
            )));
        }

        if flights_per_quarter * 4 > airlines.len() * NUMBERS_PER_AIRLINE {
            return Err(Error::ConfigError(format!(
                "{} flights per quarter cannot get unique numbers from {} airlines",
                flights_per_quarter,
                airlines.len()
            )));
        }

        Ok(Self {
            airlines,
            airports,
            year,
            flights_per_quarter,
        })
    }

    /// Generate the whole year, sorted by flight date and number
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<FlightDetails>> {
        let mut seen = HashSet::with_capacity(self.flights_per_quarter * 4);
        let mut flights = Vec::with_capacity(self.flights_per_quarter * 4);

        for (quarter, start, end) in quarter_ranges(self.year)? {
            tracing::debug!(quarter, %start, %end, "Generating quarter");
            flights.extend(self.generate_quarter(start, end, &mut seen, rng));
        }

        flights.sort_by(|a, b| {
            (a.flight_date, &a.flight_number).cmp(&(b.flight_date, &b.flight_number))
        });

        tracing::info!(year = self.year, flights = flights.len(), "Generated flight details");
        Ok(flights)
    }

    fn generate_quarter<R: Rng + ?Sized>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        seen: &mut HashSet<String>,
        rng: &mut R,
    ) -> Vec<FlightDetails> {
        (0..self.flights_per_quarter)
            .map(|_| {
                let airline = &self.airlines[rng.gen_range(0..self.airlines.len())];
                let flight_number = unique_flight_number(airline, seen, rng);

                let departure = rng.gen_range(0..self.airports.len());
                let mut arrival = rng.gen_range(0..self.airports.len());
                while self.airports[arrival] == self.airports[departure] {
                    arrival = rng.gen_range(0..self.airports.len());
                }

                FlightDetails {
                    flight_number,
                    departure_iata: self.airports[departure].clone(),
                    arrival_iata: self.airports[arrival].clone(),
                    airline_iata: airline.clone(),
                    flight_date: random_date(start, end, rng),
                }
            })
            .collect()
    }
}

/// First and last day of each quarter of `year`
pub fn quarter_ranges(year: i32) -> Result<Vec<(&'static str, NaiveDate, NaiveDate)>> {
    let bounds = [
        ("Q1", (1, 1), (3, 31)),
        ("Q2", (4, 1), (6, 30)),
        ("Q3", (7, 1), (9, 30)),
        ("Q4", (10, 1), (12, 31)),
    ];

    bounds
        .into_iter()
        .map(|(quarter, (start_month, start_day), (end_month, end_day))| {
            let start = NaiveDate::from_ymd_opt(year, start_month, start_day);
            let end = NaiveDate::from_ymd_opt(year, end_month, end_day);

            match (start, end) {
                (Some(start), Some(end)) => Ok((quarter, start, end)),
                _ => Err(Error::ConfigError(format!("year {} is out of range", year))),
            }
        })
        .collect()
}

/// Uniform date between `start` and `end`, both inclusive
pub fn random_date<R: Rng + ?Sized>(start: NaiveDate, end: NaiveDate, rng: &mut R) -> NaiveDate {
    let span = (end - start).num_days().max(0) as u64;
    start + Days::new(rng.gen_range(0..=span))
}

/// Airline code followed by six digits, redrawn until unseen
fn unique_flight_number<R: Rng + ?Sized>(
    airline: &str,
    seen: &mut HashSet<String>,
    rng: &mut R,
) -> String {
    loop {
        let candidate = format!("{}{:06}", airline, rng.gen_range(0..NUMBERS_PER_AIRLINE));
        if seen.insert(candidate.clone()) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_generated_year() {
        let airlines = codes(&["EI", "BA", "LH"]);
        let airports = codes(&["DUB", "LHR", "FRA"]);
        let generator = FlightDetailsGenerator::new(&airlines, &airports, 2023, 250).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let flights = generator.generate(&mut rng).unwrap();
        assert_eq!(flights.len(), 1000);

        let numbers: HashSet<_> = flights.iter().map(|f| f.flight_number.as_str()).collect();
        assert_eq!(numbers.len(), flights.len());

        for flight in &flights {
            assert_ne!(flight.departure_iata, flight.arrival_iata);
            assert!(flight.flight_number.starts_with(&flight.airline_iata));
            assert_eq!(flight.flight_number.len(), 8);
            assert_eq!(flight.flight_date.format("%Y").to_string(), "2023");
        }

        assert!(flights.windows(2).all(|w| w[0].flight_date <= w[1].flight_date));
    }

    #[test]
    fn test_each_quarter_gets_its_share() {
        let airlines = codes(&["EI"]);
        let airports = codes(&["DUB", "ORK"]);
        let generator = FlightDetailsGenerator::new(&airlines, &airports, 2024, 40).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let flights = generator.generate(&mut rng).unwrap();
        for (_, start, end) in quarter_ranges(2024).unwrap() {
            let in_quarter = flights
                .iter()
                .filter(|f| f.flight_date >= start && f.flight_date <= end)
                .count();
            assert_eq!(in_quarter, 40);
        }
    }

    #[test]
    fn test_needs_two_airports() {
        let airlines = codes(&["EI"]);
        let airports = codes(&["DUB"]);
        assert!(FlightDetailsGenerator::new(&airlines, &airports, 2023, 1).is_err());
    }

    #[test]
    fn test_random_date_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_date(day, day, &mut rng), day);
    }
}
