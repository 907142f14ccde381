//! PIR report generator
//!
//! Picks a random share of checked bags and files a property irregularity
//! report for each at the arrival airport of its flight.

use chrono::NaiveTime;
use rand::Rng;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{BookedFlight, BookedLuggage, FlightDetails, PirReport, PirType};

const SECONDS_PER_DAY: u32 = 86_400;

/// Files PIR reports for a share of checked bags
pub struct PirGenerator<'a> {
    rate: f64,
    next_id: i64,
    bookings: HashMap<i64, &'a BookedFlight>,
    flights: HashMap<&'a str, &'a FlightDetails>,
}

impl<'a> PirGenerator<'a> {
    /// `rate` is the chance that any single bag gets a report
    pub fn new(
        rate: f64,
        first_id: i64,
        bookings: &'a [BookedFlight],
        flights: &'a [FlightDetails],
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(Error::ConfigError(format!(
                "PIR rate must be within 0..=1, got {}",
                rate
            )));
        }

        Ok(Self {
            rate,
            next_id: first_id,
            bookings: bookings.iter().map(|b| (b.id, b)).collect(),
            flights: flights.iter().map(|f| (f.flight_number.as_str(), f)).collect(),
        })
    }

    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        luggage: &[BookedLuggage],
        rng: &mut R,
    ) -> Result<Vec<PirReport>> {
        let mut reports = Vec::new();

        for bag in luggage {
            if !rng.gen_bool(self.rate) {
                continue;
            }

            let booking = self.bookings.get(&bag.booked_flight_id).ok_or_else(|| {
                Error::ValidationError(format!(
                    "bag {} references unknown booking {}",
                    bag.bag_tag, bag.booked_flight_id
                ))
            })?;

            let flight = self
                .flights
                .get(booking.flight_number.as_str())
                .ok_or_else(|| {
                    Error::ValidationError(format!(
                        "booking {} references unknown flight {}",
                        booking.id, booking.flight_number
                    ))
                })?;

            let seconds = rng.gen_range(0..SECONDS_PER_DAY);
            let pir_time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                .ok_or_else(|| Error::GenerationError(format!("invalid time of day: {}s", seconds)))?;

            reports.push(PirReport {
                id: self.next_id,
                bag_luggage_id: bag.id,
                passenger_id: bag.passenger_id,
                booked_flight_id: booking.id,
                airport_iata: flight.arrival_iata.clone(),
                airline_iata: flight.airline_iata.clone(),
                pir_date: flight.flight_date,
                pir_time,
                pir_type: PirType::ALL[rng.gen_range(0..PirType::ALL.len())],
            });
            self.next_id += 1;
        }

        tracing::info!(bags = luggage.len(), reports = reports.len(), "Generated PIR reports");
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Validate;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixtures() -> (Vec<FlightDetails>, Vec<BookedFlight>, Vec<BookedLuggage>) {
        let date = NaiveDate::from_ymd_opt(2023, 8, 14).unwrap();
        let flights = vec![FlightDetails {
            flight_number: "EI123456".to_string(),
            departure_iata: "DUB".to_string(),
            arrival_iata: "JFK".to_string(),
            airline_iata: "EI".to_string(),
            flight_date: date,
        }];
        let bookings = vec![BookedFlight {
            id: 3,
            passenger_id: 77,
            flight_number: "EI123456".to_string(),
            flight_date: date,
        }];
        let luggage = (1..=20)
            .map(|id| BookedLuggage {
                id,
                bag_tag: format!("TAG{:07}", id),
                passenger_id: 77,
                booked_flight_id: 3,
                weight_kg: 20,
                dimensions_cm: "55x40x20".to_string(),
            })
            .collect();

        (flights, bookings, luggage)
    }

    #[test]
    fn test_every_bag_reported_at_full_rate() {
        let (flights, bookings, luggage) = fixtures();
        let mut generator = PirGenerator::new(1.0, 1, &bookings, &flights).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let reports = generator.generate(&luggage, &mut rng).unwrap();
        assert_eq!(reports.len(), 20);

        for report in &reports {
            report.validate().unwrap();
            assert_eq!(report.airport_iata, "JFK");
            assert_eq!(report.airline_iata, "EI");
            assert_eq!(report.booked_flight_id, 3);
            assert_eq!(report.pir_date, NaiveDate::from_ymd_opt(2023, 8, 14).unwrap());
        }
    }

    #[test]
    fn test_zero_rate_files_nothing() {
        let (flights, bookings, luggage) = fixtures();
        let mut generator = PirGenerator::new(0.0, 1, &bookings, &flights).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        assert!(generator.generate(&luggage, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_dangling_booking_is_an_error() {
        let (flights, _, luggage) = fixtures();
        let mut generator = PirGenerator::new(1.0, 1, &[], &flights).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        let result = generator.generate(&luggage, &mut rng);
        assert!(matches!(result, Err(Error::ValidationError(_))));
    }

    #[test]
    fn test_rate_out_of_range() {
        assert!(PirGenerator::new(1.5, 1, &[], &[]).is_err());
    }
}
