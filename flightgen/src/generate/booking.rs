//! Flight booking assignment
//!
//! Passengers are booked in two passes over the flights grouped by date. The
//! coverage pass gives every flight one passenger, taking the first passenger
//! in a pre-shuffled order who is still free that day. The fill pass then tops
//! each flight up to capacity from a fresh shuffle of the passengers still free
//! on its date. Both passes share one [`BookingLedger`], so no passenger is
//! ever booked twice on the same date.
//!
//! This is a greedy single pass: it never backtracks, and a date with more
//! flights than distinct passengers fails outright.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{Error, Result};
use crate::models::{Assignment, BookedFlight, FlightDetails, PassengerId};

/// Seats per flight unless configured otherwise
pub const DEFAULT_MAX_CAPACITY: usize = 20;

/// Flights of each date, in input order within a date
pub type DateGroups<'f> = BTreeMap<NaiveDate, Vec<&'f FlightDetails>>;

/// Passengers already committed to some flight, per date, and the load of
/// every flight
#[derive(Debug, Default, Clone)]
pub struct BookingLedger {
    booked: HashMap<NaiveDate, HashSet<PassengerId>>,
    loads: HashMap<String, usize>,
}

impl BookingLedger {
    /// Ledger already holding bookings stored by an earlier run
    pub fn from_bookings(bookings: &[BookedFlight]) -> Self {
        let mut ledger = Self::default();
        for booking in bookings {
            ledger.book(booking.flight_date, booking.passenger_id, &booking.flight_number);
        }
        ledger
    }

    pub fn is_booked(&self, date: NaiveDate, passenger: PassengerId) -> bool {
        self.booked
            .get(&date)
            .map_or(false, |passengers| passengers.contains(&passenger))
    }

    /// Passengers booked on a flight so far
    pub fn load(&self, flight_number: &str) -> usize {
        self.loads.get(flight_number).copied().unwrap_or(0)
    }

    fn book(&mut self, date: NaiveDate, passenger: PassengerId, flight_number: &str) {
        self.booked.entry(date).or_default().insert(passenger);
        *self.loads.entry(flight_number.to_string()).or_insert(0) += 1;
    }
}

/// Partition flights by their date
pub fn group_by_date(flights: &[FlightDetails]) -> DateGroups<'_> {
    let mut groups = DateGroups::new();

    for flight in flights {
        groups.entry(flight.flight_date).or_default().push(flight);
    }

    groups
}

/// Passenger count per flight, in order of first assignment
pub fn flight_loads(assignments: &[Assignment]) -> IndexMap<String, usize> {
    let mut loads = IndexMap::new();

    for assignment in assignments {
        *loads.entry(assignment.flight_number.clone()).or_insert(0) += 1;
    }

    loads
}

/// Books passengers onto flights under a per-flight capacity
#[derive(Debug, Clone, Copy)]
pub struct BookingAssigner {
    max_capacity: usize,
}

impl Default for BookingAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CAPACITY)
    }
}

impl BookingAssigner {
    pub fn new(max_capacity: usize) -> Self {
        Self { max_capacity }
    }

    /// Assign passengers to flights
    ///
    /// Every flight gets at least one passenger and at most `max_capacity`.
    /// Passengers left over once all flights are full stay unassigned.
    ///
    /// # Errors
    ///
    /// [`Error::InfeasibleAssignment`] when some date has more flights than
    /// there are distinct passengers. No partial result is returned.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        flights: &[FlightDetails],
        passengers: &[PassengerId],
        rng: &mut R,
    ) -> Result<Vec<Assignment>> {
        self.assign_with_ledger(flights, passengers, BookingLedger::default(), rng)
    }

    /// Assign passengers around the bookings already held in `ledger`
    ///
    /// Flights that already have a passenger skip the coverage pass, and
    /// existing bookings count toward capacity and toward the passenger's
    /// one flight per date. Only the new assignments are returned.
    pub fn assign_with_ledger<R: Rng + ?Sized>(
        &self,
        flights: &[FlightDetails],
        passengers: &[PassengerId],
        mut ledger: BookingLedger,
        rng: &mut R,
    ) -> Result<Vec<Assignment>> {
        if self.max_capacity == 0 {
            return Err(Error::ValidationError(
                "flight capacity must be at least 1".to_string(),
            ));
        }

        ensure_unique_flights(flights)?;

        let groups = group_by_date(flights);
        let mut order = distinct(passengers);
        order.shuffle(rng);

        let mut assignments = self.coverage_pass(&groups, &order, &mut ledger)?;
        let covered = assignments.len();

        self.fill_pass(&groups, &order, &mut ledger, &mut assignments, rng);

        tracing::info!(
            flights = flights.len(),
            dates = groups.len(),
            passengers = order.len(),
            covered,
            assignments = assignments.len(),
            "Assigned passengers to flights"
        );

        Ok(assignments)
    }

    /// Give every flight its first passenger
    ///
    /// Walks the dates in order and, within a date, the flights in input
    /// order, taking the first passenger of `order` not yet booked that day.
    /// Flights the ledger already shows as carrying someone are skipped. The
    /// result depends only on `groups`, `order` and the ledger contents.
    pub fn coverage_pass(
        &self,
        groups: &DateGroups<'_>,
        order: &[PassengerId],
        ledger: &mut BookingLedger,
    ) -> Result<Vec<Assignment>> {
        let mut assignments = Vec::new();

        for (&date, flights) in groups {
            for flight in flights {
                if ledger.load(&flight.flight_number) > 0 {
                    continue;
                }

                let passenger = order
                    .iter()
                    .copied()
                    .find(|&passenger| !ledger.is_booked(date, passenger))
                    .ok_or_else(|| Error::InfeasibleAssignment {
                        date,
                        flight_number: flight.flight_number.clone(),
                        passengers: order.len(),
                    })?;

                ledger.book(date, passenger, &flight.flight_number);
                assignments.push(Assignment {
                    passenger_id: passenger,
                    flight_number: flight.flight_number.clone(),
                    flight_date: date,
                });
            }
        }

        Ok(assignments)
    }

    /// Top every flight up to capacity with passengers free on its date
    ///
    /// The free passengers of a date are collected once; each seat is then
    /// filled by a uniform draw from that list, which shrinks as it goes.
    fn fill_pass<R: Rng + ?Sized>(
        &self,
        groups: &DateGroups<'_>,
        order: &[PassengerId],
        ledger: &mut BookingLedger,
        assignments: &mut Vec<Assignment>,
        rng: &mut R,
    ) {
        for (&date, flights) in groups {
            let mut free: Vec<PassengerId> = order
                .iter()
                .copied()
                .filter(|&passenger| !ledger.is_booked(date, passenger))
                .collect();

            for flight in flights {
                let remaining = self
                    .max_capacity
                    .saturating_sub(ledger.load(&flight.flight_number));

                for _ in 0..remaining.min(free.len()) {
                    let passenger = free.swap_remove(rng.gen_range(0..free.len()));
                    ledger.book(date, passenger, &flight.flight_number);
                    assignments.push(Assignment {
                        passenger_id: passenger,
                        flight_number: flight.flight_number.clone(),
                        flight_date: date,
                    });
                }

                tracing::trace!(
                    flight = %flight.flight_number,
                    %date,
                    load = ledger.load(&flight.flight_number),
                    free = free.len(),
                    "Filled flight"
                );
            }
        }
    }
}

/// Drop repeated passenger ids, keeping the first occurrence
fn distinct(passengers: &[PassengerId]) -> Vec<PassengerId> {
    let mut seen = HashSet::with_capacity(passengers.len());
    passengers
        .iter()
        .copied()
        .filter(|passenger| seen.insert(*passenger))
        .collect()
}

fn ensure_unique_flights(flights: &[FlightDetails]) -> Result<()> {
    let mut seen = HashSet::with_capacity(flights.len());

    for flight in flights {
        if !seen.insert(flight.flight_number.as_str()) {
            return Err(Error::ValidationError(format!(
                "flight {} appears more than once",
                flight.flight_number
            )));
        }
    }

    Ok(())
}
