//! Passenger generator
//!
//! Fake passengers with plausible names, ages and contact details. All
//! randomness comes from the caller's RNG, so a seeded RNG gives the same
//! passengers every run.

use chrono::{Days, Months, NaiveDate};
use fake::faker::internet::en::FreeEmailProvider;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;

use crate::error::{Error, Result};
use crate::models::{Passenger, PassengerId};
use crate::utils::naming::{clean_email, title_case};

/// Youngest passenger age in years
pub const MIN_AGE_YEARS: u32 = 16;
/// Oldest passenger age in years
pub const MAX_AGE_YEARS: u32 = 85;

/// Generates passengers with consecutive ids
pub struct PassengerGenerator {
    next_id: PassengerId,
    oldest_birth: NaiveDate,
    youngest_birth: NaiveDate,
}

impl PassengerGenerator {
    /// Create a generator whose first passenger gets `first_id`
    ///
    /// Ages are computed relative to `reference_date`.
    pub fn new(first_id: PassengerId, reference_date: NaiveDate) -> Result<Self> {
        let years_before = |years: u32| {
            reference_date
                .checked_sub_months(Months::new(12 * years))
                .ok_or_else(|| {
                    Error::ConfigError(format!(
                        "reference date {} is too early for a {} year old",
                        reference_date, years
                    ))
                })
        };

        Ok(Self {
            next_id: first_id,
            oldest_birth: years_before(MAX_AGE_YEARS)?,
            youngest_birth: years_before(MIN_AGE_YEARS)?,
        })
    }

    /// Generate the next `count` passengers
    pub fn generate<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Vec<Passenger> {
        (0..count).map(|_| self.generate_one(rng)).collect()
    }

    /// Generate a single cleaned passenger
    pub fn generate_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Passenger {
        let given: String = FirstName().fake_with_rng(rng);
        let family: String = LastName().fake_with_rng(rng);
        let domain: String = FreeEmailProvider().fake_with_rng(rng);
        let phone_number: String = PhoneNumber().fake_with_rng(rng);

        let span = (self.youngest_birth - self.oldest_birth).num_days().max(0) as u64;
        let date_of_birth = self.oldest_birth + Days::new(rng.gen_range(0..=span));

        let gender = if rng.gen_bool(0.5) { "M" } else { "F" };

        let passenger = Passenger {
            passenger_id: self.next_id,
            family_name: title_case(&family),
            given_name: title_case(&given),
            gender: gender.to_string(),
            date_of_birth,
            email: clean_email(&format!("{}.{}@{}", given, family, domain)),
            phone_number,
        };

        self.next_id += 1;
        passenger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Validate;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_passengers_are_valid_and_numbered() {
        let mut generator = PassengerGenerator::new(101, reference()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let passengers = generator.generate(50, &mut rng);
        assert_eq!(passengers.len(), 50);
        assert_eq!(passengers[0].passenger_id, 101);
        assert_eq!(passengers[49].passenger_id, 150);

        let oldest = NaiveDate::from_ymd_opt(1939, 6, 1).unwrap();
        let youngest = NaiveDate::from_ymd_opt(2008, 6, 1).unwrap();

        for passenger in &passengers {
            passenger.validate().unwrap();
            assert!(passenger.date_of_birth >= oldest && passenger.date_of_birth <= youngest);
            assert_eq!(passenger.email, passenger.email.to_lowercase());
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let run = || {
            let mut generator = PassengerGenerator::new(1, reference()).unwrap();
            let mut rng = StdRng::seed_from_u64(7);
            generator.generate(5, &mut rng)
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_generates_through_a_trait_object_rng() {
        let mut generator = PassengerGenerator::new(1, reference()).unwrap();
        let mut seeded = StdRng::seed_from_u64(7);
        let rng: &mut dyn RngCore = &mut seeded;

        let passengers = generator.generate(3, rng);
        assert_eq!(passengers.len(), 3);
        assert_eq!(passengers[2].passenger_id, 3);
    }
}
