//! Booked luggage generator

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{BookedFlight, BookedLuggage};

/// Bags per booking and how likely each count is
pub const BAG_COUNT_WEIGHTS: [(usize, f64); 3] = [(1, 0.70), (2, 0.25), (3, 0.05)];

/// Bag dimensions in centimetres
pub const DIMENSIONS: [&str; 5] = ["55x40x20", "60x45x23", "50x38x22", "65x45x25", "70x50x28"];

pub const MIN_WEIGHT_KG: i32 = 10;
pub const MAX_WEIGHT_KG: i32 = 32;

const TAG_LENGTH: usize = 10;
const TAG_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates checked bags for booked flights
pub struct LuggageGenerator {
    bag_counts: WeightedIndex<f64>,
    next_id: i64,
    issued_tags: HashSet<String>,
}

impl LuggageGenerator {
    pub fn new(first_id: i64) -> Result<Self> {
        let bag_counts = WeightedIndex::new(BAG_COUNT_WEIGHTS.iter().map(|(_, weight)| *weight))
            .map_err(|e| Error::GenerationError(format!("invalid bag count weights: {}", e)))?;

        Ok(Self {
            bag_counts,
            next_id: first_id,
            issued_tags: HashSet::new(),
        })
    }

    /// Generate one to three bags for every booking
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        bookings: &[BookedFlight],
        rng: &mut R,
    ) -> Vec<BookedLuggage> {
        let mut bags = Vec::with_capacity(bookings.len() * 2);

        for booking in bookings {
            let (count, _) = BAG_COUNT_WEIGHTS[self.bag_counts.sample(rng)];

            for _ in 0..count {
                let bag_tag = self.new_tag(rng);
                bags.push(BookedLuggage {
                    id: self.next_id,
                    bag_tag,
                    passenger_id: booking.passenger_id,
                    booked_flight_id: booking.id,
                    weight_kg: rng.gen_range(MIN_WEIGHT_KG..=MAX_WEIGHT_KG),
                    dimensions_cm: DIMENSIONS[rng.gen_range(0..DIMENSIONS.len())].to_string(),
                });
                self.next_id += 1;
            }
        }

        tracing::info!(bookings = bookings.len(), bags = bags.len(), "Generated booked luggage");
        bags
    }

    /// Random tag not handed out before by this generator
    fn new_tag<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        loop {
            let tag: String = (0..TAG_LENGTH)
                .map(|_| TAG_CHARSET[rng.gen_range(0..TAG_CHARSET.len())] as char)
                .collect();

            if self.issued_tags.insert(tag.clone()) {
                return tag;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Validate;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn bookings(count: i64) -> Vec<BookedFlight> {
        (1..=count)
            .map(|id| BookedFlight {
                id,
                passenger_id: id * 10,
                flight_number: "EI000001".to_string(),
                flight_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_every_booking_gets_one_to_three_bags() {
        let mut generator = LuggageGenerator::new(1).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let bags = generator.generate(&bookings(200), &mut rng);

        let mut per_booking: HashMap<i64, usize> = HashMap::new();
        for bag in &bags {
            bag.validate().unwrap();
            assert_eq!(bag.passenger_id, bag.booked_flight_id * 10);
            assert!((MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&bag.weight_kg));
            assert!(DIMENSIONS.contains(&bag.dimensions_cm.as_str()));
            *per_booking.entry(bag.booked_flight_id).or_default() += 1;
        }

        assert_eq!(per_booking.len(), 200);
        assert!(per_booking.values().all(|&count| (1..=3).contains(&count)));
    }

    #[test]
    fn test_ids_and_tags_are_unique() {
        let mut generator = LuggageGenerator::new(500).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let bags = generator.generate(&bookings(50), &mut rng);

        let tags: HashSet<_> = bags.iter().map(|bag| bag.bag_tag.as_str()).collect();
        assert_eq!(tags.len(), bags.len());
        assert_eq!(bags[0].id, 500);
        assert!(bags.windows(2).all(|w| w[1].id == w[0].id + 1));
    }
}
