//! Field checks shared by the record validators

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static AIRLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{2}$").expect("valid airline code pattern"));
static AIRPORT_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid airport code pattern"));
static FLIGHT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{2}[0-9]{6}$").expect("valid flight number pattern"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern")
});
static BAG_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{10}$").expect("valid bag tag pattern"));

fn check(pattern: &Regex, what: &str, value: &str) -> Result<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(Error::ValidationError(format!("invalid {}: {:?}", what, value)))
    }
}

pub fn airline_code(value: &str) -> Result<()> {
    check(&AIRLINE_CODE, "airline IATA code", value)
}

pub fn airport_code(value: &str) -> Result<()> {
    check(&AIRPORT_CODE, "airport IATA code", value)
}

pub fn flight_number(value: &str) -> Result<()> {
    check(&FLIGHT_NUMBER, "flight number", value)
}

pub fn email(value: &str) -> Result<()> {
    check(&EMAIL, "email", value)
}

pub fn bag_tag(value: &str) -> Result<()> {
    check(&BAG_TAG, "bag tag", value)
}

pub fn not_blank(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::ValidationError(format!("{} must not be blank", what)))
    } else {
        Ok(())
    }
}

pub fn positive_id(what: &str, value: i64) -> Result<()> {
    if value > 0 {
        Ok(())
    } else {
        Err(Error::ValidationError(format!("{} must be positive, got {}", what, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("AA", true)]
    #[case("U2", true)]
    #[case("aa", false)]
    #[case("AAA", false)]
    fn test_airline_codes(#[case] code: &str, #[case] valid: bool) {
        assert_eq!(airline_code(code).is_ok(), valid);
    }

    #[rstest]
    #[case("AA123456", true)]
    #[case("AA12345", false)]
    #[case("AAA23456", false)]
    fn test_flight_numbers(#[case] number: &str, #[case] valid: bool) {
        assert_eq!(flight_number(number).is_ok(), valid);
    }

    #[test]
    fn test_email_and_ids() {
        assert!(email("ada.lovelace@example.com").is_ok());
        assert!(email("ada lovelace@example.com").is_err());
        assert!(positive_id("passenger_id", 0).is_err());
    }
}
