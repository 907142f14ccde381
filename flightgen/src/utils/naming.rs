//! Text normalization helpers
//!
//! CSV headers, person names and email addresses arrive in whatever shape the
//! source produced; these helpers bring them into the form stored in the
//! database.

use inflector::Inflector;

/// Turn a CSV header such as `IATA Code` into a column name like `iata_code`
pub fn normalize_header(header: &str) -> String {
    header.trim().to_snake_case()
}

/// Capitalize the first letter of every word and lowercase the rest
///
/// A word starts after any non-alphabetic character, so `o'neil-smith`
/// becomes `O'Neil-Smith`.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for c in value.trim().chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }

    result
}

/// Strip all whitespace from an email address and lowercase it
pub fn clean_email(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
