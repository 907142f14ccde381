//! Table descriptions for persisted records
//!
//! Structs deriving [`Record`] describe their table layout and hand their
//! values to the SQL builders in `db::schema` as [`SqlValue`]s.

use chrono::{NaiveDate, NaiveTime};
use std::fmt;

use crate::error::Result;

/// A table that rows can be created in and upserted into
pub trait Record {
    /// Name of the backing table
    fn table_name() -> &'static str;

    /// Column definitions in field order
    fn columns() -> Vec<ColumnDef>;

    /// Composite unique keys besides the primary key
    fn unique_keys() -> Vec<Vec<&'static str>>;

    /// Row values in the same order as [`Record::columns`]
    fn values(&self) -> Vec<SqlValue>;
}

/// Checks performed before a record crosses into the database
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A single column of a record table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub primary_key: bool,
    pub nullable: bool,
    /// Foreign key target in `table(column)` form
    pub references: Option<&'static str>,
}

/// A value ready to be rendered into an SQL statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl SqlValue {
    /// Render as an SQL literal, quoting and escaping text
    pub fn to_sql_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(value) => value.to_string(),
            SqlValue::Real(value) => value.to_string(),
            SqlValue::Text(value) => quote_text(value),
            SqlValue::Date(value) => format!("'{}'", value.format("%Y-%m-%d")),
            SqlValue::Time(value) => format!("'{}'", value.format("%H:%M:%S")),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_literal())
    }
}

fn quote_text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        SqlValue::Text(value.clone())
    }
}

impl From<&i64> for SqlValue {
    fn from(value: &i64) -> Self {
        SqlValue::Integer(*value)
    }
}

impl From<&i32> for SqlValue {
    fn from(value: &i32) -> Self {
        SqlValue::Integer(i64::from(*value))
    }
}

impl From<&f64> for SqlValue {
    fn from(value: &f64) -> Self {
        SqlValue::Real(*value)
    }
}

impl From<&NaiveDate> for SqlValue {
    fn from(value: &NaiveDate) -> Self {
        SqlValue::Date(*value)
    }
}

impl From<&NaiveTime> for SqlValue {
    fn from(value: &NaiveTime) -> Self {
        SqlValue::Time(*value)
    }
}

impl From<&Option<String>> for SqlValue {
    fn from(value: &Option<String>) -> Self {
        value.as_ref().map_or(SqlValue::Null, SqlValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Airline;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_literals_are_escaped() {
        let value = SqlValue::from(&"O'Brien".to_string());
        assert_eq!(value.to_sql_literal(), "'O''Brien'");
    }

    #[test]
    fn test_optional_values() {
        let missing: Option<String> = None;
        assert_eq!(SqlValue::from(&missing), SqlValue::Null);
        assert_eq!(
            SqlValue::from(&Some("Europe".to_string())).to_sql_literal(),
            "'Europe'"
        );
    }

    #[test]
    fn test_derived_values_render_missing_columns_as_null() {
        let airline = Airline {
            iata: "EI".to_string(),
            name: "Aer Lingus".to_string(),
            country: None,
            region: Some("Europe".to_string()),
        };

        let literals: Vec<String> = airline.values().iter().map(SqlValue::to_sql_literal).collect();
        assert_eq!(literals, vec!["'EI'", "'Aer Lingus'", "NULL", "'Europe'"]);
    }

    #[test]
    fn test_temporal_literals() {
        let date = NaiveDate::from_ymd_opt(2023, 4, 9).unwrap();
        let time = NaiveTime::from_hms_opt(7, 5, 0).unwrap();
        assert_eq!(SqlValue::from(&date).to_sql_literal(), "'2023-04-09'");
        assert_eq!(SqlValue::from(&time).to_sql_literal(), "'07:05:00'");
    }
}
