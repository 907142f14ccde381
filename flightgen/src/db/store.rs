//! Typed reads of stored records

use sqlx::{mysql::MySqlRow, postgres::PgRow, sqlite::SqliteRow, FromRow};

use crate::db::connection::DatabaseConnection;
use crate::error::Result;
use crate::models::{BookedFlight, BookedLuggage, FlightDetails, PassengerId, Record};

/// `SELECT` every column of a record table
pub fn select_sql<R: Record>(order_by: &str) -> String {
    let columns: Vec<&str> = R::columns().iter().map(|column| column.name).collect();
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        columns.join(", "),
        R::table_name(),
        order_by
    )
}

/// Load all rows of a record table in a stable order
pub async fn select_all<R>(connection: &DatabaseConnection, order_by: &str) -> Result<Vec<R>>
where
    R: Record
        + for<'r> FromRow<'r, PgRow>
        + for<'r> FromRow<'r, MySqlRow>
        + for<'r> FromRow<'r, SqliteRow>
        + Send
        + Unpin,
{
    let rows: Vec<R> = connection.fetch_all(&select_sql::<R>(order_by)).await?;
    tracing::debug!(table = R::table_name(), rows = rows.len(), "Loaded rows");
    Ok(rows)
}

pub async fn flights(connection: &DatabaseConnection) -> Result<Vec<FlightDetails>> {
    select_all(connection, "flight_date, flight_number").await
}

/// Passenger ids only; the assigner needs nothing else
pub async fn passenger_ids(connection: &DatabaseConnection) -> Result<Vec<PassengerId>> {
    let rows: Vec<(i64,)> = connection
        .fetch_all("SELECT passenger_id FROM passenger ORDER BY passenger_id")
        .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn booked_flights(connection: &DatabaseConnection) -> Result<Vec<BookedFlight>> {
    select_all(connection, "id").await
}

pub async fn booked_luggage(connection: &DatabaseConnection) -> Result<Vec<BookedLuggage>> {
    select_all(connection, "id").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_select_sql() {
        assert_eq!(
            select_sql::<FlightDetails>("flight_date"),
            "SELECT flight_number, departure_iata, arrival_iata, airline_iata, flight_date \
             FROM flight_details ORDER BY flight_date"
        );
    }
}
