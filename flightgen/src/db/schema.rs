//! DDL and upsert SQL generation
//!
//! Builds `CREATE TABLE` statements from the table registry and renders
//! record rows into batched insert statements that skip rows already present.

use crate::config::LoadingConfig;
use crate::db::connection::{DatabaseConnection, Dialect};
use crate::db::executor::SqlExecutor;
use crate::error::Result;
use crate::models::registry::{parse_reference, TableInfo, TableRegistry};
use crate::models::{Record, Validate};

/// Generate SQL to create a table if it does not exist yet
pub fn create_table_sql(table: &TableInfo) -> Result<String> {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", table.name);
    let mut definitions = Vec::new();

    for column in &table.columns {
        let nullable = if column.nullable { "NULL" } else { "NOT NULL" };
        definitions.push(format!("  {} {} {}", column.name, column.sql_type, nullable));
    }

    let primary_key = table.primary_key();
    if !primary_key.is_empty() {
        definitions.push(format!("  PRIMARY KEY ({})", primary_key.join(", ")));
    }

    for key in &table.unique_keys {
        definitions.push(format!("  UNIQUE ({})", key.join(", ")));
    }

    for column in &table.columns {
        if let Some(target) = column.references {
            let (ref_table, ref_column) = parse_reference(target)?;
            definitions.push(format!(
                "  FOREIGN KEY ({}) REFERENCES {} ({})",
                column.name, ref_table, ref_column
            ));
        }
    }

    sql.push_str(&definitions.join(",\n"));
    sql.push_str("\n)");

    Ok(sql)
}

/// Create every registered table in order
pub async fn ensure_schema(connection: &DatabaseConnection, registry: &TableRegistry) -> Result<()> {
    for table in registry.tables() {
        let sql = create_table_sql(table)?;
        connection.execute(&sql).await?;
        tracing::info!(table = table.name, "Ensured table exists");
    }

    Ok(())
}

/// Render rows as insert statements of at most `batch_size` rows each
///
/// Rows colliding with an existing primary or unique key are skipped by the
/// database, which keeps reruns from duplicating data.
pub fn upsert_statements<R: Record>(rows: &[R], dialect: Dialect, batch_size: usize) -> Vec<String> {
    let columns: Vec<&str> = R::columns().iter().map(|column| column.name).collect();
    let column_list = columns.join(", ");

    rows.chunks(batch_size.max(1))
        .map(|batch| {
            let values: Vec<String> = batch
                .iter()
                .map(|row| {
                    let literals: Vec<String> =
                        row.values().iter().map(|value| value.to_sql_literal()).collect();
                    format!("({})", literals.join(", "))
                })
                .collect();

            match dialect {
                Dialect::MySql => format!(
                    "INSERT IGNORE INTO {} ({}) VALUES\n{}",
                    R::table_name(),
                    column_list,
                    values.join(",\n")
                ),
                Dialect::Postgres | Dialect::Sqlite => format!(
                    "INSERT INTO {} ({}) VALUES\n{}\nON CONFLICT DO NOTHING",
                    R::table_name(),
                    column_list,
                    values.join(",\n")
                ),
            }
        })
        .collect()
}

/// Validate rows and write them, returning how many were actually inserted
pub async fn upsert<R: Record + Validate>(
    connection: &DatabaseConnection,
    rows: &[R],
    config: &LoadingConfig,
) -> Result<u64> {
    for row in rows {
        row.validate()?;
    }

    let statements = upsert_statements(rows, connection.dialect(), config.batch_size);
    let executor = SqlExecutor::new(connection);

    let inserted = if config.single_transaction {
        executor.execute_in_transaction(&statements).await?
    } else {
        executor.execute_batch(&statements).await?
    };

    tracing::info!(
        table = R::table_name(),
        offered = rows.len(),
        inserted,
        batches = statements.len(),
        "Upserted rows"
    );

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Airline, BookedFlight};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn airline(iata: &str, name: &str) -> Airline {
        Airline {
            iata: iata.to_string(),
            name: name.to_string(),
            country: None,
            region: Some("Europe".to_string()),
        }
    }

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql(&TableInfo::of::<BookedFlight>()).unwrap();

        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS booked_flight (\n\
             \x20 id BIGINT NOT NULL,\n\
             \x20 passenger_id BIGINT NOT NULL,\n\
             \x20 flight_number VARCHAR(8) NOT NULL,\n\
             \x20 flight_date DATE NOT NULL,\n\
             \x20 PRIMARY KEY (id),\n\
             \x20 UNIQUE (passenger_id, flight_date),\n\
             \x20 FOREIGN KEY (passenger_id) REFERENCES passenger (passenger_id),\n\
             \x20 FOREIGN KEY (flight_number) REFERENCES flight_details (flight_number)\n\
             )"
        );
    }

    #[test]
    fn test_nullable_columns() {
        let sql = create_table_sql(&TableInfo::of::<Airline>()).unwrap();
        assert!(sql.contains("  country VARCHAR(100) NULL"));
        assert!(sql.contains("  name VARCHAR(100) NOT NULL"));
    }

    #[test]
    fn test_upsert_statements_are_batched() {
        let rows = vec![
            airline("AA", "American"),
            airline("BA", "British"),
            airline("EI", "Aer Lingus"),
        ];

        let statements = upsert_statements(&rows, Dialect::Postgres, 2);
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[1],
            "INSERT INTO airline (iata, name, country, region) VALUES\n\
             ('EI', 'Aer Lingus', NULL, 'Europe')\n\
             ON CONFLICT DO NOTHING"
        );
    }

    #[test]
    fn test_mysql_ignores_duplicates() {
        let rows = vec![BookedFlight {
            id: 1,
            passenger_id: 9,
            flight_number: "AA000001".to_string(),
            flight_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        }];

        let statements = upsert_statements(&rows, Dialect::MySql, 500);
        assert_eq!(
            statements,
            vec![
                "INSERT IGNORE INTO booked_flight (id, passenger_id, flight_number, flight_date) VALUES\n\
                 (1, 9, 'AA000001', '2023-01-02')"
                    .to_string()
            ]
        );
    }
}
