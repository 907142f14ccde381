//! Table registry for flightgen
//!
//! Keeps the record tables in the order they have to be created so every
//! foreign key points at a table that already exists.

use crate::error::{Error, Result};
use crate::models::{
    Airline, Airport, BookedFlight, BookedLuggage, ColumnDef, FlightDetails, Passenger,
    PirReport, Record,
};

/// Registry of record tables in creation order
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: Vec<TableInfo>,
}

/// Information about a registered table
#[derive(Debug, Clone)]
pub struct TableInfo {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
    pub unique_keys: Vec<Vec<&'static str>>,
}

impl TableInfo {
    /// Describe the table behind a record type
    pub fn of<R: Record>() -> Self {
        Self {
            name: R::table_name(),
            columns: R::columns(),
            unique_keys: R::unique_keys(),
        }
    }

    /// Columns making up the primary key
    pub fn primary_key(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|column| column.primary_key)
            .map(|column| column.name)
            .collect()
    }
}

impl TableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Registry holding every airline-operations table
    pub fn airline_operations() -> Result<Self> {
        let mut registry = Self::new();
        registry.register::<Airline>()?;
        registry.register::<Airport>()?;
        registry.register::<FlightDetails>()?;
        registry.register::<Passenger>()?;
        registry.register::<BookedFlight>()?;
        registry.register::<BookedLuggage>()?;
        registry.register::<PirReport>()?;
        Ok(registry)
    }

    /// Register a record table after the tables it references
    pub fn register<R: Record>(&mut self) -> Result<()> {
        let info = TableInfo::of::<R>();

        if self.get(info.name).is_some() {
            return Err(Error::ValidationError(format!(
                "table {} registered twice",
                info.name
            )));
        }

        for column in &info.columns {
            if let Some(target) = column.references {
                let (table, referenced) = parse_reference(target)?;
                let known = self
                    .get(table)
                    .map_or(false, |t| t.columns.iter().any(|c| c.name == referenced));

                if !known {
                    return Err(Error::ValidationError(format!(
                        "{}.{} references {} which is not registered yet",
                        info.name, column.name, target
                    )));
                }
            }
        }

        tracing::debug!(table = info.name, columns = info.columns.len(), "Registered table");
        self.tables.push(info);
        Ok(())
    }

    /// Look up a table by name
    pub fn get(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Tables in creation order
    pub fn tables(&self) -> &[TableInfo] {
        &self.tables
    }
}

/// Split a `table(column)` reference
pub fn parse_reference(target: &str) -> Result<(&str, &str)> {
    target
        .strip_suffix(')')
        .and_then(|rest| rest.split_once('('))
        .map(|(table, column)| (table.trim(), column.trim()))
        .ok_or_else(|| Error::ValidationError(format!("malformed reference: {}", target)))
}
