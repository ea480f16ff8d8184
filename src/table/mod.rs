//! @ai:module:intent In-memory record tables and their loading
//! @ai:module:layer domain
//! @ai:module:public_api RecordTable, TableSchema, TableLoader

pub mod loader;
pub mod schema;

pub use loader::TableLoader;
pub use schema::{TableSchema, INTENT, QUERY, RESPONSE, SENTIMENT};

use crate::error::{Error, Result};

/// @ai:intent Rows of string cells under an ordered header
/// @ai:invariant every row has exactly `columns.len()` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    /// @ai:intent Build a table from a header and rows
    /// @ai:pre each row has the header's length
    /// @ai:effects pure
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// @ai:intent Position of a column in the header
    /// @ai:effects pure
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| Error::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// @ai:intent Iterate over the cells of one column
    /// @ai:effects pure
    pub fn column(&self, column: &str) -> Result<impl Iterator<Item = &str> + '_> {
        let index = self.column_index(column)?;
        Ok(self.rows.iter().map(move |row| row[index].as_str()))
    }

    /// @ai:intent Iterate over (group, value) cell pairs of two columns
    /// @ai:effects pure
    pub fn column_pairs(
        &self,
        group_column: &str,
        value_column: &str,
    ) -> Result<impl Iterator<Item = (&str, &str)> + '_> {
        let group = self.column_index(group_column)?;
        let value = self.column_index(value_column)?;
        Ok(self
            .rows
            .iter()
            .map(move |row| (row[group].as_str(), row[value].as_str())))
    }
}
