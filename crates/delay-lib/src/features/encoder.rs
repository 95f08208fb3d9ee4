//! One-hot encoding of categorical flight attributes
//!
//! Columns are materialized from the values observed in the input batch.
//! Restricting them to the model's column set is the aligner's job.

use crate::models::FlightAttributes;
use std::collections::BTreeSet;
use std::fmt::Display;

/// Column prefix for the operating airline block
pub const AIRLINE_PREFIX: &str = "OPERA";

/// Column prefix for the flight-type block
pub const FLIGHT_TYPE_PREFIX: &str = "TIPOVUELO";

/// Column prefix for the month block
pub const MONTH_PREFIX: &str = "MES";

/// Name of the indicator column for one attribute value
pub fn indicator_name(prefix: &str, value: impl Display) -> String {
    format!("{}_{}", prefix, value)
}

/// Named numeric columns over a batch of rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<f32>>,
}

impl FeatureTable {
    /// Build a table with `row_count` rows and no columns
    pub fn with_rows(row_count: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows: vec![Vec::new(); row_count],
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of a named column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<f32>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Append a column. `values` must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: &[f32]) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(*value);
        }
    }
}

fn push_block<V, F>(table: &mut FeatureTable, prefix: &str, observed: &BTreeSet<V>, value_of: F)
where
    V: Ord + Display,
    F: Fn(usize) -> V,
{
    for category in observed {
        let values: Vec<f32> = (0..table.row_count())
            .map(|row| if value_of(row) == *category { 1.0 } else { 0.0 })
            .collect();
        table.push_column(indicator_name(prefix, category), &values);
    }
}

/// One-hot encode airline, flight type and month, in that block order.
///
/// Within each block columns follow ascending category value.
pub fn encode<R: FlightAttributes>(records: &[R]) -> FeatureTable {
    let mut table = FeatureTable::with_rows(records.len());

    let airlines: BTreeSet<&str> = records.iter().map(|r| r.airline()).collect();
    push_block(&mut table, AIRLINE_PREFIX, &airlines, |i| records[i].airline());

    let flight_types: BTreeSet<&str> = records.iter().map(|r| r.flight_type()).collect();
    push_block(&mut table, FLIGHT_TYPE_PREFIX, &flight_types, |i| {
        records[i].flight_type()
    });

    let months: BTreeSet<i64> = records.iter().map(|r| r.month()).collect();
    push_block(&mut table, MONTH_PREFIX, &months, |i| records[i].month());

    table
}
