//! Alignment of encoded tables to the model's fixed column set

use super::encoder::FeatureTable;
use crate::error::{DelayError, Result};
use crate::models::{FeatureVector, FEATURE_COUNT};
use tracing::debug;

/// Indicator columns consumed by the classifier, in model order
pub const TOP_10_FEATURES: [&str; FEATURE_COUNT] = [
    "OPERA_Latin American Wings",
    "MES_7",
    "MES_10",
    "OPERA_Grupo LATAM",
    "MES_12",
    "TIPOVUELO_I",
    "MES_4",
    "MES_11",
    "OPERA_Sky Airline",
    "OPERA_Copa Air",
];

/// Rows whose columns are exactly [`TOP_10_FEATURES`], in that order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedFeatures {
    rows: Vec<FeatureVector>,
}

impl AlignedFeatures {
    pub fn from_rows(rows: Vec<FeatureVector>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &TOP_10_FEATURES
    }

    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows at the given positions, in the given order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            rows: indices.iter().map(|&i| self.rows[i]).collect(),
        }
    }

    /// Back to a named table, e.g. to re-run alignment
    pub fn to_table(&self) -> FeatureTable {
        let mut table = FeatureTable::with_rows(self.rows.len());
        for (col, name) in TOP_10_FEATURES.iter().enumerate() {
            let values: Vec<f32> = self.rows.iter().map(|row| row[col]).collect();
            table.push_column(*name, &values);
        }
        table
    }
}

/// Position of each model column in `table`, if present
fn column_sources(table: &FeatureTable) -> [Option<usize>; FEATURE_COUNT] {
    TOP_10_FEATURES.map(|name| table.column_index(name))
}

fn gather(table: &FeatureTable, sources: &[Option<usize>; FEATURE_COUNT]) -> AlignedFeatures {
    let rows = table
        .rows()
        .iter()
        .map(|row| sources.map(|src| src.map_or(0.0, |idx| row[idx])))
        .collect();
    AlignedFeatures { rows }
}

/// Training-time alignment: every model column must already be present.
pub fn reduce(table: &FeatureTable) -> Result<AlignedFeatures> {
    let sources = column_sources(table);
    if let Some(missing) = sources.iter().position(Option::is_none) {
        return Err(DelayError::MissingColumn(TOP_10_FEATURES[missing].to_string()));
    }
    debug!(
        dropped = table.columns().len() - FEATURE_COUNT,
        rows = table.row_count(),
        "Reduced features to model columns"
    );
    Ok(gather(table, &sources))
}

/// Serving-time alignment: absent model columns are synthesized as zeros.
pub fn adjust(table: &FeatureTable) -> AlignedFeatures {
    let sources = column_sources(table);
    let synthesized = sources.iter().filter(|s| s.is_none()).count();
    debug!(
        synthesized,
        rows = table.row_count(),
        "Adjusted features to model columns"
    );
    gather(table, &sources)
}
