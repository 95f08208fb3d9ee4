//! Historical flight data sources

use crate::error::{DelayError, Result};
use crate::models::TrainingRecord;
use std::path::{Path, PathBuf};
use tracing::info;

/// Location of the dataset below the configured root directory
pub const DATASET_RELATIVE_PATH: &str = "data/data.csv";

/// Anything that can produce the full training dataset
pub trait TrainingSource: Send + Sync {
    /// Load every training row
    fn load(&self) -> Result<Vec<TrainingRecord>>;

    /// Where the rows come from, for logs
    fn describe(&self) -> String;
}

/// Flat CSV file with at least the categorical and timestamp columns
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<root>/data/data.csv`
    pub fn from_root(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(DATASET_RELATIVE_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrainingSource for CsvSource {
    fn load(&self) -> Result<Vec<TrainingRecord>> {
        if !self.path.is_file() {
            return Err(DelayError::DataSourceMissing(self.path.clone()));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<TrainingRecord>, csv::Error>>()?;

        info!(path = %self.path.display(), rows = records.len(), "Loaded training data");
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory rows, used for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<TrainingRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<TrainingRecord>) -> Self {
        Self { records }
    }
}

impl TrainingSource for MemorySource {
    fn load(&self) -> Result<Vec<TrainingRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "Fecha-I,Vlo-I,Ori-I,Des-I,Emp-I,Fecha-O,Vlo-O,Ori-O,Des-O,Emp-O,DIA,MES,AÑO,DIANOM,TIPOVUELO,OPERA,SIGLAORI,SIGLADES";

    fn write_dataset(root: &Path, rows: &[&str]) {
        fs::create_dir_all(root.join("data")).unwrap();
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        fs::write(root.join(DATASET_RELATIVE_PATH), content).unwrap();
    }

    #[test]
    fn test_load_ignores_extra_columns() {
        let dir = TempDir::new().unwrap();
        write_dataset(
            dir.path(),
            &[
                "2017-01-01 23:30:00,226,SCEL,KMIA,AAL,2017-01-01 23:33:00,226,SCEL,KMIA,AAL,1,1,2017,Domingo,I,American Airlines,Santiago,Miami",
                "2017-01-02 06:30:00,11,SCEL,SCFA,SKU,2017-01-02 06:58:00,11,SCEL,SCFA,SKU,2,1,2017,Lunes,N,Sky Airline,Santiago,Antofagasta",
            ],
        );

        let records = CsvSource::from_root(dir.path()).load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            TrainingRecord::new(
                "Sky Airline",
                "N",
                1,
                "2017-01-02 06:30:00",
                "2017-01-02 06:58:00"
            )
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CsvSource::from_root(dir.path()).load().unwrap_err();
        assert!(matches!(err, DelayError::DataSourceMissing(p) if p.ends_with("data/data.csv")));
    }

    #[test]
    fn test_malformed_row() {
        let dir = TempDir::new().unwrap();
        write_dataset(
            dir.path(),
            &["2017-01-01 23:30:00,226,SCEL,KMIA,AAL,2017-01-01 23:33:00,226,SCEL,KMIA,AAL,1,enero,2017,Domingo,I,American Airlines,Santiago,Miami"],
        );
        let err = CsvSource::from_root(dir.path()).load().unwrap_err();
        assert!(matches!(err, DelayError::Dataset(_)));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new(vec![TrainingRecord::new(
            "Copa Air",
            "I",
            4,
            "2017-04-01 10:00:00",
            "2017-04-01 10:05:00",
        )]);
        assert_eq!(source.load().unwrap().len(), 1);
        assert_eq!(source.describe(), "memory (1 rows)");
    }
}
