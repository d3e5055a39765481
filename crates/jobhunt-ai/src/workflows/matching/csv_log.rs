use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::repository::{ApplicationLog, ApplicationLogError, ApplicationRecord};

/// Application log persisted as a CSV file with one header row.
#[derive(Debug)]
pub struct CsvApplicationLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvApplicationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<ApplicationRecord>, ApplicationLogError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<ApplicationRecord>() {
            records.push(row?);
        }
        Ok(records)
    }
}

impl ApplicationLog for CsvApplicationLog {
    fn append(&self, record: ApplicationRecord) -> Result<(), ApplicationLogError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ApplicationLogError::Unavailable("write lock poisoned".to_string()))?;

        let needs_header = fs::metadata(&self.path)
            .map(|metadata| metadata.len() == 0)
            .unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(&record)?;
        writer.flush()?;
        Ok(())
    }

    fn contains_url(&self, url: &str) -> Result<bool, ApplicationLogError> {
        Ok(self.read_all()?.iter().any(|record| record.url == url))
    }

    fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, ApplicationLogError> {
        Ok(self.read_all()?.into_iter().rev().take(limit).collect())
    }
}
