//! Writes aggregated records to a CSV file.
use anyhow::Result;
use log::{info, warn};
use scroller_core::record::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

/// A recorder writing one CSV row per flush.
///
/// The first record fixes the initial columns, sorted with `step` first. A key
/// that shows up in a later record is appended as a new column, and the rows
/// already in the file get an empty cell for it. Cells of keys missing from a
/// record are left empty.
pub struct CsvRecorder {
    path: PathBuf,
    writer: csv::Writer<File>,
    header: Vec<String>,
    storage: RecordStorage,
}

impl CsvRecorder {
    /// Creates the file, and its parent directory if needed. An existing file is truncated.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            writer: csv::Writer::from_path(path)?,
            header: vec![],
            storage: RecordStorage::new(),
        })
    }

    /// Opens the file for appending, keeping its rows and columns.
    ///
    /// Behaves like [`CsvRecorder::create`] if the file does not exist yet.
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Self::create(path);
        }
        let header: Vec<String> = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?
            .headers()?
            .iter()
            .map(String::from)
            .collect();
        let file = OpenOptions::new().append(true).open(path)?;
        info!("Appending records to {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file),
            header,
            storage: RecordStorage::new(),
        })
    }

    /// Returns the current columns.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Rewrites the file with `columns` appended to the header.
    fn widen(&mut self, columns: Vec<String>) -> Result<()> {
        self.writer.flush()?;
        let mut rows = vec![];
        for row in csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?
            .records()
        {
            rows.push(row?);
        }

        self.header.extend(columns);
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(&self.header)?;
        for row in rows.iter() {
            let mut cells: Vec<&str> = row.iter().collect();
            cells.resize(self.header.len(), "");
            writer.write_record(&cells)?;
        }
        writer.flush()?;
        self.writer = writer;
        Ok(())
    }

    fn try_write(&mut self, record: &Record) -> Result<()> {
        let mut new: Vec<String> = record
            .keys()
            .filter(|k| !self.header.contains(*k))
            .cloned()
            .collect();
        new.sort_by(|a, b| (a != "step", a).cmp(&(b != "step", b)));

        if self.header.is_empty() {
            self.writer.write_record(&new)?;
            self.header = new;
        } else if !new.is_empty() {
            self.widen(new)?;
        }

        let row: Vec<String> = self
            .header
            .iter()
            .map(|k| record.get(k).map(cell).unwrap_or_default())
            .collect();
        self.writer.write_record(&row)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn cell(value: &RecordValue) -> String {
    match value {
        RecordValue::Scalar(v) => v.to_string(),
        RecordValue::DateTime(t) => t.to_rfc3339(),
        RecordValue::Array1(v) => v
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        RecordValue::String(s) => s.clone(),
    }
}

impl Recorder for CsvRecorder {
    fn write(&mut self, record: Record) {
        if let Err(e) = self.try_write(&record) {
            warn!("Failed to write a CSV row: {}", e);
        }
    }
}

impl AggregateRecorder for CsvRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        if self.storage.is_empty() {
            return;
        }
        let mut record = self.storage.aggregate();
        record.insert("step", RecordValue::Scalar(step as f32));
        self.write(record);
    }
}
