//! CSV-backed price history.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracker_core::error::StoreError;
use tracker_core::traits::HistoryStore;
use tracker_core::types::{Observation, Price};
use tracing::{debug, info, warn};

/// Header row of the history file.
pub const HISTORY_HEADER: [&str; 2] = ["Timestamp", "Price"];

/// One data row as written to the history file.
#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Price")]
    price: String,
}

/// Header row and data rows of an existing history file.
struct HistoryRecords {
    headers: StringRecord,
    rows: Vec<csv::Result<StringRecord>>,
}

/// Price history kept in a two-column CSV file.
///
/// The file starts with [`HISTORY_HEADER`] and holds one row per observation
/// in insertion order.
pub struct CsvHistoryStore {
    path: PathBuf,
}

impl CsvHistoryStore {
    /// Create a store for `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store and make sure its file exists with a header.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);
        store.ensure_initialized()?;
        Ok(store)
    }

    /// Get the history file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with a header if it is missing or empty.
    ///
    /// # Returns
    /// Whether the file was (re)initialized
    fn ensure_initialized(&self) -> Result<bool, StoreError> {
        let is_empty = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };
        if !is_empty {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write(e.to_string()))?;
        }

        let mut writer = WriterBuilder::new()
            .from_path(&self.path)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        writer
            .write_record(HISTORY_HEADER)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        writer.flush().map_err(|e| StoreError::Write(e.to_string()))?;

        info!(
            "Created price history file with headers at: {}",
            self.path.display()
        );
        Ok(true)
    }

    /// Read the header and every data row, or `None` when the file does not exist.
    fn read_records(&self) -> Result<Option<HistoryRecords>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| StoreError::Unreadable(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| StoreError::Unreadable(e.to_string()))?
            .clone();
        let rows = reader.into_records().collect();

        Ok(Some(HistoryRecords { headers, rows }))
    }

    /// Convert one row into an observation.
    fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<Observation, StoreError> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let malformed = |reason: String| StoreError::Malformed { line, reason };

        let row: HistoryRow = record
            .deserialize(Some(headers))
            .map_err(|e| malformed(e.to_string()))?;

        let timestamp = Observation::parse_timestamp(&row.timestamp)
            .ok_or_else(|| malformed(format!("invalid timestamp: {:?}", row.timestamp)))?;
        let price = Price::parse(&row.price)
            .ok_or_else(|| malformed(format!("invalid price format: {:?}", row.price)))?;

        Ok(Observation::new(timestamp, price))
    }

    /// Make sure the next appended row starts on its own line.
    fn terminate_last_line(file: &mut fs::File) -> std::io::Result<()> {
        if file.metadata()?.len() == 0 {
            return Ok(());
        }
        file.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            file.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl HistoryStore for CsvHistoryStore {
    fn append(&self, price: Price) -> Result<Observation, StoreError> {
        self.ensure_initialized()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Self::terminate_last_line(&mut file).map_err(|e| StoreError::Write(e.to_string()))?;

        let observation = Observation::now(price);
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .write_record([observation.formatted_timestamp(), price.to_string()])
            .map_err(|e| StoreError::Write(e.to_string()))?;
        writer.flush().map_err(|e| StoreError::Write(e.to_string()))?;

        info!("Logged new price: ${}", price);
        Ok(observation)
    }

    fn latest(&self) -> Result<Option<Observation>, StoreError> {
        let Some(HistoryRecords { headers, rows }) = self.read_records()? else {
            debug!("Price history file not found");
            return Ok(None);
        };

        match rows.into_iter().last() {
            None => {
                debug!("Price history file does not contain price entries");
                Ok(None)
            }
            Some(Ok(record)) => Self::parse_record(&record, &headers).map(Some),
            Some(Err(e)) => Err(StoreError::Unreadable(e.to_string())),
        }
    }

    fn observations(&self) -> Result<Vec<Observation>, StoreError> {
        let Some(HistoryRecords { headers, rows }) = self.read_records()? else {
            return Ok(Vec::new());
        };

        let mut observations = Vec::with_capacity(rows.len());
        for result in rows {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable history row: {}", e);
                    continue;
                }
            };
            match Self::parse_record(&record, &headers) {
                Ok(obs) => observations.push(obs),
                Err(e) => warn!("Skipping history row: {}", e),
            }
        }

        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn price(value: rust_decimal::Decimal) -> Price {
        Price::new(value).unwrap()
    }

    fn store_in(dir: &TempDir) -> CsvHistoryStore {
        CsvHistoryStore::new(dir.path().join("price_history.csv"))
    }

    #[test]
    fn test_open_creates_header() {
        let dir = TempDir::new().unwrap();
        let store = CsvHistoryStore::open(dir.path().join("nested/price_history.csv")).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "Timestamp,Price\n");
        assert_eq!(store.latest().unwrap(), None);
        assert_eq!(store.last_price(), None);
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.latest().unwrap(), None);
        assert!(store.observations().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_then_latest() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first = store.append(price(dec!(999.00))).unwrap();
        let second = store.append(price(dec!(899.00))).unwrap();

        assert_eq!(store.latest().unwrap(), Some(second));
        assert_eq!(store.last_price(), Some(price(dec!(899.00))));
        assert_eq!(store.observations().unwrap(), vec![first, second]);

        let contents = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Timestamp,Price");
        assert!(lines[2].ends_with(",899.00"));
    }

    #[test]
    fn test_corrupted_last_row_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Timestamp,Price\n2024-10-25 10:00:00,999.00\n2024-10-25 11:00:00,N/A\n",
        )
        .unwrap();

        assert!(matches!(
            store.latest(),
            Err(StoreError::Malformed { line: 3, .. })
        ));
        assert_eq!(store.last_price(), None);
        assert_eq!(store.observations().unwrap().len(), 1);
    }

    #[test]
    fn test_short_last_row_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Timestamp,Price\n2024-10-25 10:00:00\n").unwrap();

        assert!(matches!(store.latest(), Err(StoreError::Malformed { .. })));
        assert_eq!(store.last_price(), None);
    }

    #[test]
    fn test_header_only_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Timestamp,Price\n").unwrap();

        assert_eq!(store.latest().unwrap(), None);
    }

    #[test]
    fn test_append_to_empty_file_writes_header() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();

        store.append(price(dec!(10))).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.starts_with("Timestamp,Price\n"));
        assert_eq!(store.last_price(), Some(price(dec!(10))));
    }

    #[test]
    fn test_append_after_unterminated_row() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Timestamp,Price\n2024-10-25 10:00:00,999.00").unwrap();

        store.append(price(dec!(899.00))).unwrap();

        let observations = store.observations().unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].price, price(dec!(999.00)));
        assert_eq!(observations[1].price, price(dec!(899.00)));
    }

    #[test]
    fn test_accepts_fractional_second_timestamps() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Timestamp,Price\n2024-10-25 10:00:00.123456,79990.0\n").unwrap();

        assert_eq!(store.last_price(), Some(price(dec!(79990))));
    }

    #[test]
    fn test_rows_read_by_header_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "Price,Timestamp\n899.00,2024-10-25 10:00:00\n").unwrap();

        let latest = store.latest().unwrap().unwrap();
        assert_eq!(latest.price, price(dec!(899.00)));
        assert_eq!(latest.formatted_timestamp(), "2024-10-25 10:00:00");
    }

    #[test]
    fn test_unknown_header_is_malformed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "When,Cost\n2024-10-25 10:00:00,899.00\n").unwrap();

        assert!(matches!(
            store.latest(),
            Err(StoreError::Malformed { line: 2, .. })
        ));
        assert_eq!(store.last_price(), None);
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as the history file.
        let store = CsvHistoryStore::new(dir.path());

        assert!(matches!(
            store.append(price(dec!(1))),
            Err(StoreError::Write(_))
        ));
    }
}
