use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tokio::task::spawn_blocking;
use tracing::{debug, error, info};

use crate::loader::DatasetFormat;
use crate::loader::errors::LoadError;
use crate::models::{CsvTransactionRecord, Transaction};

/// Reads a transaction dataset from disk into an ordered list of records.
///
/// Loading is all-or-nothing: the first unreadable or malformed entry fails the whole
/// dataset, nothing is skipped.
pub struct DatasetLoader {
    path: PathBuf,
    format: DatasetFormat
}

impl DatasetLoader {
    /// Creates a loader for the file at `path`, picking the format from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DatasetFormat::from_path(&path);

        Self { path, format }
    }

    /// Loads every record, preserving the order of the file.
    ///
    /// # Errors
    /// Returns `LoadError` if the file is missing or unreadable, or if its content does
    /// not parse as a list of transactions in the expected format.
    pub async fn load(&self) -> Result<Vec<Transaction>, LoadError> {
        let path = self.path.clone();
        let format = self.format;

        debug!("Loading {format:?} dataset from [{}]", path.display());

        let transactions = spawn_blocking(move || read_dataset(&path, format))
            .await
            .map_err(|error| {
                error!("Dataset loading task failed: {error}");
                LoadError::interrupted(&self.path)
            })??;

        info!("Loaded {} transactions from [{}]", transactions.len(), self.path.display());

        Ok(transactions)
    }
}

fn read_dataset(path: &Path, format: DatasetFormat) -> Result<Vec<Transaction>, LoadError> {
    let file = File::open(path).map_err(|error| LoadError::io(path, error))?;
    let reader = BufReader::new(file);

    match format {
        DatasetFormat::Json => serde_json::from_reader(reader).map_err(|error| LoadError::json(path, error)),
        DatasetFormat::Csv => {
            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .from_reader(reader);

            reader.deserialize::<CsvTransactionRecord>()
                .map(|record| record.map(Transaction::from))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|error| LoadError::csv(path, error))
        }
    }
}
