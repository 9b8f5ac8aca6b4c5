//! CSV ledger of per-record outcomes
//!
//! Every mutation reads the whole file, edits it in memory and rewrites it.
//! The run owns the file exclusively, so no locking is done.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::LedgerError;

const HEADER: [&str; 4] = ["id", "status", "completed", "failed_to_select"];

/// Status of a record whose labels were all attempted
pub const STATUS_PROCESSED: &str = "processed";
/// Status of a record whose search matched no row
pub const STATUS_NOT_FOUND: &str = "0 items found";
/// Status written against [`ESCAPE_CLOSE_KEY`]
pub const STATUS_ESC_FAILED: &str = "esc failed";
/// Synthetic ledger key for dropdowns that stayed open
pub const ESCAPE_CLOSE_KEY: &str = "__escape_close__";

pub fn ambiguous_status(found: usize) -> String {
    format!("errored: items found: ({})", found)
}

pub fn errored_status(kind: &str) -> String {
    format!("errored: ({})", kind)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub completed: String,
    #[serde(default)]
    pub failed_to_select: String,
}

impl LedgerRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with only a header unless it already exists
    pub fn ensure(&self) -> Result<(), LedgerError> {
        if self.path.exists() {
            debug!(path = %self.path.display(), "reusing existing ledger");
            return Ok(());
        }
        info!(path = %self.path.display(), "creating ledger");
        self.write_all(&[])
    }

    pub fn records(&self) -> Result<Vec<LedgerRecord>, LedgerError> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|err| LedgerError::csv(&self.path, err))?;
        reader
            .deserialize()
            .collect::<Result<Vec<LedgerRecord>, _>>()
            .map_err(|err| LedgerError::csv(&self.path, err))
    }

    /// First row with `id`
    pub fn get(&self, id: &str) -> Result<Option<LedgerRecord>, LedgerError> {
        Ok(self.records()?.into_iter().find(|record| record.id == id))
    }

    /// Add a fresh row with empty outcome fields
    pub fn append(&self, id: &str) -> Result<(), LedgerError> {
        let mut records = self.records()?;
        records.push(LedgerRecord::new(id));
        self.write_all(&records)?;
        debug!(id, "ledger row appended");
        Ok(())
    }

    /// Overwrite the status of every row with `id`.
    ///
    /// Returns false, leaving the file untouched, when no row matches.
    pub fn set_status(&self, id: &str, status: &str) -> Result<bool, LedgerError> {
        info!(id, status, "set status");
        self.update(id, |record| record.status = status.to_string())
    }

    /// Write status, completed and failed labels together
    pub fn set_outcome(
        &self,
        id: &str,
        status: &str,
        completed: &str,
        failed_to_select: &str,
    ) -> Result<bool, LedgerError> {
        info!(id, status, completed, failed_to_select, "set outcome");
        self.update(id, |record| {
            record.status = status.to_string();
            record.completed = completed.to_string();
            record.failed_to_select = failed_to_select.to_string();
        })
    }

    /// Like [`set_status`](Self::set_status), appending the row if missing
    pub fn upsert_status(&self, key: &str, status: &str) -> Result<(), LedgerError> {
        let mut records = self.records()?;
        match records.iter_mut().find(|record| record.id == key) {
            Some(record) => record.status = status.to_string(),
            None => records.push(LedgerRecord {
                status: status.to_string(),
                ..LedgerRecord::new(key)
            }),
        }
        info!(id = key, status, "upsert status");
        self.write_all(&records)
    }

    fn update<F>(&self, id: &str, mut apply: F) -> Result<bool, LedgerError>
    where
        F: FnMut(&mut LedgerRecord),
    {
        let mut records = self.records()?;
        let mut matched = false;
        for record in records.iter_mut().filter(|record| record.id == id) {
            apply(record);
            matched = true;
        }
        if !matched {
            warn!(id, "no ledger row to update");
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }

    fn write_all(&self, records: &[LedgerRecord]) -> Result<(), LedgerError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|err| LedgerError::csv(&self.path, err))?;
        writer
            .write_record(HEADER)
            .map_err(|err| LedgerError::csv(&self.path, err))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|err| LedgerError::csv(&self.path, err))?;
        }
        writer.flush().map_err(|err| LedgerError::io(&self.path, err))
    }
}
