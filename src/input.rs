use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::errors::LedgerError;

#[derive(Debug, Deserialize)]
struct InputRow {
    id: String,
}

/// Record ids from the `id` column, in file order; blank ids are skipped
pub fn read_ids(path: &Path) -> Result<Vec<String>, LedgerError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| LedgerError::csv(path, err))?;

    let mut ids = Vec::new();
    for row in reader.deserialize::<InputRow>() {
        let row = row.map_err(|err| LedgerError::csv(path, err))?;
        if !row.id.is_empty() {
            ids.push(row.id);
        }
    }
    info!(path = %path.display(), count = ids.len(), "input ids loaded");
    Ok(ids)
}
