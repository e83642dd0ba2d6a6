//! Identity list reader

use std::path::Path;

use crate::error::AppError;

/// Read the identities listed in the first column of a CSV file.
///
/// Cells are trimmed and blank lines are skipped. Rows may have any number of
/// columns; only the first is used. With `skip_header` the first row is
/// treated as a header and dropped.
pub fn read_identities(path: impl AsRef<Path>, skip_header: bool) -> Result<Vec<String>, AppError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(skip_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::Input(format!("{}: {}", path.display(), e)))?;

    let mut identities = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| AppError::Input(format!("{}: {}", path.display(), e)))?;
        match row.get(0) {
            Some(identity) if !identity.is_empty() => identities.push(identity.to_string()),
            _ => {}
        }
    }

    tracing::debug!(path = %path.display(), count = identities.len(), "Read identities");
    Ok(identities)
}
