// src/sheet/load.rs
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

use super::{LoadError, Table};
use crate::lookup::resolve_identity_column;

/// Read `path` into an owned `Table` in one pass.
///
/// Headers are normalized as they are read, ragged rows are tolerated
/// (short rows pad with empty cells, long rows drop the excess), and a
/// sheet whose header names no identity candidate is rejected here so
/// callers never hold an unsearchable table.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Table, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let unreadable = |source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(unreadable)?;
        records.push(record.iter().map(str::to_string).collect());
    }

    let table = Table::from_rows(&headers, records);
    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "loaded asset sheet {}",
        path.display()
    );

    if resolve_identity_column(&table.columns).is_none() {
        return Err(LoadError::NoIdentityColumn);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_sheet(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("creating temp sheet");
        tmp.write_all(content.as_bytes()).expect("writing sheet");
        tmp
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_csv("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn loads_and_normalizes_mixed_case_headers() -> anyhow::Result<()> {
        let tmp = write_sheet(" Name ,Laptop,SERIAL\nSarah Connor,MacBook Pro 16,SC-992-X\n");
        let table = load_csv(tmp.path())?;
        assert_eq!(table.columns, vec!["name", "laptop", "serial"]);
        assert_eq!(table.rows[0]["name"], "Sarah Connor");
        assert_eq!(table.rows[0]["serial"], "SC-992-X");
        Ok(())
    }

    #[test]
    fn short_rows_pad_with_empty_cells() -> anyhow::Result<()> {
        let tmp = write_sheet("name,laptop,monitor\nJohn Smith,Dell XPS\n");
        let table = load_csv(tmp.path())?;
        assert_eq!(table.rows[0]["monitor"], "");
        Ok(())
    }

    #[test]
    fn sheet_without_identity_column_is_rejected() {
        let tmp = write_sheet("laptop,serial\nMacBook,X-1\n");
        let err = load_csv(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoIdentityColumn));
    }
}
