// src/sheet/mod.rs
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

pub mod load;
pub use load::load_csv;

/// A single record: normalized column name → cell text. Cells that are
/// absent in the source are the empty string, never a distinct null.
pub type Row = HashMap<String, String>;

/// An in-memory asset sheet, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names as normalized at load time, in source order.
    /// Rows key their cells by these exact names.
    pub columns: Vec<String>,
    /// Data rows in source order. A row has no identity beyond its position.
    pub rows: Vec<Row>,
}

/// Errors from producing a `Table` out of a configured source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("asset sheet not found at {path}")]
    NotFound { path: PathBuf },

    #[error("asset sheet {path} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("asset sheet has no identity column (expected one of: {})", crate::lookup::IDENTITY_CANDIDATES.join(", "))]
    NoIdentityColumn,
}

/// Trim whitespace and lower-case a raw header name. All column access
/// after load goes through names normalized this way.
pub fn normalize_column(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl Table {
    /// Build a table from a header row plus data rows. Headers are
    /// normalized; rows wider than the header are truncated and rows
    /// narrower are padded with empty cells, so every row carries the
    /// full column set.
    pub fn from_rows<I>(headers: &[String], records: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let columns: Vec<String> = headers.iter().map(|h| normalize_column(h)).collect();
        let rows = records
            .into_iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, name)| (name.clone(), record.get(i).cloned().unwrap_or_default()))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }
}

/// The sheet served when no `ASSET_SHEET` file is configured, mirroring
/// the records the service originally shipped with.
pub fn demo_table() -> Table {
    let headers: Vec<String> = ["name", "laptop", "serial", "monitor", "last_audit"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let records = vec![
        vec![
            "Sarah Connor".to_string(),
            "MacBook Pro 16 (M3 Max)".to_string(),
            "SC-992-X".to_string(),
            "Dell UltraSharp 27".to_string(),
            "2023-11-15".to_string(),
        ],
        vec![
            "John Smith".to_string(),
            "Dell XPS 15".to_string(),
            "JS-554-Y".to_string(),
            "None".to_string(),
            "2024-01-10".to_string(),
        ],
    ];
    Table::from_rows(&headers, records)
}
