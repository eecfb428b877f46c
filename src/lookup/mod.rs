// src/lookup/mod.rs
use crate::sheet::{Row, Table};

/// Column names that can identify the subject of a row, in priority
/// order. The first one present in a sheet's header wins. Headers are
/// lower-cased at load time, so membership checks are exact.
pub const IDENTITY_CANDIDATES: [&str; 5] = ["name", "employee", "user", "full name", "assigned to"];

/// Trim the raw slash-command text. Case is preserved here so the query
/// can be echoed back as typed; comparisons fold case separately.
pub fn normalize_query(raw: &str) -> &str {
    raw.trim()
}

/// Pick the column that identifies a row's subject, or `None` when the
/// sheet has no such column. Same column set, same answer.
pub fn resolve_identity_column(columns: &[String]) -> Option<&'static str> {
    IDENTITY_CANDIDATES
        .iter()
        .copied()
        .find(|candidate| columns.iter().any(|column| column == candidate))
}

/// All rows whose identity cell equals `query` after both sides are
/// trimmed and case-folded. Exact equality only, source order preserved.
pub fn find_matches<'t>(table: &'t Table, identity: &str, query: &str) -> Vec<&'t Row> {
    let wanted = query.trim().to_lowercase();
    table
        .rows
        .iter()
        .filter(|row| {
            row.get(identity)
                .map(|cell| cell.trim().to_lowercase() == wanted)
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], records: &[&[&str]]) -> Table {
        let headers: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        Table::from_rows(
            &headers,
            records
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect()),
        )
    }

    #[test]
    fn normalize_query_trims_only() {
        assert_eq!(normalize_query("  Sarah Connor \t"), "Sarah Connor");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn resolver_honors_priority_order() {
        let cols: Vec<String> = vec!["user".into(), "name".into()];
        assert_eq!(resolve_identity_column(&cols), Some("name"));

        let cols: Vec<String> = vec!["serial".into(), "employee".into()];
        assert_eq!(resolve_identity_column(&cols), Some("employee"));
    }

    #[test]
    fn resolver_fails_without_candidates() {
        let cols: Vec<String> = vec!["laptop".into(), "serial".into()];
        assert_eq!(resolve_identity_column(&cols), None);
    }

    #[test]
    fn matching_is_case_insensitive_and_exact() {
        let t = table(
            &["name", "laptop"],
            &[&["John", "XPS"], &["Johnny", "Mac"], &["JOHN", "Thinkpad"]],
        );
        let matches = find_matches(&t, "name", "john");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["laptop"], "XPS");
        assert_eq!(matches[1]["laptop"], "Thinkpad");
    }

    #[test]
    fn matching_trims_stored_values() {
        let t = table(&["name"], &[&["  Sarah Connor  "]]);
        assert_eq!(find_matches(&t, "name", "sarah connor").len(), 1);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let t = table(&["name"], &[&["Sarah Connor"]]);
        assert!(find_matches(&t, "name", "kyle reese").is_empty());
    }
}
