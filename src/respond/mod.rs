// src/respond/mod.rs
use serde::Serialize;
use tracing::{info, warn};

use crate::blocks::{render, Block};
use crate::lookup::{find_matches, normalize_query, resolve_identity_column};
use crate::sheet::{LoadError, Table};

/// Who sees the reply: only the requester, or the whole channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Ephemeral,
    InChannel,
}

/// The complete slash-command reply. Exactly one of `text` and `blocks`
/// is set: plain text for hints and errors, blocks for a successful
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlashResponse {
    pub response_type: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
}

impl SlashResponse {
    fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: Some(text.into()),
            blocks: None,
        }
    }

    fn in_channel(blocks: Vec<Block>) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            text: None,
            blocks: Some(blocks),
        }
    }
}

fn schema_error() -> SlashResponse {
    SlashResponse::ephemeral(
        "⚠️ The asset sheet has no column naming people (looked for: name, employee, user, \
         full name, assigned to).",
    )
}

/// Run one lookup request through its states, first applicable wins:
/// missing query, sheet unavailable, no identity column, no match,
/// matched. `load` is only invoked once the query is known to be
/// non-empty, so a blank request never touches the sheet.
pub fn assemble<F>(raw_query: &str, load: F) -> SlashResponse
where
    F: FnOnce() -> Result<Table, LoadError>,
{
    let query = normalize_query(raw_query);
    if query.is_empty() {
        return SlashResponse::ephemeral(
            "Usage: `/asset <person name>` — for example `/asset sarah connor`.",
        );
    }

    let table = match load() {
        Ok(table) => table,
        Err(LoadError::NoIdentityColumn) => return schema_error(),
        Err(err) => {
            warn!("asset sheet unavailable: {err}");
            return SlashResponse::ephemeral(
                "⚠️ The asset sheet is currently unavailable. Try again in a moment.",
            );
        }
    };

    let identity = match resolve_identity_column(&table.columns) {
        Some(column) => column,
        None => return schema_error(),
    };

    let matches = find_matches(&table, identity, query);
    if matches.is_empty() {
        return SlashResponse::ephemeral(format!(
            "❌ Could not find any assets assigned to '{query}'."
        ));
    }

    info!(query, matched = matches.len(), "lookup matched");
    SlashResponse::in_channel(render(&matches, &table.columns, query))
}
