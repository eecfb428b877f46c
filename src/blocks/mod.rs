// src/blocks/mod.rs
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::lookup::IDENTITY_CANDIDATES;
use crate::sheet::Row;

/// Hard cap on `(label, value)` pairs per section; Slack rejects more.
pub const MAX_SECTION_FIELDS: usize = 10;

/// One renderable unit of the response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Header { text: String },
    Divider,
    Section { fields: Vec<(String, String)> },
    TextSection { text: String },
}

impl Block {
    /// The Block Kit wire shape. `Section` and `TextSection` both
    /// serialize under the `"section"` tag, which is why this is not a
    /// serde derive.
    fn to_value(&self) -> Value {
        match self {
            Block::Header { text } => json!({
                "type": "header",
                "text": { "type": "plain_text", "text": text, "emoji": true },
            }),
            Block::Divider => json!({ "type": "divider" }),
            Block::Section { fields } => json!({
                "type": "section",
                "fields": fields
                    .iter()
                    .map(|(label, value)| json!({
                        "type": "mrkdwn",
                        "text": format!("*{}:*\n{}", label, value),
                    }))
                    .collect::<Vec<_>>(),
            }),
            Block::TextSection { text } => json!({
                "type": "section",
                "text": { "type": "mrkdwn", "text": text },
            }),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Upper-case the first letter of each whitespace-separated word and
/// lower-case the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display label for a column: underscores become spaces, then title case.
pub fn field_label(column: &str) -> String {
    title_case(&column.replace('_', " "))
}

/// Render matched rows into display blocks: one header with the query
/// and match count, then per row a divider (between rows only) and a
/// capped field section, or a fallback text section when the row carries
/// nothing beyond its identity cells.
///
/// `columns` is the table's column order; it drives field order so the
/// output is stable across runs. Identity candidate columns and cells
/// that trim empty are skipped.
pub fn render(matches: &[&Row], columns: &[String], query: &str) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(matches.len() * 2 + 1);
    blocks.push(Block::Header {
        text: format!("{} ({} items)", title_case(query), matches.len()),
    });

    for (i, row) in matches.iter().enumerate() {
        if i > 0 {
            blocks.push(Block::Divider);
        }

        let mut fields: Vec<(String, String)> = Vec::new();
        for column in columns {
            if IDENTITY_CANDIDATES.contains(&column.as_str()) {
                continue;
            }
            let value = row.get(column).map(String::as_str).unwrap_or("").trim();
            if value.is_empty() {
                continue;
            }
            fields.push((field_label(column), value.to_string()));
        }

        if fields.is_empty() {
            blocks.push(Block::TextSection {
                text: "No additional details on file for this record.".to_string(),
            });
        } else {
            fields.truncate(MAX_SECTION_FIELDS);
            blocks.push(Block::Section { fields });
        }
    }

    blocks
}
