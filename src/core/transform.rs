use crate::domain::model::{value_kind, Table};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

pub const BODY_COLUMN: &str = "body";
pub const CONTENT_COLUMN: &str = "content";
pub const WORD_COUNT_COLUMN: &str = "word_count";
pub const ID_COLUMN: &str = "id";

type Step = fn(Table) -> Result<Table>;

const STEPS: [(&str, Step); 3] = [
    ("rename_body", rename_body),
    ("add_word_count", add_word_count),
    ("drop_id", drop_id),
];

/// Applies the fixed transformation steps in order.
///
/// The table is consumed; on error nothing of it is returned.
pub fn transform(table: Table) -> Result<Table> {
    STEPS.iter().try_fold(table, |table, (name, step)| {
        tracing::debug!("Applying transform step: {}", name);
        step(table)
    })
}

/// `body` → `content`, overwriting an existing `content` column.
pub fn rename_body(mut table: Table) -> Result<Table> {
    if table.rename_column(BODY_COLUMN, CONTENT_COLUMN) {
        tracing::debug!("Renamed column '{}' to '{}'", BODY_COLUMN, CONTENT_COLUMN);
    }
    Ok(table)
}

/// Derives `word_count` from `content` when that column exists.
pub fn add_word_count(mut table: Table) -> Result<Table> {
    let Some(content) = table.column(CONTENT_COLUMN) else {
        return Ok(table);
    };

    let counts = content
        .enumerate()
        .map(|(row, value)| match value {
            Value::String(text) => Ok(Value::from(word_count(text))),
            other => Err(EtlError::transform(format!(
                "row {}: column '{}' is {}, expected a string",
                row,
                CONTENT_COLUMN,
                value_kind(other)
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    table.set_column(WORD_COUNT_COLUMN, counts);
    Ok(table)
}

pub fn drop_id(mut table: Table) -> Result<Table> {
    if table.drop_column(ID_COLUMN) {
        tracing::debug!("Dropped column '{}'", ID_COLUMN);
    }
    Ok(table)
}

/// Number of tokens separated by runs of whitespace.
///
/// Besides Unicode `White_Space`, the information separators U+001C..U+001F
/// also split tokens; `char::is_whitespace` alone does not treat them as
/// separators.
pub fn word_count(text: &str) -> u64 {
    text.split(is_separator)
        .filter(|token| !token.is_empty())
        .count() as u64
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
