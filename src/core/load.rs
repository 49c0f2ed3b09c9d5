use crate::domain::model::Table;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::borrow::Cow;

/// Encodes the table as CSV and hands the bytes to `storage`.
pub async fn load<S: Storage>(storage: &S, table: &Table, path: &str) -> Result<()> {
    let data = encode_csv(table)?;
    tracing::debug!(
        "Writing {} rows ({} bytes) to {}",
        table.num_rows(),
        data.len(),
        path
    );
    storage.write_file(path, &data).await
}

/// Header row plus one line per row, comma-delimited, `\n`-terminated.
/// Quoting is applied only where a field needs it.
pub fn encode_csv(table: &Table) -> Result<Vec<u8>> {
    // 沒有欄位時輸出空檔案
    if table.columns().is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|value| field(value).into_owned()))?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::io("<csv buffer>", e.into_error()))
}

/// Text form of a single cell.
pub fn field(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed(""),
        Value::String(s) => Cow::Borrowed(s),
        Value::Bool(true) => Cow::Borrowed("True"),
        Value::Bool(false) => Cow::Borrowed("False"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        nested => Cow::Owned(nested.to_string()),
    }
}
