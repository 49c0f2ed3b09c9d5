use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Local filesystem storage.
///
/// Writes go to a temporary file next to the target which is renamed over it
/// once every byte is flushed, so readers never see a truncated file.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn write_atomic(path: &str, data: &[u8]) -> Result<()> {
        let target = Path::new(path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let io_error = |source| EtlError::io(path, source);

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        tmp.write_all(data).map_err(io_error)?;
        tmp.as_file().sync_all().map_err(io_error)?;
        tmp.persist(target).map_err(|e| io_error(e.error))?;
        Ok(())
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        // 目標目錄必須已存在，不自動建立
        Self::write_atomic(path, data)
    }
}
