//! Batch File Output

use crate::GeneratorError;
use reading_model::ReadingBatch;
use std::fs;
use std::path::Path;
use tracing::info;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> GeneratorError + '_ {
    move |source| GeneratorError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write a batch as pretty JSON, creating parent directories as needed
pub fn write_batch(path: &Path, batch: &ReadingBatch) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }

    let json = serde_json::to_string_pretty(batch)?;
    fs::write(path, json).map_err(io_err(path))?;

    info!("Wrote {} readings to {}", batch.len(), path.display());
    Ok(())
}

/// Read a batch previously written by [`write_batch`]
pub fn read_batch(path: &Path) -> Result<ReadingBatch, GeneratorError> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    Ok(serde_json::from_str(&text)?)
}
