//! Codec for the generated-properties file read back by the scheduler.
//!
//! The file is a JSON object with one `"key": "value"` member per line, in
//! generated order. An empty set is written as `{}`.
use std::{
    io::{BufWriter, Write},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{ModelError, ModelResult, Props};

/// Write `props` to `path`, replacing any existing file.
///
/// Content goes to a temporary file in the destination directory first and is
/// renamed into place, so readers see either the old file or the complete new one.
pub fn write_output(path: impl AsRef<Path>, props: &Props) -> ModelResult<()> {
    let path = path.as_ref();
    let write_err = |reason: String| ModelError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(e.to_string()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, props).map_err(|e| write_err(e.to_string()))?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| write_err(e.to_string()))?;
    }
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| write_err(e.error.to_string()))?;
    Ok(())
}

/// Read a generated-properties file back, preserving member order.
pub fn read_output(path: impl AsRef<Path>) -> ModelResult<Props> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| ModelError::InvalidOutput(e.to_string()))
}
