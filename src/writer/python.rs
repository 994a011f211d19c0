//! Write converted host-language source.
//!
//! Output goes to a temporary file beside the destination and is renamed
//! into place only once everything is written, so a failure never leaves a
//! half-written `.py` behind.

use crate::error::{ConvertError, Result};
use crate::model::TRUE_FALSE_LINE;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn emit(code: &str, add_true_line: bool, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let io_err = |e| ConvertError::io(path, e);

    let mut out = NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(dir, e))?;

    if add_true_line {
        writeln!(out, "{TRUE_FALSE_LINE}").map_err(io_err)?;
    }
    out.write_all(code.as_bytes()).map_err(io_err)?;
    out.flush().map_err(io_err)?;

    out.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_with_and_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.py");

        emit("x = true\n", true, &path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "true=True; false=False;\nx = true\n"
        );

        emit("x = 1\n", false, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\n");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.py");

        let err = emit("x = 1\n", false, &path).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
        assert!(!path.exists());
    }
}
