//! Output artifacts: where they go and how they are written.
pub mod python;

use crate::model::{ConvertOptions, HOST_SUFFIX, SOURCE_SUFFIX};
use std::path::{Path, PathBuf};

/// `name.by` -> `name.py`; anything else just gets `.py` appended.
pub fn change_file_name(name: &str) -> String {
    match name.strip_suffix(SOURCE_SUFFIX) {
        Some(stem) => format!("{stem}{HOST_SUFFIX}"),
        None => format!("{name}{HOST_SUFFIX}"),
    }
}

/// Destination of `input`'s conversion. An explicit output keeps its own
/// directory; derived names go to `out_dir`, or next to the input.
pub fn output_path(input: &Path, explicit: Option<&Path>, options: &ConvertOptions) -> PathBuf {
    let (dir, name) = match explicit {
        Some(path) => (
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
            file_name(path),
        ),
        None => (
            options
                .out_dir
                .clone()
                .or_else(|| input.parent().map(Path::to_path_buf))
                .unwrap_or_default(),
            change_file_name(&file_name(input)),
        ),
    };
    dir.join(format!("{}{name}", options.prefix))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
