//! File-level conversion: read, transform, write, and follow imports.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::error::{ConvertError, Result};
use crate::model::{BatchReport, Conversion, ConvertOptions, SOURCE_SUFFIX};
use crate::processor::{self, imports};
use crate::writer;

/// Convert a single file. `output` overrides the derived output name.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let src = read_source(input)?;
    write_converted(input, &src, output, options)
}

/// Convert `root` and, transitively, every imported module whose source file
/// can be found. Each file is converted at most once, so import cycles end.
pub fn convert_recursive(
    root: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> BatchReport {
    let mut report = BatchReport::default();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([(root.to_path_buf(), output.map(Path::to_path_buf))]);

    while let Some((path, output)) = queue.pop_front() {
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if !visited.insert(key) {
            debug!(path = %path.display(), "already converted");
            continue;
        }

        let src = match read_source(&path) {
            Ok(src) => src,
            Err(e) => {
                error!(path = %path.display(), "{e}");
                report.failed.push((path, e));
                continue;
            }
        };

        match write_converted(&path, &src, output.as_deref(), options) {
            Ok(conversion) => report.converted.push(conversion),
            Err(e) => {
                error!(path = %path.display(), "{e}");
                report.failed.push((path.clone(), e));
            }
        }

        for module in imports::scan(&src) {
            match resolve(&path, &module, &options.search_dirs) {
                Some(dep) => queue.push_back((dep, None)),
                None => {
                    if report.missing.insert(module.clone()) {
                        warn!(
                            %module,
                            importer = %path.display(),
                            "dependency file not found, skipped"
                        );
                    }
                }
            }
        }
    }

    report
}

/// Locate `module_file` (e.g. `pkg.util.by`) next to `importer`, then in
/// each search directory, as `pkg.util.by` or `pkg/util.by`.
pub fn resolve(importer: &Path, module_file: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let nested = module_file
        .strip_suffix(SOURCE_SUFFIX)
        .map(|stem| format!("{}{SOURCE_SUFFIX}", stem.replace('.', "/")));

    let importer_dir = importer.parent().map(Path::to_path_buf).unwrap_or_default();
    std::iter::once(&importer_dir)
        .chain(search_dirs)
        .flat_map(|dir| {
            std::iter::once(dir.join(module_file)).chain(nested.as_ref().map(|n| dir.join(n)))
        })
        .find(|candidate| candidate.is_file())
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))
}

#[instrument(skip_all, fields(input = %input.display()))]
fn write_converted(
    input: &Path,
    src: &str,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let code = processor::run(src, options)?;
    let output = writer::output_path(input, output, options);
    writer::python::emit(&code, options.add_true_line, &output)?;

    info!(output = %output.display(), "converted");
    Ok(Conversion {
        input: input.to_path_buf(),
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_flat_and_nested_module_files() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir_all(lib.join("pkg")).unwrap();
        fs::write(dir.path().join("util.by"), "").unwrap();
        fs::write(lib.join("pkg").join("models.by"), "").unwrap();

        let importer = dir.path().join("main.by");
        assert_eq!(
            resolve(&importer, "util.by", &[]),
            Some(dir.path().join("util.by"))
        );
        assert_eq!(resolve(&importer, "pkg.models.by", &[]), None);
        assert_eq!(
            resolve(&importer, "pkg.models.by", &[lib.clone()]),
            Some(lib.join("pkg/models.by"))
        );
        assert_eq!(resolve(&importer, "os.by", &[lib]), None);
    }
}
