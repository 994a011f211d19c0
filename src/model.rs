// file-name conventions of the two languages
pub const SOURCE_SUFFIX: &str = ".by";
pub const HOST_SUFFIX: &str = ".py";

/// Injected first line that makes C-style `true` / `false` usable.
pub const TRUE_FALSE_LINE: &str = "true=True; false=False;";

use crate::error::ConvertError;
use crate::processor::engine::RewriteOptions;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Everything one conversion run needs besides the input path.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub rewrite: RewriteOptions,
    /// Prepend `TRUE_FALSE_LINE` to every output.
    pub add_true_line: bool,
    /// Prepended to every derived output file name.
    pub prefix: String,
    /// Where derived outputs go; `None` means next to their input.
    pub out_dir: Option<PathBuf>,
    /// Imported module name -> module to import instead.
    pub change_imports: BTreeMap<String, String>,
    /// Looked at after the importing file's own directory.
    pub search_dirs: Vec<PathBuf>,
}

/// One input file written out as one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Outcome of a recursive conversion.
///
/// A failed or missing file never stops the rest of the batch, so all three
/// lists can be populated at once.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<Conversion>,
    /// Imported modules whose source file was not found (`name.by`).
    pub missing: BTreeSet<String>,
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
