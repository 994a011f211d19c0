//! Optional JSON config file, merged with command-line flags.
//!
//! Every field may be omitted:
//!
//! ```json
//! {
//!     "indent": 4,
//!     "truefalse": false,
//!     "prefix": "",
//!     "legacy_escapes": false,
//!     "search_dirs": ["lib"],
//!     "change_imports": { "util": "util_py" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{ConvertError, Result};
use crate::model::ConvertOptions;
use crate::processor::engine::RewriteOptions;
use crate::processor::scope::EscapePolicy;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub indent: Option<usize>,
    pub truefalse: bool,
    pub prefix: Option<String>,
    pub legacy_escapes: bool,
    pub search_dirs: Vec<PathBuf>,
    pub change_imports: BTreeMap<String, String>,
}

pub fn load(path: &Path) -> Result<Config> {
    let json = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    parse(&json).map_err(|source| ConvertError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn parse(json: &str) -> serde_json::Result<Config> {
    serde_json::from_str(json)
}

impl Config {
    /// Flags given on the command line win over the file.
    pub fn into_options(self, cli: &Cli) -> ConvertOptions {
        let indent = cli.indent.or(self.indent).unwrap_or(4);
        let escapes = if cli.legacy_escapes || self.legacy_escapes {
            EscapePolicy::Lookbehind
        } else {
            EscapePolicy::Paired
        };

        let mut search_dirs = cli.search_dirs.clone();
        search_dirs.extend(self.search_dirs);

        ConvertOptions {
            rewrite: RewriteOptions {
                indent_unit: " ".repeat(indent),
                escapes,
            },
            add_true_line: cli.truefalse || self.truefalse,
            prefix: cli.prefix.clone().or(self.prefix).unwrap_or_default(),
            out_dir: cli.out_dir.clone(),
            change_imports: self.change_imports,
            search_dirs,
        }
    }
}
