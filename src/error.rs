use std::path::PathBuf;

use thiserror::Error;

use crate::processor::scope::ScopeFrame;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input ended inside a string, block comment or brace block.
    #[error("unterminated {construct} opened at line {line}, column {column}")]
    UnterminatedConstruct {
        construct: ScopeFrame,
        line: usize,
        column: usize,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bad module name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}
