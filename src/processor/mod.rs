//! The pure text transforms: normalize, rewrite, fix up.
pub mod engine;
pub mod imports;
pub mod normalizer;
pub mod postprocess;
pub mod scope;

use crate::error::Result;
use crate::model::ConvertOptions;
use tracing::debug;

/// Convert one translation unit. No I/O.
pub fn run(src: &str, options: &ConvertOptions) -> Result<String> {
    let normalized = normalizer::normalize(src);
    debug!(bytes = normalized.len(), "normalized");

    let rewritten = engine::rewrite(&normalized, &options.rewrite)?;
    let code = postprocess::apply(&rewritten);

    if options.change_imports.is_empty() {
        return Ok(code);
    }
    debug!(modules = options.change_imports.len(), "substituting imports");
    imports::substitute(&code, &options.change_imports)
}
