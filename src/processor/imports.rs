//! `import` / `from … import` handling.
//!
//! Both passes are pattern matches over the whole text, so an `import`
//! inside a string or comment counts like a real one.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::Result;
use crate::model::SOURCE_SUFFIX;

static IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bimport\s([\w.]+)(?:;|\s|$)").unwrap());

static FROM_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfrom\s([\w.]+)\s+import\b").unwrap());

/// Module names referenced by `src`, each with the source suffix appended,
/// i.e. the file names those modules would have if written in this dialect.
pub fn scan(src: &str) -> BTreeSet<String> {
    IMPORT
        .captures_iter(src)
        .chain(FROM_IMPORT.captures_iter(src))
        .filter_map(|caps| caps.get(1))
        .map(|name| format!("{}{SOURCE_SUFFIX}", name.as_str()))
        .collect()
}

/// Point imports of the modules in `table` at their replacements.
///
/// `import X` becomes `import R as X` (an existing alias is kept instead),
/// `from X import …` becomes `from R import …`.
pub fn substitute(code: &str, table: &BTreeMap<String, String>) -> Result<String> {
    let mut code = code.to_string();
    for (module, replacement) in table {
        let name = regex::escape(module);

        let import = Regex::new(&format!(r"\b(import\s+){name}(\s+as\b|[^\w.]|$)"))?;
        code = import
            .replace_all(&code, |caps: &Captures| {
                let tail = &caps[2];
                if tail.ends_with("as") {
                    format!("{}{replacement}{tail}", &caps[1])
                } else {
                    format!("{}{replacement} as {module}{tail}", &caps[1])
                }
            })
            .into_owned();

        let from = Regex::new(&format!(r"\b(from\s+){name}(\s+import\b)"))?;
        code = from
            .replace_all(&code, |caps: &Captures| {
                format!("{}{replacement}{}", &caps[1], &caps[2])
            })
            .into_owned();
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan() {
        let src = "import os\nimport util;\nfrom pkg.models import Thing\nimport a.b\nx = 1";
        let found: Vec<String> = scan(src).into_iter().collect();
        assert_eq!(
            found,
            vec!["Thing.by", "a.b.by", "os.by", "pkg.models.by", "util.by"]
        );
    }

    #[test]
    fn scan_ignores_partial_words() {
        assert!(scan("reimport stuff\nimportant = 1").is_empty());
        // `,` is not accepted after the name
        assert!(scan("import os, sys").is_empty());
    }

    #[test]
    fn test_substitute() {
        let table = BTreeMap::from([("util".to_string(), "util_py".to_string())]);
        let test_cases = vec![
            ("import util\n", "import util_py as util\n"),
            ("import util", "import util_py as util"),
            ("import util as u\n", "import util_py as u\n"),
            ("from util import f\n", "from util_py import f\n"),
            ("import utils\n", "import utils\n"),
            ("import util.sub\n", "import util.sub\n"),
            ("from utility import f\n", "from utility import f\n"),
        ];

        for (src, expected) in test_cases {
            assert_eq!(substitute(src, &table).unwrap(), expected, "input: {src:?}");
        }
    }

    #[test]
    fn substitute_escapes_module_names() {
        let table = BTreeMap::from([("a.b".to_string(), "c".to_string())]);
        assert_eq!(substitute("import a.b\n", &table).unwrap(), "import c as a.b\n");
        assert_eq!(substitute("import axb\n", &table).unwrap(), "import axb\n");
    }
}
