//! Keyword and terminator fix-ups applied to engine output.

use std::sync::LazyLock;

use regex::Regex;

static ELSE_IF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\belse\s+if\b").unwrap());

static LINE_END_SEMICOLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r";(\r?\n)").unwrap());

pub fn apply(code: &str) -> String {
    let code = ELSE_IF.replace_all(code, "elif");
    LINE_END_SEMICOLON.replace_all(&code, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixups() {
        let test_cases = vec![
            ("else if x:\n", "elif x:\n"),
            ("else   \t if x:\n", "elif x:\n"),
            ("something_else if x", "something_else if x"),
            ("else iffy", "else iffy"),
            ("x = 1;\ny = 2;\n", "x = 1\ny = 2\n"),
            ("a; b\n", "a; b\n"),
            ("x = 1;", "x = 1;"),
        ];

        for (src, expected) in test_cases {
            assert_eq!(apply(src), expected, "input: {src:?}");
        }
    }
}
