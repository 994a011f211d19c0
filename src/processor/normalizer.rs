//! Text-level pre-pass that puts source into the shape the engine expects.
//!
//! After normalization no line is indented, every `{` ends its line (joined
//! onto the header it belongs to) and blank-line runs are at most one line.
//!
//! The rules are plain pattern matches with no idea of strings or comments,
//! so a `{` inside a literal or a comment is moved like any other.

use std::sync::LazyLock;

use regex::Regex;

/// Code line split from a trailing `//` or `#` comment.
static TRAILING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)[ \t]*((?://|#).*)$").unwrap());

/// `{` and whatever trails it on the same line.
static BRACE_TAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[ \t]*\n?").unwrap());

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

pub fn normalize(src: &str) -> String {
    let code = src.replace("\r\n", "\n");
    let code = remove_indentation(&code);
    let code = prepare_braces(&code);
    remove_empty_lines(&code)
}

/// Strip leading spaces and tabs from every line.
pub fn remove_indentation(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for (i, line) in code.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_start_matches([' ', '\t']));
    }
    out
}

/// End the line after every `{`, then join each brace left on a line of its
/// own onto its header.
pub fn prepare_braces(code: &str) -> String {
    let broken = BRACE_TAIL.replace_all(code, "{\n");
    let mut lines: Vec<String> = Vec::new();
    for line in broken.split('\n') {
        if line == "{" {
            join_brace(&mut lines);
        } else {
            lines.push(line.to_string());
        }
    }
    lines.join("\n")
}

/// Attach a lone `{` to the nearest code line above it. Comment lines in
/// between and a trailing comment on the code line move below the brace;
/// blank lines in between are dropped.
fn join_brace(lines: &mut Vec<String>) {
    let header = lines
        .iter()
        .rposition(|line| !line.is_empty() && !is_comment_line(line))
        .filter(|&at| !lines[at].ends_with('{'));
    let Some(at) = header else {
        lines.push("{".to_string());
        return;
    };

    let between: Vec<String> = lines.drain(at + 1..).filter(|l| !l.is_empty()).collect();
    let header = lines.remove(at);
    let split = TRAILING_COMMENT
        .captures(&header)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()));

    match split {
        Some((code, comment)) => {
            lines.push(format!("{} {{", code.trim_end()));
            lines.push(comment);
        }
        None => lines.push(format!("{} {{", header.trim_end())),
    }
    lines.extend(between);
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with("//") || line.starts_with('#')
}

/// Collapse two or more consecutive blank lines into one.
pub fn remove_empty_lines(code: &str) -> String {
    BLANK_RUN.replace_all(code, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalization() {
        let test_cases = vec![
            ("if (x > 0) {\nprint(x)\n}", "if (x > 0) {\nprint(x)\n}"),
            ("if x {\n    y\n}", "if x {\ny\n}"),
            ("if x\n{\ny\n}", "if x {\ny\n}"),
            ("if x\n\n\t{\ny\n}", "if x {\ny\n}"),
            ("if x // why\n{\ny\n}", "if x {\n// why\ny\n}"),
            ("if x # why\n{\ny\n}", "if x {\n# why\ny\n}"),
            ("def f() { return 1 }", "def f() {\nreturn 1 }"),
            ("d = {}", "d = {\n}"),
            ("a\r\n  b\r\n", "a\nb\n"),
            ("a\n\n\n\nb", "a\n\nb"),
            ("a\n\nb", "a\n\nb"),
            (
                "if ready // go\n{ start() }\nstop()\n",
                "if ready {\n// go\nstart() }\nstop()\n",
            ),
            (
                "if ready\n# why\n{\nstart()\n}\n",
                "if ready {\n# why\nstart()\n}\n",
            ),
            (
                "if ready // a\n// b\n\n{\nstart()\n}\n",
                "if ready {\n// a\n// b\nstart()\n}\n",
            ),
            ("// only\n{\nx\n}", "// only\n{\nx\n}"),
        ];

        for (src, expected) in test_cases {
            assert_eq!(normalize(src), expected, "input: {src:?}");
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let sources = [
            "class A {\n  def f(self) {\n    if x\n    {\n      pass // c\n    }\n  }\n}\n",
            "d = { 'a': { 'b': 1 } }\n\n\n\nprint(d)",
            "if a { b } else if c { d }",
            "\n\n{\n}\n",
            "if ready\n# why\n{\nstart()\n}\n",
            "if ready // go\n{ start() }\nstop()\n",
            "a {\n{\n}\n}",
        ];

        for src in sources {
            let once = normalize(src);
            assert_eq!(normalize(&once), once, "input: {src:?}");
        }
    }

    #[test]
    fn braces_in_literals_are_moved_too() {
        // Scope-unaware by construction.
        assert_eq!(normalize("s = \"{x}\""), "s = \"{\nx}\"");
    }
}
