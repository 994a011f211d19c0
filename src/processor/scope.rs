//! Scope frames tracked by the rewrite engine.

use std::fmt;

/// Where a frame was opened, in the normalized text (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };
}

/// What the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFrame {
    /// `{ … }` code block, rewritten to `:` plus indentation.
    Block { depth: usize },

    /// `# …` or `// …` up to the end of the line.
    LineComment,

    /// `/* … */`, copied verbatim.
    BlockComment,

    /// `'…'`
    SingleQuoteString,

    /// `"…"`
    DoubleQuoteString,

    /// Just consumed `=`; the next non-blank decides whether a dict follows.
    AssignmentPending,

    /// `= { … }` mapping value, braces kept.
    DictLiteral { depth: usize },
}

impl ScopeFrame {
    /// The implicit base frame. Never stored on the stack.
    pub const TOP_LEVEL: ScopeFrame = ScopeFrame::Block { depth: 0 };

    /// Indentation depth this frame contributes, if it opens a level.
    pub fn depth(&self) -> Option<usize> {
        match *self {
            ScopeFrame::Block { depth } | ScopeFrame::DictLiteral { depth } => Some(depth),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self,
            ScopeFrame::SingleQuoteString | ScopeFrame::DoubleQuoteString
        )
    }

    /// Frames that end at end-of-input without a closing delimiter.
    pub fn closes_at_eof(&self) -> bool {
        matches!(self, ScopeFrame::LineComment | ScopeFrame::AssignmentPending)
    }
}

impl fmt::Display for ScopeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeFrame::Block { .. } => "block",
            ScopeFrame::LineComment => "line comment",
            ScopeFrame::BlockComment => "block comment",
            ScopeFrame::SingleQuoteString => "single-quoted string",
            ScopeFrame::DoubleQuoteString => "double-quoted string",
            ScopeFrame::AssignmentPending => "assignment",
            ScopeFrame::DictLiteral { .. } => "dict literal",
        };
        f.write_str(name)
    }
}

/// A frame on the engine's stack together with where it opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFrame {
    pub frame: ScopeFrame,
    pub at: Position,
}

/// How a backslash inside a quoted string is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapePolicy {
    /// A backslash escapes exactly the next character, so `\\'` closes.
    #[default]
    Paired,
    /// A quote is escaped whenever the character before it is a backslash.
    Lookbehind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_blocks_and_dicts_carry_depth() {
        let test_cases = vec![
            (ScopeFrame::Block { depth: 2 }, Some(2)),
            (ScopeFrame::DictLiteral { depth: 1 }, Some(1)),
            (ScopeFrame::LineComment, None),
            (ScopeFrame::DoubleQuoteString, None),
            (ScopeFrame::AssignmentPending, None),
        ];

        for (frame, expected) in test_cases {
            assert_eq!(frame.depth(), expected, "{frame}");
        }
    }

    #[test]
    fn describes_frames_for_diagnostics() {
        assert_eq!(ScopeFrame::DoubleQuoteString.to_string(), "double-quoted string");
        assert_eq!(ScopeFrame::BlockComment.to_string(), "block comment");
    }
}
