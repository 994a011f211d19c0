//! Scope-tracking rewrite engine.
//!
//! Consumes *normalized* source (see `normalizer`) one character at a time
//! and writes host-language text as it goes. What a character means depends
//! only on the frame on top of the scope stack:
//!
//! ```text
//! Block        `{` -> `:` + indent, `}` -> dedent, `//` -> `#`
//! DictLiteral  braces kept verbatim, lines indented
//! comments     copied, `//` already translated on entry
//! strings      copied, closing quote honours backslash escapes
//! `=` pending  a `{` after `=` opens a dict instead of a block
//! ```
//!
//! The top-level block is implicit, so a well-formed scan ends with an
//! empty stack.

use std::iter::Peekable;
use std::str::Chars;

use tracing::{trace, warn};

use super::scope::{EscapePolicy, OpenFrame, Position, ScopeFrame};
use crate::error::{ConvertError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Written once per open block / dict level at the start of each line.
    pub indent_unit: String,
    pub escapes: EscapePolicy,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            indent_unit: "    ".into(),
            escapes: EscapePolicy::default(),
        }
    }
}

/// Rewrite normalized brace-delimited source into indentation-delimited text.
pub fn rewrite(normalized: &str, options: &RewriteOptions) -> Result<String> {
    Rewriter::new(normalized, options).run()
}

pub struct Rewriter<'a> {
    chars: Peekable<Chars<'a>>,
    /// Character handed back by `AssignmentPending` for the parent frame.
    held: Option<char>,
    stack: Vec<OpenFrame>,
    out: String,
    indent_unit: &'a str,
    escapes: EscapePolicy,
    at_line_start: bool,
    escape_next: bool,
    /// Position of the character being processed.
    current: Position,
    next_pos: Position,
    /// Character preceding the one being processed.
    before: Option<char>,
    last: Option<char>,
}

impl<'a> Rewriter<'a> {
    pub fn new(src: &'a str, options: &'a RewriteOptions) -> Self {
        Self {
            chars: src.chars().peekable(),
            held: None,
            stack: Vec::new(),
            out: String::with_capacity(src.len() + src.len() / 4),
            indent_unit: &options.indent_unit,
            escapes: options.escapes,
            at_line_start: true,
            escape_next: false,
            current: Position::START,
            next_pos: Position::START,
            before: None,
            last: None,
        }
    }

    pub fn run(mut self) -> Result<String> {
        while let Some(ch) = self.next_char() {
            match self.top() {
                ScopeFrame::Block { depth } => self.in_block(ch, depth),
                ScopeFrame::DictLiteral { depth } => self.in_dict(ch, depth),
                ScopeFrame::LineComment => self.in_line_comment(ch),
                ScopeFrame::BlockComment => self.in_block_comment(ch),
                ScopeFrame::SingleQuoteString => self.in_string(ch, '\''),
                ScopeFrame::DoubleQuoteString => self.in_string(ch, '"'),
                ScopeFrame::AssignmentPending => self.in_assignment(ch),
            }
        }
        self.finish()
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(c) = self.held.take() {
            return Some(c);
        }
        let c = self.chars.next()?;
        self.current = self.next_pos;
        if c == '\n' {
            self.next_pos = Position {
                line: self.next_pos.line + 1,
                column: 1,
            };
        } else {
            self.next_pos.column += 1;
        }
        self.before = self.last;
        self.last = Some(c);
        Some(c)
    }

    /// Lookahead past the end of input is simply "no match".
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn top(&self) -> ScopeFrame {
        self.stack
            .last()
            .map_or(ScopeFrame::TOP_LEVEL, |open| open.frame)
    }

    /// Number of open block / dict frames.
    pub fn indentation_level(&self) -> usize {
        self.stack
            .iter()
            .filter(|open| open.frame.depth().is_some())
            .count()
    }

    fn push(&mut self, frame: ScopeFrame) {
        if frame.is_string() {
            self.escape_next = false;
        }
        trace!(%frame, line = self.current.line, column = self.current.column, "push");
        self.stack.push(OpenFrame {
            frame,
            at: self.current,
        });
        debug_assert!(
            frame
                .depth()
                .is_none_or(|depth| depth == self.indentation_level())
        );
    }

    fn pop(&mut self) {
        if let Some(open) = self.stack.pop() {
            trace!(
                frame = %open.frame,
                line = self.current.line,
                column = self.current.column,
                "pop"
            );
        }
    }

    fn emit(&mut self, ch: char) {
        if ch == '\n' {
            self.out.push('\n');
            self.at_line_start = true;
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indentation_level() {
                self.out.push_str(self.indent_unit);
            }
            self.at_line_start = false;
        }
        self.out.push(ch);
    }

    fn emit_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.emit(ch);
        }
    }

    /// Comment and string openers shared by blocks and dict literals.
    fn open_nested(&mut self, ch: char) -> bool {
        match ch {
            '#' => {
                self.emit('#');
                self.push(ScopeFrame::LineComment);
            }
            '/' if self.peek_char() == Some('/') => {
                self.emit('#');
                self.push(ScopeFrame::LineComment);
                self.next_char();
            }
            '/' if self.peek_char() == Some('*') => {
                self.emit_str("/*");
                self.push(ScopeFrame::BlockComment);
                self.next_char();
            }
            '\'' => {
                self.emit('\'');
                self.push(ScopeFrame::SingleQuoteString);
            }
            '"' => {
                self.emit('"');
                self.push(ScopeFrame::DoubleQuoteString);
            }
            _ => return false,
        }
        true
    }

    fn in_block(&mut self, ch: char, depth: usize) {
        match ch {
            '{' => {
                self.trim_line_end();
                self.emit(':');
                self.push(ScopeFrame::Block { depth: depth + 1 });
            }
            '}' if depth > 0 => {
                self.trim_line_end();
                self.pop();
                self.close_line_after_brace();
            }
            '}' => {
                warn!(
                    line = self.current.line,
                    column = self.current.column,
                    "unmatched `}}` at top level, copied verbatim"
                );
                self.emit('}');
            }
            '=' => {
                self.emit('=');
                self.push(ScopeFrame::AssignmentPending);
            }
            c if self.open_nested(c) => {}
            ' ' | '\t' if self.at_line_start => {}
            c => self.emit(c),
        }
    }

    /// Drop horizontal whitespace already written on the current line.
    fn trim_line_end(&mut self) {
        if !self.at_line_start {
            let kept = self.out.trim_end_matches([' ', '\t']).len();
            self.out.truncate(kept);
        }
    }

    /// Code following a closing `}` on the same line moves to its own line,
    /// so `b } else {` dedents `else` instead of appending it to `b`.
    fn close_line_after_brace(&mut self) {
        while matches!(self.peek_char(), Some(' ' | '\t')) {
            self.next_char();
        }
        if !self.at_line_start && self.peek_char().is_some_and(|c| c != '\n') {
            self.emit('\n');
        }
    }

    fn in_dict(&mut self, ch: char, depth: usize) {
        match ch {
            '{' => {
                self.emit('{');
                self.push(ScopeFrame::DictLiteral { depth: depth + 1 });
            }
            '}' => {
                self.pop();
                self.emit('}');
            }
            c if self.open_nested(c) => {}
            c => self.emit(c),
        }
    }

    fn in_line_comment(&mut self, ch: char) {
        self.emit(ch);
        if ch == '\n' {
            self.pop();
        }
    }

    fn in_block_comment(&mut self, ch: char) {
        if ch == '*' && self.peek_char() == Some('/') {
            self.next_char();
            self.emit_str("*/");
            self.pop();
        } else {
            self.emit(ch);
        }
    }

    fn in_string(&mut self, ch: char, quote: char) {
        let closes = ch == quote
            && match self.escapes {
                EscapePolicy::Paired => !self.escape_next,
                EscapePolicy::Lookbehind => self.before != Some('\\'),
            };
        self.escape_next =
            self.escapes == EscapePolicy::Paired && ch == '\\' && !self.escape_next;
        self.emit(ch);
        if closes {
            self.pop();
        }
    }

    fn in_assignment(&mut self, ch: char) {
        match ch {
            '{' => {
                self.emit('{');
                self.pop();
                let depth = self.indentation_level() + 1;
                self.push(ScopeFrame::DictLiteral { depth });
            }
            c if c.is_whitespace() => self.emit(c),
            c => {
                // Not a dict: the parent frame gets to see `c` itself.
                self.pop();
                self.held = Some(c);
            }
        }
    }

    fn finish(mut self) -> Result<String> {
        while self.stack.last().is_some_and(|open| open.frame.closes_at_eof()) {
            self.pop();
        }
        match self.stack.last() {
            None => Ok(self.out),
            Some(open) => Err(ConvertError::UnterminatedConstruct {
                construct: open.frame,
                line: open.at.line,
                column: open.at.column,
            }),
        }
    }
}
