//! Line-level predicates for the conformance scanner: fence boundaries, list items,
//! table rows and blank lines. Every function here looks at a single line of text
//! (without its terminator) and never fails.

use regex::Regex;
use std::sync::LazyLock;

/// Indentation, then a run of 3+ backticks or tildes, then whatever follows.
/// Captures: (indent)(run)(rest)
static FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)(`{3,}|~{3,})(.*)$").unwrap());

/// Captures: (indent)(marker)
static BULLET_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)([-*+])\s").unwrap());

static ORDERED_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());

/// A stray pipe on its own line is not a table row
static LONE_PIPE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\|\s*$").unwrap());

/// A pipe not preceded by a backslash
static UNESCAPED_PIPE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(^|[^\\])\|").unwrap());

/// A language identifier at the start of an info string
static LANGUAGE_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_+-]+").unwrap());

/// The two characters that can delimit a fenced code block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FenceDelimiter {
    Backtick,
    Tilde,
}

impl FenceDelimiter {
    pub fn as_char(self) -> char {
        match self {
            FenceDelimiter::Backtick => '`',
            FenceDelimiter::Tilde => '~',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '`' => Some(FenceDelimiter::Backtick),
            '~' => Some(FenceDelimiter::Tilde),
            _ => None,
        }
    }
}

/// A parsed fence boundary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceMarker<'a> {
    /// Leading whitespace, verbatim
    pub indent: &'a str,
    pub delimiter: FenceDelimiter,
    /// Number of delimiter characters (always >= 3)
    pub run_len: usize,
    /// Everything after the run, trimmed
    pub info: &'a str,
}

impl<'a> FenceMarker<'a> {
    /// The identifier the info string starts with, if any.
    ///
    /// `{.python}` or `=` carry no language.
    pub fn language(&self) -> Option<&'a str> {
        LANGUAGE_TOKEN_REGEX.find(self.info).map(|m| m.as_str())
    }

    pub fn has_language(&self) -> bool {
        self.language().is_some()
    }

    /// The delimiter run as it appeared on the line
    pub fn run(&self) -> String {
        std::iter::repeat_n(self.delimiter.as_char(), self.run_len).collect()
    }
}

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    FenceBoundary,
    Blank,
    ListItem,
    TableRow,
    Plain,
}

/// Parse a fence boundary line.
///
/// A backtick run followed by an info string that itself contains a backtick is
/// inline code (```` ```foo``` ````), not a fence.
pub fn parse_fence(line: &str) -> Option<FenceMarker<'_>> {
    let caps = FENCE_REGEX.captures(line)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let run = caps.get(2)?.as_str();
    let rest = caps.get(3).map_or("", |m| m.as_str());

    let delimiter = FenceDelimiter::from_char(run.chars().next()?)?;
    if delimiter == FenceDelimiter::Backtick && rest.contains('`') {
        return None;
    }

    Some(FenceMarker {
        indent,
        delimiter,
        run_len: run.len(),
        info: rest.trim(),
    })
}

pub fn is_fence_boundary(line: &str) -> bool {
    parse_fence(line).is_some()
}

/// Bullet (`-`, `*`, `+`) or ordered (`1.`) list item, optionally indented
pub fn is_list_line(line: &str) -> bool {
    BULLET_REGEX.is_match(line) || ORDERED_REGEX.is_match(line)
}

/// The bullet character of an unordered list item
pub fn bullet_marker(line: &str) -> Option<char> {
    BULLET_REGEX
        .captures(line)
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().chars().next())
}

/// Any line with an unescaped pipe that is neither a fence nor a lone pipe.
///
/// Pipes inside inline code count too (`` `a|b` ``); this is a known approximation.
pub fn is_table_line(line: &str) -> bool {
    UNESCAPED_PIPE_REGEX.is_match(line) && !is_fence_boundary(line) && !LONE_PIPE_REGEX.is_match(line)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Classify a line, fence boundaries taking precedence over everything else
pub fn classify(line: &str) -> LineKind {
    if is_fence_boundary(line) {
        LineKind::FenceBoundary
    } else if is_blank(line) {
        LineKind::Blank
    } else if is_list_line(line) {
        LineKind::ListItem
    } else if is_table_line(line) {
        LineKind::TableRow
    } else {
        LineKind::Plain
    }
}
