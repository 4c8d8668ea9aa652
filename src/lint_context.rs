use crate::classify::{LineKind, classify};
use crate::fence::{FenceEvent, FenceTracker};

/// A line of the source with its own terminator kept aside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    /// Line text without the terminator
    pub text: &'a str,
    /// `"\r\n"`, `"\n"`, or `""` for a final unterminated line
    pub ending: &'a str,
}

/// Split content into lines without normalizing line endings.
///
/// A trailing terminator does not produce an extra empty line, and empty content
/// has no lines at all.
pub fn split_lines(content: &str) -> Vec<RawLine<'_>> {
    content
        .split_inclusive('\n')
        .map(|chunk| {
            let body_len = if chunk.ends_with("\r\n") {
                chunk.len() - 2
            } else if chunk.ends_with('\n') {
                chunk.len() - 1
            } else {
                chunk.len()
            };
            let (text, ending) = chunk.split_at(body_len);
            RawLine { text, ending }
        })
        .collect()
}

/// Pre-computed information about a line
#[derive(Debug, Clone)]
pub struct LineInfo<'a> {
    /// Byte offset where this line starts in the document
    pub byte_offset: usize,
    pub text: &'a str,
    pub ending: &'a str,
    pub kind: LineKind,
    /// Role of the line in fence tracking
    pub fence: FenceEvent,
}

impl LineInfo<'_> {
    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }

    /// Inside a fence or a fence boundary itself
    pub fn in_fence(&self) -> bool {
        self.fence.is_excluded()
    }

    /// A list item that list detection may look at
    pub fn is_list_item(&self) -> bool {
        !self.in_fence() && self.kind == LineKind::ListItem
    }

    /// A table row that table detection may look at.
    ///
    /// A bulleted line with a pipe is both a list item and a table row.
    pub fn is_table_row(&self) -> bool {
        !self.in_fence() && crate::classify::is_table_line(self.text)
    }
}

/// Annotated view of a document shared by all rules.
///
/// Classification and fence tracking run exactly once, here.
pub struct LintContext<'a> {
    pub content: &'a str,
    pub lines: Vec<LineInfo<'a>>,
}

impl<'a> LintContext<'a> {
    pub fn new(content: &'a str) -> Self {
        let mut tracker = FenceTracker::new();
        let mut byte_offset = 0;
        let mut lines = Vec::new();

        for raw in split_lines(content) {
            let fence = tracker.step(raw.text);
            lines.push(LineInfo {
                byte_offset,
                text: raw.text,
                ending: raw.ending,
                kind: classify(raw.text),
                fence,
            });
            byte_offset += raw.text.len() + raw.ending.len();
        }

        if tracker.is_active() {
            log::debug!(
                "unterminated fence opened at line {}; remaining lines are treated as fenced",
                tracker.top().map_or(0, |s| s.open_line + 1)
            );
        }

        Self { content, lines }
    }

    /// Whether the line at `index` exists and is not blank
    pub fn is_non_blank(&self, index: usize) -> bool {
        self.lines.get(index).is_some_and(|l| !l.is_blank())
    }

    /// Whether the line before `index` exists and is not blank
    pub fn preceded_by_content(&self, index: usize) -> bool {
        index > 0 && self.is_non_blank(index - 1)
    }
}
