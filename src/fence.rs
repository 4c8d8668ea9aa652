//! Nesting-aware tracking of fenced code blocks.
//!
//! The tracker keeps a stack of open [`FenceScope`]s. A fence line closes the top
//! scope only when it uses the same delimiter, its run is at least as long as the
//! opening run, and it carries no info string. Any other fence line seen while a
//! scope is open opens a nested scope, except lines using a different delimiter,
//! which are plain content.

use crate::classify::{FenceDelimiter, FenceMarker, parse_fence};

/// One open fenced block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceScope {
    pub delimiter: FenceDelimiter,
    pub run_len: usize,
    pub indent: String,
    /// Opened while no other scope was open
    pub outermost: bool,
    /// 0-indexed line of the opening fence
    pub open_line: usize,
}

/// What a single line means for fence tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceEvent {
    /// Not inside any fence
    Outside,
    /// Content of an open fence, at any depth
    Inside,
    /// Fence opening line
    Open { outermost: bool, has_language: bool },
    /// Fence closing line
    Close { outermost: bool },
}

impl FenceEvent {
    /// Whether list/table detection must skip this line
    pub fn is_excluded(&self) -> bool {
        !matches!(self, FenceEvent::Outside)
    }
}

#[derive(Debug, Default, Clone)]
pub struct FenceTracker {
    stack: Vec<FenceScope>,
    line: usize,
}

impl FenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_active(&self) -> bool {
        !self.stack.is_empty()
    }

    /// The innermost open scope
    pub fn top(&self) -> Option<&FenceScope> {
        self.stack.last()
    }

    /// Feed the next line and report its role
    pub fn step(&mut self, line: &str) -> FenceEvent {
        let index = self.line;
        self.line += 1;

        let Some(marker) = parse_fence(line) else {
            return if self.is_active() {
                FenceEvent::Inside
            } else {
                FenceEvent::Outside
            };
        };

        match self.stack.last() {
            None => {
                self.push(&marker, index);
                FenceEvent::Open {
                    outermost: true,
                    has_language: marker.has_language(),
                }
            }
            Some(top) if top.delimiter != marker.delimiter => FenceEvent::Inside,
            Some(top) if marker.run_len >= top.run_len && marker.info.is_empty() => {
                self.stack.pop();
                FenceEvent::Close {
                    outermost: self.stack.is_empty(),
                }
            }
            Some(_) => {
                self.push(&marker, index);
                FenceEvent::Open {
                    outermost: false,
                    has_language: marker.has_language(),
                }
            }
        }
    }

    fn push(&mut self, marker: &FenceMarker<'_>, open_line: usize) {
        log::trace!(
            "fence open at line {} (depth {}, run {})",
            open_line + 1,
            self.stack.len() + 1,
            marker.run_len
        );
        self.stack.push(FenceScope {
            delimiter: marker.delimiter,
            run_len: marker.run_len,
            indent: marker.indent.to_string(),
            outermost: self.stack.is_empty(),
            open_line,
        });
    }
}
