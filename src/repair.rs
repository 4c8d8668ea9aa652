//! Fence language repair: adds an inferred language tag to every outermost fenced
//! code block whose opening line is a bare delimiter run.
//!
//! Only opening lines of untagged outermost fences change. Bodies, closing lines,
//! nested fences and every other line keep their exact bytes, including line
//! endings. If an untagged fence never closes, nothing is rewritten at all.
//!
//! A target body is buffered verbatim: the first bare run of the same delimiter
//! at least as long as the opening run closes it, whatever fence lines the body
//! contains. The tracker still follows every line, so scanning resumes in the
//! same state a second pass over the repaired output would reach.

use serde::Serialize;

use crate::classify::{FenceDelimiter, parse_fence};
use crate::fence::{FenceEvent, FenceTracker};
use crate::language::LanguageInferencer;
use crate::lint_context::{RawLine, split_lines};

const PREVIEW_CHARS: usize = 60;

/// One rewritten fence opening
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixRecord {
    /// 1-indexed line of the opening fence
    pub line: usize,
    pub original_opening_line: String,
    pub fixed_opening_line: String,
    pub detected_language: String,
    /// Start of the fence body
    pub content_preview: String,
}

/// Result of a repair pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    pub content: String,
    pub fixes: Vec<FixRecord>,
}

impl Repair {
    fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            fixes: Vec::new(),
        }
    }

    pub fn is_modified(&self) -> bool {
        !self.fixes.is_empty()
    }
}

/// The untagged fence currently being collected
struct TargetFence<'a> {
    open: RawLine<'a>,
    /// 0-indexed
    open_index: usize,
    delimiter: FenceDelimiter,
    run_len: usize,
    body: Vec<RawLine<'a>>,
}

impl TargetFence<'_> {
    fn is_closed_by(&self, line: &str) -> bool {
        parse_fence(line).is_some_and(|marker| {
            marker.delimiter == self.delimiter && marker.run_len >= self.run_len && marker.info.is_empty()
        })
    }
}

enum Mode<'a> {
    Scanning,
    Collecting(TargetFence<'a>),
}

/// Rewrites untagged fence openings using a [`LanguageInferencer`]
#[derive(Debug, Clone, Default)]
pub struct FenceRewriter {
    inferencer: LanguageInferencer,
}

impl FenceRewriter {
    pub fn new(inferencer: LanguageInferencer) -> Self {
        Self { inferencer }
    }

    pub fn repair(&self, content: &str) -> Repair {
        let mut tracker = FenceTracker::new();
        let mut mode = Mode::Scanning;
        let mut output = String::with_capacity(content.len() + 64);
        let mut fixes = Vec::new();

        for (i, line) in split_lines(content).into_iter().enumerate() {
            let event = tracker.step(line.text);

            mode = match mode {
                Mode::Scanning => match target_marker(&event, line.text) {
                    Some((delimiter, run_len)) => Mode::Collecting(TargetFence {
                        open: line,
                        open_index: i,
                        delimiter,
                        run_len,
                        body: Vec::new(),
                    }),
                    None => {
                        push_line(&mut output, line);
                        Mode::Scanning
                    }
                },
                Mode::Collecting(mut target) => {
                    if target.is_closed_by(line.text) {
                        let fix = self.emit_target(&mut output, &target, line);
                        fixes.push(fix);
                        Mode::Scanning
                    } else {
                        target.body.push(line);
                        Mode::Collecting(target)
                    }
                }
            };
        }

        if let Mode::Collecting(target) = mode {
            log::debug!(
                "fence opened at line {} is never closed; leaving content unchanged",
                target.open_index + 1
            );
            return Repair::unchanged(content);
        }

        if fixes.is_empty() {
            return Repair::unchanged(content);
        }

        Repair { content: output, fixes }
    }

    /// Write a completed target fence with its rebuilt opening line
    fn emit_target(&self, output: &mut String, target: &TargetFence<'_>, close: RawLine<'_>) -> FixRecord {
        let body = target.body.iter().map(|l| l.text).collect::<Vec<_>>().join("\n");
        let language = self.inferencer.infer(&body);

        let fixed_opening_line = match parse_fence(target.open.text) {
            Some(marker) => format!("{}{}{}", marker.indent, marker.run(), language),
            // The tracker only opens scopes on fence lines
            None => format!("{}{}", target.open.text, language),
        };

        output.push_str(&fixed_opening_line);
        output.push_str(target.open.ending);
        for line in &target.body {
            push_line(output, *line);
        }
        push_line(output, close);

        FixRecord {
            line: target.open_index + 1,
            original_opening_line: target.open.text.to_string(),
            fixed_opening_line,
            detected_language: language.to_string(),
            content_preview: preview(&body),
        }
    }
}

/// Delimiter and run of an outermost opening line with an empty info string.
///
/// Openings with an info string that is not a language token (`{.python}`) are
/// reported by the scanner but left alone here.
fn target_marker(event: &FenceEvent, text: &str) -> Option<(FenceDelimiter, usize)> {
    if !matches!(
        event,
        FenceEvent::Open {
            outermost: true,
            has_language: false
        }
    ) {
        return None;
    }
    parse_fence(text)
        .filter(|marker| marker.info.is_empty())
        .map(|marker| (marker.delimiter, marker.run_len))
}

fn push_line(output: &mut String, line: RawLine<'_>) {
    output.push_str(line.text);
    output.push_str(line.ending);
}

fn preview(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Repair with the built-in language rules
pub fn repair(content: &str) -> Repair {
    FenceRewriter::default().repair(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_adds_language() {
        let result = repair("Intro\n\n```\nimport os\n```\n");
        assert_eq!(result.content, "Intro\n\n```javascript\nimport os\n```\n");
        assert_eq!(result.fixes.len(), 1);

        let fix = &result.fixes[0];
        assert_eq!(fix.line, 3);
        assert_eq!(fix.original_opening_line, "```");
        assert_eq!(fix.fixed_opening_line, "```javascript");
        assert_eq!(fix.detected_language, "javascript");
        assert_eq!(fix.content_preview, "import os");
    }

    #[test]
    fn test_no_fix_returns_input_verbatim() {
        let content = "# Title\n\n```rust\nfn main() {}\n```";
        let result = repair(content);
        assert_eq!(result.content, content);
        assert!(result.fixes.is_empty());
        assert!(!result.is_modified());
    }

    #[test]
    fn test_preserves_indent_and_run_length() {
        let result = repair("- item\n\n  ````\n  {\"a\": 1}\n  ````\n");
        assert_eq!(result.content, "- item\n\n  ````json\n  {\"a\": 1}\n  ````\n");
    }

    #[test]
    fn test_tilde_fence() {
        let result = repair("~~~\nkey: value\n~~~\n");
        assert_eq!(result.content, "~~~yaml\nkey: value\n~~~\n");
    }

    #[test]
    fn test_crlf_preserved() {
        let result = repair("```\r\n$ ls\r\n```\r\ntail");
        assert_eq!(result.content, "```bash\r\n$ ls\r\n```\r\ntail");
    }

    #[test]
    fn test_trailing_whitespace_on_open_is_dropped() {
        let result = repair("```   \nhello\n```");
        assert_eq!(result.content, "```text\nhello\n```");
        assert_eq!(result.fixes[0].original_opening_line, "```   ");
    }

    #[test]
    fn test_nested_fences_untouched() {
        let content = "````\n# Example\n\n```\ninner\n```\n````\n";
        let result = repair(content);
        assert_eq!(result.content, "````markdown\n# Example\n\n```\ninner\n```\n````\n");
        assert_eq!(result.fixes.len(), 1);
    }

    #[test]
    fn test_tagged_outer_fence_protects_inner() {
        let content = "````markdown\n```\nno tag\n```\n````\n";
        let result = repair(content);
        assert_eq!(result.content, content);
        assert!(result.fixes.is_empty());
    }

    #[test]
    fn test_unterminated_fence_aborts_everything() {
        let content = "```\nfirst\n```\n\n```\nnever closed\n";
        let result = repair(content);
        assert_eq!(result.content, content);
        assert!(result.fixes.is_empty());
    }

    #[test]
    fn test_short_run_does_not_close_target() {
        let result = repair("```\n``\n```\n");
        assert_eq!(result.content, "```text\n``\n```\n");
    }

    #[test]
    fn test_multiple_fences() {
        let content = "```\n$ make\n```\n\n```python\nx = 1\n```\n\n```\n[1, 2]\n```";
        let result = repair(content);
        assert_eq!(
            result.content,
            "```bash\n$ make\n```\n\n```python\nx = 1\n```\n\n```json\n[1, 2]\n```"
        );
        let lines: Vec<usize> = result.fixes.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 9]);
    }

    #[test]
    fn test_idempotent() {
        let content = "```\nnpm test\n```\n\n````\n```\nx\n```\n````\n";
        let first = repair(content);
        let second = repair(&first.content);
        assert!(second.fixes.is_empty());
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_empty_body() {
        let result = repair("```\n```\n");
        assert_eq!(result.content, "```text\n```\n");
        assert_eq!(result.fixes[0].content_preview, "");
    }

    #[test]
    fn test_preview_truncates() {
        let body = "a".repeat(100);
        let result = repair(&format!("```\n{body}\n```"));
        let preview = &result.fixes[0].content_preview;
        assert_eq!(preview.len(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_target_body_is_not_reinterpreted() {
        // The tagged inner opening does not hide the bare close from the target
        let result = repair("```\n```js\nx\n```\n");
        assert_eq!(result.content, "```text\n```js\nx\n```\n");
        assert_eq!(result.fixes.len(), 1);
        assert_eq!(result.fixes[0].content_preview, "```js\nx");

        let second = repair(&result.content);
        assert!(second.fixes.is_empty());
        assert_eq!(second.content, result.content);
    }

    #[test]
    fn test_other_delimiter_does_not_close_target() {
        let result = repair("~~~\n```\nkey: value\n```\n~~~\n");
        assert_eq!(result.content, "~~~text\n```\nkey: value\n```\n~~~\n");
    }

    #[test]
    fn test_scanning_resumes_where_a_second_pass_would() {
        // The tracker pairs line 3 with `js`, so line 5 closes the target's scope
        // and line 6 opens a new outermost fence
        let content = "```\n```js\n```\n~~~\n```\n```\n~~~\n```\n";
        let first = repair(content);
        let lines: Vec<usize> = first.fixes.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 6]);

        let second = repair(&first.content);
        assert!(second.fixes.is_empty());
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_non_language_info_string_is_left_alone() {
        let content = "```{.python}\nprint(1)\n```\n";
        let result = repair(content);
        assert_eq!(result.content, content);
        assert!(result.fixes.is_empty());
    }

    #[test]
    fn test_custom_inferencer() {
        use crate::language::{LanguageRule, Signal};

        let rewriter = FenceRewriter::new(LanguageInferencer::new(vec![LanguageRule::new(
            "python",
            vec![Signal::pattern(r"^import\s")],
        )]));
        let result = rewriter.repair("```\nimport os\n```\n");
        assert_eq!(result.content, "```python\nimport os\n```\n");
    }
}
