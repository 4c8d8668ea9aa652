/// Rule: tables need blank lines around them
///
/// A table block is any run of consecutive lines containing a pipe, outside fences.
use crate::lint_context::LintContext;
use crate::rule::{Rule, RuleCategory, Violation, ViolationKind};

#[derive(Debug, Clone, Default)]
pub struct BlanksAroundTables;

impl BlanksAroundTables {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BlanksAroundTables {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn description(&self) -> &'static str {
        "Tables should be surrounded by blank lines"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Table
    }

    fn kinds(&self) -> &'static [ViolationKind] {
        &[ViolationKind::TableBlankBefore, ViolationKind::TableBlankAfter]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Violation> {
        let mut warnings = Vec::new();
        let lines = &ctx.lines;

        let mut i = 0;
        while i < lines.len() {
            if !lines[i].is_table_row() {
                i += 1;
                continue;
            }

            let start = i;
            let mut end = start;
            while end < lines.len() && lines[end].is_table_row() {
                end += 1;
            }

            if ctx.preceded_by_content(start) {
                warnings.push(Violation::new(
                    ViolationKind::TableBlankBefore,
                    start + 1,
                    "Missing blank line before table",
                ));
            }
            if ctx.is_non_blank(end) {
                warnings.push(Violation::new(
                    ViolationKind::TableBlankAfter,
                    end,
                    "Missing blank line after table",
                ));
            }

            i = end;
        }

        warnings
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains('|')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(content: &str) -> Vec<(ViolationKind, usize)> {
        let ctx = LintContext::new(content);
        BlanksAroundTables
            .check(&ctx)
            .into_iter()
            .map(|v| (v.kind, v.line))
            .collect()
    }

    #[test]
    fn test_well_formed_table() {
        assert!(check("Intro\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nOutro").is_empty());
    }

    #[test]
    fn test_missing_blank_lines() {
        assert_eq!(
            check("Intro\n| a |\n|---|\nOutro\n"),
            vec![(ViolationKind::TableBlankBefore, 2), (ViolationKind::TableBlankAfter, 3)]
        );
    }

    #[test]
    fn test_lone_pipe_is_not_a_table() {
        assert!(check("text\n |\ntext").is_empty());
    }

    #[test]
    fn test_table_inside_fence_is_ignored() {
        assert!(check("```text\n| a |\n```\n").is_empty());
    }

    #[test]
    fn test_table_stops_at_fence() {
        assert_eq!(
            check("| a |\n```text\nx\n```"),
            vec![(ViolationKind::TableBlankAfter, 1)]
        );
    }
}
