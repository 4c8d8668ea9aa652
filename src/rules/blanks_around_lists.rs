/// Rule: lists need blank lines around them and `-` bullets
///
/// A list block is a maximal run of consecutive list item lines outside any fence.
/// Continuation paragraphs of list items are not part of the block: the line right
/// after the last item has to be blank.
use crate::classify::bullet_marker;
use crate::lint_context::LintContext;
use crate::rule::{Rule, RuleCategory, Violation, ViolationKind};

const PREFERRED_BULLET: char = '-';

#[derive(Debug, Clone, Default)]
pub struct BlanksAroundLists;

impl BlanksAroundLists {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BlanksAroundLists {
    fn name(&self) -> &'static str {
        "lists"
    }

    fn description(&self) -> &'static str {
        "Lists should be surrounded by blank lines and use '-' bullets"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::List
    }

    fn kinds(&self) -> &'static [ViolationKind] {
        &[
            ViolationKind::ListBlankBefore,
            ViolationKind::BulletMarker,
            ViolationKind::ListBlankAfter,
        ]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Violation> {
        let mut warnings = Vec::new();
        let lines = &ctx.lines;

        let mut i = 0;
        while i < lines.len() {
            if !lines[i].is_list_item() {
                i += 1;
                continue;
            }

            let start = i;
            if ctx.preceded_by_content(start) {
                warnings.push(Violation::new(
                    ViolationKind::ListBlankBefore,
                    start + 1,
                    "Missing blank line before list",
                ));
            }

            let mut end = start;
            while end < lines.len() && lines[end].is_list_item() {
                if let Some(marker) = bullet_marker(lines[end].text)
                    && marker != PREFERRED_BULLET
                {
                    warnings.push(Violation::new(
                        ViolationKind::BulletMarker,
                        end + 1,
                        format!("Use '{PREFERRED_BULLET}' for bullets, found '{marker}'"),
                    ));
                }
                end += 1;
            }

            // Attributed to the last item, not to the offending line after it
            if ctx.is_non_blank(end) {
                warnings.push(Violation::new(
                    ViolationKind::ListBlankAfter,
                    end,
                    "Missing blank line after list",
                ));
            }

            i = end;
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(content: &str) -> Vec<(ViolationKind, usize)> {
        let ctx = LintContext::new(content);
        BlanksAroundLists
            .check(&ctx)
            .into_iter()
            .map(|v| (v.kind, v.line))
            .collect()
    }

    #[test]
    fn test_well_formed_list() {
        assert!(check("Intro\n\n- a\n- b\n  - c\n1. d\n\nOutro\n").is_empty());
    }

    #[test]
    fn test_missing_blank_before_and_after() {
        assert_eq!(
            check("Intro\n- a\n- b\nOutro\n"),
            vec![(ViolationKind::ListBlankBefore, 2), (ViolationKind::ListBlankAfter, 3)]
        );
    }

    #[test]
    fn test_every_non_dash_bullet_is_reported_once() {
        assert_eq!(
            check("* a\n- b\n+ c\n"),
            vec![(ViolationKind::BulletMarker, 1), (ViolationKind::BulletMarker, 3)]
        );
    }

    #[test]
    fn test_bullet_message() {
        let ctx = LintContext::new("* a");
        let warnings = BlanksAroundLists.check(&ctx);
        assert_eq!(warnings[0].message, "Use '-' for bullets, found '*'");
    }

    #[test]
    fn test_ordered_items_have_no_marker_check() {
        assert!(check("1. a\n2. b\n10. c\n").is_empty());
    }

    #[test]
    fn test_list_inside_fence_is_ignored() {
        assert!(check("```md\n* a\n+ b\n```\n").is_empty());
    }

    #[test]
    fn test_list_ends_at_fence_line() {
        // The fence opening line is not blank, so the list needs a blank after it
        assert_eq!(check("- a\n```sh\nls\n```\n"), vec![(ViolationKind::ListBlankAfter, 1)]);
    }

    #[test]
    fn test_separate_blocks() {
        assert_eq!(
            check("- a\n\ntext\n- b\n"),
            vec![(ViolationKind::ListBlankBefore, 4)]
        );
    }
}
