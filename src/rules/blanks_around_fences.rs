/// Rule: outermost fenced code blocks need a language and blank lines around them
use crate::fence::FenceEvent;
use crate::lint_context::LintContext;
use crate::rule::{Rule, RuleCategory, Violation, ViolationKind};

#[derive(Debug, Clone, Default)]
pub struct BlanksAroundFences;

impl BlanksAroundFences {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BlanksAroundFences {
    fn name(&self) -> &'static str {
        "fences"
    }

    fn description(&self) -> &'static str {
        "Fenced code blocks should declare a language and be surrounded by blank lines"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::CodeBlock
    }

    fn kinds(&self) -> &'static [ViolationKind] {
        &[
            ViolationKind::FenceLanguageMissing,
            ViolationKind::FenceBlankBefore,
            ViolationKind::FenceBlankAfter,
        ]
    }

    fn check(&self, ctx: &LintContext) -> Vec<Violation> {
        let mut warnings = Vec::new();

        for (i, line) in ctx.lines.iter().enumerate() {
            match line.fence {
                // Nested opens and closes are content of the outer fence
                FenceEvent::Open {
                    outermost: true,
                    has_language,
                } => {
                    if !has_language {
                        warnings.push(Violation::new(
                            ViolationKind::FenceLanguageMissing,
                            i + 1,
                            "Code fence missing language identifier (e.g., ```bash)",
                        ));
                    }
                    if ctx.preceded_by_content(i) {
                        warnings.push(Violation::new(
                            ViolationKind::FenceBlankBefore,
                            i + 1,
                            "Missing blank line before code fence",
                        ));
                    }
                }
                FenceEvent::Close { outermost: true } => {
                    if ctx.is_non_blank(i + 1) {
                        warnings.push(Violation::new(
                            ViolationKind::FenceBlankAfter,
                            i + 1,
                            "Missing blank line after code fence",
                        ));
                    }
                }
                _ => {}
            }
        }

        warnings
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.content.contains("```") && !ctx.content.contains("~~~")
    }
}
