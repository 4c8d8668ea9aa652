pub mod classify;
pub mod cli_types;
pub mod config;
pub mod exit_codes;
pub mod fence;
pub mod file_processor;
pub mod language;
pub mod lint_context;
pub mod output;
pub mod parallel;
pub mod repair;
pub mod rule;
pub mod rules;

pub use crate::language::{LanguageInferencer, LanguageRule, Signal, detect_language};
pub use crate::lint_context::LintContext;
pub use crate::repair::{FenceRewriter, FixRecord, Repair, repair};
pub use crate::rule::{Rule, Violation, ViolationKind};

use std::collections::HashSet;

/// Runs every rule over a document and merges their findings
pub struct Scanner {
    rules: Vec<Box<dyn rule::Rule>>,
    disabled: HashSet<ViolationKind>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(rules::all_rules())
    }
}

impl Scanner {
    pub fn new(rules: Vec<Box<dyn rule::Rule>>) -> Self {
        Self {
            rules,
            disabled: HashSet::new(),
        }
    }

    /// Drop violations of the given kinds from the report
    pub fn with_disabled(mut self, kinds: impl IntoIterator<Item = ViolationKind>) -> Self {
        self.disabled.extend(kinds);
        self
    }

    /// Violations sorted by line; for equal lines, rule order is kept
    pub fn scan(&self, content: &str) -> Vec<Violation> {
        let ctx = LintContext::new(content);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if rule.kinds().iter().all(|k| self.disabled.contains(k)) || rule.should_skip(&ctx) {
                continue;
            }
            violations.extend(
                rule.check(&ctx)
                    .into_iter()
                    .filter(|v| !self.disabled.contains(&v.kind)),
            );
        }

        violations.sort_by_key(|v| v.line);
        violations
    }
}

/// Scan a document with all rules enabled
pub fn scan(content: &str) -> Vec<Violation> {
    Scanner::default().scan(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_sorted_by_line_across_rules() {
        let content = "| a |\n- b\n```\nc\n```\n";
        let lines: Vec<(usize, ViolationKind)> = scan(content).into_iter().map(|v| (v.line, v.kind)).collect();
        assert_eq!(
            lines,
            vec![
                (1, ViolationKind::TableBlankAfter),
                (2, ViolationKind::ListBlankBefore),
                (2, ViolationKind::ListBlankAfter),
                (3, ViolationKind::FenceLanguageMissing),
                (3, ViolationKind::FenceBlankBefore),
            ]
        );
    }

    #[test]
    fn test_disabled_kinds() {
        let scanner = Scanner::default().with_disabled([ViolationKind::BulletMarker]);
        let kinds: Vec<ViolationKind> = scanner.scan("* a\n").into_iter().map(|v| v.kind).collect();
        assert!(kinds.is_empty());
    }
}
