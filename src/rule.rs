//!
//! This module defines the Rule trait and the violation types rules report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::lint_context::LintContext;

/// The kinds of non-conformance the scanner reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    FenceBlankBefore,
    FenceBlankAfter,
    FenceLanguageMissing,
    ListBlankBefore,
    ListBlankAfter,
    BulletMarker,
    TableBlankBefore,
    TableBlankAfter,
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 8] = [
        ViolationKind::FenceBlankBefore,
        ViolationKind::FenceBlankAfter,
        ViolationKind::FenceLanguageMissing,
        ViolationKind::ListBlankBefore,
        ViolationKind::ListBlankAfter,
        ViolationKind::BulletMarker,
        ViolationKind::TableBlankBefore,
        ViolationKind::TableBlankAfter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::FenceBlankBefore => "fence-blank-before",
            ViolationKind::FenceBlankAfter => "fence-blank-after",
            ViolationKind::FenceLanguageMissing => "fence-language-missing",
            ViolationKind::ListBlankBefore => "list-blank-before",
            ViolationKind::ListBlankAfter => "list-blank-after",
            ViolationKind::BulletMarker => "bullet-marker",
            ViolationKind::TableBlankBefore => "table-blank-before",
            ViolationKind::TableBlankAfter => "table-blank-after",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown violation kind '{0}'")]
pub struct UnknownKindError(pub String);

impl FromStr for ViolationKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_ascii_lowercase();
        ViolationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| UnknownKindError(s.to_string()))
    }
}

/// A single detected non-conformance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// 1-indexed line number
    pub line: usize,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}

/// Type of rule for selective processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    CodeBlock,
    List,
    Table,
}

/// A block detector over the annotated line stream.
///
/// Rules are read-only: they report, never rewrite.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn category(&self) -> RuleCategory;

    /// Violation kinds this rule can emit
    fn kinds(&self) -> &'static [ViolationKind];

    /// Report violations in line-ascending order
    fn check(&self, ctx: &LintContext) -> Vec<Violation>;

    /// Check if this rule should quickly skip processing based on content
    fn should_skip(&self, _ctx: &LintContext) -> bool {
        false
    }
}
