//! Language inference for untagged fenced code blocks.
//!
//! Inference is an ordered list of [`LanguageRule`]s evaluated against the trimmed
//! body of a fence; the first rule with a matching signal decides the tag. The
//! order is significant: JSON needs a successful parse so YAML flow-style content
//! is not mistaken for it, and shell runs before the script rule so `#` comments
//! and `export` lines are read as shell.

use regex::Regex;
use std::sync::LazyLock;

/// Tag used for empty bodies, diagrams, and anything unrecognized
pub const PLAIN_TEXT: &str = "text";

/// One piece of evidence for a language
#[derive(Debug, Clone)]
pub enum Signal {
    /// Regex over the trimmed body
    Pattern(Regex),
    /// Body is wrapped in `{}` or `[]` and parses as JSON
    ValidJson,
}

impl Signal {
    /// Build a pattern signal.
    ///
    /// Panics on an invalid pattern; rule tables are static.
    pub fn pattern(pattern: &str) -> Self {
        Signal::Pattern(Regex::new(pattern).unwrap())
    }

    fn matches(&self, trimmed: &str) -> bool {
        match self {
            Signal::Pattern(re) => re.is_match(trimmed),
            Signal::ValidJson => is_json_document(trimmed),
        }
    }
}

fn is_json_document(trimmed: &str) -> bool {
    let wrapped = (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'));
    wrapped && serde_json::from_str::<serde_json::Value>(trimmed).is_ok()
}

/// A language tag and the signals that select it (any one suffices)
#[derive(Debug, Clone)]
pub struct LanguageRule {
    pub language: &'static str,
    pub signals: Vec<Signal>,
}

impl LanguageRule {
    pub fn new(language: &'static str, signals: Vec<Signal>) -> Self {
        Self { language, signals }
    }

    pub fn matches(&self, trimmed: &str) -> bool {
        self.signals.iter().any(|s| s.matches(trimmed))
    }
}

/// The built-in rule chain
pub fn default_rules() -> Vec<LanguageRule> {
    vec![
        LanguageRule::new(
            "yaml",
            vec![
                Signal::pattern(r"^[a-zA-Z_][a-zA-Z0-9_-]*:(\s|$)"),
                Signal::pattern(r"(?m)^---\s*$"),
            ],
        ),
        LanguageRule::new("json", vec![Signal::ValidJson]),
        LanguageRule::new(
            "bash",
            vec![
                Signal::pattern(r"^(npm|yarn|pnpm|git|node|npx|cd|mkdir|rm|cp|mv|ls|cat|echo|export|source)\s"),
                Signal::pattern(r"^\$"),
                Signal::pattern(r"^#!\s*/(usr/)?bin/(env\s+)?(ba|z|da)?sh\b"),
            ],
        ),
        LanguageRule::new(
            "javascript",
            vec![
                Signal::pattern(r"^(import|export|const|let|var|function|class|async|await)\s"),
                Signal::pattern(r"^//"),
                Signal::pattern(r"^/\*"),
            ],
        ),
        LanguageRule::new("xml", vec![Signal::pattern(r"^<[a-zA-Z][^>]*>")]),
        LanguageRule::new(
            "markdown",
            vec![Signal::pattern(r"^#{1,6}\s"), Signal::pattern(r"^\[.*\]\(.*\)")],
        ),
        // Diagrams are not a language
        LanguageRule::new(
            PLAIN_TEXT,
            vec![Signal::pattern(r"[→↓←↑]"), Signal::pattern(r"[┌┐└┘├┤┬┴┼─│]")],
        ),
    ]
}

/// Ordered heuristic chain mapping fence bodies to language tags
#[derive(Debug, Clone)]
pub struct LanguageInferencer {
    rules: Vec<LanguageRule>,
    fallback: &'static str,
}

impl Default for LanguageInferencer {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl LanguageInferencer {
    pub fn new(rules: Vec<LanguageRule>) -> Self {
        Self {
            rules,
            fallback: PLAIN_TEXT,
        }
    }

    /// Use a different tag when no rule matches
    pub fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn rules(&self) -> &[LanguageRule] {
        &self.rules
    }

    /// Infer the tag for a fence body
    pub fn infer(&self, content: &str) -> &'static str {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return PLAIN_TEXT;
        }

        self.rules
            .iter()
            .find(|rule| rule.matches(trimmed))
            .map_or(self.fallback, |rule| rule.language)
    }
}

static DEFAULT_INFERENCER: LazyLock<LanguageInferencer> = LazyLock::new(LanguageInferencer::default);

/// Infer a language tag with the built-in rules
pub fn detect_language(content: &str) -> &'static str {
    DEFAULT_INFERENCER.infer(content)
}
