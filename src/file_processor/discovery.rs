//! File discovery and path utilities

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::ProcessError;

/// Extensions treated as Markdown
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Directory names never descended into
fn is_always_skipped(name: &str) -> bool {
    name == "node_modules" || name.starts_with(".git")
}

/// Settings that shape discovery
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Glob patterns to exclude (relative to `base`)
    pub exclude: Vec<String>,
    pub respect_gitignore: bool,
    /// Base directory for exclude patterns
    pub base: PathBuf,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            respect_gitignore: true,
            base: PathBuf::from("."),
        }
    }
}

/// Files found plus the input paths that did not exist
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    pub missing: Vec<String>,
}

pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MARKDOWN_EXTENSIONS.iter().any(|m| e.eq_ignore_ascii_case(m)))
}

/// Expands directory-style patterns to also match files within them.
/// Pattern "dir/path" becomes ["dir/path", "dir/path/**"].
///
/// Patterns containing glob characters (*, ?, [) are returned unchanged.
fn expand_directory_pattern(pattern: &str) -> Vec<String> {
    if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
        return vec![pattern.to_string()];
    }

    let base = pattern.trim_end_matches('/');
    vec![base.to_string(), format!("{base}/**")]
}

/// Walk the given files and directories and collect Markdown files, sorted and deduplicated
pub fn find_markdown_files(paths: &[String], options: &DiscoveryOptions) -> Result<Discovered, ProcessError> {
    let mut discovered = Discovered::default();

    let existing: Vec<&String> = paths
        .iter()
        .filter(|p| {
            let exists = Path::new(p.as_str()).exists();
            if !exists {
                log::debug!("Path not found: {p}");
                discovered.missing.push((*p).clone());
            }
            exists
        })
        .collect();

    let Some((first, rest)) = existing.split_first() else {
        return Ok(discovered);
    };

    let mut walk_builder = WalkBuilder::new(first.as_str());
    for path in rest {
        walk_builder.add(path.as_str());
    }

    let mut types_builder = ignore::types::TypesBuilder::new();
    for ext in MARKDOWN_EXTENSIONS {
        types_builder.add("markdown", &format!("*.{ext}"))?;
    }
    types_builder.select("markdown");
    walk_builder.types(types_builder.build()?);

    let exclude_patterns: Vec<String> = options
        .exclude
        .iter()
        .flat_map(|p| expand_directory_pattern(p))
        .collect();
    if !exclude_patterns.is_empty() {
        log::debug!("Exclude patterns: {exclude_patterns:?}");
        let mut override_builder = OverrideBuilder::new(&options.base);
        for pattern in &exclude_patterns {
            // Overrides without '!' would act as an include list
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                log::warn!("Invalid exclude pattern '{pattern}': {e}");
            }
        }
        match override_builder.build() {
            Ok(overrides) => {
                walk_builder.overrides(overrides);
            }
            Err(e) => log::warn!("Error building path overrides: {e}"),
        }
    }

    let use_gitignore = options.respect_gitignore;
    walk_builder.ignore(use_gitignore);
    walk_builder.git_ignore(use_gitignore);
    walk_builder.git_global(use_gitignore);
    walk_builder.git_exclude(use_gitignore);
    walk_builder.parents(use_gitignore);
    walk_builder.hidden(false);
    walk_builder.require_git(false);
    walk_builder.filter_entry(|entry| {
        entry.depth() == 0 || !is_always_skipped(&entry.file_name().to_string_lossy())
    });

    let mut files = BTreeSet::new();
    for result in walk_builder.build() {
        match result {
            Ok(entry) => {
                let path = entry.path();
                // Explicit file arguments bypass the type filter
                if path.is_file() && is_markdown_path(path) {
                    files.insert(path.strip_prefix("./").unwrap_or(path).to_path_buf());
                } else if entry.depth() == 0 && path.is_file() {
                    log::warn!("Skipping non-markdown file: {}", path.display());
                }
            }
            Err(e) => log::warn!("Error while walking: {e}"),
        }
    }

    discovered.files = files.into_iter().collect();
    log::debug!("Discovered {} markdown file(s)", discovered.files.len());
    Ok(discovered)
}

/// Path shown in reports: relative to `base` when possible
pub fn to_display_path(file_path: &Path, base: &Path) -> String {
    if let Ok(relative) = file_path.strip_prefix(base) {
        return relative.to_string_lossy().to_string();
    }

    if let (Ok(canonical_file), Ok(canonical_base)) = (file_path.canonicalize(), base.canonicalize())
        && let Ok(relative) = canonical_file.strip_prefix(&canonical_base)
    {
        return relative.to_string_lossy().to_string();
    }

    file_path.to_string_lossy().to_string()
}
