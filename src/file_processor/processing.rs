//! Per-file check and fix

use std::fs;
use std::path::Path;

use super::ProcessError;
use crate::Scanner;
use crate::repair::{FenceRewriter, FixRecord};
use crate::rule::Violation;

fn read(path: &Path) -> Result<String, ProcessError> {
    fs::read_to_string(path).map_err(|source| ProcessError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Scan one file from disk
pub fn check_file(path: &Path, scanner: &Scanner) -> Result<Vec<Violation>, ProcessError> {
    let content = read(path)?;
    let violations = scanner.scan(&content);
    log::debug!("{}: {} violation(s)", path.display(), violations.len());
    Ok(violations)
}

/// Repair one file. The file is rewritten only when something changed and `dry_run` is off.
pub fn fix_file(path: &Path, rewriter: &FenceRewriter, dry_run: bool) -> Result<Vec<FixRecord>, ProcessError> {
    let content = read(path)?;
    let repaired = rewriter.repair(&content);

    if repaired.fixes.is_empty() {
        return Ok(Vec::new());
    }

    if dry_run {
        log::debug!("{}: {} fix(es) (dry run)", path.display(), repaired.fixes.len());
    } else {
        fs::write(path, &repaired.content).map_err(|source| ProcessError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Fixed {} fence(s) in {}", repaired.fixes.len(), path.display());
    }

    Ok(repaired.fixes)
}
