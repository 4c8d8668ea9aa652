//! Exit codes for mdconform
//!
//! CI systems use these to tell a failed conformance check apart from a
//! broken invocation.

/// Success - No violations found, or every fix was applied
pub const SUCCESS: i32 = 0;

/// Violations found by `check`, or fixes pending in `fix --dry-run`
pub const VIOLATIONS_FOUND: i32 = 1;

/// Tool error - Usage error, configuration error, or file access error
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{SUCCESS, TOOL_ERROR, VIOLATIONS_FOUND};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with violations found code (1)
    pub fn violations_found() -> ! {
        std::process::exit(VIOLATIONS_FOUND);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}

/// Pick the exit code for a finished run
pub fn for_run(had_errors: bool, has_findings: bool) -> i32 {
    if had_errors {
        TOOL_ERROR
    } else if has_findings {
        VIOLATIONS_FOUND
    } else {
        SUCCESS
    }
}
