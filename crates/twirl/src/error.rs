#![forbid(unsafe_code)]

//! Error types for spinner compilation.

use std::fmt;

/// Errors raised while binding or compiling a spinner.
#[derive(Debug)]
pub enum SpinnerError {
    /// Parameters or command arguments do not match the target's declared
    /// contract. Raised eagerly at the offending call, never deferred to
    /// compile time.
    Binding {
        /// What was being bound (a source name or command name).
        target: &'static str,
        /// What was wrong with the arguments.
        detail: String,
    },
    /// The uniform frame-width invariant was violated during compilation.
    Specification {
        /// Summary of the violation.
        detail: String,
        /// Full frame rendition with codepoints, for root-causing the
        /// mismatched substitution/reshape/transpose offline.
        dump: String,
    },
}

impl fmt::Display for SpinnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinnerError::Binding { target, detail } => {
                write!(f, "binding error in {target}: {detail}")
            }
            SpinnerError::Specification { detail, dump } => {
                write!(f, "specification error: {detail}\n{dump}")
            }
        }
    }
}

impl std::error::Error for SpinnerError {}

/// Result type for spinner operations.
pub type Result<T> = std::result::Result<T, SpinnerError>;
