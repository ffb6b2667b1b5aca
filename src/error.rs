use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while evaluating one rule.
///
/// None of these abort a sweep; they are collected per-rule in the report
/// and the caller decides whether they warrant an alert.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Rule is structurally invalid (missing field, unrecognized action).
    #[error("invalid rule: {0}")]
    Config(String),

    /// Glob pattern failed to parse.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// A matched entry or the base path could not be read.
    #[error("cannot read {}: {}", path.display(), source)]
    Match {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Container write failed; originals are left in place.
    #[error("archive write failed: {0}")]
    Archive(String),

    /// Removal failed for a reason other than "already absent".
    #[error("failed to remove {}: {}", path.display(), source)]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
