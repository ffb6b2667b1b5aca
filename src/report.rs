use crate::error::SweepError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// One failure encountered while processing a rule. `path` is absent for
/// failures not tied to a single entry (bad pattern, container write).
#[derive(Debug)]
pub struct RuleError {
    pub path: Option<PathBuf>,
    pub cause: SweepError,
}

/// Outcome of evaluating one rule. Immutable once produced.
#[derive(Debug)]
pub struct RuleResult {
    pub group: String,
    pub rule_name: String,
    pub matched_count: usize,
    pub eligible_count: usize,
    pub acted_count: usize,
    pub bytes_freed: u64,
    /// Container written by this evaluation, for archive-action rules.
    pub archive: Option<PathBuf>,
    pub errors: Vec<RuleError>,
}

impl RuleResult {
    pub fn new(group: &str, rule_name: &str) -> Self {
        RuleResult {
            group: group.to_string(),
            rule_name: rule_name.to_string(),
            matched_count: 0,
            eligible_count: 0,
            acted_count: 0,
            bytes_freed: 0,
            archive: None,
            errors: Vec::new(),
        }
    }

    /// A rule that never got to run: zero counts, one error.
    pub fn failed(group: &str, rule_name: &str, cause: SweepError) -> Self {
        let mut result = RuleResult::new(group, rule_name);
        result.errors.push(RuleError { path: None, cause });
        result
    }
}

/// Everything one sweep did, handed back to the caller. The scheduling
/// collaborator decides whether any errors warrant an alert.
#[derive(Debug)]
pub struct SweepReport {
    pub results: Vec<RuleResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SweepReport {
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| !r.errors.is_empty())
    }

    pub fn total_acted(&self) -> usize {
        self.results.iter().map(|r| r.acted_count).sum()
    }

    pub fn total_bytes_freed(&self) -> u64 {
        self.results.iter().map(|r| r.bytes_freed).sum()
    }
}
