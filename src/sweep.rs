use crate::config::Document;
use crate::engine;
use crate::report::{RuleResult, SweepReport};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::warn;

/// Sweep-wide settings shared by every rule evaluation.
pub struct SweepOptions {
    /// Root directory that archive containers are written under.
    pub archive_root: PathBuf,
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

/// Run every rule in the document and collect one result per rule.
///
/// `now` is injected by the caller and governs both eligibility and
/// container naming, so scheduled invocations and tests see the same
/// behavior from the same inputs.
///
/// Rules are evaluated sequentially, group by group in document order. A
/// structurally invalid rule becomes a result carrying only its config
/// error; nothing a single rule does can abort the sweep. Sequential
/// evaluation also means two rules with overlapping base paths cannot
/// race each other within one sweep.
pub fn sweep(document: &Document, now: DateTime<Utc>, opts: &SweepOptions) -> SweepReport {
    let started_at = Utc::now();
    let mut results = Vec::new();

    for (group, rules) in document {
        for (name, raw) in rules {
            let result = match raw.validate(group, name) {
                Ok(rule) => engine::evaluate(&rule, now, opts),
                Err(cause) => {
                    warn!("skipping {group}/{name}: {cause}");
                    RuleResult::failed(group, name, cause)
                }
            };
            results.push(result);
        }
    }

    SweepReport {
        results,
        started_at,
        finished_at: Utc::now(),
    }
}
