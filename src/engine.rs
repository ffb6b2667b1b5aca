use crate::matcher::{self, Candidate};
use crate::report::{RuleError, RuleResult};
use crate::rule::{Action, Rule};
use crate::sweep::SweepOptions;
use crate::{age, archiver, deleter};
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Evaluate one rule: match, filter by age, act.
///
/// Individual candidate failures are recorded and never stop the rest of
/// the rule; a rule with nothing eligible still produces a result with
/// `acted_count` zero.
pub fn evaluate(rule: &Rule, now: DateTime<Utc>, opts: &SweepOptions) -> RuleResult {
    let mut result = RuleResult::new(&rule.group, &rule.name);

    let matched = matcher::match_rule(&rule.base_path, &rule.patterns);
    result.errors = matched.errors;
    result.matched_count = matched.candidates.len();

    let (eligible, _fresh): (Vec<Candidate>, Vec<Candidate>) = matched
        .candidates
        .into_iter()
        .partition(|c| age::is_eligible(c, rule.threshold_hours, now));
    result.eligible_count = eligible.len();

    for candidate in &eligible {
        info!(
            "file to {}: {}",
            rule.action.label(),
            candidate.path.display()
        );
    }

    if opts.dry_run {
        return result;
    }

    match rule.action {
        Action::Delete => {
            for candidate in &eligible {
                match deleter::delete(&candidate.path) {
                    Ok(freed) => {
                        result.acted_count += 1;
                        result.bytes_freed += freed;
                        info!("removed: {}", candidate.path.display());
                    }
                    Err(cause) => {
                        error!("{cause}");
                        result.errors.push(RuleError {
                            path: Some(candidate.path.clone()),
                            cause,
                        });
                    }
                }
            }
        }
        Action::Archive => {
            match archiver::archive(
                &rule.group,
                &rule.name,
                &rule.base_path,
                &eligible,
                &opts.archive_root,
                now,
            ) {
                Ok(outcome) => {
                    result.archive = outcome.archive;
                    result.acted_count = outcome.removed;
                    result.bytes_freed = outcome.bytes_freed;
                    result.errors.extend(outcome.errors);
                }
                Err(cause) => {
                    error!("{}/{}: {cause}", rule.group, rule.name);
                    result.errors.push(RuleError { path: None, cause });
                }
            }
        }
    }
    result
}
