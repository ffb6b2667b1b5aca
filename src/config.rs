use crate::error::SweepError;
use crate::rule::{Action, Rule};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The parsed rule-set document: group name → rule name → raw rule.
///
/// BTreeMap keeps evaluation order (and therefore report order) stable
/// across sweeps.
pub type Document = BTreeMap<String, BTreeMap<String, RawRule>>;

/// One rule as it appears in the document, before validation.
///
/// Every field is optional so that a structurally broken rule is rejected
/// on its own (as a per-rule error in the report) instead of failing the
/// whole document parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRule {
    pub path: Option<String>,
    pub threshold: Option<i64>,
    pub glob_ops: Option<Vec<String>>,
    pub action: Option<String>,
}

/// Load and parse the rule-set document.
///
/// An unreadable or unparsable document is the only fatal condition in the
/// engine; everything past this point degrades to per-rule errors.
pub fn load(path: &Path) -> Result<Document, SweepError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SweepError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| SweepError::Config(format!("cannot parse {}: {e}", path.display())))
}

impl RawRule {
    /// Check required fields and produce a validated `Rule`.
    pub fn validate(&self, group: &str, name: &str) -> Result<Rule, SweepError> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| SweepError::Config(format!("{group}/{name}: missing 'path'")))?;
        let threshold = self
            .threshold
            .ok_or_else(|| SweepError::Config(format!("{group}/{name}: missing 'threshold'")))?;
        if threshold < 0 {
            return Err(SweepError::Config(format!(
                "{group}/{name}: negative threshold {threshold}"
            )));
        }
        let patterns = match &self.glob_ops {
            Some(globs) if !globs.is_empty() => globs.clone(),
            Some(_) => {
                return Err(SweepError::Config(format!(
                    "{group}/{name}: 'glob_ops' is empty"
                )))
            }
            None => {
                return Err(SweepError::Config(format!(
                    "{group}/{name}: missing 'glob_ops'"
                )))
            }
        };
        let action_str = self
            .action
            .as_deref()
            .ok_or_else(|| SweepError::Config(format!("{group}/{name}: missing 'action'")))?;
        let action = Action::parse(action_str).ok_or_else(|| {
            SweepError::Config(format!("{group}/{name}: unrecognized action '{action_str}'"))
        })?;

        Ok(Rule {
            group: group.to_string(),
            name: name.to_string(),
            base_path: PathBuf::from(path),
            threshold_hours: threshold as u64,
            patterns,
            action,
        })
    }
}
