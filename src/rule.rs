use std::path::PathBuf;

/// What to do with an eligible entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Remove the entry outright.
    Delete,
    /// Copy the entry into a compressed container, then remove it.
    Archive,
}

impl Action {
    /// Parse the action string from the rule-set document.
    pub fn parse(s: &str) -> Option<Action> {
        match s {
            "delete" => Some(Action::Delete),
            "archive" => Some(Action::Archive),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Delete => "delete",
            Action::Archive => "archive",
        }
    }
}

/// One validated retention rule.
///
/// `group` is the producer component the rule belongs to; it only affects
/// where archive containers land, never what matches. Rules are read-only
/// for the duration of one sweep.
#[derive(Debug, Clone)]
pub struct Rule {
    pub group: String,
    pub name: String,
    pub base_path: PathBuf,
    pub threshold_hours: u64,
    pub patterns: Vec<String>,
    pub action: Action,
}
