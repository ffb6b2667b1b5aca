use crate::matcher::Candidate;
use chrono::{DateTime, Duration, Utc};

/// Decide whether a candidate is old enough for its rule to act on.
///
/// The boundary is inclusive: an entry exactly `threshold_hours` old is
/// eligible. A threshold of zero means every match is eligible, used for
/// session-scoped debris that should go on every sweep.
///
/// Directories age by their own mtime, not by their newest descendant; a
/// directory whose metadata is refreshed by internal writes never ages
/// out. Intentional carry-over of the existing retention policy.
pub fn is_eligible(candidate: &Candidate, threshold_hours: u64, now: DateTime<Utc>) -> bool {
    if threshold_hours == 0 {
        return true;
    }
    let age = now.signed_duration_since(candidate.modified_at);
    age >= Duration::seconds(threshold_hours as i64 * 3600)
}
