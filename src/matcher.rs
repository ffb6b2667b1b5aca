use crate::error::SweepError;
use crate::report::RuleError;
use crate::utils;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// One filesystem entry resolved by pattern matching, not yet filtered by
/// age. Transient: lives only for one rule evaluation.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub is_dir: bool,
    pub modified_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Candidates found for one rule, plus whatever could not be read along
/// the way.
pub struct MatchResult {
    pub candidates: Vec<Candidate>,
    pub errors: Vec<RuleError>,
}

impl MatchResult {
    fn empty() -> Self {
        MatchResult {
            candidates: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Resolve a rule's patterns against its base directory.
///
/// Matching is shell-glob style (`*`, `?`, bracket classes) and never
/// descends past what a pattern's own segments name: `sub/*.json` reaches
/// into `sub/` but not into `sub/nested/`. The result is the union across
/// all patterns, deduplicated by path.
///
/// A missing base directory is a normal state (the producer has not run
/// yet) and yields an empty result. An unreadable one is a match error.
pub fn match_rule(base_path: &Path, patterns: &[String]) -> MatchResult {
    let mut result = MatchResult::empty();

    match std::fs::metadata(base_path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return result,
        Err(e) => {
            result.errors.push(RuleError {
                path: Some(base_path.to_path_buf()),
                cause: SweepError::Match {
                    path: base_path.to_path_buf(),
                    source: e,
                },
            });
            return result;
        }
        Ok(_) => {}
    }

    let mut seen: BTreeSet<PathBuf> = BTreeSet::new();
    for pattern in patterns {
        let rooted = base_path.join(pattern);
        let paths = match glob::glob(&rooted.to_string_lossy()) {
            Ok(paths) => paths,
            Err(source) => {
                result.errors.push(RuleError {
                    path: None,
                    cause: SweepError::Pattern {
                        pattern: pattern.clone(),
                        source,
                    },
                });
                continue;
            }
        };
        for entry in paths {
            match entry {
                Ok(path) => {
                    if !seen.insert(path.clone()) {
                        continue;
                    }
                    match candidate_for(&path) {
                        Ok(candidate) => result.candidates.push(candidate),
                        Err(source) => result.errors.push(RuleError {
                            path: Some(path.clone()),
                            cause: SweepError::Match { path, source },
                        }),
                    }
                }
                Err(e) => {
                    let path = e.path().to_path_buf();
                    result.errors.push(RuleError {
                        path: Some(path.clone()),
                        cause: SweepError::Match {
                            path,
                            source: e.into_error(),
                        },
                    });
                }
            }
        }
    }
    result
}

fn candidate_for(path: &Path) -> io::Result<Candidate> {
    let meta = std::fs::metadata(path)?;
    let modified_at: DateTime<Utc> = meta.modified()?.into();
    Ok(Candidate {
        path: path.to_path_buf(),
        is_dir: meta.is_dir(),
        modified_at,
        size_bytes: utils::entry_size(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    fn matched_names(result: &MatchResult) -> Vec<String> {
        result
            .candidates
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn missing_base_is_empty_not_error() {
        let result = match_rule(Path::new("/nonexistent/base"), &["*.log".to_string()]);
        assert!(result.candidates.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn pattern_scoping_does_not_recurse() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("sub/x.json"));
        touch(&tmp.path().join("other/x.json"));
        touch(&tmp.path().join("sub/nested/x.json"));

        let result = match_rule(tmp.path(), &["sub/*.json".to_string()]);
        assert!(result.errors.is_empty());
        assert_eq!(result.candidates.len(), 1);
        assert_eq!(
            result.candidates[0].path,
            tmp.path().join("sub/x.json")
        );
    }

    #[test]
    fn union_across_patterns_is_deduplicated() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("run.log"));
        touch(&tmp.path().join("run.json"));

        let result = match_rule(
            tmp.path(),
            &["*.log".to_string(), "run.*".to_string()],
        );
        let mut names = matched_names(&result);
        names.sort();
        assert_eq!(names, vec!["run.json", "run.log"]);
    }

    #[test]
    fn zero_matches_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = match_rule(tmp.path(), &["*.log".to_string()]);
        assert!(result.candidates.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn malformed_pattern_is_recorded() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("keep.log"));

        let result = match_rule(
            tmp.path(),
            &["[unclosed".to_string(), "*.log".to_string()],
        );
        // Bad pattern recorded; good pattern still matched.
        assert_eq!(result.errors.len(), 1);
        assert_eq!(matched_names(&result), vec!["keep.log"]);
    }

    #[test]
    fn directories_match_as_single_candidates() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("session_1/scratch.txt"));

        let result = match_rule(tmp.path(), &["session_*".to_string()]);
        assert_eq!(result.candidates.len(), 1);
        assert!(result.candidates[0].is_dir);
    }
}
