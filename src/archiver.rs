use crate::deleter;
use crate::error::SweepError;
use crate::matcher::Candidate;
use crate::report::RuleError;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// What one archive invocation did. `archive` is `None` when there was
/// nothing to archive.
#[derive(Debug)]
pub struct ArchiveOutcome {
    pub archive: Option<PathBuf>,
    pub removed: usize,
    pub bytes_freed: u64,
    pub errors: Vec<RuleError>,
}

impl ArchiveOutcome {
    fn noop() -> Self {
        ArchiveOutcome {
            archive: None,
            removed: 0,
            bytes_freed: 0,
            errors: Vec::new(),
        }
    }
}

/// Compress the eligible entries into one ZIP container, then remove the
/// originals.
///
/// The container lands at `<archive_root>/<group>/<rule_name>_<stamp>.zip`,
/// where `stamp` comes from the sweep's injected clock. Entries are stored
/// under their path relative to `base_path`, so the original layout can be
/// recovered on extraction. An existing container at the destination is
/// overwritten; the previous sweep's output is covered by its own
/// archive-expiry rule.
///
/// Originals are only removed after the container has been fully written,
/// synced, and renamed into place. If the write fails, every original
/// stays put and the next sweep retries on the same candidates.
pub fn archive(
    group: &str,
    rule_name: &str,
    base_path: &Path,
    eligible: &[Candidate],
    archive_root: &Path,
    stamp: DateTime<Utc>,
) -> Result<ArchiveOutcome, SweepError> {
    if eligible.is_empty() {
        return Ok(ArchiveOutcome::noop());
    }

    let dest_dir = archive_root.join(group);
    std::fs::create_dir_all(&dest_dir).map_err(|e| {
        SweepError::Archive(format!("cannot create {}: {e}", dest_dir.display()))
    })?;

    let file_name = format!("{rule_name}_{}.zip", stamp.format("%Y%m%dT%H%M%S"));
    let dest = dest_dir.join(&file_name);
    let tmp = dest_dir.join(format!(".{file_name}.tmp"));

    if let Err(e) = write_container(&tmp, base_path, eligible) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    std::fs::rename(&tmp, &dest).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        SweepError::Archive(format!("cannot move container to {}: {e}", dest.display()))
    })?;
    info!("zip created: {}", dest.display());

    // Only now do the originals go.
    let mut outcome = ArchiveOutcome::noop();
    outcome.archive = Some(dest);
    for candidate in eligible {
        match deleter::delete(&candidate.path) {
            Ok(freed) => {
                outcome.removed += 1;
                outcome.bytes_freed += freed;
                info!("removed after archiving: {}", candidate.path.display());
            }
            Err(cause) => outcome.errors.push(RuleError {
                path: Some(candidate.path.clone()),
                cause,
            }),
        }
    }
    Ok(outcome)
}

fn write_container(
    tmp: &Path,
    base_path: &Path,
    eligible: &[Candidate],
) -> Result<(), SweepError> {
    let file = File::create(tmp)
        .map_err(|e| SweepError::Archive(format!("cannot create {}: {e}", tmp.display())))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for candidate in eligible {
        if candidate.is_dir {
            for entry in WalkDir::new(&candidate.path)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() {
                    add_file(&mut zip, entry.path(), base_path, options)?;
                } else if entry.file_type().is_dir() {
                    zip.add_directory(entry_name(entry.path(), base_path), options)
                        .map_err(|e| SweepError::Archive(e.to_string()))?;
                }
            }
        } else {
            add_file(&mut zip, &candidate.path, base_path, options)?;
        }
    }

    let file = zip
        .finish()
        .map_err(|e| SweepError::Archive(format!("cannot finish container: {e}")))?;
    file.sync_all()
        .map_err(|e| SweepError::Archive(format!("cannot sync container: {e}")))?;
    Ok(())
}

fn add_file(
    zip: &mut ZipWriter<File>,
    path: &Path,
    base_path: &Path,
    options: SimpleFileOptions,
) -> Result<(), SweepError> {
    zip.start_file(entry_name(path, base_path), options)
        .map_err(|e| SweepError::Archive(e.to_string()))?;
    let mut source = File::open(path)
        .map_err(|e| SweepError::Archive(format!("cannot read {}: {e}", path.display())))?;
    io::copy(&mut source, zip)
        .map_err(|e| SweepError::Archive(format!("cannot copy {}: {e}", path.display())))?;
    Ok(())
}

/// Name inside the container: the entry's path relative to the rule's
/// base directory.
fn entry_name(path: &Path, base_path: &Path) -> String {
    path.strip_prefix(base_path)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher;
    use tempfile::TempDir;

    fn candidates_for(base: &Path, pattern: &str) -> Vec<Candidate> {
        matcher::match_rule(base, &[pattern.to_string()]).candidates
    }

    #[test]
    fn empty_set_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let outcome = archive(
            "combiner",
            "holding_tank",
            tmp.path(),
            &[],
            &tmp.path().join("archive"),
            Utc::now(),
        )
        .unwrap();
        assert!(outcome.archive.is_none());
        assert_eq!(outcome.removed, 0);
        assert!(!tmp.path().join("archive").exists());
    }

    #[test]
    fn container_preserves_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base");
        std::fs::create_dir_all(base.join("run_7")).unwrap();
        std::fs::write(base.join("run_7/out.txt"), b"payload").unwrap();

        let eligible = candidates_for(&base, "run_*");
        let outcome = archive(
            "processor",
            "runs",
            &base,
            &eligible,
            &tmp.path().join("archive"),
            Utc::now(),
        )
        .unwrap();

        let container = outcome.archive.unwrap();
        let mut zip = zip::ZipArchive::new(File::open(&container).unwrap()).unwrap();
        assert!(zip.by_name("run_7/out.txt").is_ok());
        // Originals removed only after the container exists.
        assert!(!base.join("run_7").exists());
        assert_eq!(outcome.removed, 1);
    }

    #[test]
    fn failed_write_preserves_originals() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("keep.csv"), b"data").unwrap();

        // archive_root under a plain file: create_dir_all must fail.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let eligible = candidates_for(&base, "*.csv");
        let err = archive(
            "reporter",
            "reports",
            &base,
            &eligible,
            &blocker.join("archive"),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, SweepError::Archive(_)));
        assert!(base.join("keep.csv").exists());
    }

    #[test]
    fn collision_overwrites_previous_container() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base");
        std::fs::create_dir_all(&base).unwrap();
        std::fs::write(base.join("a.log"), b"first").unwrap();

        let stamp = Utc::now();
        let root = tmp.path().join("archive");
        let first = archive("c", "logs", &base, &candidates_for(&base, "*.log"), &root, stamp)
            .unwrap()
            .archive
            .unwrap();

        std::fs::write(base.join("b.log"), b"second").unwrap();
        let second = archive("c", "logs", &base, &candidates_for(&base, "*.log"), &root, stamp)
            .unwrap()
            .archive
            .unwrap();

        assert_eq!(first, second);
        let mut zip = zip::ZipArchive::new(File::open(&second).unwrap()).unwrap();
        assert!(zip.by_name("b.log").is_ok());
        assert!(zip.by_name("a.log").is_err());
    }
}
