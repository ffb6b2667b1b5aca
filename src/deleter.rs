use crate::error::SweepError;
use crate::utils;
use std::io;
use std::path::Path;

/// Remove a file or directory tree. Returns bytes freed on success.
///
/// An entry that vanished between matching and removal counts as success:
/// a racing producer got there first and the desired end state already
/// holds.
pub fn delete(path: &Path) -> Result<u64, SweepError> {
    let size = utils::entry_size(path);
    let outcome = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match outcome {
        Ok(()) => Ok(size),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(SweepError::Delete {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn deletes_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("stale.log");
        std::fs::write(&file, b"old").unwrap();

        let freed = delete(&file).unwrap();
        assert_eq!(freed, 3);
        assert!(!file.exists());
    }

    #[test]
    fn deletes_a_directory_tree() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("session_0042");
        std::fs::create_dir_all(dir.join("inner")).unwrap();
        std::fs::write(dir.join("inner/scratch.txt"), b"xyz").unwrap();

        delete(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn vanished_entry_is_success() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("already-removed.log");
        assert_eq!(delete(&gone).unwrap(), 0);
    }
}
