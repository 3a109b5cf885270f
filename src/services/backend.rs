//! Filter persistence backends
//!
//! The app loads and saves through the `FilterBackend` trait so the UI
//! can be exercised against a fake in tests. The shipped implementation
//! reads and writes a plain newline-delimited filter file.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Source and sink for the filter line array.
pub trait FilterBackend: Send + Sync {
    /// Load the current filter lines. Called once per app lifetime.
    fn load(&self) -> Result<Vec<String>>;

    /// Persist the exported filter lines.
    fn save(&self, lines: &[String]) -> Result<()>;

    /// Human-readable location, shown in the header.
    fn describe(&self) -> String;
}

/// Newline-delimited filter file on disk.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FilterBackend for FileBackend {
    fn load(&self) -> Result<Vec<String>> {
        // A missing file is a first run, not an error.
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        Ok(contents.lines().map(str::to_string).collect())
    }

    fn save(&self, lines: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let mut contents = lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }

        fs::write(&self.path, contents)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("filters.txt"));
        assert_eq!(backend.load().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("filters.txt"));

        let lines = vec![
            "+ /home/user/saves".to_string(),
            "- /home/user/cache".to_string(),
            "arbitrary".to_string(),
        ];
        backend.save(&lines).unwrap();
        assert_eq!(backend.load().unwrap(), lines);
    }

    #[test]
    fn test_save_empty_list_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("filters.txt"));

        backend.save(&[]).unwrap();
        assert_eq!(backend.load().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested/deeper/filters.txt"));

        backend.save(&["+ /a".to_string()]).unwrap();
        assert_eq!(backend.load().unwrap(), vec!["+ /a".to_string()]);
    }

    #[test]
    fn test_file_ends_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.txt");
        let backend = FileBackend::new(&path);

        backend.save(&["+ /a".to_string()]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "+ /a\n");
    }
}
