//! Size-rotated append-only file writer for span export.
//!
//! Before each write the current file size is checked; once it exceeds the
//! limit the file is renamed to `<name>.<timestamp>` and a fresh file is
//! started. Only the newest backups are kept.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold (5 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Number of rotated files to retain.
pub const MAX_BACKUP_FILES: usize = 3;

/// Backup suffix format. Fixed width, so names sort chronologically.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.6f";

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so constructing a writer for
/// a path that is not writable yet never fails.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default limits.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer rotating after `max_bytes` and keeping `max_backups`.
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned or if rotating, opening, writing or
    /// flushing the file fails.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::other("Trace file is not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut backup_path = self.backup_path(&stamp);
        let mut collision = 0;
        while backup_path.exists() {
            collision += 1;
            backup_path = self.backup_path(&format!("{stamp}-{collision}"));
        }

        fs::rename(&self.file_path, &backup_path)?;
        self.cleanup_old_backups()
    }

    fn backup_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Deletes all but the newest `max_backups` rotated files.
    ///
    /// Individual deletion failures are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let mut backups = self.list_backups()?;
        backups.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        for old_backup in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }
        Ok(())
    }

    fn list_backups(&self) -> io::Result<Vec<PathBuf>> {
        let parent_dir = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("Invalid trace file name"))?;

        Ok(fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beerbar-otlp.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line(r#"{"span":1}"#).unwrap();
        writer.write_line(r#"{"span":2}"#).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "{\"span\":1}\n{\"span\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beerbar-otlp.json");
        let writer = FileWriter::with_limits(path.clone(), 64, 2);
        let line = "x".repeat(40);

        for _ in 0..10 {
            writer.write_line(&line).unwrap();
        }

        let backups = writer.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(fs::metadata(&path).unwrap().len() <= 2 * 41);
        for backup in backups {
            assert_eq!(fs::read_to_string(backup).unwrap().lines().count(), 2);
        }
    }

    #[test]
    fn unrelated_files_survive_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beerbar-otlp.json");
        let other = dir.path().join("beerbar-otlp.jsonl");
        fs::write(&other, "keep").unwrap();

        let writer = FileWriter::with_limits(path, 1, 0);
        for _ in 0..4 {
            writer.write_line("line").unwrap();
        }

        assert!(other.exists());
        assert!(writer.list_backups().unwrap().is_empty());
    }
}
