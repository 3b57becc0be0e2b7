//! Size-rotated append-only log file.
//!
//! The live file is `<name>`; rotated generations are `<name>.1` (newest)
//! through `<name>.<max_backups>` (oldest). Rotation shifts every generation up
//! by one and drops whatever falls off the end.
//!
//! ```text
//! before:  trace.json (full)   trace.json.1   trace.json.2   trace.json.3
//! after:   trace.json (new)    trace.json.1   trace.json.2   trace.json.3
//!                               ↑ old live     ↑ old .1       ↑ old .2   (old .3 removed)
//! ```
//!
//! The size check runs before each write, so a single line is never split
//! across files and the live file can exceed the limit by at most one line.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// When to rotate and how many generations to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Size at which the live file is rotated before the next write.
    pub max_bytes: u64,

    /// Rotated generations kept. Zero truncates the live file instead.
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MiB per file, 3 backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Line writer that rotates its file once it grows past the policy limit.
///
/// The handle is opened lazily and shared behind a mutex, so one writer can
/// serve the exporter from any thread.
pub struct RotatingFile {
    path: PathBuf,
    policy: RotationPolicy,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    /// Creates a writer for `path`. Nothing is opened until the first write.
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            file: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Any I/O failure while rotating, opening or writing.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut slot = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        let size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if size >= self.policy.max_bytes {
            *slot = None;
            self.rotate()?;
        }

        let file = match slot.take() {
            Some(file) => file,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let file = slot.insert(file);

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn backup_path(&self, generation: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{generation}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        let oldest = self.backup_path(self.policy.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for generation in (1..self.policy.max_backups).rev() {
            let from = self.backup_path(generation);
            if from.exists() {
                fs::rename(&from, self.backup_path(generation + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, self.backup_path(1))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
