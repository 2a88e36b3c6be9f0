//! Size-based rolling log file
//!
//! Writes to `<app_name>.log`; once the file grows past `max_bytes` it is
//! renamed to `<app_name>.1.log` (replacing any previous backup) and a fresh
//! file is started.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, max_bytes: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = current_path(dir, app_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            max_bytes,
            file,
            written,
        })
    }

    pub fn path(&self) -> PathBuf {
        current_path(&self.dir, &self.app_name)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(format!("{}.1.log", self.app_name))
    }

    /// Append one line, rolling first if the line would overflow the limit
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let len = line.len() as u64 + 1;
        if self.written > 0 && self.written + len > self.max_bytes {
            self.roll()?;
        }
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.written += len;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    fn roll(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let current = self.path();
        let backup = self.backup_path();
        if backup.exists() {
            fs::remove_file(&backup)?;
        }
        fs::rename(&current, &backup)?;

        self.file = OpenOptions::new().create(true).append(true).open(&current)?;
        self.written = 0;
        Ok(())
    }
}

fn current_path(dir: &Path, app_name: &str) -> PathBuf {
    dir.join(format!("{}.log", app_name))
}
