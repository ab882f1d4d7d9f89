//! Append-only action log.
//!
//! One JSON object per dispatched action, preceded by a `# {header}`
//! line, so a session can be inspected or replayed afterwards.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use facepoint_common::error::{FacepointError, FacepointResult};
use facepoint_face_model::{Action, ActionLogHeader, TimedAction};

/// Writes actions to a JSONL file.
pub struct ActionWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    actions_written: u64,
}

impl ActionWriter {
    /// Create the log, truncating any existing file, and write the header.
    pub fn new(path: PathBuf, header: &ActionLogHeader) -> FacepointResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}").map_err(|e| {
            FacepointError::pointer(format!("Failed to write action log header: {e}"))
        })?;

        Ok(Self {
            writer,
            path,
            actions_written: 0,
        })
    }

    pub fn write_action(&mut self, t: f64, action: &Action) -> FacepointResult<()> {
        let record = TimedAction { t, action: *action };
        let json = serde_json::to_string(&record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| FacepointError::pointer(format!("Failed to write action: {e}")))?;
        self.actions_written += 1;

        // Moves arrive every frame; flush periodically so a crash loses little.
        if self.actions_written % 300 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> FacepointResult<()> {
        self.writer
            .flush()
            .map_err(|e| FacepointError::pointer(format!("Failed to flush action log: {e}")))
    }

    pub fn actions_written(&self) -> u64 {
        self.actions_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ActionWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
