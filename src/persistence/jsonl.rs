// JSONL file provider: one task per line, rewritten whole on every save

use super::{PersistenceProvider, find_duplicate_id};
use crate::task::Task;
use eyre::{Context, Result, eyre};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const TASKS_FILE: &str = "tasks.jsonl";

#[derive(Debug, Clone)]
pub struct JsonlProvider {
    path: PathBuf,
}

impl JsonlProvider {
    /// Provider storing `tasks.jsonl` inside `dir`, creating the directory if needed
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).context("Failed to create data directory")?;
        Ok(Self {
            path: dir.join(TASKS_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_file(&self) -> Result<File> {
        let lock_path = self.path.with_extension("jsonl.lock");
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .context("Failed to open lock file")
    }
}

impl PersistenceProvider for JsonlProvider {
    fn load_all(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            debug!(file = ?self.path, "No tasks file yet");
            return Ok(Vec::new());
        }

        let lock = self.lock_file()?;
        lock.lock_shared().context("Failed to acquire file lock")?;

        let tasks = read_tasks(&self.path)?;
        if let Some(id) = find_duplicate_id(&tasks) {
            return Err(eyre!("Duplicate task id {} in {:?}", id, self.path));
        }

        info!(file = ?self.path, count = tasks.len(), "Loaded tasks from JSONL");
        Ok(tasks)
    }

    fn save_all(&mut self, tasks: &[Task]) -> Result<()> {
        let lock = self.lock_file()?;
        lock.lock_exclusive().context("Failed to acquire file lock")?;

        // Write aside and rename so a failed write never truncates the live file
        let tmp_path = self.path.with_extension("jsonl.tmp");
        let written = write_tasks(&tmp_path, tasks)
            .and_then(|()| fs::rename(&tmp_path, &self.path).context("Failed to replace tasks file"));
        if let Err(e) = written {
            if let Err(rm) = fs::remove_file(&tmp_path) {
                debug!(file = ?tmp_path, error = ?rm, "No temporary file to remove");
            }
            return Err(e);
        }

        debug!(file = ?self.path, count = tasks.len(), "Saved tasks to JSONL");
        Ok(())
    }
}

/// Read every task from a JSONL file. Blank lines are skipped; anything
/// unparseable fails the whole read.
pub fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    let file = File::open(path).context("Failed to open JSONL file")?;
    let reader = BufReader::new(file);
    let mut tasks = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of {:?}", line_num + 1, path))?;
        if line.trim().is_empty() {
            continue;
        }

        let task: Task = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse line {} of {:?}", line_num + 1, path))?;
        tasks.push(task);
    }

    Ok(tasks)
}

/// Write `tasks` to `path`, one JSON object per line, and flush to disk
pub fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    let file = File::create(path).context("Failed to create JSONL file")?;
    let mut writer = BufWriter::new(file);

    for task in tasks {
        let json = serde_json::to_string(task)?;
        writeln!(writer, "{}", json)?;
    }

    let file = writer.into_inner().map_err(|e| eyre!("Failed to flush JSONL file: {}", e))?;
    file.sync_all()?;
    Ok(())
}
