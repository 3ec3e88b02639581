// SQLite provider: tasks stored as JSON rows ordered by position

use super::{PersistenceProvider, find_duplicate_id};
use crate::task::Task;
use eyre::{Context, Result, eyre};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const DB_FILE: &str = "tasks.db";

pub struct SqliteProvider {
    db: Connection,
}

impl SqliteProvider {
    /// Open or create `tasks.db` inside `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).context("Failed to create data directory")?;

        let db = Connection::open(dir.join(DB_FILE)).context("Failed to open SQLite database")?;
        let provider = Self { db };
        provider.create_schema()?;
        Ok(provider)
    }

    /// Database that lives only as long as the provider
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open SQLite database")?;
        let provider = Self { db };
        provider.create_schema()?;
        Ok(provider)
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating database schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                position INTEGER PRIMARY KEY,
                id TEXT NOT NULL UNIQUE,
                data_json TEXT NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl PersistenceProvider for SqliteProvider {
    fn load_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .db
            .prepare("SELECT id, data_json FROM tasks ORDER BY position")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        let mut tasks = Vec::new();
        for row_result in rows {
            let (id, data_json) = row_result?;
            let task: Task = serde_json::from_str(&data_json)
                .with_context(|| format!("Failed to deserialize task {}", id))?;
            if task.id != id {
                return Err(eyre!("Task row {} holds data for {}", id, task.id));
            }
            tasks.push(task);
        }

        info!(count = tasks.len(), "Loaded tasks from SQLite");
        Ok(tasks)
    }

    fn save_all(&mut self, tasks: &[Task]) -> Result<()> {
        if let Some(id) = find_duplicate_id(tasks) {
            return Err(eyre!("Refusing to save duplicate task id {}", id));
        }

        let tx = self.db.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;

        for (position, task) in tasks.iter().enumerate() {
            let data_json = serde_json::to_string(task).context("Failed to serialize task")?;
            tx.execute(
                "INSERT INTO tasks (position, id, data_json) VALUES (?1, ?2, ?3)",
                rusqlite::params![position as i64, &task.id, data_json],
            )?;
        }

        tx.commit()?;
        debug!(count = tasks.len(), "Saved tasks to SQLite");
        Ok(())
    }
}
