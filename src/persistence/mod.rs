// Persistence providers for the task collection

use crate::task::Task;
use eyre::Result;
use std::collections::HashSet;

pub mod jsonl;
pub mod memory;
pub mod sqlite;

pub use jsonl::JsonlProvider;
pub use memory::MemoryProvider;
pub use sqlite::SqliteProvider;

/// Whole-collection storage. There is no partial or merge write.
pub trait PersistenceProvider {
    /// Read every stored task in order. Absent storage yields an empty list.
    fn load_all(&self) -> Result<Vec<Task>>;

    /// Overwrite storage with exactly `tasks`
    fn save_all(&mut self, tasks: &[Task]) -> Result<()>;
}

impl<P: PersistenceProvider + ?Sized> PersistenceProvider for Box<P> {
    fn load_all(&self) -> Result<Vec<Task>> {
        (**self).load_all()
    }

    fn save_all(&mut self, tasks: &[Task]) -> Result<()> {
        (**self).save_all(tasks)
    }
}

/// First id that appears more than once, if any
pub(crate) fn find_duplicate_id(tasks: &[Task]) -> Option<&str> {
    let mut seen = HashSet::new();
    tasks.iter().map(|t| t.id.as_str()).find(|id| !seen.insert(*id))
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::task::{Priority, Status, Task};

    pub fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            notes: String::new(),
            due: None,
            priority: Priority::Medium,
            status: Status::NeedsAction,
        }
    }
}
