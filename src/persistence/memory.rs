// In-process provider, used for ephemeral sessions and tests

use super::PersistenceProvider;
use crate::task::Task;
use eyre::{Result, eyre};

#[derive(Debug, Default)]
pub struct MemoryProvider {
    tasks: Vec<Task>,
    fail_reads: bool,
    fail_writes: bool,
    saves: usize,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-loaded with `tasks`
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Make subsequent reads fail, as if storage were corrupt
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make subsequent writes fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// What is currently stored
    pub fn stored(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of successful `save_all` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PersistenceProvider for MemoryProvider {
    fn load_all(&self) -> Result<Vec<Task>> {
        if self.fail_reads {
            return Err(eyre!("Memory storage is unreadable"));
        }
        Ok(self.tasks.clone())
    }

    fn save_all(&mut self, tasks: &[Task]) -> Result<()> {
        if self.fail_writes {
            return Err(eyre!("Memory storage is read-only"));
        }
        self.tasks = tasks.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::testing::task;

    #[test]
    fn test_memory_round_trip() {
        let mut provider = MemoryProvider::new();
        assert!(provider.load_all().unwrap().is_empty());

        provider.save_all(&[task("a", "A"), task("b", "B")]).unwrap();
        let loaded = provider.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(provider.save_count(), 1);
    }

    #[test]
    fn test_memory_failures() {
        let mut provider = MemoryProvider::with_tasks(vec![task("a", "A")]);
        provider.set_fail_reads(true);
        assert!(provider.load_all().is_err());

        provider.set_fail_writes(true);
        assert!(provider.save_all(&[]).is_err());
        assert_eq!(provider.stored().len(), 1);
        assert_eq!(provider.save_count(), 0);
    }
}
