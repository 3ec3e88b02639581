// Task store: canonical collection, filter, edit session and re-rendering

use crate::error::{Result, TaskError};
use crate::filter::Filter;
use crate::persistence::{PersistenceProvider, find_duplicate_id};
use crate::presenter::{Level, Presenter};
use crate::task::{Task, TaskDraft, TaskPatch, new_task_id};
use crate::views;
use tracing::{debug, info, warn};

const EMPTY_TITLE: &str = "Please enter a task title";

/// Whether the save action edits an existing task or creates a new one.
///
/// The id is present exactly when editing, and always names a task in the
/// store's collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    editing: Option<String>,
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn editing_task_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }
}

/// Owns the task collection. Every mutation persists the whole collection,
/// reloads it from the provider and re-renders all views before returning.
pub struct TaskStore<P: PersistenceProvider, R: Presenter> {
    provider: P,
    presenter: R,
    tasks: Vec<Task>,
    filter: Filter,
    edit: EditSession,
}

impl<P: PersistenceProvider, R: Presenter> TaskStore<P, R> {
    /// Create an empty store. Call `load` to read from the provider.
    pub fn new(provider: P, presenter: R) -> Self {
        Self {
            provider,
            presenter,
            tasks: Vec::new(),
            filter: Filter::default(),
            edit: EditSession::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn presenter(&self) -> &R {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut R {
        &mut self.presenter
    }

    // ========================================================================
    // Caller-facing operations
    // ========================================================================

    /// Replace the collection with what the provider holds and re-render.
    /// On failure the current collection is kept.
    pub fn load(&mut self) -> Result<()> {
        let result = self.read_provider();
        let tasks = self.reported(result, "Failed to load tasks")?;

        info!(count = tasks.len(), "Loaded tasks");
        self.replace_tasks(tasks);
        Ok(())
    }

    /// Add a new task built from `draft` with defaults applied
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let result = self.try_create(draft);
        self.reported(result, "Failed to save task")
    }

    /// Apply `patch` to the task with `id`. The id itself never changes.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let result = self.try_update(id, patch);
        self.reported(result, "Failed to update task")
    }

    /// Flip the task between completed and needs-action
    pub fn toggle(&mut self, id: &str) -> Result<Task> {
        let result = match self.lookup(id).map(|t| t.status) {
            Some(status) => self.try_update(id, TaskPatch::status(status.toggled())),
            None => Err(TaskError::NotFound(id.to_string())),
        };
        let task = self.reported(result, "Failed to update task")?;

        let message = if task.is_completed() {
            "Task completed! 🎉"
        } else {
            "Task marked as pending"
        };
        self.presenter.notify(message, Level::Success);
        Ok(task)
    }

    /// Remove the task with `id`. The caller is responsible for confirming with the user.
    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let result = self.try_delete(id);
        let task = self.reported(result, "Failed to delete task")?;
        self.presenter.notify("Task deleted", Level::Success);
        Ok(task)
    }

    /// Change the active filter by name and re-render. Unknown names leave it unchanged.
    pub fn set_filter(&mut self, value: &str) -> Result<()> {
        let result = value.parse::<Filter>();
        let filter = self.reported(result, "Failed to change filter")?;

        debug!(filter = %filter, "Filter changed");
        self.filter = filter;
        self.render();
        Ok(())
    }

    /// Start editing the task with `id`; the next `save` updates it
    pub fn begin_edit(&mut self, id: &str) -> Result<Task> {
        let result = self
            .lookup(id)
            .cloned()
            .ok_or_else(|| TaskError::NotFound(id.to_string()));
        let task = self.reported(result, "Task not found")?;

        self.edit.editing = Some(task.id.clone());
        Ok(task)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditSession::default();
    }

    pub fn lookup(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Single save action for the task form: updates the task being edited,
    /// or creates a new one. The edit session is kept if the save fails.
    pub fn save(&mut self, draft: TaskDraft) -> Result<Task> {
        let (result, message) = match self.edit.editing.clone() {
            Some(id) => (self.try_update(&id, draft.into_patch()), "Task updated!"),
            None => (self.try_create(draft), "Task created!"),
        };
        let task = self.reported(result, "Failed to save task")?;

        self.cancel_edit();
        self.presenter.notify(message, Level::Success);
        Ok(task)
    }

    /// Pick a task to study on
    pub fn focus(&mut self, id: &str) -> Result<Task> {
        let result = self
            .lookup(id)
            .cloned()
            .ok_or_else(|| TaskError::NotFound(id.to_string()));
        let task = self.reported(result, "Task not found")?;

        self.presenter
            .notify(&format!("Focusing on: {}", task.title), Level::Success);
        Ok(task)
    }

    // ========================================================================
    // Mutations without notifications
    // ========================================================================

    fn try_create(&mut self, draft: TaskDraft) -> Result<Task> {
        if draft.trimmed_title().is_none() {
            return Err(TaskError::Validation(EMPTY_TITLE.to_string()));
        }

        let mut id = new_task_id();
        while self.lookup(&id).is_some() {
            id = new_task_id();
        }
        let task = draft.into_task(id);

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next)?;

        info!(id = %task.id, title = %task.title, "Created task");
        Ok(task)
    }

    fn try_update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let index = self.index_of(id)?;
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TaskError::Validation(EMPTY_TITLE.to_string()));
        }

        let task = self.tasks[index].patched(&patch);
        let mut next = self.tasks.clone();
        next[index] = task.clone();
        self.commit(next)?;

        info!(id, "Updated task");
        Ok(task)
    }

    fn try_delete(&mut self, id: &str) -> Result<Task> {
        let index = self.index_of(id)?;

        let mut next = self.tasks.clone();
        let task = next.remove(index);
        self.commit(next)?;

        info!(id, "Deleted task");
        Ok(task)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn index_of(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    fn read_provider(&self) -> Result<Vec<Task>> {
        let tasks = self.provider.load_all().map_err(TaskError::persistence)?;
        if let Some(id) = find_duplicate_id(&tasks) {
            return Err(TaskError::Persistence(format!("Duplicate task id in storage: {}", id)));
        }
        Ok(tasks)
    }

    /// Persist `next`, then reload from the provider. The in-memory
    /// collection only changes once the save has succeeded.
    fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        self.provider.save_all(&next).map_err(TaskError::persistence)?;

        let tasks = match self.read_provider() {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "Reload after save failed, keeping saved collection");
                next
            }
        };
        self.replace_tasks(tasks);
        Ok(())
    }

    fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;

        if let Some(id) = self.edit.editing_task_id()
            && self.lookup(id).is_none()
        {
            debug!(id, "Edited task is gone, ending edit session");
            self.edit = EditSession::default();
        }

        self.render();
    }

    fn render(&mut self) {
        for (view, tasks) in views::compute(&self.tasks, self.filter) {
            self.presenter.render_view(view, &tasks, view.empty_message());
        }
    }

    /// Turn a failure into a notification; the error is still returned.
    fn reported<T>(&mut self, result: Result<T>, failure: &str) -> Result<T> {
        if let Err(e) = &result {
            warn!(error = %e, "{}", failure);
            match e {
                TaskError::Validation(message) => self.presenter.notify(message, Level::Warning),
                _ => self.presenter.notify(failure, Level::Error),
            }
        }
        result
    }
}
