// Task data model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A single actionable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// True when the due date has passed and the task is still open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due.is_some_and(|due| due < today)
    }

    /// Apply a patch in place. The id is never touched.
    fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.trim().to_string();
        }
        if let Some(due) = patch.due {
            self.due = due;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }

    /// Copy of this task with `patch` applied
    pub fn patched(&self, patch: &TaskPatch) -> Task {
        let mut task = self.clone();
        task.apply(patch);
        task
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort weight for the priority view. Medium is also the fallback for
    /// anything unrecognized, so creation and sorting agree.
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse a stored or user-supplied label; unknown labels become medium
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Priority::from_label(&label))
    }
}

// `null` in stored data is treated like an absent priority
fn deserialize_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Priority, D::Error> {
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label.as_deref().map(Priority::from_label).unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "needsAction")]
    NeedsAction,
    #[serde(rename = "completed")]
    Completed,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::NeedsAction => Status::Completed,
            Status::Completed => Status::NeedsAction,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::NeedsAction => "needsAction",
            Status::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User input for a new task. Only the title is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub notes: Option<String>,
    pub due: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Trimmed title, or None if nothing is left after trimming
    pub fn trimmed_title(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }

    /// Build a task with every default applied. Callers validate the title first.
    pub(crate) fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            notes: self.notes.map(|n| n.trim().to_string()).unwrap_or_default(),
            due: self.due,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
        }
    }

    /// The edit form submits every field, so an absent due date clears it
    /// and an absent status reopens the task. Priority is only changed when given.
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title),
            notes: Some(self.notes.unwrap_or_default()),
            due: Some(self.due),
            priority: self.priority,
            status: Some(self.status.unwrap_or_default()),
        }
    }
}

/// Partial update. `None` leaves the field untouched; `due: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub due: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

/// Mint a new task id (time-ordered UUID)
pub fn new_task_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task {
            id: "t1".to_string(),
            title: "Read chapter 4".to_string(),
            notes: "".to_string(),
            due: NaiveDate::from_ymd_opt(2026, 3, 1),
            priority: Priority::High,
            status: Status::NeedsAction,
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&Status::NeedsAction).unwrap(), "\"needsAction\"");
        assert_eq!(serde_json::to_string(&Status::Completed).unwrap(), "\"completed\"");
    }

    #[test]
    fn test_task_serialization_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"due\":\"2026-03-01\""));
        assert!(json.contains("\"priority\":\"high\""));
        assert!(json.contains("\"status\":\"needsAction\""));
    }

    #[test]
    fn test_unknown_or_missing_priority_is_medium() {
        let task: Task = serde_json::from_str(r#"{"id":"a","title":"A","priority":"urgent","status":"completed"}"#).unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.notes, "");
        assert_eq!(task.due, None);

        let task: Task = serde_json::from_str(r#"{"id":"b","title":"B","status":"needsAction"}"#).unwrap();
        assert_eq!(task.priority, Priority::Medium);

        let task: Task = serde_json::from_str(r#"{"id":"c","title":"C","priority":null,"status":"needsAction"}"#).unwrap();
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_priority_weights() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);
        assert_eq!(Priority::from_label(" HIGH "), Priority::High);
        assert_eq!(Priority::from_label("whatever"), Priority::Medium);
    }

    #[test]
    fn test_draft_defaults() {
        let task = TaskDraft::new("  Write essay ").into_task("x".to_string());
        assert_eq!(task.title, "Write essay");
        assert_eq!(task.notes, "");
        assert_eq!(task.due, None);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::NeedsAction);
    }

    #[test]
    fn test_trimmed_title() {
        assert_eq!(TaskDraft::new("   ").trimmed_title(), None);
        assert_eq!(TaskDraft::new(" a ").trimmed_title(), Some("a"));
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let task = sample();
        assert_eq!(task.patched(&TaskPatch::default()), task);
    }

    #[test]
    fn test_draft_patch_reopens_unless_status_given() {
        let patch = TaskDraft::new("Essay").into_patch();
        assert_eq!(patch.status, Some(Status::NeedsAction));
        assert_eq!(patch.priority, None);

        let patch = TaskDraft::new("Essay").status(Status::Completed).into_patch();
        assert_eq!(patch.status, Some(Status::Completed));
    }

    #[test]
    fn test_patch_can_clear_due_date() {
        let patch = TaskPatch {
            due: Some(None),
            ..Default::default()
        };
        assert_eq!(sample().patched(&patch).due, None);
    }

    #[test]
    fn test_overdue() {
        let mut task = sample();
        let after = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let before = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert!(task.is_overdue(after));
        assert!(!task.is_overdue(before));
        task.status = Status::Completed;
        assert!(!task.is_overdue(after));
    }

    #[test]
    fn test_status_toggled() {
        assert_eq!(Status::NeedsAction.toggled(), Status::Completed);
        assert_eq!(Status::Completed.toggled().toggled(), Status::Completed);
    }

    #[test]
    fn test_new_task_id_unique() {
        assert_ne!(new_task_id(), new_task_id());
    }
}
