// Derived views recomputed after every mutation

use crate::filter::Filter;
use crate::task::Task;

/// Maximum number of tasks on the dashboard priority list
pub const PRIORITY_VIEW_LIMIT: usize = 5;

/// Named render targets handed to the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewName {
    PrimaryList,
    PriorityList,
    Selector,
}

impl ViewName {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::PrimaryList => "primary-list",
            ViewName::PriorityList => "priority-list",
            ViewName::Selector => "selector",
        }
    }

    /// Label shown when the view has nothing in it
    pub fn empty_message(self) -> &'static str {
        match self {
            ViewName::PrimaryList => "No tasks match your filter",
            ViewName::PriorityList => "No priority tasks",
            ViewName::Selector => "No tasks yet",
        }
    }
}

impl std::fmt::Display for ViewName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tasks matching `filter`, in collection order
pub fn filtered(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Open tasks by descending priority weight, at most five.
///
/// `sort_by_key` is stable, so equal priorities keep collection order.
pub fn priority(tasks: &[Task]) -> Vec<Task> {
    let mut open: Vec<Task> = tasks.iter().filter(|t| !t.is_completed()).cloned().collect();
    open.sort_by_key(|t| std::cmp::Reverse(t.priority.weight()));
    open.truncate(PRIORITY_VIEW_LIMIT);
    open
}

/// Every task, for the focus chooser
pub fn selector(tasks: &[Task]) -> Vec<Task> {
    tasks.to_vec()
}

/// All three views for one render pass, in render order
pub fn compute(tasks: &[Task], filter: Filter) -> [(ViewName, Vec<Task>); 3] {
    [
        (ViewName::PrimaryList, filtered(tasks, filter)),
        (ViewName::PriorityList, priority(tasks)),
        (ViewName::Selector, selector(tasks)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, Status};

    fn task(id: &str, priority: Priority, status: Status) -> Task {
        Task {
            id: id.to_string(),
            title: id.to_uppercase(),
            notes: String::new(),
            due: None,
            priority,
            status,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_priority_view_is_stable() {
        let tasks = vec![
            task("a", Priority::High, Status::NeedsAction),
            task("b", Priority::High, Status::NeedsAction),
            task("c", Priority::Low, Status::NeedsAction),
        ];
        assert_eq!(ids(&priority(&tasks)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_priority_view_orders_by_weight() {
        let tasks = vec![
            task("low", Priority::Low, Status::NeedsAction),
            task("med", Priority::Medium, Status::NeedsAction),
            task("high", Priority::High, Status::NeedsAction),
            task("med2", Priority::Medium, Status::NeedsAction),
        ];
        assert_eq!(ids(&priority(&tasks)), vec!["high", "med", "med2", "low"]);
    }

    #[test]
    fn test_priority_view_excludes_completed_and_caps_at_five() {
        let mut tasks: Vec<Task> = (0..8)
            .map(|i| task(&format!("t{}", i), Priority::Medium, Status::NeedsAction))
            .collect();
        tasks.insert(0, task("done", Priority::High, Status::Completed));

        let view = priority(&tasks);
        assert_eq!(view.len(), PRIORITY_VIEW_LIMIT);
        assert!(view.iter().all(|t| !t.is_completed()));
        assert_eq!(ids(&view), vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_filtered_view_preserves_order() {
        let tasks = vec![
            task("1", Priority::High, Status::NeedsAction),
            task("2", Priority::High, Status::Completed),
            task("3", Priority::Low, Status::NeedsAction),
        ];
        assert_eq!(ids(&filtered(&tasks, Filter::Pending)), vec!["1", "3"]);
        assert_eq!(ids(&filtered(&tasks, Filter::Completed)), vec!["2"]);
        assert_eq!(ids(&filtered(&tasks, Filter::High)), vec!["1", "2"]);
        assert_eq!(ids(&filtered(&tasks, Filter::All)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_compute_render_order() {
        let views = compute(&[], Filter::All);
        let names: Vec<ViewName> = views.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![ViewName::PrimaryList, ViewName::PriorityList, ViewName::Selector]
        );
        assert!(views.iter().all(|(_, tasks)| tasks.is_empty()));
    }

    #[test]
    fn test_view_names() {
        assert_eq!(ViewName::PrimaryList.to_string(), "primary-list");
        assert_eq!(ViewName::PriorityList.empty_message(), "No priority tasks");
    }
}
