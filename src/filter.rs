// View filtering for the task list

use crate::error::TaskError;
use crate::task::{Priority, Task};
use std::str::FromStr;

/// Named predicate selecting which tasks the primary list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
    High,
}

impl Filter {
    pub const ALL: [Filter; 4] = [Filter::All, Filter::Pending, Filter::Completed, Filter::High];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.is_completed(),
            Filter::Completed => task.is_completed(),
            Filter::High => task.priority == Priority::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
            Filter::High => "high",
        }
    }
}

impl FromStr for Filter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| TaskError::Validation(format!("Unknown filter: {}", s)))
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;

    fn task(status: Status, priority: Priority) -> Task {
        Task {
            id: "t".to_string(),
            title: "T".to_string(),
            notes: String::new(),
            due: None,
            priority,
            status,
        }
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<Filter>().unwrap(), Filter::All);
        assert_eq!("pending".parse::<Filter>().unwrap(), Filter::Pending);
        assert_eq!("completed".parse::<Filter>().unwrap(), Filter::Completed);
        assert_eq!("high".parse::<Filter>().unwrap(), Filter::High);
    }

    #[test]
    fn test_filter_parse_rejects_unknown() {
        let err = "urgent".parse::<Filter>().unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert!("All".parse::<Filter>().is_err());
        assert!("".parse::<Filter>().is_err());
    }

    #[test]
    fn test_filter_predicates() {
        let open_high = task(Status::NeedsAction, Priority::High);
        let done_low = task(Status::Completed, Priority::Low);

        assert!(Filter::All.matches(&open_high) && Filter::All.matches(&done_low));
        assert!(Filter::Pending.matches(&open_high));
        assert!(!Filter::Pending.matches(&done_low));
        assert!(Filter::Completed.matches(&done_low));
        assert!(!Filter::Completed.matches(&open_high));
        assert!(Filter::High.matches(&open_high));
        assert!(!Filter::High.matches(&done_low));
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::Pending.to_string(), "pending");
        assert_eq!(Filter::default(), Filter::All);
    }
}
