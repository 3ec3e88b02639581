// Presentation boundary: rendering views and showing notifications

use crate::task::{Priority, Task};
use crate::views::ViewName;
use chrono::NaiveDate;
use colored::Colorize;
use std::io::Write;
use tracing::warn;

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
    Info,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Info => "info",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Called by the store after every state change
pub trait Presenter {
    /// Replace the contents of `view` with `tasks`, or show `empty_message` if there are none
    fn render_view(&mut self, view: ViewName, tasks: &[Task], empty_message: &str);

    fn notify(&mut self, message: &str, level: Level);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn render_view(&mut self, view: ViewName, tasks: &[Task], empty_message: &str) {
        (**self).render_view(view, tasks, empty_message)
    }

    fn notify(&mut self, message: &str, level: Level) {
        (**self).notify(message, level)
    }
}

/// Writes selected views as text, one task per line
pub struct TerminalPresenter<W: Write> {
    out: W,
    visible: Vec<ViewName>,
    today: NaiveDate,
}

impl<W: Write> TerminalPresenter<W> {
    /// Presenter showing only the primary list
    pub fn new(out: W) -> Self {
        Self {
            out,
            visible: vec![ViewName::PrimaryList],
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Choose which views are printed; the others are ignored
    pub fn with_views(mut self, views: &[ViewName]) -> Self {
        self.set_views(views);
        self
    }

    pub fn set_views(&mut self, views: &[ViewName]) {
        self.visible = views.to_vec();
    }

    /// Date used for overdue markers
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_task(&self, task: &Task) -> String {
        let check = if task.is_completed() { "[x]" } else { "[ ]" };
        let title = if task.is_completed() {
            task.title.dimmed().to_string()
        } else {
            task.title.bold().to_string()
        };
        let priority = match task.priority {
            Priority::High => task.priority.as_str().red().to_string(),
            Priority::Medium => task.priority.as_str().yellow().to_string(),
            Priority::Low => task.priority.as_str().green().to_string(),
        };
        let len = task.id.chars().count();
        let short_id: String = task.id.chars().skip(len.saturating_sub(8)).collect();

        let mut line = format!("{} {} {} ({})", check, title, priority, short_id.dimmed());
        if let Some(due) = task.due {
            line.push_str(&format!(" due {}", due.format("%Y-%m-%d")));
            if task.is_overdue(self.today) {
                line.push_str(&format!(" {}", "(Overdue)".red()));
            }
        }
        if !task.notes.is_empty() {
            line.push_str(&format!("\n      {}", task.notes.dimmed()));
        }
        line
    }

    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            if let Err(e) = writeln!(self.out, "{}", line) {
                warn!(error = ?e, "Failed to write to terminal");
                return;
            }
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_view(&mut self, view: ViewName, tasks: &[Task], empty_message: &str) {
        if !self.visible.contains(&view) {
            return;
        }

        let mut lines = vec![format!("== {} ==", view).cyan().bold().to_string()];
        if tasks.is_empty() {
            lines.push(format!("  {}", empty_message.italic()));
        } else {
            lines.extend(tasks.iter().map(|t| format!("  {}", self.format_task(t))));
        }
        self.write_lines(&lines);
    }

    fn notify(&mut self, message: &str, level: Level) {
        let line = match level {
            Level::Success => message.green().to_string(),
            Level::Warning => message.yellow().to_string(),
            Level::Error => message.red().bold().to_string(),
            Level::Info => message.normal().to_string(),
        };
        self.write_lines(&[line]);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;

    fn task(title: &str, due: Option<NaiveDate>, status: Status) -> Task {
        Task {
            id: "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b".to_string(),
            title: title.to_string(),
            notes: String::new(),
            due,
            priority: Priority::High,
            status,
        }
    }

    fn render(presenter: TerminalPresenter<Vec<u8>>, tasks: &[Task], view: ViewName) -> String {
        colored::control::set_override(false);
        let mut presenter = presenter;
        presenter.render_view(view, tasks, view.empty_message());
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_renders_empty_message() {
        let output = render(TerminalPresenter::new(Vec::new()), &[], ViewName::PrimaryList);
        assert!(output.contains("== primary-list =="));
        assert!(output.contains("No tasks match your filter"));
    }

    #[test]
    fn test_hidden_views_are_skipped() {
        let output = render(TerminalPresenter::new(Vec::new()), &[], ViewName::Selector);
        assert!(output.is_empty());
    }

    #[test]
    fn test_overdue_marker() {
        let today = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 5, 1);
        let presenter = TerminalPresenter::new(Vec::new()).with_today(today);
        let output = render(presenter, &[task("Lab report", due, Status::NeedsAction)], ViewName::PrimaryList);
        assert!(output.contains("[ ] Lab report high (2e3f4a5b) due 2026-05-01 (Overdue)"));

        let presenter = TerminalPresenter::new(Vec::new()).with_today(today);
        let output = render(presenter, &[task("Lab report", due, Status::Completed)], ViewName::PrimaryList);
        assert!(output.contains("[x] Lab report"));
        assert!(!output.contains("Overdue"));
    }

    #[test]
    fn test_notify_writes_message() {
        colored::control::set_override(false);
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.notify("Task created!", Level::Success);
        let output = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(output, "Task created!\n");
    }
}
