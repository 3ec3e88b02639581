// Countdown study timer alternating study and break sessions

use crate::config::Preferences;
use crate::task::Task;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Study,
    Break,
}

impl SessionKind {
    pub fn next(self) -> Self {
        match self {
            SessionKind::Study => SessionKind::Break,
            SessionKind::Break => SessionKind::Study,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Study => "study",
            SessionKind::Break => "break",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time is advanced explicitly through `tick`, so the timer holds no clock.
#[derive(Debug, Clone)]
pub struct StudyTimer {
    kind: SessionKind,
    study: Duration,
    brk: Duration,
    remaining: Duration,
    running: bool,
    focus: Option<Task>,
}

impl StudyTimer {
    pub fn new(prefs: &Preferences) -> Self {
        let study = Duration::from_secs(u64::from(prefs.study_minutes) * 60);
        Self {
            kind: SessionKind::Study,
            study,
            brk: Duration::from_secs(u64::from(prefs.break_minutes) * 60),
            remaining: study,
            running: false,
            focus: None,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn focus_task(&self) -> Option<&Task> {
        self.focus.as_ref()
    }

    pub fn set_focus_task(&mut self, task: Task) {
        info!(id = %task.id, "Focus task set");
        self.focus = Some(task);
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop and restore the full duration of the current session
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.duration_of(self.kind);
    }

    pub fn set_type(&mut self, kind: SessionKind) {
        self.kind = kind;
        self.reset();
    }

    fn duration_of(&self, kind: SessionKind) -> Duration {
        match kind {
            SessionKind::Study => self.study,
            SessionKind::Break => self.brk,
        }
    }

    /// Advance by `elapsed`. Returns the session that just finished, after
    /// which the timer is stopped at the start of the other session.
    pub fn tick(&mut self, elapsed: Duration) -> Option<SessionKind> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return None;
        }

        let finished = self.kind;
        info!(session = %finished, "Session complete");
        self.set_type(finished.next());
        Some(finished)
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        let secs = self.remaining.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
