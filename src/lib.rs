// TaskDeck - task list with pluggable persistence, derived views and a study timer

pub mod config;
pub mod error;
pub mod filter;
pub mod persistence;
pub mod presenter;
pub mod store;
pub mod task;
pub mod timer;
pub mod views;

// Re-export main types for convenience
pub use config::{Backend, Config, Preferences};
pub use error::TaskError;
pub use filter::Filter;
pub use persistence::{JsonlProvider, MemoryProvider, PersistenceProvider, SqliteProvider};
pub use presenter::{Level, Presenter, TerminalPresenter};
pub use store::{EditSession, TaskStore};
pub use task::{Priority, Status, Task, TaskDraft, TaskPatch};
pub use timer::{SessionKind, StudyTimer};
pub use views::ViewName;
