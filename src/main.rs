use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use eyre::{Result, eyre};
use std::io::{self, Stdout};
use std::path::PathBuf;
use taskdeck::{
    Backend, Config, PersistenceProvider, Priority, StudyTimer, TaskDraft, TaskStore, TerminalPresenter, ViewName,
};
use tracing_subscriber::EnvFilter;

type CliStore = TaskStore<Box<dyn PersistenceProvider>, TerminalPresenter<Stdout>>;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "TaskDeck - task list dashboard with a study timer")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: <config dir>/taskdeck/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the task data
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tasks
    List {
        /// One of: all, pending, completed, high
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Also show the top priority tasks
        #[arg(long)]
        dashboard: bool,
    },

    /// Create a task
    Add {
        title: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },

    /// Edit an existing task; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        #[arg(long)]
        clear_due: bool,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },

    /// Mark a task completed, or pending again
    Toggle { id: String },

    /// Delete a task
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// Show one task in full
    Show { id: String },

    /// Pick a task to study on and set up the timer
    Focus { id: String },

    /// Show or change study preferences
    Prefs {
        #[arg(long)]
        study: Option<u32>,
        #[arg(long = "break")]
        break_minutes: Option<u32>,
    },
}

fn parse_priority(s: &str) -> std::result::Result<Priority, String> {
    match s {
        "high" | "medium" | "low" => Ok(Priority::from_label(s)),
        _ => Err(format!("expected high, medium or low, got {}", s)),
    }
}

fn main() -> Result<()> {
    // Setup tracing; stdout is reserved for views
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let file_config = Config::load(cli.config.as_deref())?;
    let mut config = file_config.clone();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    match cli.command {
        Commands::List { filter, dashboard } => {
            let mut store = open_store(&config)?;
            let mut views = vec![ViewName::PrimaryList];
            if dashboard {
                views.push(ViewName::PriorityList);
            }
            store.presenter_mut().set_views(&views);
            store.set_filter(&filter)?;
        }
        Commands::Add {
            title,
            notes,
            due,
            priority,
        } => {
            let mut store = open_store(&config)?;
            let draft = TaskDraft {
                title,
                notes,
                due,
                priority,
                status: None,
            };
            let task = store.save(draft)?;
            println!("{}", task.id);
        }
        Commands::Edit {
            id,
            title,
            notes,
            due,
            clear_due,
            priority,
        } => {
            let mut store = open_store(&config)?;
            let current = store.begin_edit(&id)?;
            let draft = TaskDraft {
                title: title.unwrap_or(current.title),
                notes: Some(notes.unwrap_or(current.notes)),
                due: if clear_due { None } else { due.or(current.due) },
                priority: Some(priority.unwrap_or(current.priority)),
                status: Some(current.status),
            };
            store.save(draft)?;
        }
        Commands::Toggle { id } => {
            open_store(&config)?.toggle(&id)?;
        }
        Commands::Delete { id, yes } => {
            if !yes {
                return Err(eyre!("Refusing to delete {} without --yes", id));
            }
            open_store(&config)?.delete(&id)?;
        }
        Commands::Show { id } => {
            let store = open_store(&config)?;
            let task = store
                .lookup(&id)
                .ok_or_else(|| eyre!("Task not found: {}", id))?;
            println!("{}", serde_yaml::to_string(task)?);
        }
        Commands::Focus { id } => {
            let task = open_store(&config)?.focus(&id)?;
            let mut timer = StudyTimer::new(&config.preferences);
            timer.set_focus_task(task);
            println!("{} session ready: {}", timer.kind(), timer.display());
        }
        Commands::Prefs { study, break_minutes } => {
            prefs(file_config, cli.config, study, break_minutes)?;
        }
    }

    Ok(())
}

/// Open and load the store. Views stay hidden unless a command asks for them;
/// notifications are always shown.
fn open_store(config: &Config) -> Result<CliStore> {
    let presenter = TerminalPresenter::new(io::stdout()).with_views(&[]);
    let mut store = TaskStore::new(config.open_provider()?, presenter);
    store.load()?;
    Ok(store)
}

fn prefs(mut config: Config, explicit: Option<PathBuf>, study: Option<u32>, break_minutes: Option<u32>) -> Result<()> {
    if study.is_some() || break_minutes.is_some() {
        if let Some(minutes) = study {
            config.preferences.study_minutes = minutes;
        }
        if let Some(minutes) = break_minutes {
            config.preferences.break_minutes = minutes;
        }

        let path = explicit
            .or_else(Config::default_path)
            .ok_or_else(|| eyre!("Could not determine config directory"))?;
        config.save_to(&path)?;
        println!("Preferences saved!");
    }

    println!(
        "study: {} min, break: {} min",
        config.preferences.study_minutes, config.preferences.break_minutes
    );
    Ok(())
}
