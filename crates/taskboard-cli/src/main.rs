//! CLI binary for taskboard.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use taskboard_core::app::{StartOutcome, Taskboard, TaskReport};
use taskboard_core::config::default_config_path;
use taskboard_core::domain::{Category, Task, TaskDraft, TaskId, TaskPatch, TriggerType};
use taskboard_core::ports::{KvStore, SystemClock};
use taskboard_core::{TaskboardBuilder, TaskboardConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Board = Taskboard<Arc<dyn KvStore>, SystemClock>;

/// Manage automation tasks stored on this machine.
#[derive(Parser)]
#[command(name = "taskboard", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all tasks (seed set merged with saved changes).
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Create a new task.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = Category::General)]
        category: Category,
        #[arg(long, default_value_t = TriggerType::Manual)]
        trigger: TriggerType,
        /// Icon name (database, activity, server, mail, shield, user).
        #[arg(long)]
        icon: Option<String>,
    },

    /// Edit an existing task. Status is never changed here.
    Update {
        id: TaskId,
        #[arg(long)]
        name: Option<String>,
        /// Empty string clears the description.
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        trigger: Option<TriggerType>,
        #[arg(long)]
        icon: Option<String>,
    },

    /// Start a simulated run and wait for it to complete.
    Run { id: TaskId },

    /// Count tasks per status.
    Counts,

    /// Write a task's log report.
    Export {
        id: TaskId,
        /// Output path (defaults to `logs_<name>.txt` in the current directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show or change the dark-mode preference.
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TaskboardConfig::from_file(path)?,
        None => {
            let path = default_config_path();
            if path.exists() {
                TaskboardConfig::from_file(&path)?
            } else {
                TaskboardConfig::default()
            }
        }
    };

    // RUST_LOG があればそちらを優先
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(backend = ?config.store.backend, data_dir = %config.store.data_dir.display(), "opening store");
    let board = TaskboardBuilder::new(config.open_store()).build()?;

    match cli.command {
        Command::List { json } => list(&board, json).await,
        Command::Create {
            name,
            description,
            category,
            trigger,
            icon,
        } => {
            let mut draft = TaskDraft::new(name)
                .with_category(category)
                .with_trigger_type(trigger);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            if let Some(icon) = icon {
                draft = draft.with_icon(icon);
            }
            let task = board.tasks.create_task(draft).await?;
            println!("created task {}", task.id);
            Ok(())
        }
        Command::Update {
            id,
            name,
            description,
            category,
            trigger,
            icon,
        } => {
            let patch = TaskPatch {
                name,
                description,
                category,
                trigger_type: trigger,
                icon_name: icon,
            };
            if patch.is_empty() {
                bail!("nothing to update; pass at least one field");
            }
            let task = board.tasks.update_task(id, patch).await?;
            println!("updated task {}", task.id);
            Ok(())
        }
        Command::Run { id } => run(&board, id).await,
        Command::Counts => {
            let counts = board.tasks.status_counts().await;
            let mut rows: Vec<_> = counts.iter().collect();
            rows.sort_by_key(|(status, _)| status.as_str());
            for (status, count) in rows {
                println!("{:<10} {count}", status.as_str());
            }
            println!("{:<10} {}", "Total", counts.total());
            Ok(())
        }
        Command::Export { id, out } => {
            let task = board
                .tasks
                .find_task(id)
                .await
                .with_context(|| format!("task {id} not found"))?;
            let report = TaskReport::new(&task);
            let path = out.unwrap_or_else(|| PathBuf::from(report.file_name()));
            std::fs::write(&path, report.render())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
            Ok(())
        }
        Command::Theme { action } => {
            let dark = match action {
                ThemeAction::Show => board.theme.is_dark(),
                ThemeAction::Toggle => board.theme.toggle()?,
                ThemeAction::Dark => {
                    board.theme.set_dark(true)?;
                    true
                }
                ThemeAction::Light => {
                    board.theme.set_dark(false)?;
                    false
                }
            };
            println!("{}", if dark { "dark" } else { "light" });
            Ok(())
        }
    }
}

async fn list(board: &Board, json: bool) -> anyhow::Result<()> {
    let tasks = board.tasks.list_tasks().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    println!(
        "{:<15} {:<32} {:<10} {:<15} {:<8} {}",
        "ID", "NAME", "STATUS", "CATEGORY", "TRIGGER", "LAST RUN"
    );
    for task in &tasks {
        print_row(task);
    }
    Ok(())
}

fn print_row(task: &Task) {
    println!(
        "{:<15} {:<32} {:<10} {:<15} {:<8} {}",
        task.id.to_string(),
        task.name,
        task.status.as_str(),
        task.category.as_str(),
        task.trigger_type.as_str(),
        task.last_run_time.format("%Y-%m-%d %H:%M")
    );
}

async fn run(board: &Board, id: TaskId) -> anyhow::Result<()> {
    match board.tasks.start_task(id).await? {
        StartOutcome::Started(run_id) => println!("started {run_id} for task {id}"),
        StartOutcome::AlreadyRunning => println!("task {id} already has a run pending"),
    }

    // 完了をポーリングで待つ
    board.tasks.wait_until_idle(id, Duration::from_millis(100)).await;
    board.tasks.shutdown().await;

    let status = board
        .tasks
        .find_task(id)
        .await
        .map(|task| task.status.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("task {id} finished: {status}");
    Ok(())
}
