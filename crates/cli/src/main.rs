//! Learnpath CLI - learning progress from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use learnpath_core::{Catalog, ModuleId, ModuleProgress};
use learnpath_progress::{ProgressStore, StoreConfig, UnknownModulePolicy};
use learnpath_storage::{JsonStorage, DEFAULT_STORAGE_KEY};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(about = "Track learning module and quiz progress", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding progress data
    #[arg(long, global = true, env = "LEARNPATH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Refuse module ids that are not in the catalog
    #[arg(long, global = true)]
    strict: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules and their status
    Modules,
    /// Record that a module was opened
    Open {
        /// Module ID
        id: String,
    },
    /// Mark a module completed
    Complete {
        /// Module ID
        id: String,
    },
    /// Record a quiz result
    Quiz {
        /// Module ID
        id: String,
        /// Correct answers
        #[arg(long)]
        score: u32,
        /// Number of questions (defaults to the catalog quiz length)
        #[arg(long)]
        total: Option<u32>,
    },
    /// Show overall progress
    Status,
    /// Clear all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir);
    debug!("Using data directory {}", data_dir.display());

    let storage = JsonStorage::with_key(&data_dir, DEFAULT_STORAGE_KEY)
        .await
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let policy = if cli.strict {
        UnknownModulePolicy::Reject
    } else {
        UnknownModulePolicy::Warn
    };
    let mut store = ProgressStore::builder(Arc::new(storage))
        .with_catalog(Catalog::builtin())
        .with_config(StoreConfig::default().with_unknown_module_policy(policy))
        .open()
        .await
        .context("Failed to load progress")?;

    match cli.command {
        Commands::Modules => {
            println!("Modules ({})", store.catalog().len());
            for entry in store.catalog().iter() {
                let progress = store.progress_for(entry.id.as_str());
                println!("  {} | {} | {} lessons | {} - {}",
                    entry.id,
                    entry.level.as_str(),
                    entry.lessons,
                    format_status(&progress),
                    entry.title,
                );
            }
        }
        Commands::Open { id } => {
            let id = ModuleId::new(id);
            store.update_last_accessed(&id)?;
            println!("Opened {}", id);
        }
        Commands::Complete { id } => {
            let id = ModuleId::new(id);
            store.mark_module_completed(&id)?;
            println!("Completed {}", id);
        }
        Commands::Quiz { id, score, total } => {
            let id = ModuleId::new(id);
            let total = total
                .or_else(|| store.catalog().quiz_length(id.as_str()))
                .ok_or_else(|| anyhow::anyhow!("--total is required for module {}", id))?;
            store.mark_quiz_completed(&id, score, total)?;
            println!("Quiz for {}: {}/{}", id, score, total);
        }
        Commands::Status => {
            let stats = store.stats();
            println!("Learning Progress");
            println!("  Modules completed: {}/{}", stats.completed_modules, stats.total_modules);
            println!("  Overall progress: {}%", stats.completion_percentage());
            println!("  Quizzes taken: {}", stats.quizzes_taken);
            println!("  Quiz average: {}%", stats.average_quiz_score());

            for (id, progress) in store.module_progress() {
                let last = progress
                    .last_accessed_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                println!("  {} | {} | last opened {}", id, format_status(progress), last);
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                println!("This clears all progress. Re-run with --yes to confirm.");
                return Ok(());
            }
            store.reset_progress();
            println!("Progress reset");
        }
    }

    if let Err(e) = store.flush().await {
        warn!("Progress may not survive a restart: {}", e);
    }

    Ok(())
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("learnpath")
    })
}

fn format_status(progress: &ModuleProgress) -> String {
    let mut status = if progress.completed {
        "COMPLETED".to_string()
    } else if progress.last_accessed_at.is_some() {
        "STARTED".to_string()
    } else {
        "NOT STARTED".to_string()
    };
    if let (true, Some(score)) = (progress.quiz_completed, progress.quiz_score) {
        match progress.quiz_total {
            Some(total) => status.push_str(&format!(" (quiz {}/{})", score, total)),
            None => status.push_str(&format!(" (quiz {})", score)),
        }
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_quiz() {
        let cli = Cli::try_parse_from(["learnpath", "quiz", "styling", "--score", "2", "--strict"]).unwrap();
        assert!(cli.strict);
        match cli.command {
            Commands::Quiz { id, score, total } => {
                assert_eq!(id, "styling");
                assert_eq!(score, 2);
                assert_eq!(total, None);
            }
            _ => panic!("expected quiz command"),
        }
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/learnpath-test");
        assert_eq!(resolve_data_dir(Some(dir.clone())), dir);
        assert!(resolve_data_dir(None).ends_with("learnpath"));
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(&ModuleProgress::default()), "NOT STARTED");

        let progress = ModuleProgress {
            completed: true,
            quiz_completed: true,
            quiz_score: Some(2),
            quiz_total: Some(3),
            ..Default::default()
        };
        assert_eq!(format_status(&progress), "COMPLETED (quiz 2/3)");
    }
}
