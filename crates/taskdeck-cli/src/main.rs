//! Taskdeck CLI - the `taskdeck` binary.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use taskdeck_application::Notice;
use taskdeck_core::task::{Category, Priority, Stage, TagId, TaskDraft, TaskEdit, TaskId};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Taskdeck - manage tasks stored on a remote task service", long_about = None)]
struct Cli {
    /// Service root, e.g. http://localhost:8000/api/v1
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session for later commands
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Create an account
    Register {
        email: String,
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the logged-in user
    Whoami,
    /// List tasks
    List {
        /// all, active, completed, or a category (work, personal, shopping, health, other)
        #[arg(long, default_value = "all")]
        filter: String,
        /// Only tasks carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// High priority first
        #[arg(long)]
        by_priority: bool,
        /// Print the tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show tasks grouped by stage
    Board,
    /// Show total, completed and pending counts
    Stats,
    /// Create a task
    Add {
        title: String,
        #[arg(long, default_value = "other")]
        category: Category,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long, default_value = "todo")]
        stage: Stage,
        #[arg(long)]
        description: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Mark a task completed, or reopen it
    Toggle { id: TaskId },
    /// Change fields of a task
    Edit {
        id: TaskId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        stage: Option<Stage>,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
    },
    /// Delete a task
    Remove { id: TaskId },
    /// Add a subtask
    Subtask { id: TaskId, text: String },
    /// Attach a tag
    Tag { id: TaskId, name: String },
    /// Detach a tag by its id
    Untag { id: TaskId, tag_id: TagId },
    /// Ask the server for every task carrying a tag
    ByTag { name: String },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

async fn run(cli: Cli) -> Result<Option<Notice>> {
    let app = commands::App::connect(cli.base_url.as_deref())?;
    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&app, &username, password).await
        }
        Commands::Logout => commands::auth::logout(&app).await,
        Commands::Register {
            email,
            username,
            password,
        } => commands::auth::register(&app, &email, &username, password).await,
        Commands::Whoami => commands::auth::whoami(&app).await,
        Commands::List {
            filter,
            tag,
            by_priority,
            json,
        } => {
            let options = commands::tasks::ListOptions {
                filter,
                tag,
                by_priority,
                json,
            };
            commands::tasks::list(&app, &options).await
        }
        Commands::Board => commands::tasks::board(&app).await,
        Commands::Stats => commands::tasks::stats(&app).await,
        Commands::Add {
            title,
            category,
            priority,
            stage,
            description,
            due,
        } => {
            let mut draft = TaskDraft::new(title, category)
                .with_priority(priority)
                .with_stage(stage);
            draft.description = description;
            draft.due_date = due;
            commands::tasks::add(&app, draft).await
        }
        Commands::Toggle { id } => commands::tasks::toggle(&app, id).await,
        Commands::Edit {
            id,
            title,
            description,
            clear_description,
            category,
            priority,
            stage,
            due,
            clear_due,
        } => {
            let edit = TaskEdit {
                title,
                description: if clear_description { Some(None) } else { description.map(Some) },
                category,
                priority,
                stage,
                due_date: if clear_due { Some(None) } else { due.map(Some) },
            };
            commands::tasks::edit(&app, id, edit).await
        }
        Commands::Remove { id } => commands::tasks::remove(&app, id).await,
        Commands::Subtask { id, text } => commands::tasks::add_subtask(&app, id, &text).await,
        Commands::Tag { id, name } => commands::tasks::add_tag(&app, id, &name).await,
        Commands::Untag { id, tag_id } => commands::tasks::remove_tag(&app, id, tag_id).await,
        Commands::ByTag { name } => commands::tasks::by_tag(&app, &name).await,
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let notice = runtime.block_on(run(cli))?;

    match notice {
        Some(notice) if notice.is_error() => {
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
        Some(notice) => {
            println!("{notice}");
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
