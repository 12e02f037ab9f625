//! `taskdeck`: command-line front end for the task server.
//!
//! CRUD subcommands talk to the API directly; `browse` runs the carousel
//! runtime against it and prints what each scroll step would show.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use taskdeck_client::{
    ApiClient, CarouselRuntime, CarouselSnapshot, CarouselState, RenderPlan, ScrollDelta,
    carousel::PageQuery,
};
use taskdeck_config::{Config, ConfigLoad, ConfigLoader};
use taskdeck_model::{Priority, StatusFilter, Task, TaskDraft, TaskId};

#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(about = "Manage tasks and browse them as an endless carousel")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "TASKDECK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Task server base URL (overrides config)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one page of tasks
    List {
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Page size (defaults to carousel.page_size)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Create a task
    Add(TaskFields),
    /// Replace a task's fields
    Edit {
        id: TaskId,
        #[command(flatten)]
        fields: TaskFields,
        /// Set the completion flag; left unchanged when omitted
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Delete a task
    Delete { id: TaskId },
    /// Flip a task between pending and completed
    Toggle { id: TaskId },
    /// Scroll through tasks with the carousel engine
    Browse(BrowseArgs),
}

#[derive(Debug, Args)]
struct TaskFields {
    #[arg(short, long)]
    title: String,
    #[arg(short, long)]
    description: String,
    #[arg(short, long, default_value = "medium")]
    priority: Priority,
}

#[derive(Debug, Args)]
struct BrowseArgs {
    #[arg(short, long, default_value = "all")]
    status: StatusFilter,
    /// Viewport width in pixels
    #[arg(short, long, default_value_t = 1000.0)]
    width: f64,
    /// Pixels per scroll step (defaults to one card)
    #[arg(short, long, allow_negative_numbers = true)]
    delta: Option<f64>,
    /// Number of scroll steps
    #[arg(short = 'n', long, default_value_t = 10)]
    steps: usize,
}

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
    } else {
        Builder::new()
            .target(Target::Stderr)
            .filter_level(LevelFilter::Warn)
            .filter_module("taskdeck_client", LevelFilter::Info)
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path.clone());
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => log::warn!("configuration warning: {} ({})", warning.message, hint),
            None => log::warn!("configuration warning: {}", warning.message),
        }
    }

    if let Some(url) = &cli.api_url {
        config.client.base_url = url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = ApiClient::from_config(&config.client).context("failed to create API client")?;

    match cli.command {
        Command::List {
            status,
            page,
            limit,
        } => {
            let query = PageQuery {
                status,
                page,
                limit: limit.unwrap_or(config.carousel.page_size),
            };
            let page = client
                .fetch_tasks(query)
                .await
                .context("failed to fetch tasks")?;
            for task in &page.tasks {
                println!("{}", format_task(task));
            }
            println!(
                "page {} ({} per page), {} of {} shown{}",
                page.page,
                page.limit,
                page.tasks.len(),
                page.total,
                if page.has_more { ", more available" } else { "" }
            );
        }
        Command::Add(fields) => {
            let task = client
                .create_task(&fields.into_draft())
                .await
                .context("failed to create task")?;
            println!("created {}", format_task(&task));
        }
        Command::Edit {
            id,
            fields,
            completed,
        } => {
            let mut draft = fields.into_draft();
            if let Some(completed) = completed {
                draft = draft.with_completed(completed);
            }
            let task = client
                .update_task(id, &draft)
                .await
                .with_context(|| format!("failed to update task {id}"))?;
            println!("updated {}", format_task(&task));
        }
        Command::Delete { id } => {
            let response = client
                .delete_task(id)
                .await
                .with_context(|| format!("failed to delete task {id}"))?;
            println!("{}: {}", response.message, format_task(&response.task));
        }
        Command::Toggle { id } => {
            let task = client
                .toggle_task(id)
                .await
                .with_context(|| format!("failed to toggle task {id}"))?;
            println!("toggled {}", format_task(&task));
        }
        Command::Browse(args) => browse(client, &config, args).await?,
    }

    Ok(())
}

impl TaskFields {
    fn into_draft(self) -> TaskDraft {
        TaskDraft::new(self.title, self.description, self.priority)
    }
}

async fn browse(client: ApiClient, config: &Config, args: BrowseArgs) -> Result<()> {
    let state = CarouselState::new(config.carousel, args.width).with_filter(args.status);
    let mut carousel = CarouselRuntime::spawn(Arc::new(client), state);
    let delta = args.delta.unwrap_or(config.carousel.card_width);

    let snapshot = carousel
        .wait_for(|snapshot| !snapshot.loading)
        .await
        .context("carousel stopped before the first page arrived")?;
    print_step(0, &snapshot, args.width);
    if snapshot.plan.node_count() == 0 {
        return Ok(());
    }

    for step in 1..=args.steps {
        carousel.scroll(ScrollDelta::horizontal(delta))?;
        let mut snapshot = carousel.changed().await?;
        if snapshot.loading {
            snapshot = carousel.wait_for(|snapshot| !snapshot.loading).await?;
        }
        print_step(step, &snapshot, args.width);
    }

    Ok(())
}

fn print_step(step: usize, snapshot: &CarouselSnapshot<Task>, width: f64) {
    if let Some(error) = &snapshot.error {
        println!("[{step:>3}] error: {error}");
    }

    let mode = match &snapshot.plan {
        RenderPlan::Empty => {
            println!("[{step:>3}] no {} tasks", snapshot.filter);
            return;
        }
        RenderPlan::Static { .. } => "static",
        RenderPlan::Looped { .. } => "looped",
    };

    let visible: Vec<String> = snapshot
        .plan
        .visible(width)
        .into_iter()
        .map(|task| format!("#{}", task.id))
        .collect();
    println!(
        "[{step:>3}] {mode} offset={:.0} loaded={}{} | {}",
        snapshot.offset,
        snapshot.loaded,
        if snapshot.has_more { "+" } else { "" },
        visible.join(" ")
    );
}

fn format_task(task: &Task) -> String {
    format!(
        "#{} [{}] {} ({}) - {}",
        task.id,
        if task.completed { "x" } else { " " },
        task.title,
        task.priority,
        task.description
    )
}
