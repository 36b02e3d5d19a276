// src/cli.rs — Command-line interface

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::assistant::router::Router;
use crate::assistant::session::ChatSession;
use crate::assistant::Provider;
use crate::identity::{Identity, StaticIdentity};
use crate::infra::config::Config;
use crate::task::query::{
    status_counts, visible_tasks, Criteria, PriorityFilter, SortDirection, SortKey, StatusFilter,
};
use crate::task::store::{MemoryStore, TaskStore};
use crate::task::{Priority, TaskDraft};

#[derive(Parser)]
#[command(name = "taskflow", about = "Task assistant: query engine and chat router")]
pub struct Cli {
    /// Path to config.toml (default: ~/.taskflow/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat with the assistant
    Chat {
        /// Pin one provider (local, general, web) instead of classifying
        #[arg(long)]
        provider: Option<String>,
    },
    /// Show the demo task list through the query engine
    Tasks {
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, default_value = "all")]
        priority: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "date")]
        sort: String,
        #[arg(long)]
        descending: bool,
    },
}

pub async fn run_chat(config: &Config, provider: Option<&str>) -> anyhow::Result<()> {
    let pin = provider
        .or(config.assistant.default_provider.as_deref())
        .and_then(Provider::parse);

    let router = Router::from_config(config);
    let mut session = ChatSession::new(pin);

    let mut stdout = tokio::io::stdout();
    if let Some(greeting) = session.messages().first() {
        stdout
            .write_all(format!("assistant> {}\n", greeting.text).as_bytes())
            .await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        let Some(reply) = session.send(&router, &line).await else {
            continue;
        };
        if let Some(warning) = &reply.warning {
            stdout
                .write_all(format!("(aviso: {warning})\n").as_bytes())
                .await?;
        }
        stdout
            .write_all(format!("assistant [{}]> {}\n", reply.source_used, reply.text).as_bytes())
            .await?;
    }

    Ok(())
}

pub async fn run_tasks(
    status: &str,
    priority: &str,
    search: &str,
    sort: &str,
    descending: bool,
) -> anyhow::Result<()> {
    let identity = StaticIdentity::signed_in("demo-user", "demo@taskflow.app");
    let Some(user) = identity.current_user() else {
        println!("(no session — nothing to show)");
        return Ok(());
    };

    let store = MemoryStore::for_owner(&user.id);
    seed_demo_tasks(&store).await?;

    let criteria = Criteria {
        status: StatusFilter::parse(status),
        priority: PriorityFilter::parse(priority),
        search: search.to_string(),
        sort_key: SortKey::parse(sort),
        direction: if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };

    let snapshot = store.subscribe().borrow().clone();
    let counts = status_counts(&snapshot);
    println!(
        "{} tasks ({} pending, {} completed) — showing:",
        counts.all, counts.pending, counts.completed
    );

    for task in visible_tasks(&snapshot, &criteria) {
        let done = if task.completed() { "x" } else { " " };
        println!(
            "[{done}] {:8} {}  {}",
            format!("{:?}", task.priority).to_lowercase(),
            task.title,
            task.category.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

async fn seed_demo_tasks(store: &MemoryStore) -> anyhow::Result<()> {
    store
        .create(
            TaskDraft::new("Pagar a renda")
                .with_priority(Priority::High)
                .with_description("Transferência até dia 5"),
        )
        .await?;
    store
        .create(TaskDraft::new("Comprar leite").with_priority(Priority::Low))
        .await?;
    let done = store
        .create(
            TaskDraft::new("Rever relatório mensal").with_priority(Priority::Medium),
        )
        .await?;
    store
        .set_status(&done.id, crate::task::Status::Completed)
        .await?;
    Ok(())
}
