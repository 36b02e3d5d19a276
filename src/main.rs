// src/main.rs — TaskFlow entry point

use clap::Parser;

use taskflow::cli::{Cli, Commands};
use taskflow::infra::config::Config;
use taskflow::infra::logger;

#[tokio::main]
async fn main() {
    // Respects TASKFLOW_LOG / RUST_LOG
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Chat { provider } => taskflow::cli::run_chat(&config, provider.as_deref()).await,
        Commands::Tasks {
            status,
            priority,
            search,
            sort,
            descending,
        } => taskflow::cli::run_tasks(&status, &priority, &search, &sort, descending).await,
    }
}
