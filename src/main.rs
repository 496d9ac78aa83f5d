use clap::Parser;
use tracing::error;

use clipshelf_lib::bootstrap::{
    clear_history, history_dir, init_tracing_subscriber, list_history, load_app_config,
    resolve_app_dirs, run_watcher,
};
use clipshelf_lib::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        error!(error = %err, "clipshelf exited with an error");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app_dirs = resolve_app_dirs(cli.data_dir.as_deref())?;

    let logs_dir = app_dirs.logs_dir();
    if let Err(err) = init_tracing_subscriber(Some(&logs_dir)) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let config = load_app_config(&app_dirs, cli.config.as_deref())?;
    let history_dir = history_dir(&app_dirs, &config);

    match cli.command() {
        Command::Run => run_watcher(&config, history_dir).await,
        Command::List => list_history(history_dir).await,
        Command::Clear => clear_history(history_dir).await,
    }
}
