mod commands;
mod table;
mod util;

use crate::commands::{
    list_command, open_command, show_command, Board, ListArgs, OpenArgs, ShowArgs,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::{path::PathBuf, process, time::Duration};
use taskboard_client::{JsonDataset, WebApiClient};
use tracing::Level;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "taskboardctl", about = "Priority board of your inspections and maintenance work")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[clap(long, env = "TASKBOARD_URL", help = "Base URL of the environment")]
    url: Url,

    #[clap(
        long,
        env = "TASKBOARD_TOKEN",
        hide_env_values = true,
        help = "Bearer token for the Web API"
    )]
    token: String,

    #[clap(long, env = "TASKBOARD_USER_ID", help = "Id of the current user, braces allowed")]
    user_id: String,

    #[clap(
        long,
        env = "TASKBOARD_INSPECTIONS",
        help = "JSON export of the inspection dataset"
    )]
    inspections: Option<PathBuf>,

    #[clap(
        long,
        env = "TASKBOARD_API_VERSION",
        default_value = "9.2",
        help = "Web API version"
    )]
    api_version: String,

    #[clap(
        long,
        env = "TASKBOARD_TIMEOUT",
        default_value_t = 10,
        help = "Request timeout in seconds"
    )]
    timeout: u64,

    #[clap(long, short, help = "Log debug output to stderr")]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tasks grouped by priority
    List(ListArgs),
    /// Show details of specific tasks
    Show(ShowArgs),
    /// Open the record behind a task
    Open(OpenArgs),
}

fn board(cli: &Cli) -> Result<Board> {
    let inspections = match &cli.inspections {
        Some(path) => JsonDataset::from_path(path)?,
        None => JsonDataset::default(),
    };

    Ok(Board {
        client: WebApiClient::new(
            cli.url.clone(),
            cli.token.clone(),
            cli.api_version.clone(),
            Duration::from_secs(cli.timeout),
        )?,
        user_id: cli.user_id.clone(),
        inspections,
    })
}

async fn run(cli: Cli) -> Result<()> {
    let board = board(&cli)?;

    match cli.command {
        Command::List(args) => list_command(args, board).await,
        Command::Show(args) => show_command(args, board).await,
        Command::Open(args) => open_command(args, board).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(cli).await {
        eprintln!("{} {:#}", "✖".red().bold(), error);
        process::exit(1);
    }

    Ok(())
}
