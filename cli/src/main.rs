//! Command-line front end for the todo service.
//!
//! Every command fetches the list first, dispatches its intent, then prints
//! the resulting state. The API location comes from `--api-url` or
//! `TODO_API_URL` (a `.env` file is honoured).

mod transport;
mod view;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use todo_core::{Dispatcher, Intent, TodoClient, Transport, DEFAULT_API_URL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::transport::UreqTransport;

#[derive(Debug, Parser)]
#[command(name = "todo", about = "Manage the todo list")]
struct Cli {
    /// Base URL of the todo API.
    #[arg(long, env = "TODO_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all todos (the default).
    List,
    /// Add a todo.
    Add { description: String },
    /// Flip a todo between done and not done.
    Toggle { id: i64 },
    /// Replace a todo's description.
    Edit { id: i64, description: String },
    /// Delete a todo.
    Delete { id: i64 },
}

impl Command {
    fn intent(self) -> Option<Intent> {
        match self {
            Command::List => None,
            Command::Add { description } => Some(Intent::Add { description }),
            Command::Toggle { id } => Some(Intent::ToggleCompleted { id }),
            Command::Edit { id, description } => {
                Some(Intent::ChangeDescription { id, description })
            }
            Command::Delete { id } => Some(Intent::Delete { id }),
        }
    }
}

/// Fetch first so the list is current, then apply the command's intent
/// unless the fetch already failed. Failures live in the state and are shown
/// by the rendered view.
fn run<T: Transport>(dispatcher: &mut Dispatcher<T>, command: Option<Command>) -> ExitCode {
    let _ = dispatcher.dispatch(Intent::Fetch);
    if dispatcher.state().error.is_none() {
        if let Some(intent) = command.unwrap_or(Command::List).intent() {
            let _ = dispatcher.dispatch(intent);
        }
    }

    if dispatcher.state().error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> anyhow::Result<ExitCode> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("failed to load .env");
        }
    }
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to install tracing subscriber")?;

    let cli = Cli::parse();
    let mut dispatcher = Dispatcher::new(TodoClient::new(&cli.api_url), UreqTransport::new());
    tracing::debug!(api_url = dispatcher.client().base_url(), "using api");

    let code = run(&mut dispatcher, cli.command);

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", view::render(dispatcher.state())).context("failed to write output")?;
    stdout.flush().context("failed to write output")?;
    Ok(code)
}
