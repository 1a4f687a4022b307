use std::io::{self, BufWriter, IsTerminal};

use clap::{Parser, Subcommand};
use quantum_console::auth::login::{Credentials, LoginError, LoginFlow};
use quantum_console::config::{ApiConfig, ConfigError};
use quantum_console::console::{Console, PasswordSource};
use quantum_console::error::{ErrorCode, describe};
use quantum_console::net::api::{ApiClient, ApiError};
use quantum_console::net::types::RequestOptions;
use quantum_console::shell::{self, View};
use quantum_console::state::session::SessionStore;
use serde_json::Value;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Login(#[from] LoginError),
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Api(e) => e.error_code(),
            Self::Login(e) => e.error_code(),
            Self::Io(_) => "E_IO",
            Self::InvalidJson(_) => "E_JSON",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Api(e) => e.retryable(),
            Self::Login(e) => e.retryable(),
            Self::Config(_) | Self::Io(_) | Self::InvalidJson(_) => false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qe-console", about = "Quantum encryption management console")]
struct Cli {
    /// Overrides `API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive console (default).
    Console,
    /// Sign in once and print the resulting view.
    Login {
        #[arg(long, env = "QE_USERNAME")]
        username: String,
        #[arg(long, env = "QE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// GET an API endpoint and print the JSON body.
    Get { endpoint: String },
    /// Print the navigation menu.
    Pages,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_filter(cli.command.as_ref()))),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("error: {}", describe(&err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    tracing::debug!(base_url = %config.base_url, "api configured");

    let api = ApiClient::new(&config)?;
    let session = SessionStore::new();

    match cli.command.unwrap_or(Command::Console) {
        Command::Console => {
            let flow = LoginFlow::new(api.clone(), session);
            let passwords = if io::stdin().is_terminal() {
                PasswordSource::Hidden(rpassword::read_password)
            } else {
                PasswordSource::Input
            };
            let mut console =
                Console::new(flow, api, BufWriter::new(io::stdout())).with_password_source(passwords);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            console.run(stdin).await?;
            Ok(())
        }
        Command::Login { username, password } => {
            let flow = LoginFlow::new(api, session.clone());
            flow.submit(&Credentials::new(username.as_str(), password)).await?;
            println!("Signed in as {username}.");
            print!("{}", render_for(&session));
            Ok(())
        }
        Command::Get { endpoint } => {
            let json = api.fetch(&endpoint, RequestOptions::get()).await?;
            print_json(&json)
        }
        Command::Pages => {
            print!("{}", shell::render_menu());
            Ok(())
        }
    }
}

/// Log filter used when `RUST_LOG` is unset. The interactive console prints
/// every failure inline, so its logs stay quiet unless asked for.
fn default_log_filter(command: Option<&Command>) -> &'static str {
    match command {
        None | Some(Command::Console) => "off",
        Some(_) => "warn",
    }
}

fn render_for(session: &SessionStore) -> String {
    match View::for_session(&session.snapshot()) {
        View::Main => shell::render_menu(),
        View::Login => "Login\n".to_owned(),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
