//! Line-driven interactive console.
//!
//! Renders the login view or the main view depending on the session, and
//! dispatches one command per input line. Errors are printed inline; the
//! loop only ends on `quit` or end of input.

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::auth::login::{Credentials, LoginFlow};
use crate::error::describe;
use crate::net::api::ApiClient;
use crate::net::types::RequestOptions;
use crate::shell::{self, Page, View};

const HELP: &str = "\
Commands:
  login <username>   sign in (prompts for the password)
  pages              show the navigation menu
  open <path>        open a page, e.g. `open /key-management`
  get <endpoint>     GET an API endpoint and print the JSON response
  status             show whether you are signed in
  logout             sign out
  quit               exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    Login(String),
    Pages,
    Open(String),
    Get(String),
    Status,
    Logout,
    Quit,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim().to_owned();
        match head.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "help" | "?" => Self::Help,
            "login" => Self::Login(rest),
            "pages" | "menu" => Self::Pages,
            "open" => Self::Open(rest),
            "get" => Self::Get(rest),
            "status" | "whoami" => Self::Status,
            "logout" => Self::Logout,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_owned()),
        }
    }

    fn requires_session(&self) -> bool {
        matches!(self, Self::Pages | Self::Open(_) | Self::Get(_))
    }
}

/// Where `login` takes the password from.
#[derive(Debug, Clone, Copy, Default)]
pub enum PasswordSource {
    /// The next line of command input. Used for piped and scripted sessions.
    #[default]
    Input,
    /// A blocking reader that does not echo, such as `rpassword::read_password`.
    Hidden(fn() -> io::Result<String>),
}

pub struct Console<W: Write> {
    flow: LoginFlow,
    api: ApiClient,
    out: W,
    passwords: PasswordSource,
}

impl<W: Write> Console<W> {
    #[must_use]
    pub fn new(flow: LoginFlow, api: ApiClient, out: W) -> Self {
        Self { flow, api, out, passwords: PasswordSource::default() }
    }

    #[must_use]
    pub fn with_password_source(mut self, passwords: PasswordSource) -> Self {
        self.passwords = passwords;
        self
    }

    #[must_use]
    pub fn flow(&self) -> &LoginFlow {
        &self.flow
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from reading input or writing output.
    pub async fn run<R>(&mut self, mut input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.render_current_view()?;
        loop {
            self.prompt("> ")?;
            let Some(line) = read_line(&mut input).await? else {
                break;
            };
            let command = Command::parse(&line);
            if command == Command::Quit {
                break;
            }
            if command.requires_session() && !self.flow.session().is_authenticated() {
                writeln!(self.out, "Login required.")?;
                self.render_view(View::Login)?;
                continue;
            }
            match command {
                Command::Login(username) => {
                    if !self.login(&username, &mut input).await? {
                        break;
                    }
                }
                other => self.dispatch(other).await?,
            }
        }
        self.out.flush()
    }

    async fn dispatch(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Empty | Command::Quit | Command::Login(_) => Ok(()),
            Command::Help => write!(self.out, "{HELP}"),
            Command::Pages => self.render_view(View::Main),
            Command::Open(path) => match Page::from_path(&path) {
                Some(page) => write!(self.out, "{}", shell::render_page(page)),
                None => writeln!(self.out, "Unknown page: {path}"),
            },
            Command::Get(endpoint) => self.get(&endpoint).await,
            Command::Status => {
                let session = self.flow.session().snapshot();
                if session.authenticated {
                    let token = if session.token.is_some() { "present" } else { "absent" };
                    writeln!(self.out, "Signed in (token {token}).")
                } else {
                    writeln!(self.out, "Signed out.")
                }
            }
            Command::Logout => {
                self.flow.logout();
                writeln!(self.out, "Signed out.")?;
                self.render_view(View::Login)
            }
            Command::Unknown(other) => writeln!(self.out, "Unknown command: {other}. Type `help`."),
        }
    }

    /// Returns `false` when input ended before the password was read.
    async fn login<R>(&mut self, username: &str, input: &mut R) -> io::Result<bool>
    where
        R: AsyncBufRead + Unpin,
    {
        if self.flow.session().is_authenticated() {
            writeln!(self.out, "Already signed in. Use `logout` first.")?;
            return Ok(true);
        }
        if username.is_empty() {
            writeln!(self.out, "Usage: login <username>")?;
            return Ok(true);
        }

        self.prompt("Password: ")?;
        let password = match self.passwords {
            PasswordSource::Input => {
                let Some(password) = read_line(input).await? else {
                    return Ok(false);
                };
                password
            }
            PasswordSource::Hidden(read) => {
                let password = tokio::task::spawn_blocking(read).await.map_err(io::Error::other)??;
                writeln!(self.out)?;
                password
            }
        };

        let credentials = Credentials::new(username, password);
        match self.flow.submit(&credentials).await {
            Ok(_) => {
                writeln!(self.out, "Signed in as {username}.")?;
                self.render_view(View::Main)?;
            }
            Err(err) => {
                let message = self.flow.error_message().unwrap_or_else(|| err.user_message());
                writeln!(self.out, "Error: {message}")?;
            }
        }
        Ok(true)
    }

    async fn get(&mut self, endpoint: &str) -> io::Result<()> {
        if endpoint.is_empty() {
            return writeln!(self.out, "Usage: get <endpoint>");
        }
        match self.api.fetch(endpoint, RequestOptions::get()).await {
            Ok(value) => {
                let rendered = serde_json::to_string_pretty(&value).map_err(io::Error::other)?;
                writeln!(self.out, "{rendered}")
            }
            Err(err) => writeln!(self.out, "Error: {}", describe(&err)),
        }
    }

    fn render_current_view(&mut self) -> io::Result<()> {
        let view = View::for_session(&self.flow.session().snapshot());
        self.render_view(view)
    }

    fn render_view(&mut self, view: View) -> io::Result<()> {
        match view {
            View::Login => writeln!(self.out, "Login\n  Use `login <username>` to sign in. Type `help` for commands."),
            View::Main => write!(self.out, "{}", shell::render_menu()),
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")?;
        self.out.flush()
    }
}

/// Next line without its terminator, or `None` at end of input.
async fn read_line<R>(input: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let bytes = input.read_line(&mut line).await?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}
