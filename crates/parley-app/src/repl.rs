//! Interactive read loop: one line in, one turn (or command) out.

use std::io::{self, Write};
use std::sync::Arc;

use parley_ai::{GenerationBackend, TurnOrchestrator};
use parley_common::SessionId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// What a line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Exit,
    Empty,
    Ask(String),
    Clear,
    /// `/session` alone shows the current session.
    Session(Option<SessionId>),
    Sessions,
    History,
    Usage,
    Help,
    UnknownCommand(String),
}

/// Classify one line of input.
///
/// Questions are passed through exactly as typed. A leading `//` escapes a
/// question that itself starts with `/`; one slash is dropped.
pub(crate) fn parse_input(line: &str, exit_sentinel: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if trimmed.to_lowercase() == exit_sentinel.trim().to_lowercase() {
        return Input::Exit;
    }
    if trimmed.starts_with("//") {
        return Input::Ask(line.replacen("//", "/", 1));
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Ask(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "clear" => Input::Clear,
        "session" if arg.is_empty() => Input::Session(None),
        "session" => Input::Session(Some(SessionId::new(arg))),
        "sessions" => Input::Sessions,
        "history" => Input::History,
        "usage" => Input::Usage,
        "help" => Input::Help,
        _ => Input::UnknownCommand(trimmed.to_string()),
    }
}

const HELP: &str = "\
Commands:
  /clear           forget the current session's history
  /session [id]    show or switch the current session
  /sessions        list sessions with history
  /history         print the current session's history
  /usage           show token usage
  /help            show this help
Start a question with // to send it with a single leading /.";

/// Drives [`TurnOrchestrator::handle_turn`] from line-oriented input.
pub(crate) struct Repl {
    orchestrator: TurnOrchestrator,
    backend: Arc<dyn GenerationBackend>,
    session: SessionId,
    exit_sentinel: String,
}

impl Repl {
    pub(crate) fn new(
        orchestrator: TurnOrchestrator,
        backend: Arc<dyn GenerationBackend>,
        session: SessionId,
        exit_sentinel: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator,
            backend,
            session,
            exit_sentinel: exit_sentinel.into(),
        }
    }

    /// Read lines until the exit sentinel or end of input.
    pub(crate) async fn run<R, W>(&mut self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(
            out,
            "Welcome to Parley.\nType your questions below.\nType '{}' to end the conversation.",
            self.exit_sentinel
        )?;

        let mut lines = input.lines();
        loop {
            write!(out, "\nYou: ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            match parse_input(&line, &self.exit_sentinel) {
                Input::Exit => break,
                Input::Empty => {}
                Input::Ask(question) => self.ask(&question, out).await?,
                Input::Clear => {
                    let handle = self.orchestrator.session(&self.session).await;
                    handle.lock().await.clear();
                    writeln!(out, "Cleared session '{}'.", self.session)?;
                }
                Input::Session(None) => writeln!(out, "Current session: '{}'.", self.session)?,
                Input::Session(Some(id)) => {
                    self.session = id;
                    writeln!(out, "Switched to session '{}'.", self.session)?;
                }
                Input::Sessions => self.list_sessions(out).await?,
                Input::History => {
                    let handle = self.orchestrator.session(&self.session).await;
                    let history = handle.lock().await.render();
                    if history.is_empty() {
                        writeln!(out, "Session '{}' has no history yet.", self.session)?;
                    } else {
                        write!(out, "{history}")?;
                    }
                }
                Input::Usage => match self.backend.usage() {
                    Some(usage) => writeln!(
                        out,
                        "{} calls, {} input tokens, {} output tokens",
                        usage.call_count(),
                        usage.total().input_tokens,
                        usage.total().output_tokens
                    )?,
                    None => writeln!(out, "Token usage is not tracked for this backend.")?,
                },
                Input::Help => writeln!(out, "{HELP}")?,
                Input::UnknownCommand(cmd) => {
                    writeln!(out, "Unknown command '{cmd}'. Type /help for commands.")?
                }
            }
        }

        writeln!(out, "Goodbye!")?;
        Ok(())
    }

    async fn ask<W: Write>(&self, question: &str, out: &mut W) -> io::Result<()> {
        match self
            .orchestrator
            .handle_turn(question, &self.session, self.backend.as_ref())
            .await
        {
            Ok(answer) => writeln!(out, "\nAssistant: {answer}"),
            Err(e) => writeln!(out, "An error occurred: {e}"),
        }
    }

    async fn list_sessions<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let ids = self.orchestrator.store().session_ids().await;
        if ids.is_empty() {
            return writeln!(out, "No sessions yet.");
        }
        for id in ids {
            let marker = if id == self.session { '*' } else { ' ' };
            writeln!(out, "{marker} {id}")?;
        }
        Ok(())
    }
}
