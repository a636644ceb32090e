//! Console commands that change script registration
//!
//! Results are reported through a [`LogSink`], not the script error channel.

use crate::scripting::bindings::LogSink;
use crate::scripting::error::ScriptError;
use crate::scripting::registry::{RegisterOutcome, ScriptRegistry};
use tracing::debug;

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `add-script <path>` or `/addscript <path>`
    AddScript(Option<String>),
    /// `create-script <path>` or `/createscript <path>`
    CreateScript(Option<String>),
    Unknown(String),
}

impl ConsoleCommand {
    /// Parse one line; blank lines yield `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let command = words.next()?;
        let argument = words.next().map(str::to_string);

        Some(match command {
            "add-script" | "/addscript" => ConsoleCommand::AddScript(argument),
            "create-script" | "/createscript" => ConsoleCommand::CreateScript(argument),
            _ => ConsoleCommand::Unknown(line.to_string()),
        })
    }
}

/// Parse and apply a console line against the registry
pub fn run_command(registry: &mut ScriptRegistry, line: &str, sink: &mut dyn LogSink) {
    let Some(command) = ConsoleCommand::parse(line) else {
        return;
    };
    debug!(?command, "Console command");

    match command {
        ConsoleCommand::AddScript(None) => sink.log_error("No script name provided."),
        ConsoleCommand::AddScript(Some(path)) => match registry.register(&path) {
            RegisterOutcome::Registered => sink.log(&format!("Script added {path}")),
            RegisterOutcome::AlreadyRegistered => {
                sink.log_warning(&format!("Script already registered: {path}"))
            }
        },
        ConsoleCommand::CreateScript(None) => sink.log_error("No filename provided."),
        ConsoleCommand::CreateScript(Some(path)) => match registry.create_script_file(&path) {
            Ok(_) => sink.log(&format!("Script created: {path}")),
            Err(err) => {
                let reason = match &err {
                    ScriptError::Io { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                sink.log_error(&format!("Failed to create script file: {path} ({reason})"));
            }
        },
        ConsoleCommand::Unknown(text) => sink.log_warning(&format!("Unknown command: {text}")),
    }
}
