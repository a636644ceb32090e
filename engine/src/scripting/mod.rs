//! RTScript: a small embedded scripting language
//!
//! Scripts define two lifecycle functions, `Start` (run once per registration)
//! and `Update` (run every tick). Their bodies may log messages and assign or
//! increment the camera position:
//!
//! ```text
//! fun Start()
//! {
//!     Debug.Log("message");
//!     Camera.position.x = 1.5;
//! }
//! fun Update()
//! {
//!     Camera.position.x += 0.1;
//! }
//! ```
//!
//! The [`ScriptRegistry`] owns scripts and reloads them from disk every tick,
//! so edits take effect while the host is running.

pub mod ast;
pub mod bindings;
pub mod console;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod registry;
pub mod token;

pub use ast::{FieldPath, FunctionBlock, Lifecycle, Statement, Token, TokenKind};
pub use bindings::{
    HostBindingEnvironment, KeySnapshot, LogSink, MemoryLogSink, Severity, TracingLogSink,
};
pub use console::{run_command, ConsoleCommand};
pub use error::{ParseError, RuntimeError, ScriptError};
pub use interpreter::execute;
pub use parser::{parse_function, parse_script, ParsedScript};
pub use registry::{
    RegisterOutcome, ScriptRegistry, ScriptSource, ScriptState, ScriptStatus, TickReport,
    SCRIPT_TEMPLATE,
};
pub use token::{tokenize, Tokens};

#[cfg(test)]
mod tests;
