//! Statement interpreter

use crate::scripting::ast::{FunctionBlock, Lifecycle, Statement};
use crate::scripting::bindings::HostBindingEnvironment;
use crate::scripting::error::RuntimeError;
use tracing::trace;

/// Execute `block` against the host environment
///
/// Statements run in source order. Increments read the live field value, so
/// repeated increments of one field compose. On error execution stops; effects
/// of statements that already ran are kept.
pub fn execute(
    block: &FunctionBlock,
    lifecycle: Lifecycle,
    env: &mut HostBindingEnvironment<'_>,
) -> Result<(), RuntimeError> {
    for statement in &block.statements {
        execute_statement(statement, lifecycle, env)?;
    }
    Ok(())
}

fn execute_statement(
    statement: &Statement,
    lifecycle: Lifecycle,
    env: &mut HostBindingEnvironment<'_>,
) -> Result<(), RuntimeError> {
    match statement {
        Statement::Log { message } => {
            let line = format!("{}{message}", lifecycle.log_prefix());
            env.sink().log(&line);
        }
        Statement::FieldAssign { target, value } => {
            trace!(field = %target, value, "Assign");
            env.write_field(*target, *value)?;
        }
        Statement::FieldIncrement { target, value } => {
            let current = env.read_field(*target)?;
            trace!(field = %target, current, delta = value, "Increment");
            env.write_field(*target, current + value)?;
        }
    }
    Ok(())
}
