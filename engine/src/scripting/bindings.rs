//! Host state exposed to scripts
//!
//! A [`HostBindingEnvironment`] borrows the host's camera position, a keyboard
//! snapshot and a log sink for the duration of a single registry tick.

use crate::scripting::ast::FieldPath;
use crate::scripting::error::RuntimeError;
use glam::Vec3;
use std::collections::HashSet;
use tracing::{error, info, warn};

/// Read-only keyboard state for the current tick
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    /// Names of held keys, e.g. `"KeyW"` or `"Space"`
    pub keys_pressed: HashSet<String>,
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key as pressed or released
    pub fn set_key_pressed(&mut self, key: impl Into<String>, pressed: bool) {
        let key = key.into();
        if pressed {
            self.keys_pressed.insert(key);
        } else {
            self.keys_pressed.remove(&key);
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys_pressed.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys_pressed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys_pressed.is_empty()
    }
}

/// Severity of a line written to a [`LogSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Append-only text channel for script output and diagnostics
///
/// Implementations must not fail; logging is outside the script error model.
pub trait LogSink {
    /// Write one fully formatted line
    fn emit(&mut self, severity: Severity, line: &str);

    fn log(&mut self, message: &str) {
        self.emit(Severity::Info, message);
    }

    fn log_warning(&mut self, message: &str) {
        self.emit(Severity::Warning, &format!("[Warning] {message}"));
    }

    fn log_error(&mut self, message: &str) {
        self.emit(Severity::Error, &format!("[Error] {message}"));
    }
}

/// Forwards lines to `tracing` under the `script` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn emit(&mut self, severity: Severity, line: &str) {
        match severity {
            Severity::Info => info!(target: "script", "{line}"),
            Severity::Warning => warn!(target: "script", "{line}"),
            Severity::Error => error!(target: "script", "{line}"),
        }
    }
}

/// Collects lines in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryLogSink {
    pub lines: Vec<String>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all collected lines, leaving the sink empty
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }
}

impl LogSink for MemoryLogSink {
    fn emit(&mut self, _severity: Severity, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Capabilities a script may observe or mutate during one tick
pub struct HostBindingEnvironment<'a> {
    position: Option<&'a mut Vec3>,
    keys: &'a KeySnapshot,
    sink: &'a mut dyn LogSink,
}

impl<'a> HostBindingEnvironment<'a> {
    /// Environment with no bound position
    pub fn new(keys: &'a KeySnapshot, sink: &'a mut dyn LogSink) -> Self {
        Self {
            position: None,
            keys,
            sink,
        }
    }

    /// Bind the host's camera position
    pub fn with_position(mut self, position: &'a mut Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    /// Current value of a bound field
    pub fn read_field(&self, field: FieldPath) -> Result<f32, RuntimeError> {
        let position = self.position.as_deref().ok_or_else(|| unbound(field))?;
        Ok(match field {
            FieldPath::PositionX => position.x,
            FieldPath::PositionY => position.y,
            FieldPath::PositionZ => position.z,
        })
    }

    /// Overwrite a bound field
    pub fn write_field(&mut self, field: FieldPath, value: f32) -> Result<(), RuntimeError> {
        let position = self.position.as_deref_mut().ok_or_else(|| unbound(field))?;
        match field {
            FieldPath::PositionX => position.x = value,
            FieldPath::PositionY => position.y = value,
            FieldPath::PositionZ => position.z = value,
        }
        Ok(())
    }

    pub fn keys(&self) -> &KeySnapshot {
        self.keys
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys.is_key_pressed(key)
    }

    pub fn sink(&mut self) -> &mut dyn LogSink {
        &mut *self.sink
    }
}

fn unbound(field: FieldPath) -> RuntimeError {
    RuntimeError::new(format!("field '{field}' is not bound by the host"))
}
