//! Error types for script loading, parsing and execution

use std::io;
use std::path::{Path, PathBuf};

/// A script could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parse error at line {line}: {reason}")]
pub struct ParseError {
    /// 1-based source line of the offending token
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

/// A statement could not be applied to the host environment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Runtime error: {reason}")]
pub struct RuntimeError {
    pub reason: String,
}

impl RuntimeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Any failure the registry records against a single script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error on '{}': {message}", path.display())]
    Io {
        path: PathBuf,
        kind: io::ErrorKind,
        message: String,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ScriptError {
    pub fn io(path: &Path, error: &io::Error) -> Self {
        ScriptError::Io {
            path: path.to_path_buf(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, ScriptError::Io { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ScriptError::Parse(_))
    }

    pub fn is_runtime(&self) -> bool {
        matches!(self, ScriptError::Runtime(_))
    }
}
