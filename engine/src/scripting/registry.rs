//! Script registry with per-script lifecycle state
//!
//! Every tick the registry re-reads each registered script from disk, reparses
//! it when the text changed, runs `Start` once per registration and `Update`
//! every tick. Failures are logged through the environment's sink and recorded
//! on the script; they never propagate out of [`ScriptRegistry::tick`].
//!
//! While a script's text is unreadable or fails to parse, the last good blocks
//! keep running and the error is reported on every tick. It is logged once per
//! distinct failure.

use crate::scripting::ast::{FunctionBlock, Lifecycle};
use crate::scripting::bindings::HostBindingEnvironment;
use crate::scripting::error::{ParseError, ScriptError};
use crate::scripting::interpreter::execute;
use crate::scripting::parser::parse_script;
use crate::utils::paths::normalize_path;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Written by [`ScriptRegistry::create_script_file`]
pub const SCRIPT_TEMPLATE: &str = "\
// This function runs only at the start of the game.
fun Start()
{

}

// This function runs every frame.
fun Update()
{

}
";

/// Identity and most recently read text of a script
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSource {
    pub path: PathBuf,
    /// `None` until the first successful read
    pub text: Option<String>,
}

/// Where a script is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    /// Never read from disk
    Unloaded,
    /// Read, no `Start` waiting and `Start` never ran
    Loaded,
    /// `Start` is present and has not completed
    StartPending,
    /// `Start` completed once
    StartDone,
}

/// Registry-owned state of one script
#[derive(Debug, Clone)]
pub struct ScriptState {
    pub source: ScriptSource,
    pub start_block: Option<FunctionBlock>,
    pub update_block: Option<FunctionBlock>,
    pub start_has_run: bool,
    pub last_error: Option<ScriptError>,
    /// Text of the last reload that was parsed, successfully or not
    parsed_text: Option<String>,
    /// Why `parsed_text` failed to parse, if it did
    parse_error: Option<ParseError>,
    /// Read failure already logged, so it is not logged again every tick
    reported_io: Option<ScriptError>,
}

impl ScriptState {
    fn new(path: PathBuf) -> Self {
        Self {
            source: ScriptSource { path, text: None },
            start_block: None,
            update_block: None,
            start_has_run: false,
            last_error: None,
            parsed_text: None,
            parse_error: None,
            reported_io: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.source.path
    }

    pub fn status(&self) -> ScriptStatus {
        if self.start_has_run {
            ScriptStatus::StartDone
        } else if self.source.text.is_none() {
            ScriptStatus::Unloaded
        } else if self.start_block.is_some() {
            ScriptStatus::StartPending
        } else {
            ScriptStatus::Loaded
        }
    }
}

/// Result of [`ScriptRegistry::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    /// The path was already registered; nothing changed
    AlreadyRegistered,
}

/// What one tick did
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickReport {
    pub starts_run: usize,
    pub updates_run: usize,
    pub errors: Vec<(PathBuf, ScriptError)>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Owns every registered script, in registration order
#[derive(Debug)]
pub struct ScriptRegistry {
    scripts: Vec<ScriptState>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        info!("RTScript registry ready");
        Self {
            scripts: Vec::new(),
        }
    }

    /// Register a script by path. Registering a known path is a no-op.
    pub fn register(&mut self, path: impl AsRef<Path>) -> RegisterOutcome {
        let key = normalize_path(path);
        if self.position(&key).is_some() {
            debug!(path = ?key, "Script already registered");
            return RegisterOutcome::AlreadyRegistered;
        }
        info!(path = ?key, "Script added");
        self.scripts.push(ScriptState::new(key));
        RegisterOutcome::Registered
    }

    /// Drop a script and its lifecycle state; returns whether it was registered
    pub fn unregister(&mut self, path: impl AsRef<Path>) -> bool {
        let key = normalize_path(path);
        match self.position(&key) {
            Some(index) => {
                self.scripts.remove(index);
                info!(path = ?key, "Script removed");
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, path: impl AsRef<Path>) -> bool {
        self.position(&normalize_path(path)).is_some()
    }

    pub fn state(&self, path: impl AsRef<Path>) -> Option<&ScriptState> {
        self.position(&normalize_path(path))
            .map(|index| &self.scripts[index])
    }

    /// Registered paths in registration order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.scripts.iter().map(ScriptState::path)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    fn position(&self, key: &Path) -> Option<usize> {
        self.scripts.iter().position(|s| s.source.path == key)
    }

    /// Write a script containing empty `Start` and `Update` functions
    ///
    /// An existing file is replaced. Fails only if the path cannot be written.
    pub fn create_script_file(&self, path: impl AsRef<Path>) -> Result<PathBuf, ScriptError> {
        let path = path.as_ref();
        fs::write(path, SCRIPT_TEMPLATE).map_err(|e| ScriptError::io(path, &e))?;

        info!(path = ?path, "Script created");
        Ok(path.to_path_buf())
    }

    /// Advance every registered script by one host frame
    pub fn tick(&mut self, env: &mut HostBindingEnvironment<'_>) -> TickReport {
        let mut report = TickReport::default();

        for script in &mut self.scripts {
            reload(script, env, &mut report);
            // Runtime errors describe the latest tick only
            clear_runtime_error(script);

            if !script.start_has_run {
                if let Some(block) = &script.start_block {
                    trace!(path = ?script.source.path, "Running Start");
                    match execute(block, Lifecycle::Start, env) {
                        Ok(()) => {
                            script.start_has_run = true;
                            report.starts_run += 1;
                        }
                        Err(e) => {
                            record_runtime_error(script, Lifecycle::Start, e.into(), env, &mut report)
                        }
                    }
                }
            }

            if let Some(block) = &script.update_block {
                trace!(path = ?script.source.path, "Running Update");
                match execute(block, Lifecycle::Update, env) {
                    Ok(()) => report.updates_run += 1,
                    Err(e) => {
                        record_runtime_error(script, Lifecycle::Update, e.into(), env, &mut report)
                    }
                }
            }
        }

        report
    }
}

impl Default for ScriptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-read the script and refresh its blocks when the text changed
///
/// The previous blocks stay in place on any failure.
fn reload(script: &mut ScriptState, env: &mut HostBindingEnvironment<'_>, report: &mut TickReport) {
    let path = script.source.path.clone();

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            let error = ScriptError::io(&path, &e);
            if script.reported_io.as_ref() != Some(&error) {
                env.sink()
                    .log_warning(&format!("Failed to read script: {} ({e})", path.display()));
                script.reported_io = Some(error.clone());
            }
            script.last_error = Some(error.clone());
            report.errors.push((path, error));
            return;
        }
    };
    script.reported_io = None;

    if script.parsed_text.as_deref() != Some(text.as_str()) {
        match parse_script(&text) {
            Ok(parsed) => {
                debug!(path = ?path, "Script reparsed");
                script.start_block = parsed.start;
                script.update_block = parsed.update;
                script.parse_error = None;
            }
            Err(e) => {
                env.sink()
                    .log_error(&format!("{}:{}: {}", path.display(), e.line, e.reason));
                script.parse_error = Some(e);
            }
        }
        script.parsed_text = Some(text.clone());
    }
    script.source.text = Some(text);

    // The current text's parse outcome holds until the text changes
    match &script.parse_error {
        Some(e) => {
            let error = ScriptError::Parse(e.clone());
            script.last_error = Some(error.clone());
            report.errors.push((path, error));
        }
        None => {
            if script
                .last_error
                .as_ref()
                .is_some_and(|e| e.is_io() || e.is_parse())
            {
                script.last_error = None;
            }
        }
    }
}

fn clear_runtime_error(script: &mut ScriptState) {
    if script.last_error.as_ref().is_some_and(ScriptError::is_runtime) {
        script.last_error = None;
    }
}

fn record_runtime_error(
    script: &mut ScriptState,
    lifecycle: Lifecycle,
    error: ScriptError,
    env: &mut HostBindingEnvironment<'_>,
    report: &mut TickReport,
) {
    let path = script.source.path.clone();
    env.sink().log_error(&format!(
        "{} in {}(): {error}",
        path.display(),
        lifecycle.function_name()
    ));
    script.last_error = Some(error.clone());
    report.errors.push((path, error));
}
