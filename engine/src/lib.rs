//! OpenRT engine core
//!
//! This crate provides the RTScript scripting subsystem together with the
//! host-side pieces it binds to: configuration, keyboard input state and
//! logging setup.

pub mod config;
pub mod input;
pub mod scripting;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    // Math types
    pub use glam::Vec3;

    // Config types
    pub use crate::config::{ConfigError, ScriptingConfig};

    // Scripting types
    pub use crate::scripting::{
        run_command, HostBindingEnvironment, KeySnapshot, LogSink, ScriptError, ScriptRegistry,
        TickReport, TracingLogSink,
    };

    // Input types
    pub use crate::input::InputState;
}

/// Initialize logging for the engine
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
