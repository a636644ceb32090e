//! Headless OpenRT host
//!
//! Owns the camera position, reads console commands from stdin and ticks the
//! script registry once per frame. Extra command-line arguments are registered
//! as scripts before the first frame.

use openrt_engine::prelude::*;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, warn};

const CONFIG_PATH: &str = "openrt.json";

fn main() {
    // Initialize logging
    openrt_engine::init_logging();
    info!("Starting OpenRT host");

    let config = match ScriptingConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, path = CONFIG_PATH, "Failed to load config, using defaults");
            ScriptingConfig::default()
        }
    };

    let mut registry = ScriptRegistry::new();
    for path in config.startup_scripts.iter().cloned().chain(std::env::args().skip(1)) {
        registry.register(&path);
    }

    let commands = spawn_console();
    let mut sink = TracingLogSink;
    // Headless: no window delivers key events, so the snapshot stays empty
    let input = InputState::new();
    let mut camera_position = Vec3::new(0.0, 0.0, -1.0);
    let frame_duration = config.frame_duration();
    let mut frame: u64 = 0;

    info!(
        scripts = registry.len(),
        tick_rate_hz = config.tick_rate_hz,
        "Host loop running"
    );

    'frames: loop {
        if config.max_frames.is_some_and(|max| frame >= max) {
            info!(frame, "Frame limit reached");
            break;
        }
        let frame_start = Instant::now();

        // Console commands apply before this frame's scripts run
        loop {
            match commands.try_recv() {
                Ok(line) => match line.trim() {
                    "quit" | "exit" => break 'frames,
                    _ => run_command(&mut registry, &line, &mut sink),
                },
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        let keys = input.to_key_snapshot();
        let report = {
            let mut env =
                HostBindingEnvironment::new(&keys, &mut sink).with_position(&mut camera_position);
            registry.tick(&mut env)
        };
        if !report.is_clean() {
            debug!(frame, errors = report.errors.len(), "Script errors this frame");
        }

        frame += 1;
        if let Some(remaining) = frame_duration.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    info!(frame, position = ?camera_position, "Shutting down OpenRT host");
}

/// Forward stdin lines to the main loop
fn spawn_console() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("console".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if sender.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Console input closed");
                        break;
                    }
                }
            }
        });
    if let Err(e) = spawned {
        error!(error = %e, "Failed to start console thread");
    }
    receiver
}
