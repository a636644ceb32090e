//! Scenario tests for the scripting subsystem

mod lifecycle_tests;

use crate::scripting::{HostBindingEnvironment, KeySnapshot, MemoryLogSink, ScriptRegistry, TickReport};
use glam::Vec3;
use std::path::{Path, PathBuf};

/// Host-side state a test drives the registry with
pub(super) struct TestHost {
    pub position: Vec3,
    pub keys: KeySnapshot,
    pub sink: MemoryLogSink,
}

impl TestHost {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            keys: KeySnapshot::new(),
            sink: MemoryLogSink::new(),
        }
    }

    pub fn tick(&mut self, registry: &mut ScriptRegistry) -> TickReport {
        let mut env =
            HostBindingEnvironment::new(&self.keys, &mut self.sink).with_position(&mut self.position);
        registry.tick(&mut env)
    }

    /// Lines logged so far that start with `prefix`
    pub fn lines_with(&self, prefix: &str) -> Vec<&str> {
        self.sink
            .lines
            .iter()
            .map(String::as_str)
            .filter(|l| l.starts_with(prefix))
            .collect()
    }
}

pub(super) fn write_script(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}
