//! End-to-end tests driving the registry the way the host loop does

use glam::Vec3;
use openrt_engine::config::ScriptingConfig;
use openrt_engine::input::InputState;
use openrt_engine::scripting::{
    run_command, HostBindingEnvironment, MemoryLogSink, ScriptRegistry, ScriptStatus,
    SCRIPT_TEMPLATE,
};
use std::fs;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// One host frame: apply queued console lines, then tick
fn frame(
    registry: &mut ScriptRegistry,
    commands: &[&str],
    input: &InputState,
    position: &mut Vec3,
    sink: &mut MemoryLogSink,
) {
    for line in commands {
        run_command(registry, line, sink);
    }
    let keys = input.to_key_snapshot();
    let mut env = HostBindingEnvironment::new(&keys, sink).with_position(position);
    registry.tick(&mut env);
}

#[test]
fn test_create_edit_and_run_script_from_console() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScriptingConfig {
        asset_root: dir.path().to_path_buf(),
        ..Default::default()
    };
    fs::create_dir_all(config.scripts_path()).unwrap();
    let path = config.script_path("camera").unwrap();
    let path_text = path.display().to_string();

    let mut registry = ScriptRegistry::new();
    let input = InputState::new();
    let mut sink = MemoryLogSink::new();
    let mut position = Vec3::new(0.0, 0.0, -1.0);

    frame(
        &mut registry,
        &[format!("create-script {path_text}").as_str()],
        &input,
        &mut position,
        &mut sink,
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), SCRIPT_TEMPLATE);
    assert!(registry.is_empty());

    fs::write(
        &path,
        r#"
// Slide the camera forward
fun Start()
{
    Debug.Log("camera script online");
    Camera.position.z = 0;
}

fun Update()
{
    Camera.position.z += 0.5;
}
"#,
    )
    .unwrap();

    frame(
        &mut registry,
        &[format!("add-script {path_text}").as_str()],
        &input,
        &mut position,
        &mut sink,
    );
    frame(&mut registry, &[], &input, &mut position, &mut sink);

    assert_eq!(position, Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(
        registry.state(&path).map(|s| s.status()),
        Some(ScriptStatus::StartDone)
    );
    assert_eq!(
        sink.lines,
        vec![
            format!("Script created: {path_text}"),
            format!("Script added {path_text}"),
            "[Script] camera script online".to_string(),
        ]
    );
}

#[test]
fn test_keys_reach_the_environment() {
    let mut input = InputState::new();
    input.set_key(KeyCode::KeyW, ElementState::Pressed);
    input.set_key(KeyCode::Space, ElementState::Pressed);
    input.set_key(KeyCode::Space, ElementState::Released);

    let keys = input.to_key_snapshot();
    let mut sink = MemoryLogSink::new();
    let env = HostBindingEnvironment::new(&keys, &mut sink);

    assert!(env.is_key_pressed("KeyW"));
    assert!(!env.is_key_pressed("Space"));
    assert!(!env.has_position());
}

#[test]
fn test_startup_scripts_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("test.ors");
    fs::write(&script, "fun Update() { Camera.position.y += 2; }").unwrap();

    let config_path = dir.path().join("openrt.json");
    let config_json = serde_json::json!({
        "startup_scripts": [script.display().to_string()],
        "max_frames": 3
    });
    fs::write(&config_path, config_json.to_string()).unwrap();
    let config = ScriptingConfig::load(&config_path).unwrap();

    let mut registry = ScriptRegistry::new();
    for path in &config.startup_scripts {
        registry.register(path);
    }

    let input = InputState::new();
    let mut sink = MemoryLogSink::new();
    let mut position = Vec3::ZERO;
    for _ in 0..config.max_frames.unwrap() {
        frame(&mut registry, &[], &input, &mut position, &mut sink);
    }

    assert_eq!(position.y, 6.0);
    assert!(sink.lines.is_empty());
}
