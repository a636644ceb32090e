//! Tests for Start/Update lifecycle semantics

use super::{write_script, TestHost};
use crate::scripting::{ScriptRegistry, ScriptStatus};
use glam::Vec3;

const ORBIT: &str = r#"
fun Start()
{
    Debug.Log("boot");
    Camera.position.y = 2;
}

fun Update()
{
    Debug.Log("tick");
    Camera.position.x += 1;
}
"#;

#[test]
fn test_start_runs_once_update_every_tick() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "orbit.ors", ORBIT);
    let mut registry = ScriptRegistry::new();
    registry.register(&path);
    let mut host = TestHost::new(Vec3::ZERO);

    for frame in 0..5 {
        let report = host.tick(&mut registry);
        assert!(report.is_clean(), "frame {frame}: {:?}", report.errors);
        assert_eq!(report.starts_run, usize::from(frame == 0));
        assert_eq!(report.updates_run, 1);
    }

    assert_eq!(host.lines_with("[Script] "), vec!["[Script] boot"]);
    assert_eq!(host.lines_with("[Script-Update] ").len(), 5);
    assert_eq!(host.position, Vec3::new(5.0, 2.0, 0.0));
    assert_eq!(
        registry.state(&path).map(|s| s.status()),
        Some(ScriptStatus::StartDone)
    );
}

#[test]
fn test_start_and_update_share_first_tick_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "orbit.ors", ORBIT);
    let mut registry = ScriptRegistry::new();
    registry.register(&path);
    let mut host = TestHost::new(Vec3::ZERO);

    host.tick(&mut registry);

    assert_eq!(host.sink.lines, vec!["[Script] boot", "[Script-Update] tick"]);
}

#[test]
fn test_start_not_rerun_after_source_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "orbit.ors", ORBIT);
    let mut registry = ScriptRegistry::new();
    registry.register(&path);
    let mut host = TestHost::new(Vec3::ZERO);

    host.tick(&mut registry);
    write_script(
        dir.path(),
        "orbit.ors",
        r#"fun Start() { Debug.Log("edited boot"); } fun Update() { }"#,
    );
    let report = host.tick(&mut registry);

    assert_eq!(report.starts_run, 0);
    assert!(!host.sink.contains("[Script] edited boot"));
}

#[test]
fn test_update_only_script_sets_field_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "y.ors", "fun Update() { Camera.position.y = 3; }");
    let mut registry = ScriptRegistry::new();
    registry.register(&path);
    let mut host = TestHost::new(Vec3::new(-1.5, 8.0, 4.25));

    let report = host.tick(&mut registry);

    assert_eq!(report.starts_run, 0);
    assert_eq!(report.updates_run, 1);
    assert_eq!(host.position, Vec3::new(-1.5, 3.0, 4.25));
    assert_eq!(
        registry.state(&path).map(|s| s.status()),
        Some(ScriptStatus::Loaded)
    );
}

#[test]
fn test_two_increments_move_by_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(
        dir.path(),
        "inc.ors",
        "fun Update()\n{\n    Camera.position.x += 1;\n    Camera.position.x += 1;\n}\n",
    );
    let mut registry = ScriptRegistry::new();
    registry.register(&path);

    for initial in [0.0_f32, 12.5, -40.0] {
        let mut host = TestHost::new(Vec3::new(initial, 0.0, 0.0));
        host.tick(&mut registry);
        assert_eq!(host.position.x, initial + 2.0);
    }
}

#[test]
fn test_registering_twice_keeps_one_lifetime() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "orbit.ors", ORBIT);
    let mut registry = ScriptRegistry::new();
    registry.register(&path);
    let mut host = TestHost::new(Vec3::ZERO);
    host.tick(&mut registry);

    registry.register(&path);
    let report = host.tick(&mut registry);

    assert_eq!(registry.len(), 1);
    assert_eq!(report.starts_run, 0);
    assert_eq!(report.updates_run, 1);
}

#[test]
fn test_reregistering_after_unregister_runs_start_again() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(dir.path(), "orbit.ors", ORBIT);
    let mut registry = ScriptRegistry::new();
    let mut host = TestHost::new(Vec3::ZERO);

    registry.register(&path);
    host.tick(&mut registry);
    assert!(registry.unregister(&path));
    assert_eq!(host.tick(&mut registry).updates_run, 0);

    registry.register(&path);
    let report = host.tick(&mut registry);
    assert_eq!(report.starts_run, 1);
    assert_eq!(host.lines_with("[Script] boot").len(), 2);
}

#[test]
fn test_runtime_error_leaves_start_pending() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_script(
        dir.path(),
        "cam.ors",
        r#"fun Start() { Debug.Log("a"); Camera.position.x = 1; Debug.Log("b"); }"#,
    );
    let mut registry = ScriptRegistry::new();
    registry.register(&path);

    let keys = crate::scripting::KeySnapshot::new();
    let mut sink = crate::scripting::MemoryLogSink::new();
    let report = {
        // No position bound
        let mut env = crate::scripting::HostBindingEnvironment::new(&keys, &mut sink);
        registry.tick(&mut env)
    };

    assert_eq!(report.starts_run, 0);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].1.is_runtime());
    assert_eq!(sink.lines[0], "[Script] a");
    assert!(sink.lines[1].starts_with("[Error] "));
    assert!(!sink.contains("[Script] b"));

    let state = registry.state(&path).unwrap();
    assert!(!state.start_has_run);
    assert_eq!(state.status(), ScriptStatus::StartPending);

    // Once the host binds a position, Start completes and the error clears
    let mut host = TestHost::new(Vec3::ZERO);
    let report = host.tick(&mut registry);
    assert_eq!(report.starts_run, 1);
    assert_eq!(host.position.x, 1.0);
    assert_eq!(registry.state(&path).unwrap().last_error, None);
}

#[test]
fn test_failing_script_does_not_affect_others() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_script(dir.path(), "broken.ors", "fun Update() { Camera.position.q = 1; }");
    let good = write_script(dir.path(), "good.ors", "fun Update() { Camera.position.z += 0.5; }");
    let mut registry = ScriptRegistry::new();
    registry.register(&broken);
    registry.register(&good);
    let mut host = TestHost::new(Vec3::ZERO);

    let report = host.tick(&mut registry);

    assert_eq!(report.updates_run, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].0, broken);
    assert_eq!(host.position.z, 0.5);
}
