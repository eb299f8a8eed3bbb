//! Integration tests for persisted window state.

use serial_test::serial;
use sopdf::WindowState;
use sopdf::state::{CONFIG_DIR_ENV, STATE_FILE_NAME, state_path};
use tempfile::TempDir;

#[test]
#[serial]
fn test_state_lives_in_overridden_config_dir() {
    let dir = TempDir::new().unwrap();
    // SAFETY: every test touching the variable is serialized.
    unsafe { std::env::set_var(CONFIG_DIR_ENV, dir.path()) };

    assert_eq!(WindowState::load(), WindowState::default());

    let state = WindowState {
        maximized: false,
        width: 1024,
        height: 768,
        x: Some(10),
        y: Some(20),
        organize_preview_mode: true,
    };
    state.save();

    assert_eq!(state_path(), dir.path().join(STATE_FILE_NAME));
    assert_eq!(WindowState::load(), state);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(state_path()).unwrap()).unwrap();
    for key in ["maximized", "width", "height", "x", "y", "organize_preview_mode"] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }

    unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
}

#[test]
fn test_partially_corrupt_state_keeps_good_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(STATE_FILE_NAME);
    std::fs::write(
        &path,
        r#"{"maximized": false, "width": "wide", "x": 3.5, "organize_preview_mode": true}"#,
    )
    .unwrap();

    let state = WindowState::load_from(&path);
    assert!(!state.maximized);
    assert_eq!(state.width, 1200);
    assert_eq!(state.x, None);
    assert!(state.organize_preview_mode);
}

#[test]
fn test_save_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join(STATE_FILE_NAME);

    WindowState::default().save_to(&path);
    assert!(path.exists());
}
