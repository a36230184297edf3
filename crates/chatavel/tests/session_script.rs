//! Integration tests for the scripted window session.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// `chatavel` with its own HOME and project directory under `root`, so no
/// config from the machine running the tests leaks in.
fn chatavel_in(root: &Path) -> Command {
    let home = root.join("home");
    let project = root.join("project");
    std::fs::create_dir_all(&home).expect("Failed to create home dir");
    std::fs::create_dir_all(&project).expect("Failed to create project dir");

    let mut command = Command::new(env!("CARGO_BIN_EXE_chatavel"));
    command.current_dir(project).env("HOME", home);
    command
}

/// Run `chatavel session` with `script` piped to stdin.
fn run_session(args: &[&str], script: &str) -> std::process::Output {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    run_session_in(temp_dir.path(), args, script)
}

fn run_session_in(root: &Path, args: &[&str], script: &str) -> std::process::Output {
    let mut child = chatavel_in(root)
        .arg("session")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn 'chatavel session'");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(script.as_bytes())
        .expect("Failed to write session script");

    let output = child
        .wait_with_output()
        .expect("Failed to wait for 'chatavel session'");
    assert!(
        output.status.success(),
        "chatavel session failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn json_frames(output: &std::process::Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("Each line should be JSON"))
        .collect()
}

fn window_ids(frame: &serde_json::Value) -> Vec<String> {
    frame["windows"]
        .as_array()
        .expect("windows should be an array")
        .iter()
        .map(|w| w["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Open two windows, minimize one, then bring it back from the taskbar.
#[test]
fn test_minimize_and_restore_round_trip() {
    let output = run_session(
        &["--json"],
        "open map\nopen chat\nminimize map\nshow\nclick map\n",
    );
    let frames = json_frames(&output);
    assert_eq!(frames.len(), 5);

    let minimized = &frames[3];
    assert_eq!(window_ids(minimized), vec!["chat"]);
    let taskbar = minimized["taskbar"].as_array().expect("taskbar array");
    assert_eq!(taskbar.len(), 1);
    assert_eq!(taskbar[0]["id"], "map");
    assert_eq!(taskbar[0]["z_index"], 999);
    assert_eq!(taskbar[0]["tooltip"], "Map (right-click to close)");

    let restored = &frames[4];
    assert_eq!(window_ids(restored), vec!["map", "chat"]);
    assert!(restored.get("taskbar").is_none(), "taskbar should be absent");

    for frame in &frames[..2] {
        assert!(frame.get("taskbar").is_none());
    }
}

/// Page effects follow whether anything is on screen.
#[test]
fn test_scroll_lock_tracks_visible_windows() {
    let output = run_session(&["--json"], "open map\nminimize map\nrestore map\nclear\n");
    let frames = json_frames(&output);

    let locked: Vec<bool> = frames
        .iter()
        .map(|f| f["scroll_locked"].as_bool().unwrap_or_default())
        .collect();
    assert_eq!(locked, vec![true, false, true, false]);
    assert_eq!(frames[3]["events"][0]["WindowsCleared"]["count"], 1);
}

/// The escape scope flag overrides the default of closing everything.
#[test]
fn test_escape_scope_flag() {
    let output = run_session(
        &["--json", "--escape-scope", "topmost"],
        "open map\nopen chat\nesc\n",
    );
    let frames = json_frames(&output);
    assert_eq!(window_ids(frames.last().expect("a frame")), vec!["map"]);
}

/// Text mode renders the taskbar with the window's icon.
#[test]
fn test_text_rendering() {
    let output = run_session(&[], "open map\nminimize map\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("> opened map"));
    assert!(stdout.contains("Windows: none"));
    assert!(stdout.contains("Taskbar (1 minimized):"));
    assert!(stdout.contains("[map-pin]"));
    assert!(!stdout.contains(r#""event":"#));
}

/// Bad lines are reported on stderr and the session carries on.
#[test]
fn test_bad_line_reported_on_stderr() {
    let output = run_session(&["--json"], "open weather\nopen map\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains("Unknown feature 'weather'"),
        "Expected parse error in stderr, got: {}",
        stderr
    );
    assert_eq!(json_frames(&output).len(), 1);
}

/// --script reads commands from a file.
#[test]
fn test_script_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let script = temp_dir.path().join("trip.txt");
    std::fs::write(&script, "# morning\nopen plan\nopen photo\nquit\nopen map\n")
        .expect("Failed to write script");

    let output = chatavel_in(temp_dir.path())
        .args(["session", "--json", "--script"])
        .arg(&script)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute 'chatavel session --script'");
    assert!(output.status.success());

    let frames = json_frames(&output);
    assert_eq!(frames.len(), 2);
    assert_eq!(window_ids(&frames[1]), vec!["plan", "photo"]);
}

/// A missing script file is an error.
#[test]
fn test_missing_script_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = chatavel_in(temp_dir.path())
        .args(["session", "--script", "/nonexistent/chatavel/trip.txt"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute chatavel");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not open script"));
}

/// A user-level config under HOME applies to the session.
#[test]
fn test_user_config_from_home() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join("home").join(".chatavel");
    std::fs::create_dir_all(&config_dir).expect("Failed to create .chatavel dir");
    std::fs::write(
        config_dir.join("config.toml"),
        "[surface]\nescape_scope = \"topmost\"\n",
    )
    .expect("Failed to write config");

    let output = run_session_in(temp_dir.path(), &["--json"], "open map\nopen chat\nesc\n");
    let frames = json_frames(&output);
    assert_eq!(window_ids(frames.last().expect("a frame")), vec!["map"]);
}

/// Chat and group lines drive the feature windows end to end.
#[test]
fn test_chat_and_group_lines() {
    let output = run_session(
        &["--json"],
        "open chat\nsay Ferry at 9?\nopen group\ninvite sato@example.com\ninvite nope\n",
    );
    let frames = json_frames(&output);
    assert_eq!(frames.len(), 4);

    let last = frames.last().expect("a frame");
    assert_eq!(window_ids(last), vec!["chat", "group"]);
    assert_eq!(last["windows"][0]["content"]["messages"][0]["text"], "Ferry at 9?");
    assert_eq!(last["windows"][1]["content"]["invitations"][0], "sato@example.com");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid email address 'nope'"),
        "Expected invite error in stderr, got: {}",
        stderr
    );
}
