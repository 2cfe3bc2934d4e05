use std::fs;
use std::path::Path;
use std::process::Command;

use driftcheck::config::{DriftConfig, StorageConfig};
use driftcheck::tooling::cli::{CliContext, Commands, ReportFormat, EXIT_DRIFT, EXIT_FAILURE};
use tempfile::TempDir;

fn context(data_dir: &Path) -> CliContext {
    CliContext::from_config(DriftConfig {
        storage: StorageConfig {
            data_dir: Some(data_dir.to_path_buf()),
        },
        ..DriftConfig::default()
    })
}

fn check(snapshot: &Path, root: Option<&Path>, format: ReportFormat) -> Commands {
    Commands::Check {
        snapshot: snapshot.to_path_buf(),
        root: root.map(Path::to_path_buf),
        format,
        quiet: false,
    }
}

#[test]
fn scan_prints_snapshot_json() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();

    let output = context(temp_dir.path())
        .execute(&Commands::Scan {
            directory: root.clone(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let key = root.join("a.txt").to_string_lossy().into_owned();
    assert_eq!(
        parsed[&key],
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert!(!output.drift);
}

#[test]
fn check_json_contract_has_required_fields() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("keep.txt"), "keep").unwrap();
    fs::write(root.join("gone.txt"), "gone").unwrap();
    let snap = temp_dir.path().join("snap.json");
    let ctx = context(temp_dir.path());

    ctx.execute(&Commands::Save {
        directory: root.clone(),
        output: Some(snap.clone()),
    })
    .unwrap();
    fs::remove_file(root.join("gone.txt")).unwrap();
    fs::write(root.join("fresh.txt"), "fresh").unwrap();

    let output = ctx
        .execute(&check(&snap, Some(&root), ReportFormat::Json))
        .unwrap();
    assert!(output.drift);

    let parsed: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let entries = parsed
        .get("entries")
        .and_then(|v| v.as_array())
        .expect("entries array should exist");
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert!(entry.get("path").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("status").and_then(|v| v.as_str()).is_some());
    }
    assert_eq!(parsed["summary"]["missing"], 1);
    assert_eq!(parsed["summary"]["unchanged"], 1);
    assert_eq!(parsed["summary"]["added"], 1);
    assert_eq!(parsed["added"].as_array().unwrap().len(), 1);
}

#[test]
fn check_malformed_snapshot_fails() {
    let temp_dir = TempDir::new().unwrap();
    let snap = temp_dir.path().join("bad.json");
    fs::write(&snap, "{\"a\": \"not-a-digest\"}").unwrap();

    let result = context(temp_dir.path()).execute(&check(&snap, None, ReportFormat::Text));
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Malformed snapshot"), "{}", err);
}

#[test]
fn binary_exit_codes_follow_drift() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tree");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    let snap = temp_dir.path().join("snap.json");

    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_driftcheck"))
            .args(args)
            .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
            .env("XDG_DATA_HOME", temp_dir.path().join("data"))
            .env("NO_COLOR", "1")
            .env_remove("DRIFTCHECK_LOG")
            .output()
            .unwrap()
    };
    let root_arg = root.to_str().unwrap();
    let snap_arg = snap.to_str().unwrap();

    let saved = run(&["save", root_arg, "--output", snap_arg]);
    assert!(saved.status.success());
    assert!(String::from_utf8_lossy(&saved.stdout).contains("Snapshot saved to"));

    let clean = run(&["check", snap_arg]);
    assert_eq!(clean.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&clean.stdout).starts_with("[OK]"));

    fs::write(root.join("a.txt"), "tampered").unwrap();
    let drifted = run(&["verify", snap_arg, "--quiet"]);
    assert_eq!(drifted.status.code(), Some(EXIT_DRIFT));
    assert!(String::from_utf8_lossy(&drifted.stdout).starts_with("[MODIFIED]"));

    let failed = run(&["check", temp_dir.path().join("absent.json").to_str().unwrap()]);
    assert_eq!(failed.status.code(), Some(EXIT_FAILURE));
    assert!(String::from_utf8_lossy(&failed.stderr).contains("Error"));
}

#[test]
fn binary_save_uses_data_directory_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("music");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("track.flac"), "flac").unwrap();
    let data_home = temp_dir.path().join("data");

    let output = Command::new(env!("CARGO_BIN_EXE_driftcheck"))
        .args(["save", root.to_str().unwrap()])
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env("XDG_DATA_HOME", &data_home)
        .env_remove("DRIFTCHECK__STORAGE__DATA_DIR")
        .output()
        .unwrap();

    assert!(output.status.success(), "{:?}", output);
    assert!(data_home
        .join("driftcheck")
        .join("snapshot_music.json")
        .is_file());
}

#[cfg(unix)]
#[test]
fn binary_relative_roots_give_plain_keys() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path().join("work");
    fs::create_dir_all(cwd.join("tree")).unwrap();
    fs::write(cwd.join("tree/a.txt"), "hello").unwrap();

    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_driftcheck"))
            .args(args)
            .current_dir(&cwd)
            .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
            .env("XDG_DATA_HOME", temp_dir.path().join("data"))
            .env("NO_COLOR", "1")
            .output()
            .unwrap()
    };
    let keys = |output: &std::process::Output| -> Vec<String> {
        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        parsed.as_object().unwrap().keys().cloned().collect()
    };

    let dot = run(&["scan", "."]);
    assert!(dot.status.success(), "{:?}", dot);
    assert_eq!(keys(&dot), vec!["tree/a.txt"]);

    let dotted = run(&["scan", "./tree"]);
    assert!(dotted.status.success(), "{:?}", dotted);
    assert_eq!(keys(&dotted), vec!["tree/a.txt"]);

    // A snapshot keyed the plain way lines up with a `./`-spelled root
    fs::write(
        temp_dir.path().join("reference.json"),
        "{\n    \"tree/a.txt\": \"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\"\n}\n",
    )
    .unwrap();
    let reference = temp_dir.path().join("reference.json");
    let checked = run(&["check", reference.to_str().unwrap(), "--root", "./tree"]);
    assert_eq!(checked.status.code(), Some(0), "{:?}", checked);
    let stdout = String::from_utf8_lossy(&checked.stdout);
    assert!(stdout.starts_with("[OK]"), "{}", stdout);
    assert!(!stdout.contains("[ADDED]"), "{}", stdout);
}
