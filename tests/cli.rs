/// CLI tests - run the compiled `bindgraph` binary against manifests written to temp dirs.
use std::path::{Path, PathBuf};
use std::process::Command;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const MANIFEST: &str = r#"
[component]
declaration = "com.example.AppComponent"

[[component.contributions]]
key = '@Named("replica") com.example.Database'
bindings = [{ kind = "delegate", module = "com.example.DbModule" }]

[[component.members_injection]]
key = "com.example.MainActivity"
bindings = [{ kind = "members_injection" }]

[[component.children]]
declaration = "com.example.SessionComponent"

[[component.children.contributions]]
key = "com.example.Session"
bindings = [{ kind = "injection" }]
"#;

fn binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bindgraph"))
}

fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("bindings.toml");
    std::fs::write(&path, contents).expect("failed to write manifest");
    path
}

/// Run a bindgraph command in `dir` and assert it exits successfully.
/// Returns stdout as a String.
fn run_success(dir: &Path, args: &[&str]) -> String {
    let out = Command::new(binary())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to invoke bindgraph binary");
    let stdout = String::from_utf8_lossy(&out.stdout).to_string();
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        out.status.success(),
        "command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
        args,
        out.status,
        stdout,
        stderr
    );
    stdout
}

/// Run a bindgraph command in `dir` and assert it exits with a non-zero status.
/// Returns stderr as a String.
fn run_failure(dir: &Path, args: &[&str]) -> String {
    let out = Command::new(binary())
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to invoke bindgraph binary");
    let stderr = String::from_utf8_lossy(&out.stderr).to_string();
    assert!(
        !out.status.success(),
        "command {:?} expected to fail but exited successfully\nstderr: {}",
        args,
        stderr
    );
    stderr
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("output is not valid JSON")
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[test]
fn test_lookup_json_routes_members_injection() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), MANIFEST);

    let stdout = run_success(
        dir.path(),
        &["--json", "lookup", "--key", "com.example.MainActivity", "--kind", "members_injection"],
    );
    let parsed = parse_json(&stdout);
    assert_eq!(parsed["ok"], true);
    assert_eq!(parsed["data"]["table"], "members_injection");
    assert_eq!(parsed["data"]["resolved"]["key"], "com.example.MainActivity");

    let stdout = run_success(
        dir.path(),
        &["--json", "lookup", "--key", "com.example.MainActivity", "--kind", "provider"],
    );
    assert!(parse_json(&stdout)["data"]["resolved"].is_null());
}

#[test]
fn test_lookup_in_subcomponent() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), MANIFEST);

    let stdout = run_success(
        dir.path(),
        &[
            "--json",
            "lookup",
            "--key",
            "com.example.Session",
            "--component",
            "com.example.AppComponent/com.example.SessionComponent",
        ],
    );
    let parsed = parse_json(&stdout);
    assert_eq!(parsed["data"]["resolved"]["bindings"][0]["kind"], "injection");
    assert_eq!(
        parsed["data"]["component"],
        serde_json::json!(["com.example.AppComponent", "com.example.SessionComponent"])
    );
}

#[test]
fn test_lookup_unknown_component_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), MANIFEST);

    let stderr = run_failure(
        dir.path(),
        &["lookup", "--key", "com.example.Session", "--component", "com.example.Nope"],
    );
    assert!(stderr.contains("Component not found"), "stderr: {}", stderr);
}

#[test]
fn test_inspect_lists_components_and_keys() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), MANIFEST);

    let stdout = run_success(dir.path(), &["inspect", "--bindings"]);
    assert!(stdout.contains("com.example.AppComponent"));
    assert!(stdout.contains("com.example.SessionComponent"));
    assert!(stdout.contains(r#"@Named("replica") com.example.Database"#));
    assert!(stdout.contains("delegate from com.example.DbModule"));
}

#[test]
fn test_stats_json() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), MANIFEST);

    let parsed = parse_json(&run_success(dir.path(), &["--json", "stats"]));
    assert_eq!(parsed["data"]["components"], 2);
    assert_eq!(parsed["data"]["contribution_bindings"], 2);
    assert_eq!(parsed["data"]["members_injection_bindings"], 1);
}

#[test]
fn test_validate_reports_duplicate_subcomponents() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(
        dir.path(),
        r#"
[component]
declaration = "com.example.AppComponent"

[[component.children]]
declaration = "com.example.SubComponent"

[[component.children]]
declaration = "com.example.SubComponent"
"#,
    );

    let stderr = run_failure(dir.path(), &["validate"]);
    assert!(stderr.contains("com.example.SubComponent"), "stderr: {}", stderr);
}

#[test]
fn test_init_writes_config_used_by_later_commands() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("graphs")).unwrap();
    write_manifest(&dir.path().join("graphs"), MANIFEST);

    run_success(dir.path(), &["init", "--manifest", "graphs/bindings.toml"]);
    assert!(dir.path().join("bindgraph.toml").exists());

    // Second init without --force refuses to overwrite
    run_failure(dir.path(), &["init"]);

    let parsed = parse_json(&run_success(dir.path(), &["--json", "validate"]));
    assert_eq!(parsed["data"]["valid"], true);
}

#[test]
fn test_config_manifest_is_relative_to_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    write_manifest(&sub, MANIFEST);
    std::fs::write(sub.join("bindgraph.toml"), "manifest = \"bindings.toml\"\n").unwrap();

    // No ./bindings.toml exists; the manifest next to the config must be used
    let parsed = parse_json(&run_success(
        dir.path(),
        &["--config", "sub/bindgraph.toml", "--json", "stats"],
    ));
    assert_eq!(parsed["data"]["components"], 2);
}

#[test]
fn test_init_force_replaces_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), MANIFEST);
    std::fs::write(dir.path().join("bindgraph.toml"), "manifest = [not toml").unwrap();

    run_failure(dir.path(), &["stats"]);
    run_success(dir.path(), &["init", "--force"]);

    let parsed = parse_json(&run_success(dir.path(), &["--json", "validate"]));
    assert_eq!(parsed["data"]["valid"], true);
}

#[test]
fn test_quiet_suppresses_tree_output() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), MANIFEST);

    let stdout = run_success(dir.path(), &["--quiet", "inspect", "--bindings"]);
    assert!(stdout.trim().is_empty(), "stdout: {}", stdout);

    // JSON output is never suppressed
    let parsed = parse_json(&run_success(dir.path(), &["--quiet", "--json", "stats"]));
    assert_eq!(parsed["ok"], true);
}
