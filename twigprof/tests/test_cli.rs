use std::process::Command;

fn twigprof() -> Command {
    Command::new(env!("CARGO_BIN_EXE_twigprof"))
}

#[test]
fn test_cli_prints_waterfall() {
    let output = twigprof()
        .args(["tests/fixtures/simple_profile.json", "--width", "10"])
        .output()
        .expect("Failed to run twigprof");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("twig-0"));
    assert!(lines[0].ends_with("main"));
    assert!(lines[4].ends_with("⎯⎯⤍ footer.html.twig"));
}

#[test]
fn test_cli_exports_chrome_trace() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("trace.json");

    let status = twigprof()
        .arg("tests/fixtures/simple_profile.json")
        .arg("--export")
        .arg(&path)
        .args(["--format", "chrome", "--event-prefix", "view", "--quiet"])
        .status()
        .expect("Failed to run twigprof");
    assert!(status.success());

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["traceEvents"][0]["args"]["event"], "view-0");
}

#[test]
fn test_cli_rejects_invalid_profile() {
    let output = twigprof()
        .arg("tests/fixtures/nested_root.json")
        .output()
        .expect("Failed to run twigprof");

    assert_eq!(output.status.code(), Some(65));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Root span \"inner\""));
}

#[test]
fn test_cli_default_export_overwrites_with_warning() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("timeline.json");

    let first = twigprof()
        .arg("tests/fixtures/simple_profile.json")
        .arg("--export")
        .arg(&path)
        .status()
        .expect("Failed to run twigprof");
    assert!(first.success());

    // Second export to the same file, default format
    let output = twigprof()
        .arg("tests/fixtures/simple_profile.json")
        .arg("--export")
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run twigprof");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Overwriting existing file"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Exported 5 events (Clockwork)"));

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed["timeline"][0]["name"], "twig-0");
    assert_eq!(parsed["timeline"].as_array().map(Vec::len), Some(5));
}
