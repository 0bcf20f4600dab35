use std::process::{Command, Output};

fn run_choropleth(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_choropleth"))
        .args(args)
        .output()
        .expect("Failed to spawn choropleth")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run_choropleth(args);
    assert!(output.status.success(), "Failed: {}",
            String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).expect("stdout is UTF-8")
}

#[test]
fn test_palettes_listing() {
    let out = stdout_of(&["palettes"]);
    assert_eq!(out.lines().count(), 5);
    assert!(out.contains("cividis"));
    let safe = stdout_of(&["palettes", "--colorblind-safe"]);
    assert!(!safe.contains("turbo"));
}

#[test]
fn test_table() {
    let out = stdout_of(&["table"]);
    assert!(out.contains("Prince Edward Island"));
    assert!(out.contains("167,680"));
}

#[test]
fn test_map_json() {
    let out = stdout_of(&["--palette", "magma", "--log-scale", "map"]);
    let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    let features = json["features"].as_array().expect("features");
    assert_eq!(features.len(), 13);
    assert_eq!(features[0]["region"], "Ontario");
    assert_eq!(features[0]["style"]["fillColor"], "#FCFDBF");
    assert_eq!(features[12]["style"]["tooltip"], "No Data");
    assert!(json["legend"]["caption"].as_str().unwrap().contains("Tritanopia"));
}

#[test]
fn test_bar_chart() {
    let out = stdout_of(&["bar"]);
    assert!(out.contains("<svg"));
}

#[test]
fn test_unknown_palette_fails() {
    let output = run_choropleth(&["--palette", "rainbow", "map"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("rainbow"));
}

#[test]
fn test_map_markers() {
    let out = stdout_of(&["--palette", "cividis", "map", "--markers"]);
    let json: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    let markers = json["markers"].as_array().expect("markers");
    assert_eq!(markers.len(), 10);
    assert_eq!(markers[0]["region"], "Ontario");
    assert_eq!(markers[0]["latitude"], 50.0);
    assert_eq!(markers[0]["longitude"], -85.0);
    assert_eq!(markers[0]["style"]["fillOpacity"], 0.7);
}

#[test]
fn test_duplicate_region_fails() {
    let output = run_choropleth(&["map", "--region", "Ontario", "--region", "Ontario"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate boundary"));
}

#[test]
fn test_config_view_bar_chart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "view": "bar_chart" }"#).expect("write config");
    let out = stdout_of(&["--config", path.to_str().expect("UTF-8 path")]);
    assert!(out.contains("<svg"));
    assert!(out.contains(r#"width="800""#));
    assert!(out.contains(r#"height="600""#));
}
