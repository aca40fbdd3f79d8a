
use std::fs;

use tempfile::tempdir;

use support_feed::{expect_success, run_latmon};

const FEED: &str = "\
# warm-up
click 10
click 20
display 5

nonsense line
click 30
";

#[test]
fn feed_writes_csv_and_json_exports() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let csv_path = dir.path().join("latency.csv");
    let json_path = dir.path().join("latency.json");
    let csv_arg = csv_path.to_string_lossy().into_owned();
    let json_arg = json_path.to_string_lossy().into_owned();

    let output = run_latmon(
        &[
            "--presenter",
            "none",
            "--max-history",
            "2",
            "--export-csv",
            csv_arg.as_str(),
            "--export-json",
            json_arg.as_str(),
        ],
        FEED,
    )?;
    expect_success(&output)?;

    let csv = fs::read_to_string(&csv_path).map_err(|err| format!("read csv failed: {}", err))?;
    if csv != "Type,Latency (ms)\nClick,20\nClick,30\nDisplay,5\n" {
        return Err(format!("unexpected csv: {:?}", csv));
    }

    let json = fs::read_to_string(&json_path).map_err(|err| format!("read json failed: {}", err))?;
    let value: serde_json::Value =
        serde_json::from_str(&json).map_err(|err| format!("parse json failed: {}", err))?;
    if value["statistics"]["clickCount"] != 2 || value["statistics"]["avgClickLatency"] != 25.0 {
        return Err(format!("unexpected statistics: {}", value["statistics"]));
    }
    if value["history"]["displayLatencies"] != serde_json::json!([5.0]) {
        return Err(format!("unexpected history: {}", value["history"]));
    }
    Ok(())
}

#[test]
fn summary_flag_prints_report() -> Result<(), String> {
    let output = run_latmon(&["--presenter", "none", "--summary"], "click 12\ndisplay 4\n")?;
    expect_success(&output)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = [
        "=== LATENCY STATISTICS ===",
        "CLICK LATENCY:",
        "  Count: 1",
        "  Average: 12.00 ms",
        "DISPLAY LATENCY:",
        "  Last: 4.00 ms",
    ];
    for line in expected {
        if !stdout.lines().any(|candidate| candidate == line) {
            return Err(format!("missing '{}' in:\n{}", line, stdout));
        }
    }
    Ok(())
}

#[test]
fn invalid_history_size_is_rejected() -> Result<(), String> {
    let output = run_latmon(&["--presenter", "none", "--max-history", "0"], "")?;
    if output.status.success() {
        return Err("zero history size should fail".to_owned());
    }
    Ok(())
}

#[test]
fn config_file_supplies_defaults() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let csv_path = dir.path().join("from-config.csv");
    let config_path = dir.path().join("latmon.toml");
    let config = format!(
        "max_history_size = 1\nstrict = true\npresenter = \"none\"\nexport_csv = {:?}\n",
        csv_path.to_string_lossy()
    );
    fs::write(&config_path, config).map_err(|err| format!("write config failed: {}", err))?;
    let config_arg = config_path.to_string_lossy().into_owned();

    let output = run_latmon(&["--config", config_arg.as_str()], "click 8\nclick -3\nclick 9\n")?;
    expect_success(&output)?;

    let csv = fs::read_to_string(&csv_path).map_err(|err| format!("read csv failed: {}", err))?;
    if csv != "Type,Latency (ms)\nClick,9\n" {
        return Err(format!("unexpected csv: {:?}", csv));
    }
    Ok(())
}
