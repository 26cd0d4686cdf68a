// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use serde_json::Value;
use tempfile::{tempdir, TempDir};

fn parse_commands_from_help(text: &str) -> Vec<String> {
    let mut commands = Vec::new();
    let mut in_commands = false;
    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed == "Commands:" {
            in_commands = true;
            continue;
        }
        if in_commands {
            if trimmed.is_empty() {
                break;
            }
            let entry = trimmed.trim_start();
            let name = entry.split_whitespace().next().unwrap_or("");
            if !name.is_empty() && name != "help" {
                commands.push(name.to_string());
            }
        }
    }
    commands.sort();
    commands
}

/// `eco9` isolated from the caller's config files and environment.
fn eco9(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_eco9"));
    cmd.env_clear()
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"));
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    let text = String::from_utf8(output.stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(text.trim()).expect("json stdout")
}

#[test]
fn help_command_surface_is_stable() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home).arg("--help").output().expect("run help");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8 help");
    let observed = parse_commands_from_help(&text);
    let expected = include_str!("snapshots/help.commands.txt")
        .lines()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(observed, expected);
}

#[test]
fn version_flag_prints_crate_version() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home).arg("--version").output().expect("run version");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8 version");
    assert!(text.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_returns_usage_exit_code_with_machine_error() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args(["--json", "--unknown-flag"])
        .output()
        .expect("run bad cli");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("usage_error"));
}

#[test]
fn missing_command_is_a_usage_error() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home).output().expect("run bare");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn impact_calculate_emits_rounded_result_and_source() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args([
            "--json", "impact", "calculate", "--category", "transport", "--value", "5.2",
            "--unit", "km",
        ])
        .output()
        .expect("run calculate");
    assert!(output.status.success(), "{output:?}");
    let payload = stdout_json(&output);
    assert_eq!(payload["impact"]["co2_saved"], 2.08);
    assert_eq!(payload["impact"]["water_conserved"], 0.52);
    assert_eq!(payload["source"]["kind"], "subtype");
    assert_eq!(payload["source"]["subtype"], "biking");
}

#[test]
fn unknown_category_reports_global_default() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args([
            "--json", "impact", "calculate", "--category", "gardening", "--value", "10",
            "--unit", "m2",
        ])
        .output()
        .expect("run calculate");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["impact"]["co2_saved"], 5.0);
    assert_eq!(payload["impact"]["water_conserved"], 1.0);
    assert_eq!(payload["source"]["kind"], "global_default");
}

#[test]
fn checked_calculation_rejects_negative_value() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args([
            "--json", "impact", "calculate", "--checked", "--category", "waste", "--value",
            "-2", "--unit", "kg",
        ])
        .output()
        .expect("run calculate");
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    let machine: Value = serde_json::from_str(stderr.lines().last().expect("line")).expect("json");
    assert_eq!(machine["code"], "invalid_argument");
    assert_eq!(machine["details"]["field"], "value");
}

#[test]
fn clamp_policy_from_env_zeroes_negative_value() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .env("ECO9_NEGATIVE_VALUES", "clamp")
        .args([
            "--json", "impact", "calculate", "--checked", "--category", "waste", "--value",
            "-2", "--unit", "kg",
        ])
        .output()
        .expect("run calculate");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["value"], 0.0);
    assert_eq!(payload["impact"]["co2_saved"], 0.0);
}

#[test]
fn impact_table_prints_fingerprint() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args(["--json", "impact", "table"])
        .output()
        .expect("run table");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["source"], "builtin");
    assert_eq!(payload["fingerprint"].as_str().map(str::len), Some(64));
    assert_eq!(payload["table"]["categories"][0]["name"], "transport");
}

#[test]
fn print_config_paths_uses_xdg_locations() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args(["--json", "--print-config-paths"])
        .output()
        .expect("run paths");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    let user_config = payload["user_config"].as_str().expect("user_config");
    assert!(user_config.ends_with("config/eco9/config.toml"), "{user_config}");
    let data_dir = payload["data_dir"].as_str().expect("data_dir");
    assert!(data_dir.ends_with("data/eco9"), "{data_dir}");
}

#[test]
fn missing_explicit_config_is_a_usage_error() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args(["--json", "--config", "absent.toml", "config"])
        .output()
        .expect("run config");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("config_error"));
}

#[test]
fn completion_generates_script() {
    let home = tempdir().expect("tempdir");
    let output = eco9(&home)
        .args(["completion", "bash"])
        .output()
        .expect("run completion");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("eco9"));
}
