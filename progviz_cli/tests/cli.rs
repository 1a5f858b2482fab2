use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command with an isolated configuration directory
fn progviz(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("progviz").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("PROGVIZ_BAR__BAR_LENGTH")
        .env_remove("PROGVIZ_BAR__DONE_COLOR")
        .env_remove("PROGVIZ_RUN__DESCRIPTION");
    cmd
}

fn write_config(config_home: &TempDir, content: &str) {
    let dir = config_home.path().join("progviz");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("progviz").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_demo_prints_plainly_when_piped() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["demo", "--count", "3000", "--every", "1000"])
        .assert()
        .success()
        .stdout("0\n1000\n2000\n3000\nDone!\n");
}

#[test]
fn test_demo_default_count() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0\n1000\n"))
        .stdout(predicate::str::ends_with("9000\n10000\nDone!\n"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_demo_rejects_multi_char_fill() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["demo", "--count", "5", "--fill", "=="])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage Error"))
        .stderr(predicate::str::contains("=="));
}

#[test]
fn test_demo_rejects_unknown_color() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["demo", "--done-color", "orange"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("orange"));
}

#[test]
fn test_demo_rejects_zero_bar_length() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["demo", "--count", "1", "--bar-length", "0"])
        .assert()
        .code(2);
}

#[test]
fn test_config_show_defaults() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[bar]"))
        .stdout(predicate::str::contains("bar_length = 50"))
        .stdout(predicate::str::contains("done_color = \"green\""))
        .stdout(predicate::str::contains("progress_color = \"magenta\""))
        .stdout(predicate::str::contains("throttle_ms = 80"));
}

#[test]
fn test_config_show_json() {
    let config_home = TempDir::new().unwrap();
    let output = progviz(&config_home)
        .args(["config", "show", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["bar"]["bar_length"], 50);
    assert_eq!(value["bar"]["fill_char"], "=");
    assert_eq!(value["run"]["description"], "Progress");
    assert_eq!(value["run"]["track_time"], true);
}

#[test]
fn test_config_file_and_env_layers() {
    let config_home = TempDir::new().unwrap();
    write_config(
        &config_home,
        "[bar]\nbar_length = 20\ndone_color = \"cyan\"\n",
    );

    progviz(&config_home)
        .args(["config", "show"])
        .env("PROGVIZ_BAR__BAR_LENGTH", "12")
        .assert()
        .success()
        .stdout(predicate::str::contains("bar_length = 12"))
        .stdout(predicate::str::contains("done_color = \"cyan\""));
}

#[test]
fn test_invalid_config_file_is_misuse() {
    let config_home = TempDir::new().unwrap();
    write_config(&config_home, "[bar]\nprogress_color = \"orange\"\n");

    progviz(&config_home)
        .args(["demo", "--count", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("orange"))
        .stderr(predicate::str::contains("config file"));
}

#[test]
fn test_config_path_follows_xdg() {
    let config_home = TempDir::new().unwrap();
    let expected = config_home.path().join("progviz/config.toml");
    progviz(&config_home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn test_config_set_then_get() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["config", "set", "bar.done_color", "pink"])
        .assert()
        .success();

    progviz(&config_home)
        .args(["config", "get", "bar.done_color"])
        .assert()
        .success()
        .stdout("pink\n");

    assert!(config_home.path().join("progviz/config.toml").exists());
}

#[test]
fn test_config_set_rejects_bad_value() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["config", "set", "bar.fill_char", "ab"])
        .assert()
        .code(2);
}

#[test]
fn test_completions() {
    let config_home = TempDir::new().unwrap();
    progviz(&config_home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("progviz"));
}
