//! 命令行端到端测试

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("physmc-cli").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_config_show_prints_preset() {
    cli()
        .args(["config", "show", "--control-type", "velocity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("control_type = \"velocity\""))
        .stdout(predicate::str::contains("[controller.location]"))
        .stdout(predicate::str::contains("spring_base = 9000.0"));
}

#[test]
fn test_config_show_rejects_unknown_type() {
    cli()
        .args(["config", "show", "--control-type", "warp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown control type"));
}

#[test]
fn test_config_init_then_check() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hand.toml");

    cli()
        .args(["config", "init"])
        .arg(&path)
        .args(["--control-type", "force"])
        .assert()
        .success();
    assert!(path.exists());

    cli()
        .args(["config", "check"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("location: force"))
        .stdout(predicate::str::contains("spring 9000.0 -> 18000.0"));

    // 不覆盖已有文件
    cli()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn test_config_check_rejects_negative_gain() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "[controller.rotation]\np = 1.0\ni = 0.0\nd = 0.0\nmax = -3.0\n",
    )
    .unwrap();

    cli()
        .args(["config", "check"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rotation"));
}

#[test]
fn test_config_check_missing_file() {
    cli()
        .args(["config", "check", "/definitely/not/here.toml"])
        .assert()
        .failure();
}

#[test]
fn test_track_position_settles_immediately() {
    cli()
        .args([
            "track",
            "--control-type",
            "position",
            "--target",
            "1,-2,0.5",
            "-n",
            "10",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"settled_at\": 1"))
        .stdout(predicate::str::contains("\"location_control_type\": \"position\""));
}

#[test]
fn test_track_acceleration_converges() {
    cli()
        .args(["track", "--dt", "0.001", "-n", "3000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settled at tick"));
}

#[test]
fn test_track_rejects_bad_input() {
    cli()
        .args(["track", "--dt", "0"])
        .assert()
        .failure();

    cli()
        .args(["track", "--target", "1,2"])
        .assert()
        .failure();

    cli()
        .args(["track", "--control-type", "none", "-n", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("none"));
}

#[test]
fn test_grasp_sweep() {
    cli()
        .args(["grasp", "--steps", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("input=0.500 frame=1 alpha=0.000 spring=13500.0"))
        .stdout(predicate::str::contains("spring=18000.0"))
        .stdout(predicate::str::contains("released spring=9000.0"));
}

#[test]
fn test_gripper_sweep() {
    cli()
        .args(["gripper", "--steps", "2", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("input=0.000 target=2.000/-2.000"))
        .stdout(predicate::str::contains("input=0.500 target=0.000/0.000"))
        .stdout(predicate::str::contains("input=1.000 target=-2.000/2.000 position=-2.000/2.000"));
}

#[test]
fn test_gripper_none_is_idle() {
    cli()
        .args(["gripper", "--steps", "1", "--control-type", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("input=1.000 idle"));

    cli()
        .args(["gripper", "--limit=-1"])
        .assert()
        .failure();
}

#[test]
fn test_tune_script() {
    cli()
        .args(["tune", "t++g-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("location P: [P=2020.0;"))
        .stdout(predicate::str::contains("rotation P: [P=1990.0;"));

    cli().args(["tune", "x"]).assert().failure();
}
