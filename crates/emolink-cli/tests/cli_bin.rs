use std::process::Command;

#[test]
fn bin_version_runs() {
    let bin = env!("CARGO_BIN_EXE_emolink");
    let out = Command::new(bin)
        .arg("--version")
        .output()
        .expect("run --version");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("emolink "));
}

#[test]
fn bin_help_runs() {
    let bin = env!("CARGO_BIN_EXE_emolink");
    let out = Command::new(bin)
        .arg("--help")
        .output()
        .expect("run --help");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("USAGE"), "stderr={stderr}");
}

#[test]
fn bin_opens_bare_token() {
    let bin = env!("CARGO_BIN_EXE_emolink");
    // {"template":"proposal","receiver":"Sam"}
    let out = Command::new(bin)
        .args(["open", "eyJ0ZW1wbGF0ZSI6InByb3Bvc2FsIiwicmVjZWl2ZXIiOiJTYW0ifQ"])
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("emolink_bin_test"))
        .output()
        .expect("run open");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Will You?"), "stdout={stdout}");
    assert!(stdout.contains("Dear Sam,"));
}

#[test]
fn bin_debug_log_explains_rejection() {
    let bin = env!("CARGO_BIN_EXE_emolink");
    let out = Command::new(bin)
        .args(["open", "WzFd"])
        .env("EMOLINK_LOG", "debug")
        .output()
        .expect("run open");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("DEBUG"), "stderr={stderr}");
}
