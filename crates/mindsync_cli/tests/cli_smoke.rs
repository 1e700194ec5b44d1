use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_mindsync");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run mindsync --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("status"));
    assert!(stdout.contains("wellness"));
}

#[test]
fn cli_rejects_unknown_subcommand() {
    let exe = env!("CARGO_BIN_EXE_mindsync");
    let output = Command::new(exe)
        .arg("frobnicate")
        .output()
        .expect("failed to run mindsync");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("ERROR: invalid_input"));
}
