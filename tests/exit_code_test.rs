use std::fs;
use std::process::{Command, Output};
use tempdir::TempDir;


fn csvtrace(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csvtrace"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to start csvtrace")
}


#[test]
fn usage_errors_exit_with_one() {
    let out = csvtrace(&["convert"]);
    assert_eq!(Some(1), out.status.code());
    assert!(String::from_utf8_lossy(&out.stderr).contains("USAGE"));

    let out = csvtrace(&["convert", "in.csv", "out.vcd", "-t"]);
    assert_eq!(Some(1), out.status.code());
    assert!(!out.stderr.is_empty());

    let out = csvtrace(&["convert", "in.csv", "out.vcd", "extra.vcd"]);
    assert_eq!(Some(1), out.status.code());
}

#[test]
fn help_and_version_exit_with_zero() {
    let out = csvtrace(&["--help"]);
    assert_eq!(Some(0), out.status.code());
    assert!(String::from_utf8_lossy(&out.stdout).contains("convert"));

    let out = csvtrace(&["convert", "--help"]);
    assert_eq!(Some(0), out.status.code());

    let out = csvtrace(&["--version"]);
    assert_eq!(Some(0), out.status.code());
}

#[test]
fn runtime_errors_exit_with_one() {
    let tmpd = TempDir::new("csvtrace").unwrap();
    let input = tmpd.path().join("nope.csv");
    let output = tmpd.path().join("out.vcd");

    let out = csvtrace(&["convert", input.to_str().unwrap(), output.to_str().unwrap()]);
    assert_eq!(Some(1), out.status.code());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("Error: Failed to convert"));
    assert_eq!(1, stderr.matches("os error").count());
    assert!(!output.exists());
}

#[test]
fn successful_run_exits_with_zero() {
    let tmpd = TempDir::new("csvtrace").unwrap();
    let input = tmpd.path().join("in.csv");
    let output = tmpd.path().join("out.vcd");
    fs::write(&input, "Time [s],A,B\n0.0,1,0\n0.000001,0,1\n").unwrap();

    let out = csvtrace(&["convert", "-t", "1 us", input.to_str().unwrap(), output.to_str().unwrap()]);
    assert_eq!(Some(0), out.status.code());
    assert!(out.stdout.is_empty());

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("\n#1\n0!\n1\"\n"));
}
