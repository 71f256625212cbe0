//! Process-level behaviour of the error builder
//!
//! Runs the offending call in a child copy of this test binary, since the
//! call takes the whole process down.

use std::process::Command;

use herald_core::Arg;

const CHILD_ENV: &str = "HERALD_BUILD_ABORT_CHILD";

#[test]
fn build_without_arguments_aborts() {
    if std::env::var_os(CHILD_ENV).is_some() {
        let _ = herald_core::build(Vec::<Arg>::new());
        // Only reached if the call returned
        std::process::exit(0);
    }

    let exe = std::env::current_exe().unwrap();
    let output = Command::new(exe)
        .args(["--exact", "build_without_arguments_aborts", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();

    assert!(
        !output.status.success(),
        "child exited cleanly: {}",
        String::from_utf8_lossy(&output.stdout)
    );

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(output.status.signal(), Some(6), "expected SIGABRT, got {:?}", output.status);
    }
}

#[test]
fn build_with_one_argument_returns() {
    let result = herald_core::build([Arg::from(herald_core::Message::new("alone"))]);
    assert_eq!(result.unwrap().to_string(), "alone");
}
