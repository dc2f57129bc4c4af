//! Integration tests for the gantry binary

use assert_cmd::Command;
use predicates::prelude::*;

fn gantry_cmd() -> Command {
    let mut cmd = Command::cargo_bin("gantry").expect("binary builds");
    cmd.env_remove("ASSISTANT_URL")
        .env("ASSISTANT_RETRY_ATTEMPTS", "1")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn help_lists_every_subcommand() {
    let assert = gantry_cmd().arg("--help").assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 help");

    for command in [
        "health", "status", "models", "chat", "ask", "analyze", "recommend", "history", "clear",
    ] {
        assert!(output.contains(command), "help should mention {command}");
    }
}

#[test]
fn invalid_context_exits_with_failure() {
    gantry_cmd()
        .args(["ask", "What is Rust?", "--context", "{not json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid JSON context: {not json"));
}

#[test]
fn unreachable_service_prints_error_and_hint() {
    gantry_cmd()
        .args(["--url", "http://127.0.0.1:9", "--timeout", "2", "health"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: "))
        .stdout(predicate::str::contains(
            "make sure the assistant service is running at http://127.0.0.1:9",
        ));
}

#[test]
fn chat_ends_on_quit_without_contacting_the_service() {
    gantry_cmd()
        .args(["--url", "http://127.0.0.1:9", "chat"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}
