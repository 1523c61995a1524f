//! Runs the `echo` binary in a subprocess and checks its exit status and
//! output for the cases that end without waiting on ctrl-c.

#![allow(unused_crate_dependencies, reason = "Only the binary is exercised")]

use std::net::TcpListener;
use std::process::{Command, Output};

fn echo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_echo"))
        .args(args)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run echo")
}

fn free_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind a probe socket");
    let port = listener
        .local_addr()
        .expect("probe socket has no address")
        .port();
    port.to_string()
}

fn combined_output(out: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

#[test]
fn test_missing_port_exits_non_zero() {
    let out = echo(&[]);

    assert!(
        !out.status.success(),
        "echo without -l must fail:\n{}",
        combined_output(&out)
    );
}

#[test]
fn test_port_zero_exits_non_zero() {
    let out = echo(&["-l", "0"]);

    assert!(
        !out.status.success(),
        "echo -l 0 must fail:\n{}",
        combined_output(&out)
    );
}

#[test]
fn test_invalid_target_is_logged_not_fatal() {
    let port = free_port();
    let out = echo(&["-l", &port, "-d", "/ip4/127.0.0.1/tcp/1"]);
    let output = combined_output(&out);

    assert!(
        out.status.success(),
        "a failed exchange must not fail the process:\n{output}"
    );
    assert!(
        output.contains("invalid target address"),
        "the parse failure must be logged:\n{output}"
    );
}

#[test]
fn test_sender_announces_itself() {
    let port = free_port();
    let out = echo(&["-l", &port, "-d", "not a multiaddr"]);
    let output = combined_output(&out);

    assert!(
        output.contains(&format!("I am /ip4/127.0.0.1/tcp/{port}/p2p/")),
        "the full address must be logged before dialing:\n{output}"
    );
}
