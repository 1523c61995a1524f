//! Runs the `stock` binary in a subprocess and checks the identity it prints.

#![allow(unused_crate_dependencies, reason = "Only the binary is exercised")]

use std::process::Command;

use libp2p::PeerId;

const PREFIX: &str = "Hello World, my hosts ID is ";

fn stock_peer_id() -> PeerId {
    let out = Command::new(env!("CARGO_BIN_EXE_stock"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run stock");

    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(
        out.status.success(),
        "stock must exit cleanly:\n{stdout}{}",
        String::from_utf8_lossy(&out.stderr)
    );

    let id = stdout
        .lines()
        .find_map(|line| line.strip_prefix(PREFIX))
        .unwrap_or_else(|| panic!("greeting missing from stdout:\n{stdout}"));

    id.trim()
        .parse()
        .unwrap_or_else(|err| panic!("{id:?} is not a peer id: {err}"))
}

#[test]
fn test_prints_host_identity() {
    let peer_id = stock_peer_id();

    assert!(
        peer_id.to_base58().starts_with("12D3Koo"),
        "ed25519 identities are inlined: {peer_id}"
    );
}

#[test]
fn test_identity_is_fresh_each_run() {
    assert_ne!(
        stock_peer_id(),
        stock_peer_id(),
        "every run must use a new random identity"
    );
}
