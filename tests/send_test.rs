//! Integration tests for `falcondag send` and the read-only commands that
//! inspect its results (`balance`, `history`, `tips`, `show`)

mod common;

use common::TestLedger;

/// Test a chain of transfers between funded keys
#[test]
fn test_send_workflow() {
    let ledger = TestLedger::funded(&[("alice", 1000), ("bob", 0)]);

    ledger.run_ok(&["send", "--from", "alice", "--to", "bob", "--amount", "300"]);
    ledger.run_ok(&["send", "--from", "bob", "--to", "alice", "--amount", "100"]);

    assert_eq!(ledger.balance("alice"), 800);
    assert_eq!(ledger.balance("bob"), 200);

    let lines = ledger.read_file("ledger.jsonl");
    assert_eq!(lines.lines().count(), 2);
}

/// Test that quiet mode prints the transaction hash and the hash is a tip
#[test]
fn test_send_quiet_prints_hash() {
    let ledger = TestLedger::funded(&[("alice", 10), ("bob", 0)]);

    let hash = ledger.run_ok(&["-q", "send", "--from", "alice", "--to", "bob", "--amount", "1"]);
    assert_eq!(hash.len(), 44, "hash: {hash}");

    let tips = ledger.run_ok(&["tips"]);
    assert_eq!(tips, hash);
}

/// Test that overspending is rejected and leaves the ledger untouched
#[test]
fn test_send_insufficient_funds() {
    let ledger = TestLedger::funded(&[("alice", 10), ("bob", 0)]);

    let output = ledger.run(&["send", "--from", "alice", "--to", "bob", "--amount", "11"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nsufficient"), "stderr: {stderr}");

    assert!(!ledger.file_exists("ledger.jsonl"));
    assert_eq!(ledger.balance("alice"), 10);
}

/// Test that zero amounts and self transfers are rejected
#[test]
fn test_send_rejects_zero_and_self() {
    let ledger = TestLedger::funded(&[("alice", 10), ("bob", 0)]);

    let zero = ledger.run(&["send", "--from", "alice", "--to", "bob", "--amount", "0"]);
    assert!(!zero.status.success());

    let own = ledger.run(&["send", "--from", "alice", "--to", "alice", "--amount", "1"]);
    assert!(!own.status.success());

    assert_eq!(ledger.balance("alice"), 10);
}

/// Test sending to a raw base64 address that has no stored key
#[test]
fn test_send_to_raw_address() {
    let ledger = TestLedger::funded(&[("alice", 10)]);
    let address = "Ym9i";

    ledger.run_ok(&["send", "--from", "alice", "--to", address, "--amount", "4"]);

    assert_eq!(ledger.balance(address), 4);
    assert_eq!(ledger.balance("alice"), 6);
}

/// Test that the receiver must be a key or valid base64
#[test]
fn test_send_to_unknown_receiver() {
    let ledger = TestLedger::funded(&[("alice", 10)]);
    let output = ledger.run(&["send", "--from", "alice", "--to", "not base64!", "--amount", "1"]);
    assert!(!output.status.success());
}

/// Test history lists both directions in acceptance order
#[test]
fn test_history() {
    let ledger = TestLedger::funded(&[("alice", 100), ("bob", 0)]);
    ledger.run_ok(&["send", "--from", "alice", "--to", "bob", "--amount", "30"]);
    ledger.run_ok(&["send", "--from", "bob", "--to", "alice", "--amount", "5"]);

    let json = ledger.run_json(&["history", "bob"]);
    let entries = json.as_array().expect("history output is an array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["direction"], "in");
    assert_eq!(entries[0]["amount"], 30);
    assert_eq!(entries[1]["direction"], "out");
    assert_eq!(entries[1]["amount"], 5);
}

/// Test show returns the transaction, its parents and children
#[test]
fn test_show_links_parents_and_children() {
    let ledger = TestLedger::funded(&[("alice", 100), ("bob", 0)]);
    let first = ledger.run_ok(&["-q", "send", "--from", "alice", "--to", "bob", "--amount", "1"]);
    let second = ledger.run_ok(&["-q", "send", "--from", "alice", "--to", "bob", "--amount", "2"]);

    let shown = ledger.run_ok(&["show", &second]);
    let json: serde_json::Value = serde_json::from_str(&shown).expect("show prints JSON");
    assert_eq!(json["hash"], second.as_str());
    assert_eq!(json["transaction"]["transaction"]["parents"][0], first.as_str());
    assert_eq!(json["transaction"]["transaction"]["amount"], 2);

    let parent: serde_json::Value =
        serde_json::from_str(&ledger.run_ok(&["show", &first])).expect("show prints JSON");
    assert_eq!(parent["children"][0], second.as_str());
}

/// Test show of an unknown hash fails
#[test]
fn test_show_unknown_hash() {
    let ledger = TestLedger::funded(&[("alice", 1)]);
    let output = ledger.run(&["show", "missing"]);
    assert!(!output.status.success());
}
