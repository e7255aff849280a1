//! Integration tests for `falcondag init`
//!
//! - Creates falcondag.toml with genesis allocations
//! - Generates keys for funded names
//! - Refuses to reinitialize without --force
//! - --force discards the transaction log

mod common;

use common::{TestLedger, TEST_ALGORITHM};

/// Test that init writes the config and funds the named keys
#[test]
fn test_init_creates_config_and_keys() {
    let ledger = TestLedger::funded(&[("alice", 1000), ("bob", 50)]);

    assert!(ledger.file_exists("falcondag.toml"));
    assert!(ledger.file_exists("keys/alice.json"));
    assert!(ledger.file_exists("keys/bob.json"));

    let config = ledger.read_file("falcondag.toml");
    assert!(config.contains(TEST_ALGORITHM), "config: {config}");
    assert!(config.contains("[[genesis]]"), "config: {config}");

    assert_eq!(ledger.balance("alice"), 1000);
    assert_eq!(ledger.balance("bob"), 50);
}

/// Test JSON output of init
#[test]
fn test_init_json_output() {
    let ledger = TestLedger::new();
    let json = ledger.run_json(&[
        "init",
        "--algorithm",
        TEST_ALGORITHM,
        "--max-parents",
        "3",
        "--fund",
        "alice=7",
    ]);

    assert_eq!(json["status"], "success");
    assert_eq!(json["algorithm"], TEST_ALGORITHM);
    assert_eq!(json["max_parents"], 3);
    assert_eq!(json["genesis"][0]["balance"], 7);
    assert_eq!(json["created_keys"][0], "alice");
}

/// Test that a second init without --force fails
#[test]
fn test_init_twice_requires_force() {
    let ledger = TestLedger::funded(&[("alice", 1)]);

    let output = ledger.run(&["init", "--algorithm", TEST_ALGORITHM]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already initialized"), "stderr: {stderr}");
}

/// Test that --force resets the ledger and reuses existing keys
#[test]
fn test_init_force_discards_ledger() {
    let ledger = TestLedger::funded(&[("alice", 100), ("bob", 0)]);
    let alice = ledger.address("alice");

    ledger.run_ok(&["send", "--from", "alice", "--to", "bob", "--amount", "10"]);
    assert!(ledger.file_exists("ledger.jsonl"));

    ledger.run_ok(&[
        "init",
        "--force",
        "--algorithm",
        TEST_ALGORITHM,
        "--fund",
        "alice=100",
    ]);

    assert!(!ledger.file_exists("ledger.jsonl"));
    assert_eq!(ledger.address("alice"), alice, "existing key must be reused");
    assert_eq!(ledger.balance("alice"), 100);
}

/// Test that malformed allocations are rejected
#[test]
fn test_init_rejects_bad_allocation() {
    let ledger = TestLedger::new();
    let output = ledger.run(&["init", "--fund", "alice"]);
    assert!(!output.status.success());
    assert!(!ledger.file_exists("falcondag.toml"));
}

/// Test that max_parents = 0 is rejected before any key is generated
#[test]
fn test_init_rejects_zero_max_parents() {
    let ledger = TestLedger::new();
    let output = ledger.run(&[
        "init",
        "--algorithm",
        TEST_ALGORITHM,
        "--max-parents",
        "0",
        "--fund",
        "alice=5",
    ]);
    assert!(!output.status.success());
    assert!(!ledger.file_exists("falcondag.toml"));
    assert!(!ledger.file_exists("keys/alice.json"));
}

/// Test that funding the same name twice is rejected before keygen
#[test]
fn test_init_rejects_duplicate_fund_names() {
    let ledger = TestLedger::new();
    let output = ledger.run(&[
        "init",
        "--algorithm",
        TEST_ALGORITHM,
        "--fund",
        "alice=1",
        "--fund",
        "alice=2",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate"), "stderr: {stderr}");
    assert!(!ledger.file_exists("falcondag.toml"));
    assert!(!ledger.file_exists("keys/alice.json"));
}

/// Commands other than init need an initialized data directory
#[test]
fn test_uninitialized_ledger_errors() {
    let ledger = TestLedger::new();
    let output = ledger.run(&["tips"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("falcondag init"), "stderr: {stderr}");
}
