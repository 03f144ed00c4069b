//! Tests for `envseal encrypt`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_encrypt_writes_envelope() {
    let t = Test::with_plaintext("OPENROUTER_API_KEY=sk-or-secret\n");

    let output = t.encrypt(PASSWORD);
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted env saved to");

    let sealed = t.read(".env.enc");
    assert!(sealed.starts_with("ENCV1:"));
    assert!(!sealed.contains("sk-or-secret"));
    assert!(!sealed.contains("OPENROUTER_API_KEY"));
}

#[test]
fn test_encrypt_twice_with_force_changes_ciphertext() {
    let t = Test::sealed("A=1\n");
    let first = t.read(".env.enc");

    assert_success(&t.encrypt_force(PASSWORD));

    let second = t.read(".env.enc");
    assert_ne!(first, second);
}

#[test]
fn test_encrypt_refuses_to_overwrite() {
    let t = Test::sealed("A=1\n");
    let before = t.read(".env.enc");

    let output = t.encrypt(PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
    assert_stderr_contains(&output, "--force");
    assert_eq!(t.read(".env.enc"), before);
}

#[test]
fn test_encrypt_missing_input() {
    let t = Test::new();

    let output = t.encrypt(PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "does not exist");
    assert!(!t.path(".env.enc").exists());
}

#[test]
fn test_encrypt_without_password_or_terminal_fails() {
    let t = Test::with_plaintext("A=1\n");

    t.cmd()
        .arg("encrypt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no password available"));
    assert!(!t.path(".env.enc").exists());
}

#[test]
fn test_encrypt_custom_paths() {
    let t = Test::new();
    t.write("prod.env", "K=v\n");

    t.cmd_with_password(PASSWORD)
        .args(["encrypt", "-i", "prod.env", "-o", "prod.enc"])
        .assert()
        .success();

    assert!(t.path("prod.enc").exists());
    assert!(!t.path(".env.enc").exists());

    t.cmd_with_password(PASSWORD)
        .args(["check", "--file", "prod.enc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("K"));
}

#[test]
fn test_encrypt_with_dir_flag() {
    let t = Test::new();
    let component = t.path("backend");
    std::fs::create_dir(&component).unwrap();
    std::fs::write(component.join(".env"), "K=v\n").unwrap();

    t.cmd_with_password(PASSWORD)
        .arg("--dir")
        .arg(&component)
        .arg("encrypt")
        .assert()
        .success();

    assert!(component.join(".env.enc").exists());
}

#[test]
fn test_encrypt_rejects_blank_password() {
    let t = Test::with_plaintext("A=1\n");

    let output = t.encrypt("   ");
    assert_failure(&output);
    assert_stderr_contains(&output, "password cannot be empty");
    assert!(!t.path(".env.enc").exists());
}
