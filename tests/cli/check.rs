//! Tests for `envseal check`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_check_lists_keys_not_values() {
    let t = Test::sealed("OPENROUTER_API_KEY=sk-or-secret\nBACKEND_ALLOWED_ORIGINS=http://a\n");

    let output = t.check(PASSWORD);
    assert_success(&output);
    assert_stdout_contains(&output, "OPENROUTER_API_KEY");
    assert_stdout_contains(&output, "BACKEND_ALLOWED_ORIGINS");
    assert_not_leaked(&output, "sk-or-secret");
}

#[test]
fn test_check_json() {
    let t = Test::sealed("B=2\nA=1\n");

    let output = t.check_json(PASSWORD);
    assert_success(&output);

    let keys: Vec<String> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(keys, vec!["A", "B"]);
}

#[test]
fn test_check_wrong_password() {
    let t = Test::sealed("A=1\n");

    let output = t.check("not the password");
    assert_failure(&output);
    assert_stderr_contains(&output, "wrong password");
}

#[test]
fn test_check_corrupt_file_reads_as_wrong_password() {
    let t = Test::new();
    t.write(".env.enc", "ENCV1:AAAA\n");

    let output = t.check(PASSWORD);
    assert_failure(&output);
    let err = stderr(&output);
    assert!(err.contains("wrong password"));
    assert!(!err.contains("too short"));
    assert!(!err.contains("base64"));
}

#[test]
fn test_check_plaintext_file_reads_as_wrong_password() {
    let t = Test::new();
    t.write(".env.enc", "A=1\n");

    let output = t.check(PASSWORD);
    assert_failure(&output);
    let err = stderr(&output);
    assert!(err.contains("wrong password"));
    assert!(!err.contains("prefix"));
}

#[test]
fn test_check_missing_file() {
    let t = Test::new();

    let output = t.check(PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "not found");
    assert_stderr_contains(&output, "envseal encrypt");
}

#[test]
fn test_check_tampered_file() {
    let t = Test::sealed("A=1\n");
    let mut sealed = t.read(".env.enc").into_bytes();
    // Swap one base64 character in the body for a different valid one.
    let idx = sealed.len() / 2;
    sealed[idx] = if sealed[idx] == b'A' { b'B' } else { b'A' };
    t.write(".env.enc", &String::from_utf8(sealed).unwrap());

    t.cmd_with_password(PASSWORD)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password"));
}

#[test]
fn test_check_uses_settings_file() {
    let t = Test::with_plaintext("K=v\n");
    t.write(
        "envseal.toml",
        "encrypted_file = \"secrets.enc\"\npassword_var = \"BACKEND_ENV_PASSWORD\"\n",
    );

    t.cmd()
        .env("BACKEND_ENV_PASSWORD", PASSWORD)
        .arg("encrypt")
        .assert()
        .success();
    assert!(t.path("secrets.enc").exists());

    t.cmd()
        .env("BACKEND_ENV_PASSWORD", PASSWORD)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("K"));
}

#[test]
fn test_check_invalid_settings_file() {
    let t = Test::sealed("K=v\n");
    t.write("envseal.toml", "encrypted_file = [\n");

    let output = t.check(PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "envseal.toml");
}
