#![allow(missing_docs)]
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const KEY: &str = "D2F4A67B890CDE51";

fn filecrypt() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_filecrypt"));
    cmd.env_remove("FILECRYPT_KEY");
    cmd
}

#[test]
fn test_full_encrypt_decrypt_workflow() {
    // 1. Setup temporary files for the test
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("input.txt");
    let encrypted_path = temp_dir.path().join("encrypted.bin");
    let decrypted_path = temp_dir.path().join("decrypted.txt");
    let metadata_path = temp_dir.path().join("encrypted.bin.metadata.json");

    let input_content = "This is a test for the sealed container workflow.";
    fs::write(&input_path, input_content).unwrap();

    // 2. Encrypt the file
    filecrypt()
        .arg("--key")
        .arg(KEY)
        .arg("encrypt")
        .arg(&input_path)
        .arg("--output")
        .arg(&encrypted_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: "));

    assert!(encrypted_path.exists(), "Encrypted file should exist");
    assert!(metadata_path.exists(), "Metadata file should exist");

    let metadata: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&metadata_path).unwrap()).unwrap();
    assert_eq!(metadata["payload_length"], input_content.len());
    assert_eq!(metadata["ciphertext_hash"].as_str().unwrap().len(), 64);

    // 3. Decrypt the file
    filecrypt()
        .arg("--key")
        .arg(KEY)
        .arg("decrypt")
        .arg("--input")
        .arg(&encrypted_path)
        .arg("--output")
        .arg(&decrypted_path)
        .arg("--metadata")
        .arg(&metadata_path)
        .assert()
        .success();

    // 4. Verify the decrypted content
    let decrypted_content = fs::read_to_string(&decrypted_path).unwrap();
    assert_eq!(input_content, decrypted_content);
}

#[test]
fn test_encrypt_default_output_and_password() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("Hello.txt");
    fs::write(&input_path, "Hello, World!").unwrap();

    // The password is the little-endian prefix of SHA-256("Hello, World!").
    filecrypt()
        .env("FILECRYPT_KEY", KEY)
        .arg("encrypt")
        .arg(&input_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: 560004575"));

    assert!(temp_dir.path().join("Hello.txt.enc").exists());
    assert!(temp_dir.path().join("Hello.txt.enc.metadata.json").exists());
}

#[test]
fn test_decrypt_with_wrong_key_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("input.txt");
    let encrypted_path = temp_dir.path().join("input.enc");
    let decrypted_path = temp_dir.path().join("output.txt");
    fs::write(&input_path, "secret contents").unwrap();

    filecrypt()
        .args(["--key", KEY, "encrypt"])
        .arg(&input_path)
        .arg("-o")
        .arg(&encrypted_path)
        .assert()
        .success();

    filecrypt()
        .args(["--key", "0123456789abcdef", "decrypt", "-i"])
        .arg(&encrypted_path)
        .arg("-o")
        .arg(&decrypted_path)
        .assert()
        .failure();

    assert!(!decrypted_path.exists());
}

#[test]
fn test_decrypt_rejects_metadata_mismatch() {
    let temp_dir = tempdir().unwrap();
    let first_input = temp_dir.path().join("first.txt");
    let second_input = temp_dir.path().join("second.txt");
    let first_enc = temp_dir.path().join("first.enc");
    let second_enc = temp_dir.path().join("second.enc");
    let decrypted_path = temp_dir.path().join("out.txt");
    fs::write(&first_input, "first file").unwrap();
    fs::write(&second_input, "second file").unwrap();

    for (input, output) in [(&first_input, &first_enc), (&second_input, &second_enc)] {
        filecrypt()
            .args(["--key", KEY, "encrypt"])
            .arg(input)
            .arg("-o")
            .arg(output)
            .assert()
            .success();
    }

    // Open the second container against the first container's metadata.
    filecrypt()
        .args(["--key", KEY, "decrypt", "-i"])
        .arg(&second_enc)
        .arg("-o")
        .arg(&decrypted_path)
        .arg("--metadata")
        .arg(temp_dir.path().join("first.enc.metadata.json"))
        .assert()
        .failure();

    assert!(!decrypted_path.exists());
}

#[test]
fn test_transform_modes() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("Hello.txt");
    let encrypted_path = temp_dir.path().join("Hello.enc");
    let decrypted_path = temp_dir.path().join("Hello2.txt");
    fs::write(&input_path, "Hello, World!").unwrap();

    filecrypt()
        .args(["--key", KEY, "transform"])
        .arg(&input_path)
        .arg(&encrypted_path)
        .args(["--mode", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: 560004575"));

    filecrypt()
        .args(["--key", KEY, "transform"])
        .arg(&encrypted_path)
        .arg(&decrypted_path)
        .args(["--mode", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(13 bytes)"));

    assert_eq!(fs::read_to_string(&decrypted_path).unwrap(), "Hello, World!");
}

#[test]
fn test_transform_invalid_mode_fails() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("Hello.txt");
    let output_path = temp_dir.path().join("Hello.enc");
    fs::write(&input_path, "Hello, World!").unwrap();

    for mode in ["2", "-1"] {
        filecrypt()
            .args(["--key", KEY, "transform"])
            .arg(&input_path)
            .arg(&output_path)
            .args(["--mode", mode])
            .assert()
            .failure();
    }
    assert!(!output_path.exists());
}

#[test]
fn test_invalid_key_size_fails() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("input.txt");
    fs::write(&input_path, "data").unwrap();

    filecrypt()
        .args(["--key", "twelve bytes", "encrypt"])
        .arg(&input_path)
        .assert()
        .failure();

    filecrypt().arg("encrypt").arg(&input_path).assert().failure();
    assert!(!temp_dir.path().join("input.txt.enc").exists());
}

#[test]
fn test_digest_command() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("input.txt");
    fs::write(&input_path, "Hello, World!").unwrap();

    filecrypt()
        .arg("digest")
        .arg(&input_path)
        .args(["--hmac-key", "SampleKey1234567"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SHA-1: 0a0a9f2a6772942557ab5355d76af442f8f65e01",
        ))
        .stdout(predicate::str::contains(
            "SHA-256: dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f",
        ))
        .stdout(predicate::str::contains(
            "HMAC-SHA1: 2efaa63d8eae14a3e67fd962cc9c2c65e0765eae",
        ));
}

#[test]
fn test_hotp_command() {
    filecrypt()
        .args(["--key", "hex:1f8698690e02ca16618550ef7f19da8e"])
        .args(["hotp", "--counter", "86350", "--count", "3"])
        .assert()
        .success()
        .stdout("424001\n406818\n440884\n");

    filecrypt()
        .env("FILECRYPT_KEY", "O344A661890CDE51")
        .args(["hotp", "--counter", "1"])
        .assert()
        .success()
        .stdout("997037\n");
}

#[test]
fn test_demo_command() {
    filecrypt()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SHA-1: 943a702d06f34599aee1f8da8ef9f7296031d699",
        ))
        .stdout(predicate::str::contains("AES Decrypted: Hello, world!"))
        .stdout(predicate::str::contains(
            "HMAC-SHA1: caca713871fad735ea062e679e33ab5ccb648ba0",
        ));
}
