use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GET_CHECKSUM: &str = "d30ac1bc916e44feaf224f3905b4a41a084fa7149f92cba1b5cfdfa63e3da330";
const POST_CHECKSUM: &str = "f6fe2bd77e8aecbc5348b6d532e99f5c544da1305abeea6c1da361190ac3ff11";
const NOTIFICATION_CHECKSUM: &str = "VN4JeO2Jic2l7O9q4pK6x0B-QK8gHwNok5N3-5sqOhU=";

const NOTIFICATION: &str = r#"{"type":2,"serial":20000000632,"order_id":"1_2_M1031","currency":"ETH","txid":"","block_height":0,"tindex":0,"vout_index":0,"amount":"10000000000000000","fees":"","memo":"","broadcast_at":0,"chain_at":0,"from_address":"","to_address":"0x8382Cc1B05649AfBe179e341179fa869C2A9862b","wallet_id":2,"state":1,"confirm_blocks":0,"processing_state":0,"addon":{"fee_decimal":18},"decimal":18,"currency_bip44":60,"token_address":""}"#;

/// Command running in an empty directory with no secret in the environment
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sofa-checksum").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SOFA_API_SECRET")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_get_request() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args([
            "request",
            "from_time=1561651200",
            "to_time=1562255999",
            "type=2",
            "--secret",
            "API_SECRET",
            "--time",
            "1629346605",
            "--nonce",
            "RANDOM_STRING",
        ])
        .assert()
        .success()
        .stdout(format!("{GET_CHECKSUM}\n"));
}

#[test]
fn test_post_request_json() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args([
            "request",
            "--body",
            r#"{"block_num":1}"#,
            "--secret",
            "API_SECRET",
            "--time",
            "1629346575",
            "--nonce",
            "RANDOM_STRING",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(POST_CHECKSUM))
        .stdout(predicate::str::contains(r#""query": "t=1629346575&r=RANDOM_STRING""#));
}

#[test]
fn test_request_generates_time_and_nonce() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["request", "type=2", "--secret", "S", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#""r": "[0-9A-Z]{32}""#).unwrap())
        .stdout(predicate::str::is_match(r#""checksum": "[0-9a-f]{64}""#).unwrap());
}

#[test]
fn test_secret_from_env() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .env("SOFA_API_SECRET", "API_SECRET")
        .args([
            "request",
            "from_time=1561651200",
            "to_time=1562255999",
            "type=2",
            "-t",
            "1629346605",
            "-n",
            "RANDOM_STRING",
        ])
        .assert()
        .success()
        .stdout(format!("{GET_CHECKSUM}\n"));
}

#[test]
fn test_secret_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".sofa-checksum.toml"), "[api]\nsecret = \"API_SECRET\"\n").unwrap();
    cmd(&dir)
        .args(["callback", "--body", "{}"])
        .assert()
        .success()
        .stdout("UnYre6oBsL7B_AKDmvQMnHileDAJZ53zs4IsT86Wt5c=\n");
}

#[test]
fn test_missing_secret_fails() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["callback", "--body", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API secret"));
}

#[test]
fn test_callback_from_file() {
    let dir = TempDir::new().unwrap();
    let body = dir.path().join("notification.json");
    std::fs::write(&body, NOTIFICATION).unwrap();
    cmd(&dir)
        .args(["callback", "--secret", "API_SECRET", "--body-file"])
        .arg(&body)
        .assert()
        .success()
        .stdout(format!("{NOTIFICATION_CHECKSUM}\n"));
}

#[test]
fn test_callback_from_stdin() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["callback", "--secret", "API_SECRET", "--json"])
        .write_stdin(NOTIFICATION)
        .assert()
        .success()
        .stdout(predicate::str::contains(NOTIFICATION_CHECKSUM));
}

#[test]
fn test_callback_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["callback", "--secret", "S", "--body-file", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}
