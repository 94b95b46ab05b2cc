#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GOV: &str = "terra1qyqszqgpqyqszqgpqyqszqgpqyqszqgp5hm70u";
pub const MIR: &str = "terra1qgpqyqszqgpqyqszqgpqyqszqgpqyqsz9namy2";
pub const SENDER: &str = "terra1q5zs2pg9q5zs2pg9q5zs2pg9q5zs2pg99r67rk";
pub const TARGET: &str = "terra1pv9skzctpv9skzctpv9skzctpv9skzctttftdw";
pub const KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";

pub struct TestEnv {
    pub server: MockServer,
    pub home_dir: TempDir,
}

impl TestEnv {
    /// Mock LCD plus a home directory holding a complete config.
    pub async fn new() -> Self {
        let env = Self::bare().await;
        env.write_config(&format!(
            r#"
[signer]
address = "{SENDER}"
private_key = "{KEY}"

[contracts]
gov = "{GOV}"
mirror_token = "{MIR}"
"#
        ));
        env
    }

    /// Mock LCD and an empty home directory.
    pub async fn bare() -> Self {
        Self {
            server: MockServer::start().await,
            home_dir: TempDir::new().unwrap(),
        }
    }

    /// Write `~/.mirrorcli/config.toml` pointing at the mock LCD.
    pub fn write_config(&self, sections: &str) {
        let dir = self.home_dir.path().join(".mirrorcli");
        std::fs::create_dir_all(&dir).unwrap();
        let config = format!(
            "[network]\nlcd_url = \"{}\"\nchain_id = \"localterra\"\ngas = 200000\ntimeout_secs = 5\n{}",
            self.server.uri(),
            sections
        );
        std::fs::write(dir.join("config.toml"), config).unwrap();
    }

    pub fn mirrorcli(&self) -> Command {
        let mut cmd = Command::cargo_bin("mirrorcli").unwrap();
        let path = self.home_dir.path();
        cmd.env("HOME", path);
        cmd.env("USERPROFILE", path);
        cmd.env("NO_COLOR", "1");
        for var in [
            "MIRRORCLI_CONFIG",
            "MIRRORCLI_LCD_URL",
            "MIRRORCLI_CHAIN_ID",
            "MIRRORCLI_SENDER",
            "MIRRORCLI_PRIVATE_KEY",
            "MIRRORCLI_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Answer a smart query on `contract` for exactly `query_msg`.
    pub async fn mock_query(&self, contract: &str, query_msg: &str, result: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/wasm/contracts/{}/store", contract)))
            .and(query_param("query_msg", query_msg))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": "100",
                "result": result
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if the CLI sends any request at all.
    pub async fn expect_no_requests(&self) {
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }

    pub async fn mock_account(&self, account_number: u64, sequence: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/auth/accounts/{}", SENDER)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "height": "100",
                "result": {
                    "type": "core/Account",
                    "value": {
                        "address": SENDER,
                        "account_number": account_number.to_string(),
                        "sequence": sequence.to_string()
                    }
                }
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_broadcast(&self, response: Value) {
        Mock::given(method("POST"))
            .and(path("/txs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(&self.server)
            .await;
    }
}
