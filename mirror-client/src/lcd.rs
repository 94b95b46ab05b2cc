//! LCD REST client.
//!
//! Wraps `reqwest::Client` with the three legacy endpoints the CLI needs:
//! wasm smart queries, account lookup and block-mode broadcast.
//!
//! Requests time out after the configured duration. Nothing is retried;
//! a failed request is reported once and the process exits.

use async_trait::async_trait;
use mirror_core::{AccAddress, DecCoin, QueryRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use crate::signer::KeySigner;
use crate::transport::{u64_from_string_or_number, Transport, TxOutcome, TxReceipt, TxRequest};
use crate::tx::{StdFee, StdTx};

/// Connection and fee settings.
#[derive(Debug, Clone)]
pub struct LcdConfig {
    /// Base URL of the LCD, e.g. `https://lcd.terra.dev`.
    pub url: String,
    pub chain_id: String,
    /// Gas limit for every transaction.
    pub gas: u64,
    pub gas_price: DecCoin,
    pub timeout: Duration,
}

/// Account number and sequence, needed to sign.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountInfo {
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub account_number: u64,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub sequence: u64,
}

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Deserialize)]
struct AccountValue {
    value: AccountInfo,
}

#[derive(Deserialize)]
struct BroadcastResponse {
    #[serde(default)]
    code: Option<u32>,
    #[serde(flatten)]
    receipt: TxReceipt,
}

#[derive(Serialize)]
struct BroadcastRequest<'a> {
    tx: &'a StdTx,
    mode: &'static str,
}

/// HTTP client for a legacy LCD endpoint.
#[derive(Debug, Clone)]
pub struct LcdClient {
    http: reqwest::Client,
    config: LcdConfig,
    signer: Option<KeySigner>,
}

impl LcdClient {
    /// Create a client without a signing key; queries and `--generate-only`
    /// transactions still work.
    pub fn new(config: LcdConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            config,
            signer: None,
        })
    }

    pub fn with_signer(mut self, signer: KeySigner) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn config(&self) -> &LcdConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url.trim_end_matches('/'), path)
    }

    /// Run a wasm smart query and return the `result` payload.
    pub async fn smart_query(&self, contract: &AccAddress, msg: &Value) -> Result<Value> {
        let url = self.endpoint(&format!("/wasm/contracts/{}/store", contract));
        let query_msg = serde_json::to_string(msg)?;
        debug!(%contract, %query_msg, "smart query");

        let resp = self
            .http
            .get(&url)
            .query(&[("query_msg", query_msg.as_str())])
            .send()
            .await?;
        let envelope: Envelope<Value> = read_json(resp).await?;
        Ok(envelope.result)
    }

    /// Fetch account number and sequence for `address`.
    pub async fn account(&self, address: &AccAddress) -> Result<AccountInfo> {
        let url = self.endpoint(&format!("/auth/accounts/{}", address));
        debug!(%address, "account lookup");

        let resp = self.http.get(&url).send().await?;
        let envelope: Envelope<AccountValue> = read_json(resp).await?;
        Ok(envelope.result.value)
    }

    /// Broadcast a signed transaction in block mode.
    pub async fn broadcast(&self, tx: &StdTx) -> Result<TxReceipt> {
        let url = self.endpoint("/txs");
        let resp = self
            .http
            .post(&url)
            .json(&BroadcastRequest { tx, mode: "block" })
            .send()
            .await?;
        let body: BroadcastResponse = read_json(resp).await?;

        match body.code {
            Some(code) if code != 0 => Err(ClientError::Rejected {
                code,
                raw_log: body.receipt.raw_log,
            }),
            _ => {
                info!(txhash = %body.receipt.txhash, height = body.receipt.height, "transaction confirmed");
                Ok(body.receipt)
            }
        }
    }

    fn unsigned_tx(&self, request: &TxRequest) -> Result<StdTx> {
        let fee = StdFee::from_gas_price(self.config.gas, &self.config.gas_price)?;
        StdTx::unsigned(&request.sender, &request.msgs, fee, &request.memo)
    }
}

#[async_trait]
impl Transport for LcdClient {
    async fn query(&self, request: &QueryRequest) -> Result<Value> {
        self.smart_query(&request.contract, &request.msg).await
    }

    async fn execute(&self, request: &TxRequest) -> Result<TxOutcome> {
        let mut tx = self.unsigned_tx(request)?;
        if request.generate_only {
            return Ok(TxOutcome::Unsigned(tx));
        }

        let signer = self.signer.as_ref().ok_or(ClientError::MissingSigner)?;
        let account = self.account(&request.sender).await?;
        let sign_bytes = tx.sign_bytes(&self.config.chain_id, account.account_number, account.sequence)?;
        tx.signatures.push(signer.sign(&sign_bytes));

        info!(
            sender = %request.sender,
            sequence = account.sequence,
            msgs = tx.msg.len(),
            "broadcasting transaction"
        );
        self.broadcast(&tx).await.map(TxOutcome::Confirmed)
    }
}

/// Decode a JSON body, turning non-success statuses into `ClientError::Status`.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(&text),
        });
    }
    serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(format!("{}: {}", e, text)))
}

/// LCD errors usually arrive as `{"error": "..."}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
