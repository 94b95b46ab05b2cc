//! Amino-JSON transaction encoding.
//!
//! The legacy LCD accepts `StdTx` documents in amino JSON. Signatures cover
//! the canonical `StdSignDoc`: keys sorted at every level, no whitespace, and
//! `<`, `>`, `&` escaped the way the chain's JSON encoder does it.

use mirror_core::msg::encode_base64;
use mirror_core::{AccAddress, Coin, DecCoin, ExecuteMsg, MirrorError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Result;

/// Amino type of the wasm execute message.
pub const MSG_EXECUTE_CONTRACT: &str = "wasm/MsgExecuteContract";

/// Amino type of a secp256k1 public key.
pub const PUB_KEY_SECP256K1: &str = "tendermint/PubKeySecp256k1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    /// Gas limit, string-encoded.
    pub gas: String,
}

impl StdFee {
    /// Fee for `gas` units at `gas_price`, rounded up.
    pub fn from_gas_price(gas: u64, gas_price: &DecCoin) -> Result<Self> {
        let amount = gas_price
            .amount
            .checked_mul_ceil(u128::from(gas))
            .ok_or_else(|| MirrorError::InvalidCoin(gas_price.to_string()))?;
        Ok(Self {
            amount: vec![Coin::new(amount, gas_price.denom.clone())],
            gas: gas.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AminoMsg {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignature {
    pub pub_key: PubKey,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdTx {
    pub msg: Vec<AminoMsg>,
    pub fee: StdFee,
    pub signatures: Vec<StdSignature>,
    pub memo: String,
}

impl StdTx {
    /// Build an unsigned transaction executing `msgs` as `sender`.
    pub fn unsigned(sender: &AccAddress, msgs: &[ExecuteMsg], fee: StdFee, memo: &str) -> Result<Self> {
        let msg = msgs
            .iter()
            .map(|m| execute_contract(sender, m))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            msg,
            fee,
            signatures: Vec::new(),
            memo: memo.to_string(),
        })
    }

    /// Canonical bytes to sign for this transaction.
    pub fn sign_bytes(&self, chain_id: &str, account_number: u64, sequence: u64) -> Result<Vec<u8>> {
        let doc = json!({
            "account_number": account_number.to_string(),
            "chain_id": chain_id,
            "fee": self.fee,
            "memo": self.memo,
            "msgs": self.msg,
            "sequence": sequence.to_string(),
        });
        let encoded = serde_json::to_string(&sort_keys(doc))?;
        Ok(escape_html(&encoded).into_bytes())
    }
}

/// Wrap a contract call as an amino `MsgExecuteContract`.
pub fn execute_contract(sender: &AccAddress, msg: &ExecuteMsg) -> Result<AminoMsg> {
    let execute_msg = serde_json::to_vec(&msg.msg).map_err(MirrorError::from)?;
    Ok(AminoMsg {
        kind: MSG_EXECUTE_CONTRACT.to_string(),
        value: json!({
            "sender": sender,
            "contract": msg.contract,
            "execute_msg": encode_base64(execute_msg),
            "coins": msg.coins,
        }),
    })
}

/// Rebuild every object with its keys in lexicographic order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn escape_html(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "terra1q5zs2pg9q5zs2pg9q5zs2pg9q5zs2pg99r67rk";
    const GOV: &str = "terra1qyqszqgpqyqszqgpqyqszqgpqyqszqgp5hm70u";

    fn sample_tx(memo: &str) -> StdTx {
        let sender = AccAddress::new(SENDER).unwrap();
        let msg = ExecuteMsg::new(
            AccAddress::new(GOV).unwrap(),
            json!({ "end_poll": { "poll_id": 1 } }),
        );
        let fee = StdFee::from_gas_price(200_000, &"0.15uusd".parse().unwrap()).unwrap();
        StdTx::unsigned(&sender, &[msg], fee, memo).unwrap()
    }

    #[test]
    fn test_fee_rounds_up() {
        let fee = StdFee::from_gas_price(3, &"0.15uusd".parse().unwrap()).unwrap();
        assert_eq!(fee.amount, vec![Coin::new(1, "uusd")]);
        assert_eq!(fee.gas, "3");
    }

    #[test]
    fn test_execute_contract_encodes_message() {
        let tx = sample_tx("");
        let value = &tx.msg[0].value;
        assert_eq!(tx.msg[0].kind, MSG_EXECUTE_CONTRACT);
        assert_eq!(value["sender"], SENDER);
        assert_eq!(value["contract"], GOV);
        assert_eq!(
            value["execute_msg"],
            encode_base64(r#"{"end_poll":{"poll_id":1}}"#)
        );
    }

    #[test]
    fn test_sign_bytes_are_sorted_and_compact() {
        let bytes = sample_tx("").sign_bytes("columbus-4", 7, 3).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(r#"{"account_number":"7","chain_id":"columbus-4","fee":{"amount":[{"amount":"30000","denom":"uusd"}],"gas":"200000"},"memo":"","msgs":[{"type":"wasm/MsgExecuteContract","value":{"coins":[],"contract":""#));
        assert!(text.ends_with(r#""sequence":"3"}"#));
        assert!(!text.contains(' '));
    }

    #[test]
    fn test_sign_bytes_escape_html() {
        let text = String::from_utf8(sample_tx("a<b>&c").sign_bytes("c", 0, 0).unwrap()).unwrap();
        assert!(text.contains(r#""memo":"a\u003cb\u003e\u0026c""#));
    }
}
