//! CW20 token contract.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::msg::{to_binary, ExecuteMsg, QueryRequest};
use crate::types::{AccAddress, Uint128};

#[derive(Debug, Clone)]
pub struct Token {
    contract: AccAddress,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Execute<'a> {
    Transfer {
        recipient: &'a AccAddress,
        amount: Uint128,
    },
    Burn {
        amount: Uint128,
    },
    Send {
        contract: &'a AccAddress,
        amount: Uint128,
        msg: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Query<'a> {
    Balance { address: &'a AccAddress },
    TokenInfo {},
}

impl Token {
    pub fn new(contract: AccAddress) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> &AccAddress {
        &self.contract
    }

    fn execute(&self, msg: Execute<'_>) -> Result<ExecuteMsg> {
        Ok(ExecuteMsg::new(self.contract.clone(), serde_json::to_value(msg)?))
    }

    fn query(&self, msg: Query<'_>) -> Result<QueryRequest> {
        Ok(QueryRequest::new(self.contract.clone(), serde_json::to_value(msg)?))
    }

    pub fn transfer(&self, recipient: &AccAddress, amount: Uint128) -> Result<ExecuteMsg> {
        self.execute(Execute::Transfer { recipient, amount })
    }

    pub fn burn(&self, amount: Uint128) -> Result<ExecuteMsg> {
        self.execute(Execute::Burn { amount })
    }

    /// Send tokens to a contract, invoking its receive hook with `hook`.
    pub fn send(&self, contract: &AccAddress, amount: Uint128, hook: &Value) -> Result<ExecuteMsg> {
        self.execute(Execute::Send {
            contract,
            amount,
            msg: to_binary(hook)?,
        })
    }

    pub fn get_balance(&self, address: &AccAddress) -> Result<QueryRequest> {
        self.query(Query::Balance { address })
    }

    pub fn get_token_info(&self) -> Result<QueryRequest> {
        self.query(Query::TokenInfo {})
    }
}
