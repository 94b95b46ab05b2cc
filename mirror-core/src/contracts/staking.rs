//! Mirror Staking contract: LP token bonding and reward withdrawal.

use serde::Serialize;
use serde_json::json;

use super::cw20_send;
use crate::error::Result;
use crate::msg::{ExecuteMsg, QueryRequest};
use crate::types::{AccAddress, Uint128};

#[derive(Debug, Clone)]
pub struct Staking {
    contract: AccAddress,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Execute<'a> {
    UpdateConfig {
        #[serde(skip_serializing_if = "Option::is_none")]
        owner: Option<&'a AccAddress>,
    },
    RegisterAsset {
        asset_token: &'a AccAddress,
        staking_token: &'a AccAddress,
    },
    Unbond {
        asset_token: &'a AccAddress,
        amount: Uint128,
    },
    Withdraw {
        #[serde(skip_serializing_if = "Option::is_none")]
        asset_token: Option<&'a AccAddress>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Query<'a> {
    Config {},
    PoolInfo {
        asset_token: &'a AccAddress,
    },
    RewardInfo {
        staker_addr: &'a AccAddress,
        #[serde(skip_serializing_if = "Option::is_none")]
        asset_token: Option<&'a AccAddress>,
    },
}

impl Staking {
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

    pub fn update_config(&self, owner: Option<&AccAddress>) -> Result<ExecuteMsg> {
        self.execute(Execute::UpdateConfig { owner })
    }

    pub fn register_asset(
        &self,
        asset_token: &AccAddress,
        staking_token: &AccAddress,
    ) -> Result<ExecuteMsg> {
        self.execute(Execute::RegisterAsset {
            asset_token,
            staking_token,
        })
    }

    /// Bond `amount` of the LP token of `asset_token`'s pool.
    pub fn bond(
        &self,
        lp_token: &AccAddress,
        asset_token: &AccAddress,
        amount: Uint128,
    ) -> Result<ExecuteMsg> {
        cw20_send(
            lp_token,
            &self.contract,
            amount,
            &json!({ "bond": { "asset_token": asset_token } }),
        )
    }

    pub fn unbond(&self, asset_token: &AccAddress, amount: Uint128) -> Result<ExecuteMsg> {
        self.execute(Execute::Unbond {
            asset_token,
            amount,
        })
    }

    /// Withdraw rewards for one pool, or all pools when `asset_token` is `None`.
    pub fn withdraw(&self, asset_token: Option<&AccAddress>) -> Result<ExecuteMsg> {
        self.execute(Execute::Withdraw { asset_token })
    }

    pub fn get_config(&self) -> Result<QueryRequest> {
        self.query(Query::Config {})
    }

    pub fn get_pool_info(&self, asset_token: &AccAddress) -> Result<QueryRequest> {
        self.query(Query::PoolInfo { asset_token })
    }

    pub fn get_reward_info(
        &self,
        staker_addr: &AccAddress,
        asset_token: Option<&AccAddress>,
    ) -> Result<QueryRequest> {
        self.query(Query::RewardInfo {
            staker_addr,
            asset_token,
        })
    }
}
