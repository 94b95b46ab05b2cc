//! Mirror Factory contract: mAsset whitelisting and reward weights.

use serde::Serialize;

use crate::error::Result;
use crate::msg::{encode_base64, ExecuteMsg, QueryRequest};
use crate::types::{AccAddress, Decimal};

#[derive(Debug, Clone)]
pub struct Factory {
    contract: AccAddress,
}

/// Mint and reward parameters of a newly whitelisted mAsset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetParams {
    pub auction_discount: Decimal,
    pub min_collateral_ratio: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint_period: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Execute<'a> {
    UpdateConfig {
        #[serde(skip_serializing_if = "Option::is_none")]
        owner: Option<&'a AccAddress>,
        #[serde(skip_serializing_if = "Option::is_none")]
        token_code_id: Option<u64>,
    },
    UpdateWeight {
        asset_token: &'a AccAddress,
        weight: u32,
    },
    Whitelist {
        name: &'a str,
        symbol: &'a str,
        oracle_feeder: &'a AccAddress,
        params: &'a AssetParams,
    },
    PassCommand {
        contract_addr: &'a AccAddress,
        msg: String,
    },
    Distribute {},
    MigrateAsset {
        name: &'a str,
        symbol: &'a str,
        from_token: &'a AccAddress,
        end_price: Decimal,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Query {
    Config {},
    DistributionInfo {},
}

impl Factory {
    pub fn new(contract: AccAddress) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> &AccAddress {
        &self.contract
    }

    fn execute(&self, msg: Execute<'_>) -> Result<ExecuteMsg> {
        Ok(ExecuteMsg::new(self.contract.clone(), serde_json::to_value(msg)?))
    }

    fn query(&self, msg: Query) -> Result<QueryRequest> {
        Ok(QueryRequest::new(self.contract.clone(), serde_json::to_value(msg)?))
    }

    pub fn update_config(
        &self,
        owner: Option<&AccAddress>,
        token_code_id: Option<u64>,
    ) -> Result<ExecuteMsg> {
        self.execute(Execute::UpdateConfig {
            owner,
            token_code_id,
        })
    }

    pub fn update_weight(&self, asset_token: &AccAddress, weight: u32) -> Result<ExecuteMsg> {
        self.execute(Execute::UpdateWeight {
            asset_token,
            weight,
        })
    }

    /// Create and register a new mAsset tracked by `oracle_feeder`.
    pub fn whitelist(
        &self,
        name: &str,
        symbol: &str,
        oracle_feeder: &AccAddress,
        params: &AssetParams,
    ) -> Result<ExecuteMsg> {
        self.execute(Execute::Whitelist {
            name,
            symbol,
            oracle_feeder,
            params,
        })
    }

    /// Have the factory execute `raw_msg` on `contract_addr` as its owner.
    /// The message text is base64-encoded verbatim.
    pub fn pass_command(&self, contract_addr: &AccAddress, raw_msg: &str) -> Result<ExecuteMsg> {
        self.execute(Execute::PassCommand {
            contract_addr,
            msg: encode_base64(raw_msg),
        })
    }

    pub fn distribute(&self) -> Result<ExecuteMsg> {
        self.execute(Execute::Distribute {})
    }

    /// Replace `from_token` with a fresh mAsset, freezing the old one at `end_price`.
    pub fn migrate_asset(
        &self,
        name: &str,
        symbol: &str,
        from_token: &AccAddress,
        end_price: Decimal,
    ) -> Result<ExecuteMsg> {
        self.execute(Execute::MigrateAsset {
            name,
            symbol,
            from_token,
            end_price,
        })
    }

    pub fn get_config(&self) -> Result<QueryRequest> {
        self.query(Query::Config {})
    }

    pub fn get_distribution_info(&self) -> Result<QueryRequest> {
        self.query(Query::DistributionInfo {})
    }
}
